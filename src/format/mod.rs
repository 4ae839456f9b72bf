// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram file formats.

pub mod xml;

pub use xml::{export_diagram, parse_diagram, XmlFormatError};
