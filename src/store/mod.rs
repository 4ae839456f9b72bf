// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for diagrams on disk.
//!
//! One diagram per XML file. Reads classify failures by cause; writes go through a temp file
//! and an atomic rename.

pub mod diagram_file;

pub use diagram_file::{load_diagram, save_diagram, LoadError, SaveError, WriteDurability};
