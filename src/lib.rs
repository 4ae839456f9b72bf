// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! jThinker: thinking-process diagrams (current/future reality trees, evaporating clouds,
//! prerequisite and transition trees) edited in a tabbed terminal deck.

pub mod config;
pub mod deck;
pub mod format;
pub mod model;
pub mod store;
pub mod tui;
