// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Diagrams hold typed nodes (instantiated from the fixed node prototypes) and the links
//! between them.

pub mod diagram;
pub mod ids;
pub mod node;

pub use diagram::{Diagram, DiagramError, DiagramType, Link};
pub use ids::{Id, IdError, LinkId, NodeId};
pub use node::{BorderType, NodeData, NodeType, Point};
