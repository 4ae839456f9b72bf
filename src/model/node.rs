// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Node variants of thinking-process diagrams and their prototype data.

use std::fmt;

/// Outline drawn around a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BorderType {
    RoundRect,
    SharpRect,
    Hexagon,
    Ellipse,
}

/// Integer canvas position of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Data of a single node instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    border: BorderType,
    editable: bool,
    content: String,
    position: Option<Point>,
}

impl NodeData {
    const fn prototype(border: BorderType, editable: bool) -> Self {
        Self {
            border,
            editable,
            content: String::new(),
            position: None,
        }
    }

    /// Copies shape and editability, replacing content and position.
    pub fn clone_with(&self, content: impl Into<String>, position: Option<Point>) -> Self {
        Self {
            border: self.border,
            editable: self.editable,
            content: content.into(),
            position,
        }
    }

    pub fn border(&self) -> BorderType {
        self.border
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Variant this node was instantiated from.
    pub fn node_type(&self) -> NodeType {
        NodeType::from_border(self.border)
    }

    pub(crate) fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub(crate) fn set_position(&mut self, position: Option<Point>) {
        self.position = position;
    }
}

/// The valid node kinds in thinking-process diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    Statement,
    Task,
    Obstacle,
    /// Unlabelled junction node; its text cannot be edited.
    Ellipse,
}

static PROTOTYPES: [NodeData; 4] = [
    NodeData::prototype(BorderType::RoundRect, true),
    NodeData::prototype(BorderType::SharpRect, true),
    NodeData::prototype(BorderType::Hexagon, true),
    NodeData::prototype(BorderType::Ellipse, false),
];

impl NodeType {
    pub const ALL: [NodeType; 4] = [Self::Statement, Self::Task, Self::Obstacle, Self::Ellipse];

    fn slot(self) -> usize {
        match self {
            Self::Statement => 0,
            Self::Task => 1,
            Self::Obstacle => 2,
            Self::Ellipse => 3,
        }
    }

    pub fn border(self) -> BorderType {
        self.prototype().border
    }

    pub fn is_editable(self) -> bool {
        self.prototype().editable
    }

    pub fn prototype(self) -> &'static NodeData {
        &PROTOTYPES[self.slot()]
    }

    pub fn instantiate(self, content: impl Into<String>, position: Option<Point>) -> NodeData {
        self.prototype().clone_with(content, position)
    }

    /// An empty ellipse, used for junctions that carry no text.
    pub fn new_ellipse_at(position: Point) -> NodeData {
        Self::Ellipse.instantiate("", Some(position))
    }

    /// Each border belongs to exactly one variant.
    pub fn from_border(border: BorderType) -> Self {
        match border {
            BorderType::RoundRect => Self::Statement,
            BorderType::SharpRect => Self::Task,
            BorderType::Hexagon => Self::Obstacle,
            BorderType::Ellipse => Self::Ellipse,
        }
    }

    /// Stable name used by the file format.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Statement => "statement",
            Self::Task => "task",
            Self::Obstacle => "obstacle",
            Self::Ellipse => "ellipse",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|node_type| node_type.slug() == slug)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{BorderType, NodeType, Point};

    #[rstest]
    #[case(NodeType::Statement, BorderType::RoundRect, true)]
    #[case(NodeType::Task, BorderType::SharpRect, true)]
    #[case(NodeType::Obstacle, BorderType::Hexagon, true)]
    #[case(NodeType::Ellipse, BorderType::Ellipse, false)]
    fn instantiate_inherits_shape_and_editability(
        #[case] node_type: NodeType,
        #[case] border: BorderType,
        #[case] editable: bool,
    ) {
        let before = node_type.prototype().clone();

        let node = node_type.instantiate("Sales are falling", Some(Point::new(4, 9)));

        assert_eq!(node.border(), border);
        assert_eq!(node.is_editable(), editable);
        assert_eq!(node.content(), "Sales are falling");
        assert_eq!(node.position(), Some(Point::new(4, 9)));
        assert_eq!(node.node_type(), node_type);
        assert_eq!(node_type.prototype(), &before);
        assert_eq!(node_type.prototype().content(), "");
        assert_eq!(node_type.prototype().position(), None);
    }

    #[test]
    fn prototype_reads_are_stable() {
        for node_type in NodeType::ALL {
            assert!(std::ptr::eq(node_type.prototype(), node_type.prototype()));
            assert_eq!(node_type.border(), node_type.prototype().border());
            assert_eq!(node_type.is_editable(), node_type.prototype().is_editable());
        }
    }

    #[test]
    fn new_ellipse_is_empty_and_read_only() {
        let node = NodeType::new_ellipse_at(Point::new(-3, 12));

        assert_eq!(node.border(), BorderType::Ellipse);
        assert!(!node.is_editable());
        assert!(node.content().is_empty());
        assert_eq!(node.position(), Some(Point::new(-3, 12)));
    }

    #[test]
    fn slugs_round_trip_through_from_slug() {
        for node_type in NodeType::ALL {
            assert_eq!(NodeType::from_slug(node_type.slug()), Some(node_type));
        }
        assert_eq!(NodeType::from_slug("cloud"), None);
    }
}
