// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use super::ids::{Id, LinkId, NodeId};
use super::node::{NodeData, Point};

/// The kind of thinking-process diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramType {
    #[default]
    CurrentRealityTree,
    FutureRealityTree,
    EvaporatingCloud,
    PrerequisiteTree,
    TransitionTree,
}

impl DiagramType {
    pub const ALL: [DiagramType; 5] = [
        Self::CurrentRealityTree,
        Self::FutureRealityTree,
        Self::EvaporatingCloud,
        Self::PrerequisiteTree,
        Self::TransitionTree,
    ];

    /// Human-readable name, used as the title of a fresh tab.
    pub fn title(self) -> &'static str {
        match self {
            Self::CurrentRealityTree => "Current Reality Tree",
            Self::FutureRealityTree => "Future Reality Tree",
            Self::EvaporatingCloud => "Evaporating Cloud",
            Self::PrerequisiteTree => "Prerequisite Tree",
            Self::TransitionTree => "Transition Tree",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::CurrentRealityTree => "current-reality-tree",
            Self::FutureRealityTree => "future-reality-tree",
            Self::EvaporatingCloud => "evaporating-cloud",
            Self::PrerequisiteTree => "prerequisite-tree",
            Self::TransitionTree => "transition-tree",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// The next type in `ALL`, wrapping around.
    pub fn cycle(self) -> Self {
        let idx = Self::ALL.iter().position(|kind| *kind == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A directed cause/effect link between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    from: NodeId,
    to: NodeId,
}

impl Link {
    pub fn from_node(&self) -> &NodeId {
        &self.from
    }

    pub fn to_node(&self) -> &NodeId {
        &self.to
    }

    fn touches(&self, node_id: &NodeId) -> bool {
        &self.from == node_id || &self.to == node_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),
    #[error("unknown link {0}")]
    UnknownLink(LinkId),
    #[error("link {0} already exists")]
    DuplicateLinkId(LinkId),
    #[error("nodes {from} and {to} are already linked")]
    DuplicateLink { from: NodeId, to: NodeId },
    #[error("node {0} cannot be linked to itself")]
    SelfLink(NodeId),
    #[error("node {0} is not editable")]
    NotEditable(NodeId),
}

/// Content of one diagram: typed nodes and the links between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    diagram_type: DiagramType,
    nodes: BTreeMap<NodeId, NodeData>,
    links: BTreeMap<LinkId, Link>,
}

impl Diagram {
    pub fn new(diagram_type: DiagramType) -> Self {
        Self {
            diagram_type,
            nodes: BTreeMap::new(),
            links: BTreeMap::new(),
        }
    }

    pub fn diagram_type(&self) -> DiagramType {
        self.diagram_type
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, NodeData> {
        &self.nodes
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&NodeData> {
        self.nodes.get(node_id)
    }

    pub fn links(&self) -> &BTreeMap<LinkId, Link> {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a node under a freshly generated id.
    pub fn add_node(&mut self, data: NodeData) -> NodeId {
        let node_id = fresh_id("n", &self.nodes);
        self.nodes.insert(node_id.clone(), data);
        node_id
    }

    pub fn insert_node(&mut self, node_id: NodeId, data: NodeData) -> Result<(), DiagramError> {
        if self.nodes.contains_key(&node_id) {
            return Err(DiagramError::DuplicateNode(node_id));
        }
        self.nodes.insert(node_id, data);
        Ok(())
    }

    /// Removes the node together with every link touching it.
    pub fn remove_node(&mut self, node_id: &NodeId) -> Result<NodeData, DiagramError> {
        let data = self
            .nodes
            .remove(node_id)
            .ok_or_else(|| DiagramError::UnknownNode(node_id.clone()))?;
        self.links.retain(|_, link| !link.touches(node_id));
        Ok(data)
    }

    pub fn set_content(
        &mut self,
        node_id: &NodeId,
        content: impl Into<String>,
    ) -> Result<(), DiagramError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| DiagramError::UnknownNode(node_id.clone()))?;
        if !node.is_editable() {
            return Err(DiagramError::NotEditable(node_id.clone()));
        }
        node.set_content(content);
        Ok(())
    }

    pub fn move_node(&mut self, node_id: &NodeId, position: Point) -> Result<(), DiagramError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| DiagramError::UnknownNode(node_id.clone()))?;
        node.set_position(Some(position));
        Ok(())
    }

    pub fn add_link(&mut self, from: NodeId, to: NodeId) -> Result<LinkId, DiagramError> {
        self.check_link(&from, &to)?;
        let link_id = fresh_id("l", &self.links);
        self.links.insert(link_id.clone(), Link { from, to });
        Ok(link_id)
    }

    pub fn insert_link(
        &mut self,
        link_id: LinkId,
        from: NodeId,
        to: NodeId,
    ) -> Result<(), DiagramError> {
        if self.links.contains_key(&link_id) {
            return Err(DiagramError::DuplicateLinkId(link_id));
        }
        self.check_link(&from, &to)?;
        self.links.insert(link_id, Link { from, to });
        Ok(())
    }

    pub fn remove_link(&mut self, link_id: &LinkId) -> Result<Link, DiagramError> {
        self.links
            .remove(link_id)
            .ok_or_else(|| DiagramError::UnknownLink(link_id.clone()))
    }

    fn check_link(&self, from: &NodeId, to: &NodeId) -> Result<(), DiagramError> {
        for endpoint in [from, to] {
            if !self.nodes.contains_key(endpoint) {
                return Err(DiagramError::UnknownNode(endpoint.clone()));
            }
        }
        if from == to {
            return Err(DiagramError::SelfLink(from.clone()));
        }
        if self
            .links
            .values()
            .any(|link| &link.from == from && &link.to == to)
        {
            return Err(DiagramError::DuplicateLink {
                from: from.clone(),
                to: to.clone(),
            });
        }
        Ok(())
    }
}

fn fresh_id<T: Ord, V>(prefix: &str, taken: &BTreeMap<Id<T>, V>) -> Id<T> {
    let mut seq = taken.len() as u64 + 1;
    loop {
        let candidate = Id::numbered(prefix, seq);
        if !taken.contains_key(&candidate) {
            return candidate;
        }
        seq += 1;
    }
}
