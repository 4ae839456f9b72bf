// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram documents in XML.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <diagram version="1" type="current-reality-tree">
//!   <node id="n1" kind="statement" x="10" y="20" content="Sales are falling"/>
//!   <node id="n2" kind="ellipse" x="10" y="60"/>
//!   <link id="l1" from="n2" to="n1"/>
//! </diagram>
//! ```
//!
//! Links may appear before the nodes they reference; endpoints are resolved once the whole
//! document has been read.

use std::collections::BTreeMap;

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::model::{Diagram, DiagramType, LinkId, NodeId, NodeType, Point};

pub const FORMAT_VERSION: &str = "1";

const ROOT_ELEMENT: &str = "diagram";
const NODE_ELEMENT: &str = "node";
const LINK_ELEMENT: &str = "link";

#[derive(Debug, Error)]
pub enum XmlFormatError {
    #[error("malformed XML at byte {position}: {source}")]
    Malformed {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("document has no <diagram> root element")]
    MissingRoot,
    #[error("document ends inside <{element}>")]
    Truncated { element: String },
    #[error("unsupported diagram document at byte {position}: {reason}")]
    Schema { position: usize, reason: String },
}

impl XmlFormatError {
    fn schema(position: usize, reason: impl Into<String>) -> Self {
        Self::Schema {
            position,
            reason: reason.into(),
        }
    }
}

struct PendingLink {
    position: usize,
    link_id: LinkId,
    from: NodeId,
    to: NodeId,
}

pub fn parse_diagram(source: &str) -> Result<Diagram, XmlFormatError> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(true);

    let mut diagram: Option<Diagram> = None;
    let mut root_done = false;
    let mut open: Vec<String> = Vec::new();
    let mut links = Vec::new();
    let mut buf = Vec::new();

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| XmlFormatError::Malformed {
                position: reader.buffer_position(),
                source,
            })?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = element_name(e);

                match open.len() {
                    0 => {
                        if root_done {
                            return Err(XmlFormatError::schema(
                                position,
                                "more than one root element",
                            ));
                        }
                        diagram = Some(parse_root(e, &name, position)?);
                        root_done = is_empty;
                    }
                    1 => {
                        let Some(diagram) = diagram.as_mut() else {
                            return Err(XmlFormatError::MissingRoot);
                        };
                        match name.as_str() {
                            NODE_ELEMENT => parse_node(e, diagram, position)?,
                            LINK_ELEMENT => links.push(parse_link(e, position)?),
                            other => {
                                return Err(XmlFormatError::schema(
                                    position,
                                    format!("unexpected element <{other}> inside <diagram>"),
                                ))
                            }
                        }
                    }
                    _ => {
                        return Err(XmlFormatError::schema(
                            position,
                            format!("unexpected nested element <{name}>"),
                        ))
                    }
                }

                if !is_empty {
                    open.push(name);
                }
            }
            Event::End(_) => {
                open.pop();
                if open.is_empty() {
                    root_done = true;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(element) = open.pop() {
        return Err(XmlFormatError::Truncated { element });
    }
    let mut diagram = diagram.ok_or(XmlFormatError::MissingRoot)?;

    for link in links {
        diagram
            .insert_link(link.link_id, link.from, link.to)
            .map_err(|err| XmlFormatError::schema(link.position, err.to_string()))?;
    }

    Ok(diagram)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn read_attributes(
    e: &BytesStart<'_>,
    position: usize,
) -> Result<BTreeMap<String, String>, XmlFormatError> {
    let mut attributes = BTreeMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| XmlFormatError::Malformed {
            position,
            source: err.into(),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|source| XmlFormatError::Malformed { position, source })?
            .into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

fn required<'a>(
    attributes: &'a BTreeMap<String, String>,
    element: &str,
    key: &str,
    position: usize,
) -> Result<&'a str, XmlFormatError> {
    attributes.get(key).map(String::as_str).ok_or_else(|| {
        XmlFormatError::schema(position, format!("<{element}> is missing attribute {key:?}"))
    })
}

fn parse_root(e: &BytesStart<'_>, name: &str, position: usize) -> Result<Diagram, XmlFormatError> {
    if name != ROOT_ELEMENT {
        return Err(XmlFormatError::schema(
            position,
            format!("expected <{ROOT_ELEMENT}> root, found <{name}>"),
        ));
    }

    let attributes = read_attributes(e, position)?;
    if let Some(version) = attributes.get("version") {
        if version != FORMAT_VERSION {
            return Err(XmlFormatError::schema(
                position,
                format!("unsupported format version {version:?}"),
            ));
        }
    }

    let slug = required(&attributes, ROOT_ELEMENT, "type", position)?;
    let diagram_type = DiagramType::from_slug(slug).ok_or_else(|| {
        XmlFormatError::schema(position, format!("unknown diagram type {slug:?}"))
    })?;

    Ok(Diagram::new(diagram_type))
}

fn parse_node(
    e: &BytesStart<'_>,
    diagram: &mut Diagram,
    position: usize,
) -> Result<(), XmlFormatError> {
    let attributes = read_attributes(e, position)?;

    let node_id = parse_id::<NodeId>(&attributes, NODE_ELEMENT, "id", position)?;
    let kind = required(&attributes, NODE_ELEMENT, "kind", position)?;
    let node_type = NodeType::from_slug(kind)
        .ok_or_else(|| XmlFormatError::schema(position, format!("unknown node kind {kind:?}")))?;

    let point = match (attributes.get("x"), attributes.get("y")) {
        (None, None) => None,
        (Some(x), Some(y)) => Some(Point::new(
            parse_coordinate(x, "x", position)?,
            parse_coordinate(y, "y", position)?,
        )),
        _ => {
            return Err(XmlFormatError::schema(
                position,
                format!("node {node_id} must set both x and y or neither"),
            ))
        }
    };
    let content = attributes.get("content").cloned().unwrap_or_default();

    diagram
        .insert_node(node_id, node_type.instantiate(content, point))
        .map_err(|err| XmlFormatError::schema(position, err.to_string()))
}

fn parse_link(e: &BytesStart<'_>, position: usize) -> Result<PendingLink, XmlFormatError> {
    let attributes = read_attributes(e, position)?;
    Ok(PendingLink {
        position,
        link_id: parse_id(&attributes, LINK_ELEMENT, "id", position)?,
        from: parse_id(&attributes, LINK_ELEMENT, "from", position)?,
        to: parse_id(&attributes, LINK_ELEMENT, "to", position)?,
    })
}

fn parse_id<T: std::str::FromStr<Err = crate::model::IdError>>(
    attributes: &BTreeMap<String, String>,
    element: &str,
    key: &str,
    position: usize,
) -> Result<T, XmlFormatError> {
    let raw = required(attributes, element, key, position)?;
    raw.parse::<T>().map_err(|err| {
        XmlFormatError::schema(position, format!("<{element}> attribute {key:?}: {err}"))
    })
}

fn parse_coordinate(raw: &str, axis: &str, position: usize) -> Result<i32, XmlFormatError> {
    raw.trim().parse::<i32>().map_err(|_| {
        XmlFormatError::schema(position, format!("invalid {axis} coordinate {raw:?}"))
    })
}

/// Serializes a diagram; nodes and links are written in id order.
pub fn export_diagram(diagram: &Diagram) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<{ROOT_ELEMENT} version=\"{FORMAT_VERSION}\" type=\"{}\">\n",
        diagram.diagram_type().slug()
    ));

    for (node_id, node) in diagram.nodes() {
        out.push_str(&format!(
            "  <{NODE_ELEMENT} id=\"{}\" kind=\"{}\"",
            attribute_value(node_id.as_str()),
            node.node_type().slug()
        ));
        if let Some(point) = node.position() {
            out.push_str(&format!(" x=\"{}\" y=\"{}\"", point.x, point.y));
        }
        if !node.content().is_empty() {
            out.push_str(&format!(" content=\"{}\"", attribute_value(node.content())));
        }
        out.push_str("/>\n");
    }

    for (link_id, link) in diagram.links() {
        out.push_str(&format!(
            "  <{LINK_ELEMENT} id=\"{}\" from=\"{}\" to=\"{}\"/>\n",
            attribute_value(link_id.as_str()),
            attribute_value(link.from_node().as_str()),
            attribute_value(link.to_node().as_str())
        ));
    }

    out.push_str(&format!("</{ROOT_ELEMENT}>\n"));
    out
}

// Line breaks and tabs are written as character references so attribute-value
// normalization cannot turn them into spaces.
fn attribute_value(raw: &str) -> String {
    escape(raw)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}
