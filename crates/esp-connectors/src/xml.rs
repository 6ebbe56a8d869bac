// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Connector XML dialect.
//!
//! ```xml
//! <connector class="fs" name="reader" active="true" type="subscribe">
//!   <properties>
//!     <property name="fsname">input.csv</property>
//!   </properties>
//! </connector>
//! ```
//!
//! Parsing goes through `roxmltree` into an owned [`ConnectorElement`];
//! writing is done by hand so attribute and property order are exact.

use crate::error::{ConnectorError, Result};
use crate::value::{BoolFormat, DirectionTokens};
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::debug;

pub const CONNECTOR_TAG: &str = "connector";
pub const CONNECTORS_TAG: &str = "connectors";
const PROPERTIES_TAG: &str = "properties";
const PROPERTY_TAG: &str = "property";

/// Output settings for connector XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlOptions {
    /// Spelling of the `type` attribute.
    #[serde(default)]
    pub direction_tokens: DirectionTokens,

    /// Spelling of boolean property values and `active`.
    #[serde(default)]
    pub bool_format: BoolFormat,

    /// Indent nested elements, one per line.
    #[serde(default)]
    pub pretty: bool,

    /// Spaces per nesting level when `pretty` is set.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    2
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            direction_tokens: DirectionTokens::default(),
            bool_format: BoolFormat::default(),
            pretty: false,
            indent: default_indent(),
        }
    }
}

impl XmlOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

/// A `<connector>` element detached from its document.
///
/// Holds the raw attribute and property text; typing happens once the
/// variant is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorElement {
    pub class: String,
    pub name: Option<String>,
    pub active: Option<String>,
    /// The `type` attribute.
    pub direction: Option<String>,
    /// `(name, text)` pairs in document order.
    pub properties: Vec<(String, String)>,
}

impl ConnectorElement {
    /// Parse a document whose root is a single `<connector>`.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = parse_document(xml)?;
        let root = doc.root_element();
        if root.tag_name().name() != CONNECTOR_TAG {
            return Err(ConnectorError::UnexpectedElement {
                expected: CONNECTOR_TAG,
                found: root.tag_name().name().to_string(),
            });
        }
        Self::from_node(root)
    }

    /// Read a `<connector>` node.
    pub fn from_node(node: Node<'_, '_>) -> Result<Self> {
        let class = node
            .attribute("class")
            .ok_or(ConnectorError::MissingAttribute("class"))?
            .to_string();

        let mut properties = Vec::new();
        for container in node
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == PROPERTIES_TAG)
        {
            for property in container
                .children()
                .filter(|n| n.is_element() && n.tag_name().name() == PROPERTY_TAG)
            {
                let name = property
                    .attribute("name")
                    .ok_or(ConnectorError::MissingAttribute("name"))?;
                properties.push((name.to_string(), element_text(&property)));
            }
        }

        Ok(Self {
            class,
            name: node.attribute("name").map(str::to_string),
            active: node.attribute("active").map(str::to_string),
            direction: node.attribute("type").map(str::to_string),
            properties,
        })
    }

    /// Property text by name; a repeated name resolves to its last occurrence.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, text)| text.as_str())
    }

    /// Direction text: the `type` attribute, else a `type` property.
    pub fn direction_text(&self) -> Option<&str> {
        self.direction.as_deref().or_else(|| self.property("type"))
    }

    pub fn to_xml(&self, options: &XmlOptions) -> String {
        let mut out = String::new();
        self.write(&mut out, options, 0);
        if options.pretty {
            out.push('\n');
        }
        out
    }

    pub(crate) fn write(&self, out: &mut String, options: &XmlOptions, depth: usize) {
        let pad = Indent::new(options, depth);

        pad.open(out);
        out.push('<');
        out.push_str(CONNECTOR_TAG);
        push_attr(out, "class", &self.class);
        if let Some(name) = &self.name {
            push_attr(out, "name", name);
        }
        if let Some(active) = &self.active {
            push_attr(out, "active", active);
        }
        if let Some(direction) = &self.direction {
            push_attr(out, "type", direction);
        }
        out.push('>');

        let inner = pad.nested();
        inner.open(out);
        if self.properties.is_empty() {
            let _ = write!(out, "<{PROPERTIES_TAG} />");
        } else {
            let _ = write!(out, "<{PROPERTIES_TAG}>");
            let leaf = inner.nested();
            for (name, text) in &self.properties {
                leaf.open(out);
                let _ = write!(out, "<{PROPERTY_TAG}");
                push_attr(out, "name", name);
                if text.is_empty() {
                    out.push_str(" />");
                } else {
                    out.push('>');
                    out.push_str(&escape_text(text));
                    let _ = write!(out, "</{PROPERTY_TAG}>");
                }
            }
            inner.open(out);
            let _ = write!(out, "</{PROPERTIES_TAG}>");
        }

        pad.open(out);
        let _ = write!(out, "</{CONNECTOR_TAG}>");
    }
}

/// Line-break-and-pad helper for pretty output.
#[derive(Clone, Copy)]
struct Indent {
    enabled: bool,
    width: usize,
    depth: usize,
}

impl Indent {
    fn new(options: &XmlOptions, depth: usize) -> Self {
        Self {
            enabled: options.pretty,
            width: options.indent,
            depth,
        }
    }

    fn nested(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    /// Start a line at this depth. The very first line of a document gets
    /// no leading break.
    fn open(self, out: &mut String) {
        if !self.enabled {
            return;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&" ".repeat(self.width * self.depth));
    }
}

fn element_text(node: &Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

/// Parse XML, reporting the failing line on error.
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    Document::parse(xml).map_err(|e| {
        let pos = e.pos();
        for (i, line) in xml.lines().enumerate() {
            debug!("{:>4} {}", i + 1, line);
        }
        let snippet = xml
            .lines()
            .nth(pos.row.saturating_sub(1) as usize)
            .unwrap_or_default()
            .trim()
            .to_string();
        ConnectorError::MalformedDocument {
            line: pos.row,
            column: pos.col,
            message: e.to_string(),
            snippet,
        }
    })
}

/// Every connector in a document: the root itself if it is a
/// `<connector>`, otherwise each `<connector>` below it in document order.
pub fn parse_connectors(xml: &str) -> Result<Vec<ConnectorElement>> {
    let doc = parse_document(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() == CONNECTOR_TAG {
        return Ok(vec![ConnectorElement::from_node(root)?]);
    }
    root.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == CONNECTOR_TAG)
        .map(ConnectorElement::from_node)
        .collect()
}

/// Write several connectors inside a `<connectors>` container.
pub fn write_connectors(elements: &[ConnectorElement], options: &XmlOptions) -> String {
    let mut out = String::new();
    let pad = Indent::new(options, 0);
    pad.open(&mut out);
    if elements.is_empty() {
        let _ = write!(out, "<{CONNECTORS_TAG} />");
    } else {
        let _ = write!(out, "<{CONNECTORS_TAG}>");
        for element in elements {
            element.write(&mut out, options, 1);
        }
        pad.open(&mut out);
        let _ = write!(out, "</{CONNECTORS_TAG}>");
    }
    if options.pretty {
        out.push('\n');
    }
    out
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
}

/// Escape character data.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for double-quoted output.
pub fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#09;")
}
