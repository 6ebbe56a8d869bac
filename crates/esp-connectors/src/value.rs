// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property values, kinds and wire encodings.

use crate::error::{ConnectorError, Result};
use crate::schema::placeholder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Live properties of a connector, keyed by public property name.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Primitive kinds a property may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Int,
    Float,
    Bool,
    String,
}

impl PropertyKind {
    /// Canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
        }
    }

    /// Parse one of the dtype spellings used by connector schemas.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "int" | "integer" => Ok(Self::Int),
            "float" | "double" | "real" => Ok(Self::Float),
            "bool" | "boolean" => Ok(Self::Bool),
            "string" | "str" => Ok(Self::String),
            other => Err(ConnectorError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    /// Comma-joined on the wire; type-checks as a string.
    List(Vec<String>),
}

impl PropertyValue {
    /// Runtime kind of the value.
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Int(_) => PropertyKind::Int,
            Self::Float(_) => PropertyKind::Float,
            Self::Bool(_) => PropertyKind::Bool,
            Self::String(_) | Self::List(_) => PropertyKind::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers widen to reals.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// True for a real with no fractional part that fits an `i64` exactly.
    pub fn is_integral_float(&self) -> bool {
        // i64::MAX rounds up to 2^63 as f64, which is already out of range
        #[allow(clippy::cast_precision_loss)]
        let range = (i64::MIN as f64)..(i64::MAX as f64);
        matches!(self, Self::Float(f) if f.fract() == 0.0 && range.contains(f))
    }

    /// Equality with numeric widening (`Int(1) == Float(1.0)`).
    pub fn loosely_eq(&self, other: &Self) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    /// Text written into the `<property>` element.
    pub fn to_wire(&self, bools: BoolFormat) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Float(f) => format_float(*f),
            Self::Bool(b) => bools.token(*b).to_string(),
            Self::String(s) => s.clone(),
            Self::List(items) => items.join(","),
        }
    }

    /// Rebuild a typed value from XML text.
    ///
    /// Kinds are tried in declaration order; text that fits none of them is
    /// kept as a string so the type check downstream reports the mismatch.
    pub fn from_wire(text: &str, kinds: &[PropertyKind]) -> Self {
        if placeholder::is_placeholder_text(text) {
            return Self::String(text.to_string());
        }
        for kind in kinds {
            match kind {
                PropertyKind::Int => {
                    if let Ok(i) = text.trim().parse::<i64>() {
                        return Self::Int(i);
                    }
                }
                PropertyKind::Float => {
                    if let Ok(f) = text.trim().parse::<f64>() {
                        return Self::Float(f);
                    }
                }
                PropertyKind::Bool => {
                    if let Some(b) = parse_bool(text) {
                        return Self::Bool(b);
                    }
                }
                PropertyKind::String => return Self::String(text.to_string()),
            }
        }
        Self::String(text.to_string())
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "'{s}'"),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
            other => f.write_str(&other.to_wire(BoolFormat::Word)),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u16> for PropertyValue {
    fn from(v: u16) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(str::to_string).collect())
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

/// Parse the boolean spellings the engine accepts.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Connector direction relative to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The engine emits events outward.
    Publish,
    /// The engine receives events inward.
    Subscribe,
}

impl Direction {
    /// Anything starting with `p` is a publisher; everything else, including
    /// no value at all, is a subscriber.
    pub fn normalize(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.starts_with('p') => Self::Publish,
            _ => Self::Subscribe,
        }
    }

    pub fn token(self, tokens: DirectionTokens) -> &'static str {
        match (self, tokens) {
            (Self::Publish, DirectionTokens::Long) => "publish",
            (Self::Subscribe, DirectionTokens::Long) => "subscribe",
            (Self::Publish, DirectionTokens::Short) => "pub",
            (Self::Subscribe, DirectionTokens::Short) => "sub",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.token(DirectionTokens::Long)
    }
}

impl From<&str> for Direction {
    fn from(value: &str) -> Self {
        Self::normalize(Some(value))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spelling of the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionTokens {
    /// `publish` / `subscribe`
    #[default]
    Long,
    /// `pub` / `sub`
    Short,
}

/// Spelling of boolean property values and the `active` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolFormat {
    /// `true` / `false`
    #[default]
    Word,
    /// `1` / `0`
    Digit,
}

impl BoolFormat {
    pub fn token(self, value: bool) -> &'static str {
        match (self, value) {
            (Self::Word, true) => "true",
            (Self::Word, false) => "false",
            (Self::Digit, true) => "1",
            (Self::Digit, false) => "0",
        }
    }
}
