// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property validation.
//!
//! Structural failures (wrong kind) are raised as errors. Content failures
//! (enumerated values, patterns, expressions) come back as `false` and it is
//! up to the caller to reject or accept them.

use super::descriptor::{PropertyDescriptor, ValueRule};
use super::placeholder;
use crate::error::{ConnectorError, Result};
use crate::value::{BoolFormat, PropertyKind, PropertyValue};
use std::fmt;

/// How connectors treat values that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Accept `@TOKEN@` strings without further checks.
    pub placeholders: bool,
    /// Turn content failures and missing required properties into errors.
    pub strict: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            placeholders: true,
            strict: false,
        }
    }
}

/// A content problem found on a connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Required property with neither a value nor a default.
    Missing { property: String },
    /// Value failed its enumeration, pattern or expression checks.
    Invalid { property: String, value: String },
}

impl ValidationIssue {
    pub fn property(&self) -> &str {
        match self {
            Self::Missing { property } | Self::Invalid { property, .. } => property,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { property } => write!(f, "MISSING [{property}]: required property not set"),
            Self::Invalid { property, value } => {
                write!(f, "INVALID [{property}]: {value} is not an accepted value")
            }
        }
    }
}

fn kind_accepts(kind: PropertyKind, value: &PropertyValue) -> bool {
    match (kind, value) {
        (PropertyKind::Int, PropertyValue::Int(_))
        | (PropertyKind::Float, PropertyValue::Int(_) | PropertyValue::Float(_))
        | (PropertyKind::Bool, PropertyValue::Bool(_))
        | (PropertyKind::String, PropertyValue::String(_) | PropertyValue::List(_)) => true,
        (PropertyKind::Int, PropertyValue::Float(_)) => value.is_integral_float(),
        _ => false,
    }
}

/// Fail with `TypeMismatch` if no declared kind accepts `value`.
pub fn check_type(descriptor: &PropertyDescriptor, value: &PropertyValue) -> Result<()> {
    if descriptor.kinds.iter().any(|k| kind_accepts(*k, value)) {
        return Ok(());
    }
    Err(ConnectorError::TypeMismatch {
        property: descriptor.name.clone(),
        expected: descriptor.kinds.clone(),
        found: value.kind(),
    })
}

/// Validate with default options.
pub fn validate(descriptor: &PropertyDescriptor, value: Option<&PropertyValue>) -> Result<bool> {
    validate_with(descriptor, value, ValidationOptions::default())
}

/// Absence check, then the placeholder pre-pass, then [`validate_strict`].
pub fn validate_with(
    descriptor: &PropertyDescriptor,
    value: Option<&PropertyValue>,
    options: ValidationOptions,
) -> Result<bool> {
    let Some(value) = value else {
        return Ok(!descriptor.required);
    };
    if options.placeholders && placeholder::is_placeholder(value) {
        return Ok(true);
    }
    validate_strict(descriptor, value)
}

/// Type check followed by the value and expression constraints.
pub fn validate_strict(descriptor: &PropertyDescriptor, value: &PropertyValue) -> Result<bool> {
    check_type(descriptor, value)?;
    Ok(check_valid_values(descriptor, value) && check_valid_expr(descriptor, value))
}

fn check_valid_values(descriptor: &PropertyDescriptor, value: &PropertyValue) -> bool {
    let mut literals = descriptor
        .valid_values
        .iter()
        .filter_map(|rule| match rule {
            ValueRule::Literal(v) => Some(v),
            ValueRule::Pattern(_) => None,
        })
        .peekable();
    if literals.peek().is_some() && !literals.any(|lit| lit.loosely_eq(value)) {
        return false;
    }

    let mut patterns = descriptor
        .valid_values
        .iter()
        .filter_map(|rule| match rule {
            ValueRule::Pattern(re) => Some(re),
            ValueRule::Literal(_) => None,
        })
        .peekable();
    if patterns.peek().is_some() {
        let text = value.to_wire(BoolFormat::Word);
        return patterns.any(|re| re.is_match(&text));
    }
    true
}

fn check_valid_expr(descriptor: &PropertyDescriptor, value: &PropertyValue) -> bool {
    descriptor.valid_expr.iter().all(|rule| rule.accepts(value))
}

/// Store integral reals in integer-only slots as integers and integers in
/// real-only slots as reals, so the wire text reads back as the same value.
pub fn normalize(descriptor: &PropertyDescriptor, value: PropertyValue) -> PropertyValue {
    let accepts = |k| descriptor.kinds.contains(&k);
    match value {
        PropertyValue::Float(f)
            if accepts(PropertyKind::Int)
                && !accepts(PropertyKind::Float)
                && value.is_integral_float() =>
        {
            #[allow(clippy::cast_possible_truncation)]
            PropertyValue::Int(f as i64)
        }
        PropertyValue::Int(i) if accepts(PropertyKind::Float) && !accepts(PropertyKind::Int) => {
            #[allow(clippy::cast_precision_loss)]
            PropertyValue::Float(i as f64)
        }
        other => other,
    }
}
