// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property descriptors.

use super::predicate::Predicate;
use super::validation;
use crate::error::{ConnectorError, Result};
use crate::value::{BoolFormat, PropertyKind, PropertyValue};
use regex::Regex;
use std::fmt;

/// One entry of a descriptor's `valid_values` set.
#[derive(Debug, Clone)]
pub enum ValueRule {
    /// The value must equal one of the declared literals.
    Literal(PropertyValue),
    /// The value's wire text must contain a match.
    Pattern(Regex),
}

/// One entry of a descriptor's `valid_expr` list.
#[derive(Debug, Clone)]
pub enum ExprRule {
    Pattern(Regex),
    Predicate(Predicate),
    /// Named Rust check for constraints the expression language cannot state.
    Check {
        name: &'static str,
        check: fn(&PropertyValue) -> bool,
    },
}

impl ExprRule {
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(&value.to_wire(BoolFormat::Word)),
            Self::Predicate(p) => p.evaluate(value),
            Self::Check { check, .. } => check(value),
        }
    }
}

impl fmt::Display for ValueRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl fmt::Display for ExprRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
            Self::Predicate(p) => write!(f, "{p}"),
            Self::Check { name, .. } => write!(f, "{name}()"),
        }
    }
}

/// Declarative schema for one connector property.
///
/// Built once per variant through [`prop`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub(crate) name: String,
    pub(crate) wire_name: String,
    pub(crate) kinds: Vec<PropertyKind>,
    pub(crate) required: bool,
    pub(crate) default: Option<PropertyValue>,
    pub(crate) valid_values: Vec<ValueRule>,
    pub(crate) valid_expr: Vec<ExprRule>,
}

impl PropertyDescriptor {
    /// Public keyword.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name written to and read from the `<property name=..>` attribute.
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    pub fn kinds(&self) -> &[PropertyKind] {
        &self.kinds
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&PropertyValue> {
        self.default.as_ref()
    }

    pub fn valid_values(&self) -> &[ValueRule] {
        &self.valid_values
    }

    pub fn valid_expr(&self) -> &[ExprRule] {
        &self.valid_expr
    }

    /// Raise [`ConnectorError::TypeMismatch`] when `value` fits none of the declared kinds.
    pub fn check_type(&self, value: &PropertyValue) -> Result<()> {
        validation::check_type(self, value)
    }

    /// Full validation: absence, placeholder bypass, type, then content.
    pub fn validate(&self, value: Option<&PropertyValue>) -> Result<bool> {
        validation::validate(self, value)
    }

    /// Type and content checks only, no placeholder bypass.
    pub fn validate_strict(&self, value: &PropertyValue) -> Result<bool> {
        validation::validate_strict(self, value)
    }

    /// Fit a type-checked value to the slot's preferred numeric kind.
    pub fn normalize(&self, value: PropertyValue) -> PropertyValue {
        validation::normalize(self, value)
    }
}

/// Start a descriptor for `name` holding values of `kind`.
pub fn prop(name: &str, kind: PropertyKind) -> PropertyBuilder {
    PropertyBuilder {
        name: name.to_string(),
        wire_name: None,
        kinds: vec![kind],
        required: false,
        default: None,
        literals: Vec::new(),
        value_patterns: Vec::new(),
        exprs: Vec::new(),
    }
}

enum PendingExpr {
    Pattern(String),
    Predicate(String),
    Check(&'static str, fn(&PropertyValue) -> bool),
}

/// Collects a descriptor's declaration; compiled and checked by [`PropertyBuilder::build`].
pub struct PropertyBuilder {
    name: String,
    wire_name: Option<String>,
    kinds: Vec<PropertyKind>,
    required: bool,
    default: Option<PropertyValue>,
    literals: Vec<PropertyValue>,
    value_patterns: Vec<String>,
    exprs: Vec<PendingExpr>,
}

impl PropertyBuilder {
    /// Use a different on-the-wire name.
    pub fn wire(mut self, wire_name: &str) -> Self {
        self.wire_name = Some(wire_name.to_string());
        self
    }

    /// Accept an additional kind.
    pub fn or_kind(mut self, kind: PropertyKind) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default(mut self, value: impl Into<PropertyValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Restrict to an enumerated set of literals.
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PropertyValue>,
    {
        self.literals.extend(values.into_iter().map(Into::into));
        self
    }

    /// Add a `valid_values` pattern.
    pub fn matching(mut self, pattern: &str) -> Self {
        self.value_patterns.push(pattern.to_string());
        self
    }

    /// Add a predicate expression such as `value >= 0`.
    pub fn expr(mut self, source: &str) -> Self {
        self.exprs.push(PendingExpr::Predicate(source.to_string()));
        self
    }

    /// Add a `valid_expr` pattern.
    pub fn expr_matching(mut self, pattern: &str) -> Self {
        self.exprs.push(PendingExpr::Pattern(pattern.to_string()));
        self
    }

    pub fn check(mut self, name: &'static str, check: fn(&PropertyValue) -> bool) -> Self {
        self.exprs.push(PendingExpr::Check(name, check));
        self
    }

    pub fn build(self) -> Result<PropertyDescriptor> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| ConnectorError::InvalidPattern {
                property: self.name.clone(),
                source,
            })
        };

        let mut valid_values: Vec<ValueRule> =
            self.literals.iter().cloned().map(ValueRule::Literal).collect();
        for pattern in &self.value_patterns {
            valid_values.push(ValueRule::Pattern(compile(pattern)?));
        }

        let mut valid_expr = Vec::with_capacity(self.exprs.len());
        for pending in &self.exprs {
            valid_expr.push(match pending {
                PendingExpr::Pattern(p) => ExprRule::Pattern(compile(p)?),
                PendingExpr::Predicate(src) => {
                    ExprRule::Predicate(Predicate::parse(src).map_err(|e| {
                        ConnectorError::InvalidExpression {
                            property: self.name.clone(),
                            offset: e.offset,
                            message: e.message,
                        }
                    })?)
                }
                PendingExpr::Check(name, check) => ExprRule::Check {
                    name: *name,
                    check: *check,
                },
            });
        }

        let mut descriptor = PropertyDescriptor {
            wire_name: self.wire_name.clone().unwrap_or_else(|| self.name.clone()),
            name: self.name.clone(),
            kinds: self.kinds.clone(),
            required: self.required,
            default: None,
            valid_values,
            valid_expr,
        };

        if let Some(default) = self.default {
            let valid = matches!(descriptor.validate_strict(&default), Ok(true));
            if !valid {
                return Err(ConnectorError::InvalidDefault {
                    property: self.name,
                    value: default.to_string(),
                });
            }
            descriptor.default = Some(descriptor.normalize(default));
        }

        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PropertyKind::*;

    #[test]
    fn test_wire_name_defaults_to_public_name() {
        let d = prop("kafkatopic", String).required().build().unwrap();
        assert_eq!(d.name(), "kafkatopic");
        assert_eq!(d.wire_name(), "kafkatopic");
        assert!(d.is_required());

        let d = prop("csvmsgperevent_block", Bool)
            .wire("csvmsgpereventblock")
            .build()
            .unwrap();
        assert_eq!(d.wire_name(), "csvmsgpereventblock");
    }

    #[test]
    fn test_default_must_validate() {
        let ok = prop("numbufferedmsgs", Int).default(10_000).expr("value >= 0").build();
        assert!(ok.is_ok());

        let bad_kind = prop("kafkapartition", String).default(0).build();
        assert!(matches!(bad_kind, Err(ConnectorError::InvalidDefault { .. })));

        let bad_content = prop("numbufferedmsgs", Int).default(-1).expr("value >= 0").build();
        assert!(matches!(bad_content, Err(ConnectorError::InvalidDefault { .. })));

        let bad_literal = prop("csvincludeschema", String)
            .one_of(["never", "once"])
            .default("always")
            .build();
        assert!(matches!(bad_literal, Err(ConnectorError::InvalidDefault { .. })));
    }

    #[test]
    fn test_default_is_normalized() {
        let d = prop("interval", Float).default(5).build().unwrap();
        assert_eq!(d.default_value(), Some(&PropertyValue::Float(5.0)));
    }

    #[test]
    fn test_bad_pattern_and_expression() {
        let bad = prop("host", String).matching("(unclosed").build();
        assert!(matches!(bad, Err(ConnectorError::InvalidPattern { .. })));

        let bad = prop("port", Int).expr("value >=").build();
        assert!(matches!(bad, Err(ConnectorError::InvalidExpression { .. })));
    }

    #[test]
    fn test_or_kind_deduplicates() {
        let d = prop("kafkainitialoffset", String)
            .or_kind(Int)
            .or_kind(String)
            .build()
            .unwrap();
        assert_eq!(d.kinds(), &[String, Int]);
    }
}
