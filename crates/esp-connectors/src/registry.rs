// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Connector variants and the registration table.
//!
//! A [`Variant`] is one concrete connector type: its `(class, direction)`
//! identity, optional selectors that tell it apart from siblings sharing the
//! same identity, and its property descriptors. The [`Registry`] holds every
//! variant known to the process; the built-in table is assembled once from
//! [`crate::variants`].

use crate::error::{ConnectorError, Result};
use crate::schema::{PropertyBuilder, PropertyDescriptor};
use crate::value::Direction;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{error, warn};

static GLOBAL_REGISTRY: OnceLock<Arc<Registry>> = OnceLock::new();

/// Type name reported for connectors no registered variant claims.
pub const GENERIC_TYPE_NAME: &str = "Connector";

/// Extra condition a candidate places on one property.
#[derive(Debug, Clone)]
pub enum Selector {
    /// Property text must equal this literal.
    Literal(String),
    /// Property text must match at its start.
    Pattern { source: String, regex: Regex },
}

impl Selector {
    pub fn literal(value: &str) -> Self {
        Self::Literal(value.to_string())
    }

    pub fn pattern(property: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
            ConnectorError::InvalidPattern {
                property: property.to_string(),
                source,
            }
        })?;
        Ok(Self::Pattern {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Absent properties never match.
    pub fn matches(&self, text: Option<&str>) -> bool {
        let Some(text) = text else {
            return false;
        };
        match self {
            Self::Literal(value) => value == text,
            Self::Pattern { regex, .. } => regex.is_match(text),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value:?}"),
            Self::Pattern { source, .. } => write!(f, "/{source}/"),
        }
    }
}

/// Identity of a variant.
#[derive(Debug, Clone)]
pub struct ConnectorKey {
    pub class: String,
    pub direction: Direction,
    pub selectors: Vec<(String, Selector)>,
}

impl ConnectorKey {
    /// True when every selector is satisfied by `lookup`.
    pub fn selectors_match<'a, F>(&self, lookup: F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        self.selectors
            .iter()
            .all(|(property, selector)| selector.matches(lookup(property)))
    }
}

/// A concrete connector type.
#[derive(Debug)]
pub struct Variant {
    type_name: String,
    key: ConnectorKey,
    descriptors: Vec<PropertyDescriptor>,
    positional: Vec<String>,
    deleted: Vec<String>,
    open: bool,
}

impl Variant {
    /// Start declaring a variant bound to `(class, direction)`.
    pub fn builder(type_name: &str, class: &str, direction: Direction) -> VariantBuilder {
        VariantBuilder {
            type_name: type_name.to_string(),
            class: class.to_string(),
            direction,
            selectors: Vec::new(),
            properties: Vec::new(),
            positional: Vec::new(),
            deleted: vec!["type".to_string()],
        }
    }

    /// The fallback for connectors nothing else claims. Accepts any key.
    pub fn generic() -> Self {
        Self {
            type_name: GENERIC_TYPE_NAME.to_string(),
            key: ConnectorKey {
                class: String::new(),
                direction: Direction::Subscribe,
                selectors: Vec::new(),
            },
            descriptors: Vec::new(),
            positional: Vec::new(),
            deleted: Vec::new(),
            open: true,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn key(&self) -> &ConnectorKey {
        &self.key
    }

    pub fn class(&self) -> &str {
        &self.key.class
    }

    pub fn direction(&self) -> Direction {
        self.key.direction
    }

    /// Descriptors in declaration order.
    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    /// Look up a descriptor by public or wire name.
    pub fn descriptor(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.name() == name)
            .or_else(|| self.descriptors.iter().find(|d| d.wire_name() == name))
    }

    /// Required parameters in their fixed positional order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Keys dropped before re-mapping.
    pub fn deleted(&self) -> &[String] {
        &self.deleted
    }

    /// Open variants accept keys they have no descriptor for.
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_generic(&self) -> bool {
        self.open && self.descriptors.is_empty() && self.type_name == GENERIC_TYPE_NAME
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)
    }
}

/// Declaration of a [`Variant`]; checked by [`VariantBuilder::build`].
pub struct VariantBuilder {
    type_name: String,
    class: String,
    direction: Direction,
    selectors: Vec<(String, String, bool)>,
    properties: Vec<PropertyBuilder>,
    positional: Vec<String>,
    deleted: Vec<String>,
}

impl VariantBuilder {
    /// Require `property` to equal `value`.
    pub fn select(mut self, property: &str, value: &str) -> Self {
        self.selectors
            .push((property.to_string(), value.to_string(), false));
        self
    }

    /// Require `property` to match `pattern` at its start.
    pub fn select_matching(mut self, property: &str, pattern: &str) -> Self {
        self.selectors
            .push((property.to_string(), pattern.to_string(), true));
        self
    }

    /// Required parameters peeled off by `from_parameters`, in order.
    pub fn positional(mut self, names: &[&str]) -> Self {
        self.positional = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    /// Another key to drop before re-mapping (`type` always is).
    pub fn delete(mut self, name: &str) -> Self {
        if !self.deleted.iter().any(|d| d == name) {
            self.deleted.push(name.to_string());
        }
        self
    }

    pub fn property(mut self, property: PropertyBuilder) -> Self {
        self.properties.push(property);
        self
    }

    pub fn properties<I>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = PropertyBuilder>,
    {
        self.properties.extend(properties);
        self
    }

    pub fn build(self) -> Result<Variant> {
        let mut descriptors: Vec<PropertyDescriptor> = Vec::with_capacity(self.properties.len());
        for property in self.properties {
            let descriptor = property.build()?;
            if descriptors.iter().any(|d| d.name() == descriptor.name()) {
                return Err(ConnectorError::DuplicateProperty {
                    property: descriptor.name().to_string(),
                    variant: self.type_name,
                });
            }
            descriptors.push(descriptor);
        }

        for name in &self.positional {
            if !descriptors.iter().any(|d| d.name() == name) {
                return Err(ConnectorError::UnknownParameter {
                    name: name.clone(),
                    variant: self.type_name,
                });
            }
        }

        let mut selectors = Vec::with_capacity(self.selectors.len());
        for (property, value, is_pattern) in self.selectors {
            let selector = if is_pattern {
                Selector::pattern(&property, &value)?
            } else {
                Selector::Literal(value)
            };
            selectors.push((property, selector));
        }

        Ok(Variant {
            type_name: self.type_name,
            key: ConnectorKey {
                class: self.class,
                direction: self.direction,
                selectors,
            },
            descriptors,
            positional: self.positional,
            deleted: self.deleted,
            open: false,
        })
    }
}

/// Registration table of connector variants.
#[derive(Debug, Clone)]
pub struct Registry {
    variants: Vec<Arc<Variant>>,
    generic: Arc<Variant>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// An empty table holding only the generic fallback.
    pub fn new() -> Self {
        Self {
            variants: Vec::new(),
            generic: Arc::new(Variant::generic()),
        }
    }

    /// Every built-in variant.
    ///
    /// Entries whose declaration fails to build are logged and skipped.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for build in crate::variants::BUILTIN {
            match build() {
                Ok(variant) => {
                    registry.register(variant);
                }
                Err(e) => error!("skipping built-in connector variant: {}", e),
            }
        }
        registry
    }

    /// Process-wide built-in registry, assembled on first use.
    pub fn global() -> Arc<Registry> {
        GLOBAL_REGISTRY
            .get_or_init(|| Arc::new(Self::builtin()))
            .clone()
    }

    /// Add a variant, replacing any earlier one with the same type name.
    pub fn register(&mut self, variant: Variant) -> Arc<Variant> {
        let variant = Arc::new(variant);
        if let Some(slot) = self
            .variants
            .iter_mut()
            .find(|v| v.type_name() == variant.type_name())
        {
            warn!("replacing registered connector variant {}", variant.type_name());
            *slot = Arc::clone(&variant);
        } else {
            self.variants.push(Arc::clone(&variant));
        }
        variant
    }

    /// Look up a variant by type name. The generic fallback is reachable
    /// as `"Connector"`.
    pub fn get(&self, type_name: &str) -> Option<Arc<Variant>> {
        if type_name == GENERIC_TYPE_NAME {
            return Some(self.generic());
        }
        self.variants
            .iter()
            .find(|v| v.type_name() == type_name)
            .cloned()
    }

    pub fn generic(&self) -> Arc<Variant> {
        Arc::clone(&self.generic)
    }

    /// All variants keyed on `(class, direction)`, in registration order.
    pub fn candidates(&self, class: &str, direction: Direction) -> Vec<Arc<Variant>> {
        self.variants
            .iter()
            .filter(|v| v.class() == class && v.direction() == direction)
            .cloned()
            .collect()
    }

    /// Registered variants, in registration order.
    pub fn variants(&self) -> impl Iterator<Item = &Arc<Variant>> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::prop;
    use crate::value::PropertyKind;

    fn file_sub() -> Variant {
        Variant::builder("FileSubscriber", "fs", Direction::Subscribe)
            .positional(&["fsname"])
            .property(prop("fsname", PropertyKind::String).required())
            .build()
            .unwrap()
    }

    #[test]
    fn test_selector_is_anchored_at_start() {
        let s = Selector::pattern("fsname", r"[\w.\-]*:\d+").unwrap();
        assert!(s.matches(Some(":2900")));
        assert!(s.matches(Some("localhost:2900/extra")));
        assert!(!s.matches(Some("/tmp/x:2900")));
        assert!(!s.matches(None));

        let lit = Selector::literal("csv");
        assert!(lit.matches(Some("csv")));
        assert!(!lit.matches(Some("csv ")));
    }

    #[test]
    fn test_builder_checks_positional_names() {
        let err = Variant::builder("Broken", "x", Direction::Publish)
            .positional(&["missing"])
            .build();
        assert!(matches!(err, Err(ConnectorError::UnknownParameter { .. })));
    }

    #[test]
    fn test_builder_rejects_duplicate_declarations() {
        let err = Variant::builder("Broken", "x", Direction::Publish)
            .property(prop("a", PropertyKind::Int))
            .property(prop("a", PropertyKind::String))
            .build();
        assert!(matches!(err, Err(ConnectorError::DuplicateProperty { .. })));
    }

    #[test]
    fn test_type_is_always_deleted() {
        let v = Variant::builder("X", "x", Direction::Publish)
            .delete("type")
            .delete("extra")
            .build()
            .unwrap();
        assert_eq!(v.deleted(), &["type".to_string(), "extra".to_string()]);
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        registry.register(file_sub());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("FileSubscriber").is_some());
        assert!(registry.get("Connector").unwrap().is_generic());
        assert!(registry.get("Nope").is_none());

        assert_eq!(registry.candidates("fs", Direction::Subscribe).len(), 1);
        assert!(registry.candidates("fs", Direction::Publish).is_empty());

        registry.register(file_sub());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_descriptor_lookup_by_wire_name() {
        let v = Variant::builder("KafkaSubscriber", "kafka", Direction::Subscribe)
            .property(prop("csvmsgperevent_block", PropertyKind::Bool).wire("csvmsgpereventblock"))
            .build()
            .unwrap();
        assert!(v.descriptor("csvmsgperevent_block").is_some());
        assert_eq!(
            v.descriptor("csvmsgpereventblock").map(PropertyDescriptor::name),
            Some("csvmsgperevent_block")
        );
        assert!(v.descriptor("other").is_none());
    }

    #[test]
    fn test_global_registry_is_shared() {
        let a = Registry::global();
        let b = Registry::global();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!a.is_empty());
    }
}
