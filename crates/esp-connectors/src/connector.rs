// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The connector entity.
//!
//! A [`Connector`] is a validated property bag bound to one [`Variant`].
//! Every assignment is type-checked against the variant's descriptors;
//! content failures are logged and kept unless strict validation is on.
//! Copies are rebuilt through [`Connector::from_parameters`] rather than
//! cloned, so they are revalidated.

use crate::error::{ConnectorError, Result};
use crate::mapping::map_properties;
use crate::registry::{Registry, Variant};
use crate::resolver::{FallbackPolicy, ResolveSource};
use crate::schema::is_placeholder;
use crate::schema::validation::{self, ValidationIssue, ValidationOptions};
use crate::value::{parse_bool, BoolFormat, Direction, PropertyMap, PropertyValue};
use crate::xml::{ConnectorElement, XmlOptions};
use std::fmt;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Default prefix for generated connector names.
pub const DEFAULT_NAME_PREFIX: &str = "c_";

/// Property always emitted right after the injected defaults.
pub const CONFIG_FILE_SECTION: &str = "configfilesection";

const TYPE_KEY: &str = "type";
const NAME_KEY: &str = "name";

/// Construction settings shared by every connector a caller builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Prefix for generated names.
    pub name_prefix: String,
    pub validation: ValidationOptions,
    pub fallback: FallbackPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            validation: ValidationOptions::default(),
            fallback: FallbackPolicy::default(),
        }
    }
}

/// Generate `prefix` followed by eight lowercase alphanumerics.
pub fn gen_name(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", &id[..8])
}

/// One configured connector.
#[derive(Debug)]
pub struct Connector {
    variant: Arc<Variant>,
    class: String,
    direction: Direction,
    name: String,
    active: Option<bool>,
    properties: PropertyMap,
    options: ValidationOptions,
}

impl Connector {
    /// An empty connector of the generic variant.
    pub fn new(class: &str, direction: Option<&str>, name: Option<&str>) -> Self {
        Self::empty(
            Registry::global().generic(),
            class,
            Direction::normalize(direction),
            name,
            &BuildOptions::default(),
        )
    }

    fn empty(
        variant: Arc<Variant>,
        class: &str,
        direction: Direction,
        name: Option<&str>,
        options: &BuildOptions,
    ) -> Self {
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => gen_name(&options.name_prefix),
        };
        Self {
            variant,
            class: class.to_string(),
            direction,
            name,
            active: None,
            properties: PropertyMap::new(),
            options: options.validation,
        }
    }

    /// Build a connector of `variant`.
    ///
    /// The variant's positional parameters are peeled off first, then the
    /// rest are assigned as keyword properties. A concrete variant's
    /// direction is fixed by its key; the generic variant takes `direction`,
    /// overridden by a `type` entry in `properties`.
    pub fn from_parameters(
        variant: Arc<Variant>,
        class: &str,
        direction: Option<&str>,
        name: Option<&str>,
        active: Option<bool>,
        properties: PropertyMap,
    ) -> Result<Self> {
        Self::from_parameters_with(
            variant,
            class,
            direction,
            name,
            active,
            properties,
            &BuildOptions::default(),
        )
    }

    pub fn from_parameters_with(
        variant: Arc<Variant>,
        class: &str,
        direction: Option<&str>,
        name: Option<&str>,
        active: Option<bool>,
        properties: PropertyMap,
        options: &BuildOptions,
    ) -> Result<Self> {
        let direction = if variant.is_generic() {
            Direction::normalize(direction)
        } else {
            variant.direction()
        };
        let mut connector = Self::empty(Arc::clone(&variant), class, direction, name, options);
        connector.active = active;

        let mapped = map_properties(
            &variant,
            properties,
            variant.positional(),
            variant.deleted(),
        )?;
        for (key, value) in variant.positional().iter().zip(mapped.required) {
            if let Some(value) = value {
                connector.set_property(key, Some(value))?;
            }
        }
        for (key, value) in mapped.remaining {
            connector.set_property(&key, Some(value))?;
        }

        if connector.options.strict {
            if let Some(issue) = connector.validate().into_iter().next() {
                return Err(issue_to_error(issue, &connector));
            }
        }
        Ok(connector)
    }

    /// Build from a parsed element using the process-wide registry.
    pub fn from_element(element: &ConnectorElement) -> Result<Self> {
        Self::from_element_in(&Registry::global(), element, &BuildOptions::default())
    }

    /// Resolve `element` in `registry`, type its property text with the
    /// resolved variant's descriptors, then construct.
    pub fn from_element_in(
        registry: &Registry,
        element: &ConnectorElement,
        options: &BuildOptions,
    ) -> Result<Self> {
        let variant = registry.resolve_with(ResolveSource::Element(element), options.fallback)?;

        let mut properties = PropertyMap::new();
        for (key, text) in &element.properties {
            // <property name=".."/> carries no value
            if text.is_empty() {
                continue;
            }
            let value = match variant.descriptor(key) {
                Some(descriptor) => PropertyValue::from_wire(text, descriptor.kinds()),
                None => PropertyValue::String(text.clone()),
            };
            properties.insert(key.clone(), value);
        }

        let active = element.active.as_deref().and_then(|text| {
            let parsed = parse_bool(text);
            if parsed.is_none() {
                warn!("connector {:?}: ignoring active={:?}", element.name, text);
            }
            parsed
        });

        Self::from_parameters_with(
            variant,
            &element.class,
            element.direction.as_deref(),
            element.name.as_deref(),
            active,
            properties,
            options,
        )
    }

    /// Parse a `<connector>` document.
    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::from_element(&ConnectorElement::parse(xml)?)
    }

    /// Reconstruct through [`Connector::from_parameters`] with the current state.
    pub fn copy(&self) -> Result<Self> {
        let options = BuildOptions {
            validation: self.options,
            ..BuildOptions::default()
        };
        Self::from_parameters_with(
            Arc::clone(&self.variant),
            &self.class,
            Some(self.direction.as_str()),
            Some(&self.name),
            self.active,
            self.properties.clone(),
            &options,
        )
    }

    pub fn variant(&self) -> &Arc<Variant> {
        &self.variant
    }

    pub fn type_name(&self) -> &str {
        self.variant.type_name()
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn active(&self) -> Option<bool> {
        self.active
    }

    pub fn set_active(&mut self, active: Option<bool>) {
        self.active = active;
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn validation_options(&self) -> ValidationOptions {
        self.options
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties sorted by public name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.remove(key)
    }

    /// Assign one property.
    ///
    /// `None` removes the key. `type` re-normalizes the direction and `name`
    /// renames the connector; neither is stored as a property.
    pub fn set_property(&mut self, key: &str, value: Option<PropertyValue>) -> Result<()> {
        match key {
            TYPE_KEY => {
                if let Some(value) = value {
                    let text = value.to_wire(BoolFormat::Word);
                    self.direction = Direction::normalize(Some(text.as_str()));
                }
                return Ok(());
            }
            NAME_KEY if self.variant.descriptor(NAME_KEY).is_none() => {
                if let Some(value) = value {
                    self.name = value.to_wire(BoolFormat::Word);
                }
                return Ok(());
            }
            _ => {}
        }

        let Some(value) = value else {
            self.properties.remove(key);
            return Ok(());
        };

        let Some(descriptor) = self.variant.descriptor(key) else {
            if self.variant.is_open() {
                self.properties.insert(key.to_string(), value);
                return Ok(());
            }
            return Err(ConnectorError::UnknownParameter {
                name: key.to_string(),
                variant: self.variant.type_name().to_string(),
            });
        };

        let public = descriptor.name().to_string();
        if self.options.placeholders && is_placeholder(&value) {
            self.properties.insert(public, value);
            return Ok(());
        }

        descriptor.check_type(&value)?;
        let value = descriptor.normalize(value);
        if !validation::validate_with(descriptor, Some(&value), self.options)? {
            if self.options.strict {
                return Err(ConnectorError::InvalidValue {
                    property: descriptor.name().to_string(),
                    value: value.to_string(),
                });
            }
            warn!(
                "{} {}: {} is not an accepted value for {}",
                self.variant.type_name(),
                self.name,
                value,
                descriptor.name()
            );
        }
        self.properties.insert(public, value);
        Ok(())
    }

    /// Assign several properties; stops at the first failure.
    pub fn set_properties<I, K>(&mut self, properties: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Option<PropertyValue>)>,
        K: AsRef<str>,
    {
        for (key, value) in properties {
            self.set_property(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// Content problems with the current property set. Required descriptors
    /// with a default are never missing.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for descriptor in self.variant.descriptors() {
            let value = self
                .properties
                .get(descriptor.name())
                .or_else(|| descriptor.default_value());
            match value {
                None if descriptor.is_required() => issues.push(ValidationIssue::Missing {
                    property: descriptor.name().to_string(),
                }),
                None => {}
                Some(value) => {
                    let valid = validation::validate_with(descriptor, Some(value), self.options)
                        .unwrap_or(false);
                    if !valid {
                        issues.push(ValidationIssue::Invalid {
                            property: descriptor.name().to_string(),
                            value: value.to_string(),
                        });
                    }
                }
            }
        }
        issues
    }

    pub fn validate_all(&self) -> std::result::Result<(), Vec<ValidationIssue>> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    /// Element with default wire options.
    pub fn to_element(&self) -> ConnectorElement {
        self.to_element_with(&XmlOptions::default())
    }

    /// Property order: descriptor defaults for properties that are unset or
    /// hold their default (declaration order), then `configfilesection`,
    /// then the rest sorted by wire name.
    ///
    /// An injected default parses back as a live property equal to the
    /// default, so it lands in the same slot and a reparsed connector writes
    /// identical XML.
    pub fn to_element_with(&self, options: &XmlOptions) -> ConnectorElement {
        let mut properties = Vec::with_capacity(self.properties.len());
        let mut at_default: Vec<&str> = Vec::new();

        for descriptor in self.variant.descriptors() {
            if descriptor.name() == CONFIG_FILE_SECTION {
                continue;
            }
            let Some(default) = descriptor.default_value() else {
                continue;
            };
            match self.properties.get(descriptor.name()) {
                Some(value) if !value.loosely_eq(default) => continue,
                Some(_) => at_default.push(descriptor.name()),
                None => {}
            }
            properties.push((
                descriptor.wire_name().to_string(),
                default.to_wire(options.bool_format),
            ));
        }

        if let Some(section) = self.properties.get(CONFIG_FILE_SECTION) {
            properties.push((
                self.wire_name(CONFIG_FILE_SECTION).to_string(),
                section.to_wire(options.bool_format),
            ));
        }

        let mut rest: Vec<(String, String)> = self
            .properties
            .iter()
            .filter(|(key, _)| {
                key.as_str() != CONFIG_FILE_SECTION && !at_default.contains(&key.as_str())
            })
            .map(|(key, value)| {
                (
                    self.wire_name(key).to_string(),
                    value.to_wire(options.bool_format),
                )
            })
            .collect();
        rest.sort_by(|a, b| a.0.cmp(&b.0));
        properties.extend(rest);

        ConnectorElement {
            class: self.class.clone(),
            name: Some(self.name.clone()),
            active: self
                .active
                .map(|active| options.bool_format.token(active).to_string()),
            direction: Some(self.direction.token(options.direction_tokens).to_string()),
            properties,
        }
    }

    pub fn to_xml(&self) -> String {
        self.to_xml_with(&XmlOptions::default())
    }

    pub fn to_xml_with(&self, options: &XmlOptions) -> String {
        self.to_element_with(options).to_xml(options)
    }

    fn wire_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.variant
            .descriptor(key)
            .map_or(key, |descriptor| descriptor.wire_name())
    }
}

fn issue_to_error(issue: ValidationIssue, connector: &Connector) -> ConnectorError {
    match issue {
        ValidationIssue::Missing { property } => ConnectorError::MissingRequired {
            property,
            variant: connector.type_name().to_string(),
        },
        ValidationIssue::Invalid { property, value } => {
            ConnectorError::InvalidValue { property, value }
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}('{}', name='{}', type='{}', properties={{",
            self.variant.type_name(),
            self.class,
            self.name,
            self.direction
        )?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{key}': {value}")?;
        }
        f.write_str("})")
    }
}

#[cfg(test)]
mod tests;
