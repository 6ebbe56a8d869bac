// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-connector and per-variant report rows, printable as text or JSON.

use esp_connectors::{
    ConnectorElement, ConnectorFactory, Direction, PropertyDescriptor, ResolveSource, Variant,
};
use serde::Serialize;

/// Outcome of building one connector.
#[derive(Debug, Serialize)]
pub struct ConnectorReport {
    pub name: Option<String>,
    pub class: String,
    pub direction: String,
    /// Resolved variant; absent when construction failed.
    pub variant: Option<String>,
    pub issues: Vec<String>,
    pub error: Option<String>,
}

impl ConnectorReport {
    pub fn build(factory: &ConnectorFactory, element: &ConnectorElement) -> Self {
        match factory.from_element(element) {
            Ok(connector) => Self {
                name: Some(connector.name().to_string()),
                class: connector.class().to_string(),
                direction: connector.direction().to_string(),
                variant: Some(connector.type_name().to_string()),
                issues: connector.validate().iter().map(ToString::to_string).collect(),
                error: None,
            },
            Err(e) => Self {
                name: element.name.clone(),
                class: element.class.clone(),
                direction: Direction::normalize(element.direction_text()).to_string(),
                variant: None,
                issues: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({}, {})", self.class, self.direction),
            None => format!("<unnamed> ({}, {})", self.class, self.direction),
        }
    }
}

/// Resolution of one connector element, without constructing it.
#[derive(Debug, Serialize)]
pub struct ClassifyRow {
    pub name: Option<String>,
    pub class: String,
    pub direction: String,
    pub variant: String,
}

impl ClassifyRow {
    pub fn build(
        factory: &ConnectorFactory,
        element: &ConnectorElement,
    ) -> esp_connectors::Result<Self> {
        let variant = factory.resolve(ResolveSource::Element(element))?;
        Ok(Self {
            name: element.name.clone(),
            class: element.class.clone(),
            direction: Direction::normalize(element.direction_text()).to_string(),
            variant: variant.type_name().to_string(),
        })
    }
}

/// One line of the variant listing.
#[derive(Debug, Serialize)]
pub struct VariantSummary {
    pub type_name: String,
    pub class: String,
    pub direction: String,
    pub selectors: Vec<String>,
    pub positional: Vec<String>,
    pub properties: usize,
}

impl From<&Variant> for VariantSummary {
    fn from(variant: &Variant) -> Self {
        Self {
            type_name: variant.type_name().to_string(),
            class: variant.class().to_string(),
            direction: variant.direction().to_string(),
            selectors: variant
                .key()
                .selectors
                .iter()
                .map(|(property, selector)| format!("{property}={selector}"))
                .collect(),
            positional: variant.positional().to_vec(),
            properties: variant.descriptors().len(),
        }
    }
}

/// One row of a variant's descriptor table.
#[derive(Debug, Serialize)]
pub struct DescriptorRow {
    pub name: String,
    pub wire_name: String,
    pub kinds: Vec<String>,
    pub required: bool,
    pub default: Option<String>,
    pub valid_values: Vec<String>,
    pub valid_expr: Vec<String>,
}

impl From<&PropertyDescriptor> for DescriptorRow {
    fn from(d: &PropertyDescriptor) -> Self {
        Self {
            name: d.name().to_string(),
            wire_name: d.wire_name().to_string(),
            kinds: d.kinds().iter().map(ToString::to_string).collect(),
            required: d.is_required(),
            default: d.default_value().map(ToString::to_string),
            valid_values: d.valid_values().iter().map(ToString::to_string).collect(),
            valid_expr: d.valid_expr().iter().map(ToString::to_string).collect(),
        }
    }
}
