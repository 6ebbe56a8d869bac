// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Configured entry point.
//!
//! [`ConnectorFactory`] pairs a registry with an [`SdkConfig`] so that wire
//! tokens, fallback policy, naming prefix and strictness are applied the same
//! way to every connector a caller builds or writes.

use crate::config::SdkConfig;
use crate::connector::{BuildOptions, Connector};
use crate::error::Result;
use crate::registry::{Registry, Variant};
use crate::resolver::ResolveSource;
use crate::set::ConnectorSet;
use crate::value::PropertyMap;
use crate::xml::ConnectorElement;
use std::sync::Arc;

/// Builds, parses and writes connectors under one configuration.
#[derive(Debug, Clone)]
pub struct ConnectorFactory {
    registry: Arc<Registry>,
    config: SdkConfig,
    options: BuildOptions,
}

impl Default for ConnectorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectorFactory {
    /// Built-in registry, default configuration.
    pub fn new() -> Self {
        Self::with_config(Registry::global(), SdkConfig::default())
    }

    pub fn with_config(registry: Arc<Registry>, config: SdkConfig) -> Self {
        let options = config.build_options();
        Self {
            registry,
            config,
            options,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn build_options(&self) -> &BuildOptions {
        &self.options
    }

    /// Classify `source` under the configured fallback policy.
    pub fn resolve(&self, source: ResolveSource<'_>) -> Result<Arc<Variant>> {
        self.registry.resolve_with(source, self.options.fallback)
    }

    /// Resolve and construct from explicit parts.
    pub fn connector(
        &self,
        class: &str,
        name: Option<&str>,
        direction: Option<&str>,
        active: Option<bool>,
        properties: PropertyMap,
    ) -> Result<Connector> {
        let variant = self.resolve(ResolveSource::Parts {
            class,
            direction,
            properties: &properties,
        })?;
        Connector::from_parameters_with(
            variant,
            class,
            direction,
            name,
            active,
            properties,
            &self.options,
        )
    }

    pub fn from_element(&self, element: &ConnectorElement) -> Result<Connector> {
        Connector::from_element_in(&self.registry, element, &self.options)
    }

    /// Parse a single `<connector>` document.
    pub fn from_xml(&self, xml: &str) -> Result<Connector> {
        self.from_element(&ConnectorElement::parse(xml)?)
    }

    /// Parse every connector in a document.
    pub fn parse_set(&self, xml: &str) -> Result<ConnectorSet> {
        ConnectorSet::from_xml_in(Arc::clone(&self.registry), xml, self.options.clone())
    }

    /// An empty set bound to this factory's registry and settings.
    pub fn new_set(&self) -> ConnectorSet {
        ConnectorSet::with_registry(Arc::clone(&self.registry), self.options.clone())
    }

    pub fn to_xml(&self, connector: &Connector) -> String {
        connector.to_xml_with(&self.config.xml)
    }

    pub fn set_to_xml(&self, set: &ConnectorSet) -> String {
        set.to_xml_with(&self.config.xml)
    }
}
