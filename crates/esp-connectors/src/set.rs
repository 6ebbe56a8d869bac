// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The `<connectors>` container.
//!
//! Engines nest this list inside a window definition; windows themselves are
//! not modelled here.

use crate::connector::{BuildOptions, Connector};
use crate::error::Result;
use crate::registry::Registry;
use crate::resolver::ResolveSource;
use crate::value::PropertyMap;
use crate::xml::{self, XmlOptions};
use std::sync::Arc;
use tracing::debug;

/// An ordered list of connectors sharing one registry and build settings.
#[derive(Debug)]
pub struct ConnectorSet {
    registry: Arc<Registry>,
    options: BuildOptions,
    connectors: Vec<Connector>,
}

impl Default for ConnectorSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectorSet {
    /// Empty set over the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(Registry::global(), BuildOptions::default())
    }

    pub fn with_registry(registry: Arc<Registry>, options: BuildOptions) -> Self {
        Self {
            registry,
            options,
            connectors: Vec::new(),
        }
    }

    /// Parse every connector in `xml` using the process-wide registry.
    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::from_xml_in(Registry::global(), xml, BuildOptions::default())
    }

    /// Parse every connector in `xml`: the root if it is a `<connector>`,
    /// otherwise each one nested below it.
    pub fn from_xml_in(registry: Arc<Registry>, xml: &str, options: BuildOptions) -> Result<Self> {
        let mut set = Self::with_registry(registry, options);
        for element in xml::parse_connectors(xml)? {
            let connector = Connector::from_element_in(&set.registry, &element, &set.options)?;
            set.connectors.push(connector);
        }
        debug!("parsed {} connector(s)", set.connectors.len());
        Ok(set)
    }

    /// Append an already built connector.
    pub fn add(&mut self, connector: Connector) {
        self.connectors.push(connector);
    }

    /// Resolve `class` and `properties` to a variant, build the connector and
    /// append it.
    pub fn add_connector(
        &mut self,
        class: &str,
        name: Option<&str>,
        direction: Option<&str>,
        active: Option<bool>,
        properties: PropertyMap,
    ) -> Result<&Connector> {
        let variant = self.registry.resolve_with(
            ResolveSource::Parts {
                class,
                direction,
                properties: &properties,
            },
            self.options.fallback,
        )?;
        let connector = Connector::from_parameters_with(
            variant,
            class,
            direction,
            name,
            active,
            properties,
            &self.options,
        )?;
        self.connectors.push(connector);
        let index = self.connectors.len() - 1;
        Ok(&self.connectors[index])
    }

    /// Rebuild every connector.
    pub fn copy(&self) -> Result<Self> {
        let connectors = self
            .connectors
            .iter()
            .map(Connector::copy)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            registry: Arc::clone(&self.registry),
            options: self.options.clone(),
            connectors,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Connector> {
        self.connectors.iter_mut().find(|c| c.name() == name)
    }

    /// Remove the first connector called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Connector> {
        let index = self.connectors.iter().position(|c| c.name() == name)?;
        Some(self.connectors.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Connector> {
        self.connectors.iter()
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    pub fn to_xml(&self) -> String {
        self.to_xml_with(&XmlOptions::default())
    }

    pub fn to_xml_with(&self, options: &XmlOptions) -> String {
        let elements: Vec<_> = self
            .connectors
            .iter()
            .map(|c| c.to_element_with(options))
            .collect();
        xml::write_connectors(&elements, options)
    }
}

impl<'a> IntoIterator for &'a ConnectorSet {
    type Item = &'a Connector;
    type IntoIter = std::slice::Iter<'a, Connector>;

    fn into_iter(self) -> Self::IntoIter {
        self.connectors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectorError;
    use crate::value::PropertyValue;

    const WINDOW: &str = r#"<window-source name="trades" index="pi_HASH">
      <connectors>
        <connector class="fs" name="in" type="sub">
          <properties>
            <property name="fsname">trades.csv</property>
            <property name="fstype">csv</property>
          </properties>
        </connector>
        <connector class="fs" name="out" type="pub">
          <properties>
            <property name="fsname">:5555</property>
            <property name="fstype">binary</property>
          </properties>
        </connector>
      </connectors>
    </window-source>"#;

    fn fs_properties(fsname: &str) -> PropertyMap {
        let mut props = PropertyMap::new();
        props.insert("fsname".into(), PropertyValue::from(fsname));
        props.insert("fstype".into(), PropertyValue::from("csv"));
        props
    }

    #[test]
    fn test_from_xml_collects_nested_connectors() {
        let set = ConnectorSet::from_xml(WINDOW).unwrap();
        let types: Vec<_> = set.iter().map(Connector::type_name).collect();
        assert_eq!(types, ["FileSubscriber", "SocketPublisher"]);
        assert_eq!(set.get("out").unwrap().class(), "fs");
    }

    #[test]
    fn test_add_connector_resolves() {
        let mut set = ConnectorSet::new();
        let c = set
            .add_connector("fs", Some("sock"), Some("pub"), None, fs_properties("host:80"))
            .unwrap();
        assert_eq!(c.type_name(), "SocketPublisher");
        set.add_connector("fs", Some("file"), None, Some(true), fs_properties("a.csv"))
            .unwrap();
        assert_eq!(set.get("file").unwrap().type_name(), "FileSubscriber");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_add_connector_reports_unknown_keys() {
        let mut set = ConnectorSet::new();
        let mut props = fs_properties("a.csv");
        props.insert("foo".into(), PropertyValue::from(1));
        assert!(matches!(
            set.add_connector("fs", None, None, None, props),
            Err(ConnectorError::UnknownParameter { .. })
        ));
        assert!(set.is_empty());
    }

    #[test]
    fn test_round_trip_through_container() {
        let set = ConnectorSet::from_xml(WINDOW).unwrap();
        let xml = set.to_xml();
        assert!(xml.starts_with("<connectors><connector"));
        let again = ConnectorSet::from_xml(&xml).unwrap();
        assert_eq!(again.to_xml(), ConnectorSet::from_xml(&again.to_xml()).unwrap().to_xml());
        assert_eq!(again.len(), 2);
    }

    #[test]
    fn test_copy_and_remove() {
        let mut set = ConnectorSet::from_xml(WINDOW).unwrap();
        let copy = set.copy().unwrap();
        assert!(set.remove("in").is_some());
        assert!(set.remove("in").is_none());
        assert_eq!(set.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_empty_set_xml() {
        assert_eq!(ConnectorSet::new().to_xml(), "<connectors />");
    }
}
