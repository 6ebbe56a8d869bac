// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Classification of connector definitions onto registered variants.
//!
//! 1. Normalize the direction (`p...` publishes, anything else subscribes).
//! 2. Collect the variants keyed on `(class, direction)`.
//! 3. None: the generic variant. One: that variant.
//! 4. Several: try candidates with the most selectors first; the first whose
//!    selectors all match wins. When none match, apply the [`FallbackPolicy`].

use crate::error::Result;
use crate::registry::{Registry, Variant};
use crate::value::{BoolFormat, Direction, PropertyMap};
use crate::xml::ConnectorElement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// What to classify.
#[derive(Debug, Clone, Copy)]
pub enum ResolveSource<'a> {
    /// A `<connector>` document.
    Xml(&'a str),
    /// An already parsed element.
    Element(&'a ConnectorElement),
    /// An explicit class, direction and property set.
    Parts {
        class: &'a str,
        direction: Option<&'a str>,
        properties: &'a PropertyMap,
    },
}

/// Outcome when several variants share `(class, direction)` and none of
/// their selectors match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Resolve to the generic variant.
    #[default]
    Generic,
    /// Resolve to the last candidate tried.
    LastCandidate,
}

impl Registry {
    /// Classify with the default fallback policy.
    pub fn resolve(&self, source: ResolveSource<'_>) -> Result<Arc<Variant>> {
        self.resolve_with(source, FallbackPolicy::default())
    }

    /// Classify `source`. Only malformed XML fails; anything unrecognized
    /// resolves to the generic variant.
    pub fn resolve_with(
        &self,
        source: ResolveSource<'_>,
        policy: FallbackPolicy,
    ) -> Result<Arc<Variant>> {
        match source {
            ResolveSource::Xml(xml) => {
                let element = ConnectorElement::parse(xml)?;
                Ok(self.resolve_element(&element, policy))
            }
            ResolveSource::Element(element) => Ok(self.resolve_element(element, policy)),
            ResolveSource::Parts {
                class,
                direction,
                properties,
            } => {
                let text: BTreeMap<&str, String> = properties
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.to_wire(BoolFormat::Word)))
                    .collect();
                let direction = direction.or_else(|| text.get("type").map(String::as_str));
                Ok(self.classify(
                    class,
                    Direction::normalize(direction),
                    |key| text.get(key).map(String::as_str),
                    policy,
                ))
            }
        }
    }

    fn resolve_element(&self, element: &ConnectorElement, policy: FallbackPolicy) -> Arc<Variant> {
        self.classify(
            &element.class,
            Direction::normalize(element.direction_text()),
            |key| element.property(key),
            policy,
        )
    }

    fn classify<'a, F>(
        &self,
        class: &str,
        direction: Direction,
        lookup: F,
        policy: FallbackPolicy,
    ) -> Arc<Variant>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut candidates = self.candidates(class, direction);
        match candidates.len() {
            0 => {
                debug!("no variant for ({}, {}), using generic", class, direction);
                return self.generic();
            }
            1 => return candidates.remove(0),
            _ => {}
        }

        // Most selectors first. sort_by is stable, so among candidates with
        // the same selector count the earliest registered is tried first.
        candidates.sort_by(|a, b| b.key().selectors.len().cmp(&a.key().selectors.len()));

        for candidate in &candidates {
            if candidate.key().selectors_match(&lookup) {
                debug!(
                    "({}, {}) resolved to {} among {} candidates",
                    class,
                    direction,
                    candidate.type_name(),
                    candidates.len()
                );
                return Arc::clone(candidate);
            }
        }

        match (policy, candidates.pop()) {
            (FallbackPolicy::LastCandidate, Some(last)) => {
                warn!(
                    "no selector matched for ({}, {}); falling back to last candidate {}",
                    class,
                    direction,
                    last.type_name()
                );
                last
            }
            _ => {
                warn!(
                    "no selector matched for ({}, {}); falling back to generic connector",
                    class, direction
                );
                self.generic()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::prop;
    use crate::value::{PropertyKind, PropertyValue};

    /// Two socket-like variants with selectors and nothing to catch the rest.
    fn selective_registry() -> Registry {
        let mut registry = Registry::new();
        for (name, pattern) in [("TcpSubscriber", "tcp:"), ("UdpSubscriber", "udp:")] {
            registry.register(
                Variant::builder(name, "net", Direction::Subscribe)
                    .select_matching("address", pattern)
                    .property(prop("address", PropertyKind::String))
                    .build()
                    .unwrap(),
            );
        }
        registry
    }

    fn parts(address: &str) -> PropertyMap {
        let mut props = PropertyMap::new();
        props.insert("address".into(), PropertyValue::from(address));
        props
    }

    #[test]
    fn test_selector_picks_matching_candidate() {
        let registry = selective_registry();
        let props = parts("udp://host:1");
        let source = ResolveSource::Parts {
            class: "net",
            direction: Some("sub"),
            properties: &props,
        };
        assert_eq!(registry.resolve(source).unwrap().type_name(), "UdpSubscriber");
    }

    #[test]
    fn test_unmatched_selectors_fall_back_by_policy() {
        let registry = selective_registry();
        let props = parts("http://host");
        let source = ResolveSource::Parts {
            class: "net",
            direction: None,
            properties: &props,
        };
        assert!(registry.resolve(source).unwrap().is_generic());
        assert_eq!(
            registry
                .resolve_with(source, FallbackPolicy::LastCandidate)
                .unwrap()
                .type_name(),
            "UdpSubscriber"
        );
    }

    #[test]
    fn test_equal_selector_counts_prefer_first_registered() {
        let mut registry = Registry::new();
        for (name, selectors) in [
            ("AnyTcpSubscriber", &[("address", "tcp:")][..]),
            ("SecureTcpSubscriber", &[("address", "tcp://secure")][..]),
            ("PinnedTcpSubscriber", &[("address", "tcp:"), ("mode", "pinned$")][..]),
        ] {
            let mut builder = Variant::builder(name, "net", Direction::Subscribe)
                .property(prop("address", PropertyKind::String))
                .property(prop("mode", PropertyKind::String));
            for (property, pattern) in selectors {
                builder = builder.select_matching(property, pattern);
            }
            registry.register(builder.build().unwrap());
        }

        let props = parts("tcp://secure.host:1");
        let source = ResolveSource::Parts {
            class: "net",
            direction: None,
            properties: &props,
        };
        assert_eq!(registry.resolve(source).unwrap().type_name(), "AnyTcpSubscriber");

        let mut pinned = parts("tcp://secure.host:1");
        pinned.insert("mode".into(), PropertyValue::from("pinned"));
        let source = ResolveSource::Parts {
            class: "net",
            direction: None,
            properties: &pinned,
        };
        assert_eq!(registry.resolve(source).unwrap().type_name(), "PinnedTcpSubscriber");
    }

    #[test]
    fn test_unknown_class_is_generic() {
        let registry = selective_registry();
        let variant = registry
            .resolve(ResolveSource::Xml("<connector class='foo'><properties/></connector>"))
            .unwrap();
        assert!(variant.is_generic());
    }

    #[test]
    fn test_direction_from_type_in_parts() {
        let mut registry = Registry::new();
        registry.register(
            Variant::builder("OutPublisher", "out", Direction::Publish)
                .build()
                .unwrap(),
        );
        let mut props = PropertyMap::new();
        props.insert("type".into(), "publish".into());
        let source = ResolveSource::Parts {
            class: "out",
            direction: None,
            properties: &props,
        };
        assert_eq!(registry.resolve(source).unwrap().type_name(), "OutPublisher");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let registry = Registry::new();
        assert!(registry.resolve(ResolveSource::Xml("<connector class='fs'>")).is_err());
    }

    #[test]
    fn test_policy_serde_spelling() {
        #[derive(Deserialize)]
        struct Wrapper {
            fallback: FallbackPolicy,
        }
        let w: Wrapper = toml::from_str("fallback = \"last-candidate\"").unwrap();
        assert_eq!(w.fallback, FallbackPolicy::LastCandidate);
    }
}
