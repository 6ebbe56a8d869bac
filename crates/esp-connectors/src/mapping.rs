// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Re-mapping of raw property sets onto a variant's public names.

use crate::error::{ConnectorError, Result};
use crate::registry::Variant;
use crate::value::{PropertyMap, PropertyValue};
use std::collections::HashMap;

/// Key dropped from every property set: the implicit self-reference.
pub const SELF_KEY: &str = "self";

/// Result of [`map_properties`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedProperties {
    /// Values popped for each requested name, in request order.
    pub required: Vec<Option<PropertyValue>>,
    /// Everything else, keyed by public name.
    pub remaining: PropertyMap,
}

/// Rename `properties` to `variant`'s public names.
///
/// Keys listed in `delete` (and `self`) are dropped. Every other key must name
/// a descriptor by public or wire name unless the variant is open. Names in
/// `required` are then popped out in order, `None` where absent.
pub fn map_properties<I, K>(
    variant: &Variant,
    properties: I,
    required: &[K],
    delete: &[K],
) -> Result<MappedProperties>
where
    I: IntoIterator<Item = (String, PropertyValue)>,
    K: AsRef<str>,
{
    let mut names: HashMap<&str, &str> = HashMap::new();
    for d in variant.descriptors() {
        names.insert(d.wire_name(), d.name());
    }
    for d in variant.descriptors() {
        names.insert(d.name(), d.name());
    }

    let mut remaining = PropertyMap::new();
    for (key, value) in properties {
        if key == SELF_KEY || delete.iter().any(|d| d.as_ref() == key) {
            continue;
        }
        let public = match names.get(key.as_str()) {
            Some(public) => (*public).to_string(),
            None if variant.is_open() => key,
            None => {
                return Err(ConnectorError::UnknownParameter {
                    name: key,
                    variant: variant.type_name().to_string(),
                })
            }
        };
        remaining.insert(public, value);
    }

    let required = required
        .iter()
        .map(|name| remaining.remove(name.as_ref()))
        .collect();

    Ok(MappedProperties {
        required,
        remaining,
    })
}
