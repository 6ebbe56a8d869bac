// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ESP Connector Definitions
//!
//! Typed, validated connector definitions for event stream processing
//! projects, and their XML encoding.
//!
//! # Features
//!
//! - **Property Schemas**: Kinds, defaults, enumerations, patterns and
//!   predicate expressions per connector property
//! - **Variant Resolution**: Map `(class, type, properties)` onto one of the
//!   built-in connector types, falling back to a generic connector
//! - **XML Round-Tripping**: Parse `<connector>` elements and write them back
//!   with defaults injected in a deterministic order
//! - **Placeholders**: `@TOKEN@` values pass every check until deploy time
//!
//! # Quick Start
//!
//! ```no_run
//! use esp_connectors::Connector;
//!
//! let xml = r#"<connector class="fs" name="in" type="subscribe">
//!   <properties>
//!     <property name="fsname">trades.csv</property>
//!     <property name="fstype">csv</property>
//!   </properties>
//! </connector>"#;
//!
//! let connector = Connector::from_xml(xml)?;
//! assert_eq!(connector.type_name(), "FileSubscriber");
//! for issue in connector.validate() {
//!     eprintln!("{issue}");
//! }
//! println!("{}", connector.to_xml());
//! # Ok::<(), esp_connectors::ConnectorError>(())
//! ```
//!
//! # Configuration File
//!
//! ```toml
//! [xml]
//! direction_tokens = "long"
//! bool_format = "word"
//!
//! [resolver]
//! fallback = "generic"
//!
//! [naming]
//! prefix = "c_"
//!
//! [validation]
//! strict = false
//! placeholders = true
//! ```

pub mod config;
pub mod connector;
pub mod error;
pub mod factory;
pub mod mapping;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod set;
pub mod value;
mod variants;
pub mod xml;

pub use config::{ConfigError, SdkConfig};
pub use connector::{gen_name, BuildOptions, Connector};
pub use error::{ConnectorError, Result};
pub use factory::ConnectorFactory;
pub use mapping::{map_properties, MappedProperties};
pub use registry::{ConnectorKey, Registry, Selector, Variant, VariantBuilder, GENERIC_TYPE_NAME};
pub use resolver::{FallbackPolicy, ResolveSource};
pub use schema::{prop, PropertyBuilder, PropertyDescriptor, ValidationIssue, ValidationOptions};
pub use set::ConnectorSet;
pub use value::{BoolFormat, Direction, DirectionTokens, PropertyKind, PropertyMap, PropertyValue};
pub use xml::{ConnectorElement, XmlOptions};
