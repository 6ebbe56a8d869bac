// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Toolkit configuration.
//!
//! Supports both programmatic and file-based configuration.
//!
//! ```toml
//! [xml]
//! direction_tokens = "short"
//! bool_format = "digit"
//!
//! [resolver]
//! fallback = "last-candidate"
//!
//! [naming]
//! prefix = "conn_"
//!
//! [validation]
//! strict = true
//! ```

use crate::connector::{BuildOptions, DEFAULT_NAME_PREFIX};
use crate::resolver::FallbackPolicy;
use crate::schema::ValidationOptions;
use crate::xml::XmlOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

const MAX_INDENT: usize = 16;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Everything callers can tune about parsing, resolving and writing
/// connectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Output encoding.
    #[serde(default)]
    pub xml: XmlOptions,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Variant resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// What to do when several variants share a key and none matches.
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

/// Generated connector names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_NAME_PREFIX.to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

/// Value checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject content-invalid values at assignment.
    #[serde(default)]
    pub strict: bool,

    /// Honour `@TOKEN@` placeholders.
    #[serde(default = "default_true")]
    pub placeholders: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict: false,
            placeholders: true,
        }
    }
}

impl From<&ValidationConfig> for ValidationOptions {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            placeholders: config.placeholders,
            strict: config.strict,
        }
    }
}

impl SdkConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.naming.prefix;
        let mut chars = prefix.chars();
        match chars.next() {
            None => {
                return Err(ConfigError::Invalid("Naming prefix is empty".into()));
            }
            Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
                return Err(ConfigError::Invalid(format!(
                    "Naming prefix {prefix:?} must start with a letter or underscore"
                )));
            }
            Some(_) => {}
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))) {
            return Err(ConfigError::Invalid(format!(
                "Naming prefix {prefix:?} contains {bad:?}"
            )));
        }

        if self.xml.indent > MAX_INDENT {
            return Err(ConfigError::Invalid(format!(
                "XML indent {} exceeds {}",
                self.xml.indent, MAX_INDENT
            )));
        }

        Ok(())
    }

    /// Construction settings derived from this configuration.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            name_prefix: self.naming.prefix.clone(),
            validation: ValidationOptions::from(&self.validation),
            fallback: self.resolver.fallback,
        }
    }
}
