// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Connector error types.

use crate::value::PropertyKind;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConnectorError>;

/// Structural failures raised while building, validating or parsing connectors.
///
/// Value-content failures (enumerations, patterns, expressions) are not errors;
/// they surface as `bool` results or [`crate::ValidationIssue`] lists unless a
/// caller explicitly asks for strict checking.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The value's kind matches none of the descriptor's declared kinds.
    #[error("{property}: {found} is not one of: {}", join_kinds(.expected))]
    TypeMismatch {
        property: String,
        expected: Vec<PropertyKind>,
        found: PropertyKind,
    },

    /// A property name has no descriptor on the target variant.
    #[error("{name} is not a valid parameter for {variant}")]
    UnknownParameter { name: String, variant: String },

    /// The XML text could not be parsed.
    #[error("malformed connector document at {line}:{column}: {message} (line {line}: `{snippet}`)")]
    MalformedDocument {
        line: u32,
        column: u32,
        message: String,
        snippet: String,
    },

    /// A required XML attribute or element is absent.
    #[error("missing `{0}` on connector element")]
    MissingAttribute(&'static str),

    /// The document root is not a connector (or connector list).
    #[error("unexpected element <{found}>, expected <{expected}>")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },

    /// A validity or selector pattern failed to compile.
    #[error("invalid pattern for {property}: {source}")]
    InvalidPattern {
        property: String,
        #[source]
        source: regex::Error,
    },

    /// A predicate expression failed to parse.
    #[error("invalid expression for {property} at offset {offset}: {message}")]
    InvalidExpression {
        property: String,
        offset: usize,
        message: String,
    },

    /// A descriptor default does not pass the descriptor's own validation.
    #[error("default value {value} is not valid for {property}")]
    InvalidDefault { property: String, value: String },

    /// Two descriptors on one variant share a public name.
    #[error("{property} is declared twice on {variant}")]
    DuplicateProperty { property: String, variant: String },

    /// A dtype spelling that maps to no known kind.
    #[error("unknown data type: {0}")]
    UnknownKind(String),

    /// Strict mode: a value failed its enumeration, pattern or expression checks.
    #[error("{value} is not a valid value for {property}")]
    InvalidValue { property: String, value: String },

    /// Strict mode: a required property has neither a value nor a default.
    #[error("{property} is required by {variant}")]
    MissingRequired { property: String, variant: String },
}

fn join_kinds(kinds: &[PropertyKind]) -> String {
    kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message_lists_kinds() {
        let err = ConnectorError::TypeMismatch {
            property: "blocksize".into(),
            expected: vec![PropertyKind::Int, PropertyKind::String],
            found: PropertyKind::Bool,
        };
        assert_eq!(err.to_string(), "blocksize: bool is not one of: int, string");
    }

    #[test]
    fn test_unknown_parameter_message() {
        let err = ConnectorError::UnknownParameter {
            name: "foo".into(),
            variant: "FileSubscriber".into(),
        };
        assert_eq!(err.to_string(), "foo is not a valid parameter for FileSubscriber");
    }
}
