// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Environment-variable placeholders.
//!
//! A string value containing `@TOKEN@` (one or more word characters between
//! two `@`) is substituted by the engine at deploy time. Such values are
//! accepted before any type or content check runs.

use crate::value::PropertyValue;

/// True when `value` is a string carrying a deploy-time placeholder.
pub fn is_placeholder(value: &PropertyValue) -> bool {
    value.as_str().is_some_and(is_placeholder_text)
}

/// Search `text` for an `@word@` token anywhere.
pub fn is_placeholder_text(text: &str) -> bool {
    let mut rest = text;
    while let Some(start) = rest.find('@') {
        let tail = &rest[start + 1..];
        let word_len: usize = tail
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .map(char::len_utf8)
            .sum();
        if word_len > 0 && tail[word_len..].starts_with('@') {
            return true;
        }
        rest = tail;
    }
    false
}
