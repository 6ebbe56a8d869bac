// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property schemas: descriptors, their validation rules and the
//! expression language used by `valid_expr`.

pub mod descriptor;
pub mod placeholder;
pub mod predicate;
pub mod validation;

pub use descriptor::{prop, ExprRule, PropertyBuilder, PropertyDescriptor, ValueRule};
pub use placeholder::{is_placeholder, is_placeholder_text};
pub use predicate::{Predicate, PredicateError};
pub use validation::{ValidationIssue, ValidationOptions};
