//! Input validation primitives.
//!
//! Request types collect every failing field into a [`ValidationErrors`]
//! instead of stopping at the first one, so clients can fix a form in a
//! single round trip. The individual checks live next to the request types in
//! [`crate::models`]; this module only holds the accumulator and the checks
//! shared by both resources.

use core::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One or more field-level validation failures.
///
/// Messages are stable, human-readable strings such as
/// `"title should not be empty"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    /// Create an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// A single failure.
    #[must_use]
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    /// Record a failure.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Whether no failure has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded messages, in the order they were found.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Whether any recorded message mentions `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.0.iter().any(|m| m.contains(needle))
    }

    /// Finish a validation pass: `Ok(value)` if nothing failed.
    ///
    /// # Errors
    ///
    /// Returns `self` if any failure was recorded.
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, Self> {
        if !self.is_empty() {
            return Err(self);
        }
        // Every field was checked, so the builder only returns None on a
        // logic error in the caller.
        value().ok_or_else(|| Self::single("invalid request"))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a required text field: present and not blank.
pub fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(format!("{field} should not be empty"));
            None
        }
    }
}

/// Check an optional text field taken from raw JSON.
///
/// Absent is fine. A field that is present must be a non-blank string; an
/// explicit `null` counts as present.
pub fn optional_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Value>,
) -> Option<String> {
    match value? {
        Value::String(v) if !v.trim().is_empty() => Some(v),
        Value::String(_) | Value::Null => {
            errors.push(format!("{field} should not be empty"));
            None
        }
        _ => {
            errors.push(format!("{field} must be a string"));
            None
        }
    }
}

/// Check an integer field taken from raw JSON.
///
/// `None` means the field was absent; the caller decides whether that is an
/// error.
pub fn integer(errors: &mut ValidationErrors, field: &str, value: &Value) -> Option<i32> {
    let parsed = value.as_i64().and_then(|n| i32::try_from(n).ok());
    if parsed.is_none() {
        errors.push(match value {
            Value::Null => format!("{field} should not be empty"),
            _ => format!("{field} must be an integer number"),
        });
    }
    parsed
}

/// Deserialize a field so that an explicit `null` is kept as `Some(Value::Null)`.
///
/// Used with `#[serde(default, deserialize_with = "present")]`: an absent
/// field stays `None`, while `"price": null` reaches the validator and is
/// rejected instead of being silently treated as "not supplied".
///
/// # Errors
///
/// Propagates the underlying deserializer error.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
