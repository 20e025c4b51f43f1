//! Recursive masking dispatch over value shapes.

use serde_json::{Map, Value};

use super::{
    error::MaskError,
    options::{MaskMode, MaskOptions},
    strategies,
};
use crate::pattern::{DETECTION_ORDER, DetectorKind, PatternSet};

// =============================================================================
// Entrypoints
// =============================================================================

/// Masks every sensitive string found inside `value`.
///
/// The result is structurally isomorphic to the input: same container
/// shapes, same keys in the same order, same sequence lengths. Non-string
/// scalars pass through unchanged. The input is never mutated, and the
/// same `(value, options)` pair always produces the same output.
///
/// # Errors
///
/// Returns [`MaskError::MissingData`] when `value` is the `null` sentinel.
/// A `null` nested inside a keyed mapping does not fail the call: the
/// failure is contained and that field is kept as-is (see the module
/// documentation on the containment trade-off).
///
/// # Example
/// ```
/// use privmask::{MaskOptions, mask_data};
/// use serde_json::json;
///
/// let masked = mask_data(&json!("user@example.com"), &MaskOptions::new()).unwrap();
/// assert_eq!(masked, json!("us***@example.com"));
/// ```
pub fn mask_data(value: &Value, options: &MaskOptions) -> Result<Value, MaskError> {
    if value.is_null() {
        return Err(MaskError::MissingData);
    }
    let patterns = options.pattern_set();
    mask_value(value, &patterns, options.mode())
}

/// Masks a bare string with the same scan [`mask_data`] applies to string
/// leaves.
pub fn mask_text(text: &str, options: &MaskOptions) -> String {
    mask_string(text, &options.pattern_set(), options.mode())
}

// =============================================================================
// Shape dispatch
// =============================================================================

fn mask_value(value: &Value, patterns: &PatternSet, mode: MaskMode) -> Result<Value, MaskError> {
    match value {
        Value::Null => Err(MaskError::MissingData),
        Value::String(text) => Ok(Value::String(mask_string(text, patterns, mode))),
        Value::Array(items) => {
            let mut masked = Vec::with_capacity(items.len());
            for item in items {
                masked.push(mask_value(item, patterns, mode)?);
            }
            Ok(Value::Array(masked))
        }
        Value::Object(fields) => {
            let mut masked = Map::with_capacity(fields.len());
            for (key, field) in fields {
                masked.insert(key.clone(), mask_field(key, field, patterns, mode));
            }
            Ok(Value::Object(masked))
        }
        other => Ok(other.clone()),
    }
}

/// Per-field recovery boundary for keyed mappings.
///
/// A field whose masking fails is kept unmasked in place and the failure is
/// logged, so one bad field never aborts the surrounding traversal. This
/// trades redaction for availability; callers who need the opposite should
/// pre-validate their data.
fn mask_field(key: &str, value: &Value, patterns: &PatternSet, mode: MaskMode) -> Value {
    match mask_value(value, patterns, mode) {
        Ok(masked) => masked,
        Err(error) => {
            tracing::warn!(field = key, error = %error, "masking failed, keeping field unmasked");
            value.clone()
        }
    }
}

/// Scans a string leaf: the caller's custom pattern claims the string
/// unconditionally when it matches; otherwise the built-in detectors are
/// walked in precedence order and the first match wins.
fn mask_string(text: &str, patterns: &PatternSet, mode: MaskMode) -> String {
    if let Some(custom) = patterns.custom() {
        if custom.is_match(text) {
            return strategies::apply(DetectorKind::Custom, custom, text, mode);
        }
    }
    for kind in DETECTION_ORDER {
        if let Some(pattern) = patterns.get(kind) {
            if pattern.is_match(text) {
                return strategies::apply(kind, pattern, text, mode);
            }
        }
    }
    text.to_string()
}

// =============================================================================
// Tests
// =============================================================================
