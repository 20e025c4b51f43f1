//! Response interception adapter.
//!
//! [`mask_middleware`] wraps an outbound-response-emitting function so that
//! whatever value would have been emitted is first passed through
//! [`mask_data`]. On masking failure the adapter logs the error and emits
//! the original value instead: it fails open for availability, not for
//! privacy. Callers who cannot tolerate an unmasked response must validate
//! their data before it reaches the boundary.

use serde_json::Value;

use crate::masking::{MaskOptions, mask_data};

/// Wraps `respond` so emitted values are masked with `options` first.
///
/// # Example
/// ```
/// use privmask::{MaskOptions, mask_middleware};
/// use serde_json::json;
///
/// let respond = mask_middleware(MaskOptions::new(), |body| body);
/// assert_eq!(
///     respond(json!({"email": "user@example.com"})),
///     json!({"email": "us***@example.com"}),
/// );
/// ```
pub fn mask_middleware<F, R>(options: MaskOptions, respond: F) -> impl Fn(Value) -> R
where
    F: Fn(Value) -> R,
{
    move |value| match mask_data(&value, &options) {
        Ok(masked) => respond(masked),
        Err(error) => {
            tracing::error!(error = %error, "masking failed, emitting response unmasked");
            respond(value)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
