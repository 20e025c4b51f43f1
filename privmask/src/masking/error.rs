//! Engine errors.

/// Errors raised by the masking engine.
#[derive(Clone, Copy, Debug, thiserror::Error)]
pub enum MaskError {
    /// The input value is absent (the `null` sentinel).
    ///
    /// Raised at the top-level entrypoint and from recursion into a nested
    /// `null`; keyed-mapping traversal contains the nested case per field.
    #[error("data is required")]
    MissingData,
}
