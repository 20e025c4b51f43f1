//! The masking engine: options, strategies and recursive traversal.
//!
//! This module provides:
//!
//! - **`options`**: [`MaskOptions`] and [`MaskMode`], the per-invocation
//!   configuration bundle.
//! - **`strategies`**: the per-detector string transformations.
//! - **`engine`**: [`mask_data`] and [`mask_text`], the recursive dispatch
//!   over value shapes.
//! - **`error`**: [`MaskError`].
//!
//! Detector patterns and the registry live in `crate::pattern`.

mod engine;
mod error;
mod options;
mod strategies;

pub use engine::{mask_data, mask_text};
pub use error::MaskError;
pub use options::{MaskMode, MaskOptions};
pub use strategies::{MASK_CHAR, MASK_TOKEN};
