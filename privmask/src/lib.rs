//! Pattern-driven masking of sensitive data in nested structures.
//!
//! This crate separates:
//! - **Pattern registry**: which substrings count as sensitive (e.g. emails,
//!   phone numbers, API keys), expressed as named regular expressions.
//! - **Masking engine**: how a matched value is transformed, and how masking
//!   recurses through sequences and keyed mappings without disturbing
//!   structure.
//!
//! The entrypoint is [`mask_data`]: it walks a [`serde_json::Value`], scans
//! every string leaf against the registry in a fixed precedence order, and
//! rewrites the first matching detector's spans. Callers can override or
//! extend the registry per invocation through [`MaskOptions`].
//!
//! What this crate does:
//! - defines the built-in detector set and its precedence contract
//! - applies partial (shape-preserving) or total masking to string leaves
//! - provides fail-open adapters for response emission and log sinks
//! - gates premium conveniences behind an explicit licensing session
//!   (`license` feature)
//!
//! What it does not do:
//! - perform I/O: key persistence and verification are trait seams
//! - validate phone numbers or card numbers beyond their surface shape
//! - detect cycles in the input (acyclic data is the caller's contract)

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
#[cfg(feature = "license")]
pub mod license;
pub mod logging;
mod masking;
pub mod middleware;
mod pattern;

// Re-exports from the pattern module
pub use pattern::{DETECTION_ORDER, DetectorKind, Pattern, PatternError, PatternSet};

// Re-exports from the masking module
pub use masking::{
    MASK_CHAR, MASK_TOKEN, MaskError, MaskMode, MaskOptions, mask_data, mask_text,
};

// Re-exports from integration modules
#[cfg(feature = "license")]
pub use license::{
    AuditRecord, IssuedKey, KeyStore, KeyVerifier, LicenseError, LicenseSession, MemoryKeyStore,
    issue_key,
};
pub use logging::MaskedSink;
pub use middleware::mask_middleware;
