//! Per-invocation masking configuration.

use std::collections::HashMap;

use crate::pattern::{Pattern, PatternSet};

// =============================================================================
// MaskMode
// =============================================================================

/// How much of a detected value survives masking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaskMode {
    /// Shape-preserving masking: each detector keeps enough of the value
    /// (separators, prefixes, suffixes) to remain recognizable.
    #[default]
    Partial,
    /// Every detected value collapses to the fixed
    /// [`MASK_TOKEN`](crate::MASK_TOKEN).
    Total,
}

// =============================================================================
// MaskOptions
// =============================================================================

/// The options bundle for one [`mask_data`](crate::mask_data) invocation.
///
/// Options are plain data: construct them per call or hold one process-wide
/// and clone freely. The default is partial mode with the built-in patterns.
///
/// # Example
/// ```
/// use privmask::{MaskMode, MaskOptions, Pattern};
///
/// let options = MaskOptions::new()
///     .with_mode(MaskMode::Partial)
///     .with_pattern("custom", Pattern::parse("secret").unwrap());
/// assert_eq!(options.mode(), MaskMode::Partial);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MaskOptions {
    mode: MaskMode,
    overrides: HashMap<String, Pattern>,
}

impl MaskOptions {
    /// Partial mode, built-in patterns only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for total mode with the built-in patterns.
    #[must_use]
    pub fn total() -> Self {
        Self::new().with_mode(MaskMode::Total)
    }

    /// Uses the given mode.
    #[must_use]
    pub fn with_mode(mut self, mode: MaskMode) -> Self {
        self.mode = mode;
        self
    }

    /// Registers `pattern` under `name`, replacing the same-named built-in
    /// default if there is one.
    ///
    /// The name `custom` is special: the engine consults it before every
    /// built-in detector, and a match claims the string unconditionally.
    #[must_use]
    pub fn with_pattern<N>(mut self, name: N, pattern: Pattern) -> Self
    where
        N: Into<String>,
    {
        self.overrides.insert(name.into(), pattern);
        self
    }

    /// The configured mode.
    pub fn mode(&self) -> MaskMode {
        self.mode
    }

    /// The caller-supplied pattern overrides, keyed by detector name.
    pub fn overrides(&self) -> &HashMap<String, Pattern> {
        &self.overrides
    }

    /// Resolves the merged registry for this invocation.
    pub(crate) fn pattern_set(&self) -> PatternSet {
        PatternSet::merge(&self.overrides)
    }
}

// =============================================================================
// Tests
// =============================================================================
