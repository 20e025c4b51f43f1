//! The merged pattern registry the engine scans against.

use std::collections::HashMap;

use super::{
    builtin::default_pattern,
    detector::{DETECTION_ORDER, DetectorKind, Pattern},
};

// =============================================================================
// PatternSet - defaults merged with caller overrides
// =============================================================================

/// An immutable, merged view of the built-in defaults and caller overrides.
///
/// Overrides *replace* the same-named default entirely; they do not compose
/// with it. Names outside the built-in set (`custom` in particular) are
/// added as-is. The engine only ever consults `custom` and the names in
/// [`DETECTION_ORDER`], so other unknown names are carried but never run.
#[derive(Clone, Debug)]
pub struct PatternSet {
    patterns: HashMap<String, Pattern>,
}

impl PatternSet {
    /// The built-in defaults with no overrides applied.
    #[must_use]
    pub fn defaults() -> Self {
        Self::merge(&HashMap::new())
    }

    /// Merges `overrides` over the built-in defaults.
    pub fn merge(overrides: &HashMap<String, Pattern>) -> Self {
        let mut patterns: HashMap<String, Pattern> = DETECTION_ORDER
            .iter()
            .filter_map(|kind| default_pattern(*kind).map(|p| (kind.name().to_string(), p)))
            .collect();
        for (name, pattern) in overrides {
            patterns.insert(name.clone(), pattern.clone());
        }
        Self { patterns }
    }

    /// Looks up the pattern registered under a detector's name.
    pub fn get(&self, kind: DetectorKind) -> Option<&Pattern> {
        self.get_named(kind.name())
    }

    /// Looks up a pattern by registry key.
    pub fn get_named(&self, name: &str) -> Option<&Pattern> {
        self.patterns.get(name)
    }

    /// The caller-supplied custom pattern, if one was provided.
    pub fn custom(&self) -> Option<&Pattern> {
        self.get(DetectorKind::Custom)
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::defaults()
    }
}

// =============================================================================
// Tests
// =============================================================================
