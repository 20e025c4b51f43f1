//! Detector identities and compiled patterns.

use regex::Regex;

// =============================================================================
// Pattern - a compiled detector expression
// =============================================================================

/// A compiled detector pattern.
///
/// A pattern may define at most one capture group. When present, span-aware
/// strategies redact only the captured group and preserve the surrounding
/// match text verbatim (e.g. the `@` sigil of a username stays visible).
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Wraps an already-compiled regular expression.
    #[must_use]
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }

    /// Compiles `pattern` into a [`Pattern`].
    ///
    /// # Example
    /// ```
    /// use privmask::Pattern;
    ///
    /// let pattern = Pattern::parse(r"secret").unwrap();
    /// assert!(pattern.is_match("my secret value"));
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self::new(Regex::new(pattern)?))
    }

    /// Returns the underlying regular expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Reports whether the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Reports whether the pattern defines an explicit capture group.
    pub(crate) fn has_capture(&self) -> bool {
        // captures_len counts the implicit whole-match group 0.
        self.regex.captures_len() > 1
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::new(regex)
    }
}

// =============================================================================
// PatternError
// =============================================================================

/// Errors raised while building detector patterns.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid pattern: {0}")]
    Invalid(#[from] regex::Error),
}

// =============================================================================
// DetectorKind - the closed set of detector identities
// =============================================================================

/// Identity of a detector in the registry.
///
/// `Email` and `Phone` are the legacy whole-string detectors: their strategy
/// transforms the entire string once a match is found anywhere in it. Every
/// other kind is span-aware and rewrites only the matched spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetectorKind {
    Email,
    Phone,
    Ipv4,
    CreditCard,
    ApiKey,
    Username,
    Password,
    /// Caller-supplied pattern, consulted before every built-in detector.
    Custom,
}

/// The precedence order in which built-in detectors claim a string.
///
/// The first detector in this order whose pattern matches wins; no further
/// detectors run for that string. `Custom` is not listed because the engine
/// consults it before this walk.
pub const DETECTION_ORDER: [DetectorKind; 7] = [
    DetectorKind::Email,
    DetectorKind::Phone,
    DetectorKind::Ipv4,
    DetectorKind::CreditCard,
    DetectorKind::ApiKey,
    DetectorKind::Username,
    DetectorKind::Password,
];

impl DetectorKind {
    /// The registry key for this detector.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Ipv4 => "ipv4",
            Self::CreditCard => "credit_card",
            Self::ApiKey => "api_key",
            Self::Username => "username",
            Self::Password => "password",
            Self::Custom => "custom",
        }
    }

    /// Resolves a registry key back to its detector.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "ipv4" => Some(Self::Ipv4),
            "credit_card" => Some(Self::CreditCard),
            "api_key" => Some(Self::ApiKey),
            "username" => Some(Self::Username),
            "password" => Some(Self::Password),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Whether this detector rewrites matched spans rather than the whole string.
    #[must_use]
    pub fn is_span_aware(self) -> bool {
        !matches!(self, Self::Email | Self::Phone)
    }
}

// =============================================================================
// Tests
// =============================================================================
