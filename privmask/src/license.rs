//! Premium gate and licensing interfaces.
//!
//! The licensing flow itself (checkout webhooks, key delivery email) lives
//! outside this crate; what lives here is:
//!
//! - the issuance record shape ([`IssuedKey`]) and token generator
//!   ([`issue_key`]),
//! - the persistence and verification seams ([`KeyStore`], [`KeyVerifier`])
//!   with an in-memory reference store,
//! - [`LicenseSession`], the explicit context object gating the premium
//!   conveniences, and
//! - the premium wrappers themselves, which mask and then emit an
//!   [`AuditRecord`] on the `privmask::audit` tracing target.
//!
//! The session replaces process-wide premium flags: construct one where the
//! application keeps its state and thread it explicitly.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::masking::{MaskError, MaskOptions, mask_data, mask_text};

/// Opaque error type for store and verifier implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by the premium gate.
#[derive(Debug, thiserror::Error)]
pub enum LicenseError {
    /// The session has no verified premium key.
    #[error("premium access is required for this operation")]
    PremiumRequired,

    /// The verification lookup rejected the key, or the lookup itself
    /// failed. The reason carries whichever happened.
    #[error("invalid premium key: {reason}")]
    InvalidKey { reason: String },

    /// The underlying masking call failed.
    #[error(transparent)]
    Mask(#[from] MaskError),
}

// =============================================================================
// Key issuance and verification seams
// =============================================================================

/// A license key issued to a purchaser, as persisted by the issuance flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedKey {
    pub key: String,
    pub email: String,
}

/// Generates a fresh opaque license key for `email`.
///
/// Keys are 32 lowercase hex characters and carry no structure; validity is
/// purely membership in the store they were persisted to.
pub fn issue_key(email: &str) -> IssuedKey {
    IssuedKey {
        key: uuid::Uuid::new_v4().simple().to_string(),
        email: email.to_string(),
    }
}

/// Persistence seam for issued keys.
///
/// The production store is a database; tests and single-process deployments
/// can use [`MemoryKeyStore`].
pub trait KeyStore {
    /// Persists an issued key.
    fn insert(&self, record: IssuedKey) -> Result<(), BoxError>;

    /// Membership check by key.
    fn contains(&self, key: &str) -> Result<bool, BoxError>;
}

/// The verification lookup at its interface boundary: given a token, is it
/// a known, valid key?
pub trait KeyVerifier {
    fn verify(&self, key: &str) -> Result<bool, BoxError>;
}

/// Every key store can verify by membership.
impl<S: KeyStore> KeyVerifier for S {
    fn verify(&self, key: &str) -> Result<bool, BoxError> {
        self.contains(key)
    }
}

/// In-memory reference implementation of [`KeyStore`].
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    records: RwLock<Vec<IssuedKey>>,
}

impl MemoryKeyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> std::sync::RwLockReadGuard<'_, Vec<IssuedKey>> {
        match self.records.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl KeyStore for MemoryKeyStore {
    fn insert(&self, record: IssuedKey) -> Result<(), BoxError> {
        let mut guard = match self.records.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(record);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, BoxError> {
        Ok(self.records().iter().any(|record| record.key == key))
    }
}

// =============================================================================
// Audit records
// =============================================================================

/// What the premium wrappers record for every call.
#[derive(Clone, Debug, Serialize)]
pub struct AuditRecord {
    pub original: Value,
    pub masked: Value,
    pub timestamp: DateTime<Utc>,
}

fn audit(original: Value, masked: Value) {
    let record = AuditRecord {
        original,
        masked,
        timestamp: Utc::now(),
    };
    match serde_json::to_string(&record) {
        Ok(json) => {
            tracing::info!(target: "privmask::audit", record = %json, "premium mask audit");
        }
        Err(error) => {
            tracing::warn!(target: "privmask::audit", error = %error, "audit record serialization failed");
        }
    }
}

// =============================================================================
// LicenseSession - the explicit premium context
// =============================================================================

/// The premium gate: holds the verified key for one application context.
///
/// # Example
/// ```
/// use privmask::{KeyStore, LicenseSession, MaskOptions, MemoryKeyStore, issue_key};
/// use serde_json::json;
///
/// let store = MemoryKeyStore::new();
/// let issued = issue_key("buyer@example.com");
/// store.insert(issued.clone()).unwrap();
///
/// let mut session = LicenseSession::new();
/// session.enable_premium(issued.key, &store).unwrap();
///
/// let masked = session
///     .mask_data_premium(&json!("+1234567890"), &MaskOptions::new())
///     .unwrap();
/// assert_eq!(masked, json!("+123****7890"));
/// ```
#[derive(Debug, Default)]
pub struct LicenseSession {
    key: Option<String>,
}

impl LicenseSession {
    /// A session with the gate closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verifies `key` against the lookup and opens the gate on success.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidKey`] when the lookup rejects the key or the
    /// lookup itself fails; the session stays in its previous state.
    pub fn enable_premium<V>(&mut self, key: impl Into<String>, verifier: &V) -> Result<(), LicenseError>
    where
        V: KeyVerifier + ?Sized,
    {
        let key = key.into();
        match verifier.verify(&key) {
            Ok(true) => {
                self.key = Some(key);
                Ok(())
            }
            Ok(false) => Err(LicenseError::InvalidKey {
                reason: "key rejected by the verification lookup".to_string(),
            }),
            Err(source) => Err(LicenseError::InvalidKey {
                reason: source.to_string(),
            }),
        }
    }

    /// Whether the gate is open.
    pub fn is_premium(&self) -> bool {
        self.key.is_some()
    }

    /// The verified key, when the gate is open.
    pub fn premium_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Premium [`mask_data`]: masks and emits an audit record.
    ///
    /// # Errors
    ///
    /// [`LicenseError::PremiumRequired`] when the gate is closed; engine
    /// failures propagate as [`LicenseError::Mask`].
    pub fn mask_data_premium(
        &self,
        value: &Value,
        options: &MaskOptions,
    ) -> Result<Value, LicenseError> {
        self.require_premium()?;
        let masked = mask_data(value, options)?;
        audit(value.clone(), masked.clone());
        Ok(masked)
    }

    /// Premium helper for database query text: masks the query string and
    /// emits an audit record.
    pub fn mask_database_query(
        &self,
        query: &str,
        options: &MaskOptions,
    ) -> Result<String, LicenseError> {
        self.require_premium()?;
        let masked = mask_text(query, options);
        audit(
            Value::String(query.to_string()),
            Value::String(masked.clone()),
        );
        Ok(masked)
    }

    fn require_premium(&self) -> Result<(), LicenseError> {
        if self.is_premium() {
            Ok(())
        } else {
            Err(LicenseError::PremiumRequired)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        BoxError, KeyStore, KeyVerifier, LicenseError, LicenseSession, MemoryKeyStore, issue_key,
    };
    use crate::masking::MaskOptions;

    struct FailingVerifier;

    impl KeyVerifier for FailingVerifier {
        fn verify(&self, _key: &str) -> Result<bool, BoxError> {
            Err("lookup service unreachable".into())
        }
    }

    #[test]
    fn issued_keys_are_opaque_hex() {
        let issued = issue_key("buyer@example.com");
        assert_eq!(issued.key.len(), 32);
        assert!(issued.key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(issued.email, "buyer@example.com");
    }

    #[test]
    fn issuance_and_verification_round_trip() {
        let store = MemoryKeyStore::new();
        let issued = issue_key("buyer@example.com");
        store.insert(issued.clone()).unwrap();

        assert!(store.verify(&issued.key).unwrap());
        assert!(!store.verify("unknown-key").unwrap());
    }

    #[test]
    fn gate_is_closed_by_default() {
        let session = LicenseSession::new();
        assert!(!session.is_premium());

        let err = session
            .mask_data_premium(&json!("user@example.com"), &MaskOptions::new())
            .unwrap_err();
        assert!(matches!(err, LicenseError::PremiumRequired));

        let err = session
            .mask_database_query("password: hunter2", &MaskOptions::new())
            .unwrap_err();
        assert!(matches!(err, LicenseError::PremiumRequired));
    }

    #[test]
    fn rejected_key_keeps_the_gate_closed() {
        let store = MemoryKeyStore::new();
        let mut session = LicenseSession::new();

        let err = session.enable_premium("not-a-key", &store).unwrap_err();
        assert!(matches!(err, LicenseError::InvalidKey { .. }));
        assert!(!session.is_premium());
    }

    #[test]
    fn lookup_failure_wraps_the_reason() {
        let mut session = LicenseSession::new();
        let err = session.enable_premium("any", &FailingVerifier).unwrap_err();
        match err {
            LicenseError::InvalidKey { reason } => {
                assert!(reason.contains("unreachable"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn premium_wrappers_mask_once_enabled() {
        let store = MemoryKeyStore::new();
        let issued = issue_key("buyer@example.com");
        store.insert(issued.clone()).unwrap();

        let mut session = LicenseSession::new();
        session.enable_premium(issued.key, &store).unwrap();
        assert!(session.is_premium());
        assert!(session.premium_key().is_some());

        let masked = session
            .mask_data_premium(&json!({"email": "user@example.com"}), &MaskOptions::new())
            .unwrap();
        assert_eq!(masked, json!({"email": "us***@example.com"}));

        let masked = session
            .mask_database_query(
                "SELECT * FROM users WHERE email = 'user@example.com'",
                &MaskOptions::new(),
            )
            .unwrap();
        assert!(masked.contains("***@example.com"));
    }

    #[test]
    fn engine_failures_propagate_through_the_gate() {
        let store = MemoryKeyStore::new();
        let issued = issue_key("buyer@example.com");
        store.insert(issued.clone()).unwrap();

        let mut session = LicenseSession::new();
        session.enable_premium(issued.key, &store).unwrap();

        let err = session
            .mask_data_premium(&serde_json::Value::Null, &MaskOptions::new())
            .unwrap_err();
        assert!(matches!(err, LicenseError::Mask(_)));
    }
}
