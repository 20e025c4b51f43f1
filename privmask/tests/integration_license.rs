#![cfg(feature = "license")]

//! End-to-end tests for the premium gate, including the audit trail the
//! premium wrappers emit through `tracing`.

use std::{
    io,
    sync::{Arc, Mutex},
};

use privmask::{
    IssuedKey, KeyStore, LicenseError, LicenseSession, MaskOptions, MemoryKeyStore, issue_key,
};
use serde_json::json;

#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn enabled_session() -> (LicenseSession, MemoryKeyStore) {
    let store = MemoryKeyStore::new();
    let issued = issue_key("buyer@example.com");
    store.insert(issued.clone()).unwrap();

    let mut session = LicenseSession::new();
    session.enable_premium(issued.key, &store).unwrap();
    (session, store)
}

#[test]
fn full_purchase_to_premium_flow() {
    let store = MemoryKeyStore::new();

    // The webhook side: issue and persist a key for the purchaser.
    let issued = issue_key("buyer@example.com");
    store.insert(issued.clone()).unwrap();

    // The client side: enable premium with the delivered key.
    let mut session = LicenseSession::new();
    session.enable_premium(issued.key.clone(), &store).unwrap();
    assert!(session.is_premium());
    assert_eq!(session.premium_key(), Some(issued.key.as_str()));

    let masked = session
        .mask_data_premium(
            &json!({"email": "user@example.com", "phone": "+1234567890"}),
            &MaskOptions::new(),
        )
        .unwrap();
    assert_eq!(
        masked,
        json!({"email": "us***@example.com", "phone": "+123****7890"})
    );
}

#[test]
fn unknown_keys_never_open_the_gate() {
    let store = MemoryKeyStore::new();
    store.insert(issue_key("buyer@example.com")).unwrap();

    let mut session = LicenseSession::new();
    let err = session
        .enable_premium("0000deadbeef0000", &store)
        .unwrap_err();
    assert!(matches!(err, LicenseError::InvalidKey { .. }));
    assert!(!session.is_premium());

    let err = session
        .mask_data_premium(&json!("user@example.com"), &MaskOptions::new())
        .unwrap_err();
    assert!(matches!(err, LicenseError::PremiumRequired));
}

#[test]
fn issued_records_keep_the_purchaser_email() {
    let issued = issue_key("buyer@example.com");
    let roundtrip: IssuedKey =
        serde_json::from_str(&serde_json::to_string(&issued).unwrap()).unwrap();
    assert_eq!(roundtrip, issued);
}

#[test]
fn premium_wrappers_emit_audit_records() {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = BufferWriter(Arc::clone(&buffer));
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_env_filter("privmask=info")
        .with_ansi(false)
        .finish();

    let (session, _store) = enabled_session();
    tracing::subscriber::with_default(subscriber, || {
        session
            .mask_data_premium(&json!({"email": "user@example.com"}), &MaskOptions::new())
            .unwrap();
        session
            .mask_database_query("pwd=hunter2", &MaskOptions::new())
            .unwrap();
    });

    let logs = String::from_utf8_lossy(&buffer.lock().unwrap()).into_owned();
    assert!(logs.contains("privmask::audit"), "audit target missing: {logs}");
    assert!(logs.contains("us***@example.com"), "masked value missing: {logs}");
    assert!(logs.contains("pwd=********"), "masked query missing: {logs}");
    assert!(logs.contains("timestamp"), "timestamp missing: {logs}");
}
