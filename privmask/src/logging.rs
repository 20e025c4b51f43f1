//! Process-wide masked log sink.
//!
//! [`MaskedSink`] decorates a log sink function so every value it receives
//! is masked before being written out. A single sink can be installed
//! process-wide at startup with [`install`] and routed to through [`emit`];
//! [`uninstall`] reverses the installation (typically in tests or at
//! shutdown).
//!
//! Masking failures never abort a log call: the failing value is emitted
//! unmasked and the error is logged. Installation happens once; concurrent
//! [`emit`] calls are safe, concurrent installation is rejected rather than
//! silently re-wrapped.

use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::masking::{MaskOptions, mask_data};

/// The wrapped sink signature: receives the (masked) value to write.
pub type SinkFn = dyn Fn(&Value) + Send + Sync;

// =============================================================================
// MaskedSink - the decorator
// =============================================================================

/// A log sink decorator that masks values before forwarding them.
pub struct MaskedSink {
    inner: Box<SinkFn>,
    options: MaskOptions,
}

impl MaskedSink {
    /// Decorates `inner` with default masking options.
    pub fn new<F>(inner: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        Self::with_options(inner, MaskOptions::default())
    }

    /// Decorates `inner` with explicit options.
    pub fn with_options<F>(inner: F, options: MaskOptions) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        Self {
            inner: Box::new(inner),
            options,
        }
    }

    /// Masks `value` and forwards it to the wrapped sink.
    ///
    /// If masking fails, the original value is forwarded unmasked and the
    /// failure is logged.
    pub fn emit(&self, value: &Value) {
        match mask_data(value, &self.options) {
            Ok(masked) => (self.inner)(&masked),
            Err(error) => {
                tracing::error!(error = %error, "masking failed, logging value unmasked");
                (self.inner)(value);
            }
        }
    }
}

impl std::fmt::Debug for MaskedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskedSink")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Process-wide installation lifecycle
// =============================================================================

static INSTALLED: RwLock<Option<Arc<MaskedSink>>> = RwLock::new(None);

/// Errors raised by the installation lifecycle.
#[derive(Clone, Copy, Debug, thiserror::Error)]
pub enum InstallError {
    /// A sink is already installed; uninstall it first.
    #[error("a masked sink is already installed")]
    AlreadyInstalled,
}

fn write_lock() -> std::sync::RwLockWriteGuard<'static, Option<Arc<MaskedSink>>> {
    match INSTALLED.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Installs `sink` as the process-wide masked sink.
///
/// Intended to be called once at startup.
pub fn install(sink: MaskedSink) -> Result<(), InstallError> {
    let mut guard = write_lock();
    if guard.is_some() {
        return Err(InstallError::AlreadyInstalled);
    }
    *guard = Some(Arc::new(sink));
    Ok(())
}

/// Removes and returns the installed sink, if any.
pub fn uninstall() -> Option<Arc<MaskedSink>> {
    write_lock().take()
}

/// Routes `value` through the installed sink.
///
/// Returns `false` when no sink is installed (the value is not written
/// anywhere).
pub fn emit(value: &Value) -> bool {
    let sink = {
        let guard = match INSTALLED.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.clone()
    };
    match sink {
        Some(sink) => {
            sink.emit(value);
            true
        }
        None => false,
    }
}

// =============================================================================
// Tests
// =============================================================================
