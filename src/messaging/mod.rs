//! Messaging handle — environment-gated shared access to the broker client.
//!
//! The process decides once, at startup, whether messaging exists at all:
//! `KAFKA_DISABLED=true` yields [`Messaging::Disabled`], anything else
//! yields [`Messaging::Enabled`] with a client bound to the configured
//! broker list. Absence is a first-class outcome, not an error — dependents
//! branch on [`Messaging::client`] and degrade gracefully.
//!
//! Two ways to hold the handle:
//! - construct it with [`Messaging::init`] and inject it into whatever
//!   needs it (preferred for anything with a composition root);
//! - publish it process-wide with [`init_global`] / [`global`] when
//!   call sites cannot thread a handle through (module-singleton callers).
//!
//! The global transitions exactly once, `Uninitialized → {Disabled |
//! Enabled}`, and is never re-evaluated: the env values are read at init
//! time, not watched. Reconfiguration means restarting the process.

pub mod backends;
pub mod client;

use std::sync::{Mutex, OnceLock};

use crate::config::MessagingConfig;
use crate::messaging::client::{BrokerClient, BrokerError};

/// The shared messaging handle: a client, or a deliberate absence.
#[derive(Debug)]
pub enum Messaging {
    Enabled(BrokerClient),
    Disabled,
}

impl Messaging {
    /// Construct the handle from resolved configuration.
    ///
    /// When the config is disabled this never touches the broker list and
    /// cannot fail. When enabled, backend constructor errors propagate —
    /// a process that asked for messaging but cannot configure a client
    /// must not start with a half-made handle.
    pub fn init(config: &MessagingConfig) -> Result<Self, BrokerError> {
        if config.disabled {
            return Ok(Messaging::Disabled);
        }
        let client = backends::build(config)?;
        Ok(Messaging::Enabled(client))
    }

    /// The client, if messaging is enabled.
    ///
    /// Dependents MUST treat `None` as "messaging disabled" and keep the
    /// request path working without it.
    pub fn client(&self) -> Option<&BrokerClient> {
        match self {
            Messaging::Enabled(client) => Some(client),
            Messaging::Disabled => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Messaging::Enabled(_))
    }
}

// ── process-wide handle ───────────────────────────────────────────────────────

static GLOBAL: OnceLock<Messaging> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Publish the process-wide handle, constructing it on first call.
///
/// Concurrent or repeated calls construct exactly once; every call returns
/// the same instance. A construction error leaves the global unset; the
/// intended use is a single call during startup whose error is fatal to
/// the process.
pub fn init_global(config: &MessagingConfig) -> Result<&'static Messaging, BrokerError> {
    // Serialize first-call races so losers never construct a second client.
    let _guard = INIT_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(existing) = GLOBAL.get() {
        return Ok(existing);
    }
    let messaging = Messaging::init(config)?;
    Ok(GLOBAL.get_or_init(|| messaging))
}

/// Read the published handle. `None` until [`init_global`] has succeeded.
pub fn global() -> Option<&'static Messaging> {
    GLOBAL.get()
}
