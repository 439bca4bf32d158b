//! Demo Access Gating
//!
//! One shared access code, compared in process, gates the whole pipeline.
//! Sessions hold the resulting authenticated flag for the life of the
//! interaction and are never persisted. There is no lockout or backoff:
//! a failed check simply leaves the session unauthenticated and the caller
//! re-prompts.

use tracing::{debug, info};
use uuid::Uuid;

/// Per-interaction authentication state.
///
/// Created unauthenticated; only [`AccessGate::check`] flips the flag.
/// Downstream stages never re-check it: the caller boundary refuses to
/// invoke them for an unauthenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque handle identifying this interaction
    pub token: Uuid,
    authenticated: bool,
}

impl Session {
    /// Start a new unauthenticated session
    pub fn new() -> Self {
        Self {
            token: Uuid::new_v4(),
            authenticated: false,
        }
    }

    /// Whether the access code check has succeeded for this session
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Drop back to the unauthenticated state
    pub fn revoke(&mut self) {
        self.authenticated = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Compares submitted access codes against the one configured secret.
///
/// The secret lives in process configuration, not in the data model, and is
/// never logged.
pub struct AccessGate {
    access_code: String,
}

impl AccessGate {
    /// Gate guarding the pipeline with the given access code
    pub fn new(access_code: impl Into<String>) -> Self {
        Self {
            access_code: access_code.into(),
        }
    }

    /// Check a submitted code against the configured one.
    ///
    /// On match the session becomes authenticated and `true` is returned;
    /// on mismatch the session is left untouched and `false` signals the
    /// caller to report an invalid access code.
    pub fn check(&self, session: &mut Session, submitted: &str) -> bool {
        if submitted == self.access_code {
            session.authenticated = true;
            info!(session = %session.token, "demo access granted");
            true
        } else {
            debug!(session = %session.token, "invalid access code submitted");
            false
        }
    }
}
