//! Client-side session state: the browser shell's single source of truth for
//! "is a session currently valid".
//!
//! The state is only ever derived from the server's profile endpoint; the
//! login response body is never trusted directly. Re-checks may overlap
//! (focus plus interval timer), so every check carries a sequence number and
//! a response is applied only if nothing newer has applied already.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::api::{AdminIdentity, AuthApi, ClientError};

/// Derived session view exposed to the UI tree.
///
/// Invariant: `is_authenticated` implies `identity.is_some()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub identity: Option<AdminIdentity>,
    /// True until the first `check_auth` resolves.
    pub loading: bool,
}

impl Session {
    fn initial() -> Self {
        Self {
            is_authenticated: false,
            identity: None,
            loading: true,
        }
    }

    fn logged_out() -> Self {
        Self {
            is_authenticated: false,
            identity: None,
            loading: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failed { message: String },
}

struct Guarded {
    session: Session,
    /// Sequence number of the newest check whose result has been applied.
    applied_seq: u64,
}

struct Inner {
    api: Arc<dyn AuthApi>,
    state: Mutex<Guarded>,
    /// Sequence number handed to the next dispatched check.
    dispatched: AtomicU64,
    disposed: AtomicBool,
}

/// Handle to the shared session state. Clones refer to the same state; the
/// shell creates one at its composition root and passes clones down.
#[derive(Clone)]
pub struct AuthSession {
    inner: Arc<Inner>,
}

impl AuthSession {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                state: Mutex::new(Guarded {
                    session: Session::initial(),
                    applied_seq: 0,
                }),
                dispatched: AtomicU64::new(0),
                disposed: AtomicBool::new(false),
            }),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.state.lock().expect("session lock poisoned").session.clone()
    }

    /// Ask the server whether the session is still valid and fold the answer
    /// into local state. Returns the post-check authenticated flag.
    ///
    /// Overlapping calls are safe: a response resolving after a
    /// newer-dispatched check has applied is discarded.
    pub async fn check_auth(&self) -> bool {
        let seq = self.inner.dispatched.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.inner.api.profile().await;
        self.apply(seq, result)
    }

    fn apply(&self, seq: u64, result: Result<AdminIdentity, ClientError>) -> bool {
        // After dispose the owner is gone; pending updates become no-ops.
        if self.inner.disposed.load(Ordering::SeqCst) {
            return false;
        }

        let mut guard = self.inner.state.lock().expect("session lock poisoned");
        if seq <= guard.applied_seq {
            tracing::debug!(seq, applied = guard.applied_seq, "Discarding stale auth check");
            return guard.session.is_authenticated;
        }
        guard.applied_seq = seq;
        guard.session.loading = false;

        match result {
            Ok(identity) => {
                guard.session.is_authenticated = true;
                guard.session.identity = Some(identity);
            }
            Err(e) => {
                if !matches!(e, ClientError::Unauthorized) {
                    tracing::debug!(error = %e, "Auth check failed");
                }
                guard.session.is_authenticated = false;
                guard.session.identity = None;
            }
        }

        guard.session.is_authenticated
    }

    /// Log in, then re-check against the server so state reflects server
    /// truth rather than the login response body. Failures are returned as
    /// values; nothing is thrown at the UI.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        match self.inner.api.login(email, password).await {
            Ok(_) => {
                self.check_auth().await;
                LoginOutcome::Success
            }
            Err(ClientError::Unauthorized) => LoginOutcome::Failed {
                message: "Invalid email or password".to_string(),
            },
            Err(ClientError::Rejected { message }) if !message.is_empty() => {
                LoginOutcome::Failed { message }
            }
            Err(ClientError::Rejected { .. }) => LoginOutcome::Failed {
                message: "Login failed. Please try again.".to_string(),
            },
            Err(ClientError::Network(e)) => {
                tracing::warn!(error = %e, "Login request failed");
                LoginOutcome::Failed {
                    message: "Unable to reach the server. Please try again.".to_string(),
                }
            }
        }
    }

    /// Best-effort server logout, then an unconditional local reset. The
    /// client must end up logged out even when the network call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.inner.api.logout().await {
            tracing::warn!(error = %e, "Logout request failed; clearing local session anyway");
        }

        // Fast-forward past every check dispatched so far, so responses that
        // are still in flight cannot resurrect the session.
        let dispatched = self.inner.dispatched.load(Ordering::SeqCst);
        let mut guard = self.inner.state.lock().expect("session lock poisoned");
        guard.applied_seq = guard.applied_seq.max(dispatched);
        guard.session = Session::logged_out();
    }

    /// Tear down: all pending state applications become no-ops.
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
    }
}
