//! In-browser admin shell: client auth state and route protection.
//!
//! Mirrors the server's view of the session via the profile endpoint. The
//! shell builds one [`AuthSession`] at its composition root, hands clones to
//! the UI tree, and guards protected routes with a [`RouteGuard`].

pub mod api;
pub mod guard;
pub mod revalidate;
pub mod session;

pub use api::{AdminIdentity, AuthApi, ClientError, HttpAuthApi};
pub use guard::{GuardOutcome, RouteGuard};
pub use revalidate::RevalidationTask;
pub use session::{AuthSession, LoginOutcome, Session};

use std::sync::Arc;

use crate::config::ClientConfig;

/// Composition root helper: wire a session store and route guard against the
/// configured server.
pub fn connect(config: &ClientConfig) -> Result<(AuthSession, RouteGuard), ClientError> {
    let api = Arc::new(HttpAuthApi::new(config)?);
    let session = AuthSession::new(api);
    let guard = RouteGuard::new(session.clone());
    Ok((session, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_builds_a_loading_session() {
        let (session, guard) = connect(&ClientConfig::default()).unwrap();
        assert!(session.snapshot().loading);
        assert_eq!(guard.evaluate("/admin/dashboard"), GuardOutcome::Wait);
        assert_eq!(guard.evaluate("/articles"), GuardOutcome::Render);
    }
}
