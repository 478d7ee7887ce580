//! Route guard: decides per navigation whether a protected view may render.
//!
//! Browser history and tab-visibility events land here so a cached protected
//! page can never stay visible after logout or server-side expiry.

use super::session::AuthSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// First auth check has not resolved; render a neutral waiting state.
    /// No redirect decision yet, so there is no flicker through the login
    /// screen on a warm session.
    Wait,
    Render,
    /// Send the user to the login screen, preserving where they wanted to go.
    RedirectToLogin { from: String },
}

pub struct RouteGuard {
    session: AuthSession,
    protected_prefix: String,
    login_path: String,
}

impl RouteGuard {
    pub fn new(session: AuthSession) -> Self {
        Self::with_paths(session, "/admin", "/admin/login")
    }

    pub fn with_paths(
        session: AuthSession,
        protected_prefix: impl Into<String>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            session,
            protected_prefix: protected_prefix.into(),
            login_path: login_path.into(),
        }
    }

    /// The login screen itself is the one unprotected page under the prefix.
    pub fn is_protected(&self, path: &str) -> bool {
        if path == self.login_path {
            return false;
        }
        path == self.protected_prefix
            || path.starts_with(&format!("{}/", self.protected_prefix))
    }

    /// Decide for a navigation target based on current session state.
    pub fn evaluate(&self, path: &str) -> GuardOutcome {
        if !self.is_protected(path) {
            return GuardOutcome::Render;
        }

        let session = self.session.snapshot();
        if session.loading {
            return GuardOutcome::Wait;
        }
        if session.is_authenticated {
            return GuardOutcome::Render;
        }

        GuardOutcome::RedirectToLogin {
            from: path.to_string(),
        }
    }

    /// Back/forward navigation. Re-evaluates against current state, so a
    /// history entry for a protected page bounces straight to login after
    /// logout instead of showing the cached render.
    pub fn on_popstate(&self, path: &str) -> GuardOutcome {
        self.evaluate(path)
    }

    /// Tab became visible again. A believed-valid session is re-checked
    /// first; expiry while the tab was hidden is only discoverable by asking
    /// the server.
    pub async fn on_visibility_regained(&self, path: &str) -> GuardOutcome {
        if self.session.snapshot().is_authenticated {
            self.session.check_auth().await;
        }
        self.evaluate(path)
    }

    /// Window regained focus. Same policy as visibility: only re-check when
    /// currently believed authenticated.
    pub async fn on_focus_regained(&self, path: &str) -> GuardOutcome {
        if self.session.snapshot().is_authenticated {
            self.session.check_auth().await;
        }
        self.evaluate(path)
    }
}
