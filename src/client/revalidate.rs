//! Periodic session revalidation for mounted protected views.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::session::AuthSession;
use crate::config::ClientConfig;

/// One scheduled re-check task per mounted protected view. Dropping the
/// handle aborts the task, so an unmounted view cannot leak its timer.
pub struct RevalidationTask {
    handle: JoinHandle<()>,
}

impl RevalidationTask {
    /// Spawn with the period from the shell configuration.
    pub fn spawn_with_config(session: AuthSession, config: &ClientConfig) -> Self {
        Self::spawn(session, Duration::from_secs(config.recheck_interval_seconds))
    }

    pub fn spawn(session: AuthSession, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the mount already ran
            // its own check.
            interval.tick().await;
            loop {
                interval.tick().await;
                session.check_auth().await;
            }
        });

        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RevalidationTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
