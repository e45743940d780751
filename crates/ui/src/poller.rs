//! Periodic background refresh for the admin dashboard.
//!
//! [`PollerHandle::spawn`] starts a task that refreshes the dashboard
//! immediately and then on every interval tick. The task stops when the
//! handle's [`CancellationToken`] is cancelled: explicitly through
//! [`PollerHandle::shutdown`], or implicitly when the handle is dropped.
//! A fetch still in flight at that point is abandoned and never writes
//! state.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::dashboard::{AdminDashboard, RefreshKind, RefreshOutcome};

/// How long `shutdown` waits for the task to exit.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Owns the refresh task. Dropping it cancels the task.
pub struct PollerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Spawn the refresh loop on the current tokio runtime.
    pub fn spawn(dashboard: Arc<AdminDashboard>, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(dashboard, interval, cancel.clone()));
        Self {
            cancel,
            task: Some(task),
        }
    }

    /// Token that stops the loop; child tokens can be derived from it.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the loop and wait (bounded) for the task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if tokio::time::timeout(SHUTDOWN_GRACE, task).await.is_err() {
                tracing::warn!("Dashboard poller did not stop within the grace period");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Run the dashboard refresh loop until `cancel` is triggered.
///
/// The first tick fires immediately, which doubles as the initial load.
pub async fn run(dashboard: Arc<AdminDashboard>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "Dashboard poller started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Dashboard poller stopping");
                break;
            }
            _ = ticker.tick() => {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!("Dashboard poller stopping, abandoning in-flight refresh");
                        break;
                    }
                    outcome = dashboard.refresh(RefreshKind::Background) => {
                        match outcome {
                            RefreshOutcome::Applied => tracing::debug!("Background refresh applied"),
                            RefreshOutcome::Stale => tracing::debug!("Background refresh superseded"),
                            RefreshOutcome::Failed(e) => {
                                tracing::warn!(status = e.status(), error = %e, "Background refresh failed");
                            }
                        }
                    }
                }
            }
        }
    }
}
