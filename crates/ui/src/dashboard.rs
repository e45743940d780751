//! Admin dashboard state and refresh logic.
//!
//! [`AdminDashboard`] keeps the last good review list and stats, the active
//! rating filter, the selected record, and the loading/error flags the page
//! renders. The periodic refresh lives in [`crate::poller`].
//!
//! Refreshes may overlap. Every fetch takes a ticket from a monotonically
//! increasing counter and its result is only applied if no newer request
//! was issued for the same slot (list or stats), whether that newer request
//! succeeded or failed. A slow background tick can therefore never
//! overwrite a more recent manual refresh or filter change, and it never
//! clears the banner of a newer failure.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use feedback_client::{ApiError, ReviewBackend};
use feedback_core::error::CoreError;
use feedback_core::review::{validate_rating, AdminStats, ReviewDetail};
use feedback_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

/// How often the background refresh runs.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Page size requested from `GET /admin/reviews`.
pub const PAGE_LIMIT: u32 = 100;

/// Who asked for a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshKind {
    /// Interval tick; silent, no loading indicator.
    Background,
    /// User pressed refresh; flips the loading indicator.
    Manual,
}

/// What happened to a fetch's result.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// New data replaced the old.
    Applied,
    /// The fetch failed; the error banner was set and old data kept.
    Failed(ApiError),
    /// A newer result had already landed, so this one was dropped.
    Stale,
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub reviews: Vec<ReviewDetail>,
    /// Total matching reviews as reported by the backend.
    pub total: i64,
    pub stats: Option<AdminStats>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<Timestamp>,
    /// `None` shows every rating.
    pub rating_filter: Option<u8>,
    /// Record open in the detail view.
    pub selected: Option<ReviewDetail>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            reviews: Vec::new(),
            total: 0,
            stats: None,
            // Nothing fetched yet: the first load shows a skeleton.
            is_loading: true,
            error: None,
            last_updated: None,
            rating_filter: None,
            selected: None,
        }
    }
}

#[derive(Default)]
struct Inner {
    view: DashboardState,
    /// Ticket of the newest list request issued.
    reviews_requested: u64,
    /// Ticket of the newest stats request issued.
    stats_requested: u64,
    /// Ticket of the failure currently behind the error banner.
    error_ticket: u64,
    /// Newest manual refresh still in flight; it owns the loading flag.
    /// `None` before the first load and once that refresh has finished.
    loading_ticket: Option<u64>,
}

impl Inner {
    fn finish_loading(&mut self, ticket: u64) {
        match self.loading_ticket {
            Some(owner) if owner != ticket => {}
            _ => {
                self.view.is_loading = false;
                self.loading_ticket = None;
            }
        }
    }

    /// Clear the banner unless it belongs to a newer failure.
    fn clear_error_for(&mut self, ticket: u64) {
        if ticket > self.error_ticket {
            self.view.error = None;
        }
    }
}

/// Shared dashboard handle. Wrap in an `Arc` to hand it to the poller and
/// request handlers.
pub struct AdminDashboard {
    backend: Arc<dyn ReviewBackend>,
    inner: RwLock<Inner>,
    next_ticket: AtomicU64,
}

impl AdminDashboard {
    pub fn new(backend: Arc<dyn ReviewBackend>) -> Self {
        Self {
            backend,
            inner: RwLock::new(Inner::default()),
            next_ticket: AtomicU64::new(1),
        }
    }

    /// A copy of the current state for rendering.
    pub async fn snapshot(&self) -> DashboardState {
        self.inner.read().await.view.clone()
    }

    /// Fetch the filtered list and the stats concurrently and apply both.
    ///
    /// All-or-nothing: if either request fails, neither value is replaced
    /// and the error banner is set. Data already on screen stays visible
    /// while the fetch is in flight.
    pub async fn refresh(&self, kind: RefreshKind) -> RefreshOutcome {
        // Tickets are issued under the lock so their order matches the order
        // in which the filter was read or written.
        let (ticket, filter) = {
            let mut inner = self.inner.write().await;
            let ticket = self.issue_ticket();
            inner.reviews_requested = ticket;
            inner.stats_requested = ticket;
            if kind == RefreshKind::Manual {
                inner.view.is_loading = true;
                inner.loading_ticket = Some(ticket);
            }
            (ticket, inner.view.rating_filter)
        };

        tracing::debug!(ticket, kind = ?kind, rating = ?filter, "Refreshing dashboard");

        let result = tokio::try_join!(
            self.backend.get_admin_reviews(PAGE_LIMIT, 0, filter),
            self.backend.get_admin_stats(),
        );

        let mut inner = self.inner.write().await;
        inner.finish_loading(ticket);

        match result {
            Ok((page, stats)) => {
                let fresh_reviews = ticket >= inner.reviews_requested;
                let fresh_stats = ticket >= inner.stats_requested;
                if !fresh_reviews && !fresh_stats {
                    tracing::debug!(ticket, "Dropping stale dashboard refresh");
                    return RefreshOutcome::Stale;
                }

                if fresh_reviews {
                    inner.view.reviews = page.reviews;
                    inner.view.total = page.total;
                }
                if fresh_stats {
                    inner.view.stats = Some(stats);
                }
                inner.clear_error_for(ticket);
                inner.view.last_updated = Some(Utc::now());

                tracing::debug!(
                    ticket,
                    reviews = inner.view.reviews.len(),
                    "Dashboard refreshed",
                );
                RefreshOutcome::Applied
            }
            Err(e) => {
                let superseded =
                    ticket < inner.reviews_requested && ticket < inner.stats_requested;
                Self::record_failure(&mut inner, ticket, superseded, e)
            }
        }
    }

    /// Switch the rating filter and refetch the list right away.
    ///
    /// `None` (or `Some(0)`) clears the filter. Stats are filter-independent
    /// and are left alone.
    pub async fn set_rating_filter(
        &self,
        rating: Option<u8>,
    ) -> Result<RefreshOutcome, CoreError> {
        let rating = rating.filter(|r| *r != 0);
        if let Some(r) = rating {
            validate_rating(r)?;
        }

        let ticket = {
            let mut inner = self.inner.write().await;
            inner.view.rating_filter = rating;
            let ticket = self.issue_ticket();
            inner.reviews_requested = ticket;
            ticket
        };

        tracing::info!(ticket, rating = ?rating, "Rating filter changed");

        let result = self.backend.get_admin_reviews(PAGE_LIMIT, 0, rating).await;

        let mut inner = self.inner.write().await;
        let outcome = match result {
            Ok(page) => {
                if ticket < inner.reviews_requested {
                    RefreshOutcome::Stale
                } else {
                    inner.view.reviews = page.reviews;
                    inner.view.total = page.total;
                    inner.clear_error_for(ticket);
                    RefreshOutcome::Applied
                }
            }
            Err(e) => {
                let superseded = ticket < inner.reviews_requested;
                Self::record_failure(&mut inner, ticket, superseded, e)
            }
        };
        Ok(outcome)
    }

    /// Open the detail view for a record already in the fetched list.
    ///
    /// No request is made. Returns `None` (and leaves the selection as it
    /// was) if the id is not in the current list.
    pub async fn select(&self, id: DbId) -> Option<ReviewDetail> {
        let mut inner = self.inner.write().await;
        let found = inner.view.reviews.iter().find(|r| r.id == id).cloned()?;
        inner.view.selected = Some(found.clone());
        Some(found)
    }

    /// Close the detail view.
    pub async fn close_detail(&self) {
        self.inner.write().await.view.selected = None;
    }

    /// Dismiss the error banner.
    pub async fn dismiss_error(&self) {
        self.inner.write().await.view.error = None;
    }

    // ---- private helpers ----

    fn issue_ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::Relaxed)
    }

    /// `superseded`: every slot this fetch covered has a newer request.
    fn record_failure(
        inner: &mut Inner,
        ticket: u64,
        superseded: bool,
        err: ApiError,
    ) -> RefreshOutcome {
        if superseded {
            tracing::debug!(ticket, error = %err, "Dropping stale dashboard failure");
            return RefreshOutcome::Stale;
        }
        tracing::warn!(ticket, status = err.status(), error = %err, "Dashboard fetch failed");
        inner.view.error = Some(err.message().to_string());
        inner.error_ticket = inner.error_ticket.max(ticket);
        RefreshOutcome::Failed(err)
    }
}
