//! Scripted in-memory backend shared by the view-model tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::TimeZone;
use tokio::sync::Notify;

use feedback_client::{ApiError, ReviewBackend};
use feedback_core::review::{
    AdminReviewsResponse, AdminStats, ReviewDetail, ReviewResponse, ReviewStatus, ReviewSubmission,
};

/// Backend double with canned replies and call counters.
pub struct FakeBackend {
    pub submit_reply: Mutex<Result<ReviewResponse, ApiError>>,
    pub submitted: Mutex<Vec<ReviewSubmission>>,
    pub reviews: Mutex<Vec<ReviewDetail>>,
    pub list_error: Mutex<Option<ApiError>>,
    pub list_calls: Mutex<Vec<Option<u8>>>,
    pub stats: Mutex<AdminStats>,
    pub stats_error: Mutex<Option<ApiError>>,
    pub stats_calls: AtomicUsize,
    /// When set, the next stats call parks until released.
    pub stats_gate: Mutex<Option<StatsGate>>,
}

/// Handle on one parked stats call.
#[derive(Clone)]
pub struct StatsGate {
    /// Notified once the gated call has started.
    pub entered: Arc<Notify>,
    /// Notify to let the gated call return.
    pub release: Arc<Notify>,
}

impl StatsGate {
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            submit_reply: Mutex::new(Ok(ReviewResponse {
                success: true,
                ai_response: "Thank you!".into(),
            })),
            submitted: Mutex::default(),
            reviews: Mutex::new(vec![
                review(1, 5, "Great service"),
                review(2, 3, "It was fine"),
                review(3, 5, ""),
            ]),
            list_error: Mutex::default(),
            list_calls: Mutex::default(),
            stats: Mutex::new(stats(&[(5, 10), (3, 2)])),
            stats_error: Mutex::default(),
            stats_calls: AtomicUsize::new(0),
            stats_gate: Mutex::default(),
        }
    }
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn submit_calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn list_calls(&self) -> Vec<Option<u8>> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub fn fail_submit(&self, err: ApiError) {
        *self.submit_reply.lock().unwrap() = Err(err);
    }

    pub fn fail_stats(&self, err: Option<ApiError>) {
        *self.stats_error.lock().unwrap() = err;
    }

    pub fn fail_list(&self, err: Option<ApiError>) {
        *self.list_error.lock().unwrap() = err;
    }

    pub fn set_reviews(&self, reviews: Vec<ReviewDetail>) {
        *self.reviews.lock().unwrap() = reviews;
    }

    /// Park the next stats call until the returned gate is released.
    pub fn gate_next_stats(&self) -> StatsGate {
        let gate = StatsGate {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        };
        *self.stats_gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl ReviewBackend for FakeBackend {
    async fn submit_review(&self, input: &ReviewSubmission) -> Result<ReviewResponse, ApiError> {
        self.submitted.lock().unwrap().push(input.clone());
        self.submit_reply.lock().unwrap().clone()
    }

    async fn get_admin_reviews(
        &self,
        _limit: u32,
        _offset: u32,
        rating: Option<u8>,
    ) -> Result<AdminReviewsResponse, ApiError> {
        self.list_calls.lock().unwrap().push(rating);
        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }
        let reviews: Vec<ReviewDetail> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| rating.map_or(true, |wanted| r.rating == wanted))
            .cloned()
            .collect();
        let total = reviews.len() as i64;
        Ok(AdminReviewsResponse { reviews, total })
    }

    async fn get_admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.stats_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        if let Some(err) = self.stats_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn check_health(&self) -> bool {
        true
    }
}

pub fn review(id: i64, rating: u8, text: &str) -> ReviewDetail {
    ReviewDetail {
        id,
        rating,
        review_text: text.to_string(),
        ai_summary: Some(format!("Summary of review {id}")),
        ai_actions: Some("Follow up".to_string()),
        status: ReviewStatus::Success,
        created_at: chrono::Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
    }
}

pub fn stats(distribution: &[(u8, i64)]) -> AdminStats {
    let total: i64 = distribution.iter().map(|(_, c)| c).sum();
    AdminStats {
        total_reviews: total,
        average_rating: 4.6,
        success_count: total,
        failed_count: 0,
        recent_24h_count: 1,
        rating_distribution: distribution.iter().copied().collect::<BTreeMap<_, _>>(),
    }
}
