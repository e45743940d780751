#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::TimeZone;
use http_body_util::BodyExt;
use tower::ServiceExt;

use feedback_client::{ApiError, ReviewBackend};
use feedback_core::review::{
    AdminReviewsResponse, AdminStats, ReviewDetail, ReviewResponse, ReviewStatus, ReviewSubmission,
};
use feedback_web::config::WebConfig;
use feedback_web::router::build_app_router;
use feedback_web::state::AppState;

/// Backend double: canned replies, records what it was asked.
pub struct StubBackend {
    pub submit_reply: Mutex<Result<ReviewResponse, ApiError>>,
    pub submitted: Mutex<Vec<ReviewSubmission>>,
    pub reviews: Mutex<Vec<ReviewDetail>>,
    pub list_calls: Mutex<Vec<Option<u8>>>,
    pub stats_error: Mutex<Option<ApiError>>,
    pub healthy: bool,
}

impl StubBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::with_health(true))
    }

    pub fn with_health(healthy: bool) -> Self {
        Self {
            submit_reply: Mutex::new(Ok(ReviewResponse {
                success: true,
                ai_response: "Thank you!".into(),
            })),
            submitted: Mutex::default(),
            reviews: Mutex::new(vec![
                review(1, 5, "Great service"),
                review(2, 2, "<b>Slow</b> delivery"),
            ]),
            list_calls: Mutex::default(),
            stats_error: Mutex::default(),
            healthy,
        }
    }

    pub fn submit_calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn list_calls(&self) -> Vec<Option<u8>> {
        self.list_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewBackend for StubBackend {
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
        if let Some(err) = self.stats_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(AdminStats {
            total_reviews: 2,
            average_rating: 3.5,
            success_count: 2,
            failed_count: 0,
            recent_24h_count: 1,
            rating_distribution: [(5, 1), (2, 1)].into_iter().collect(),
        })
    }

    async fn check_health(&self) -> bool {
        self.healthy
    }
}

pub fn review(id: i64, rating: u8, text: &str) -> ReviewDetail {
    ReviewDetail {
        id,
        rating,
        review_text: text.to_string(),
        ai_summary: Some(format!("Summary {id}")),
        ai_actions: None,
        status: ReviewStatus::Success,
        created_at: chrono::Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
    }
}

/// Build a test `WebConfig` with safe defaults.
pub fn test_config() -> WebConfig {
    WebConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..WebConfig::default()
    }
}

/// Build the full application router around `backend`, returning the state
/// too so tests can inspect the dashboard.
pub fn build_test_app(backend: Arc<StubBackend>) -> (Router, AppState) {
    let state = AppState::new(test_config(), backend);
    (build_app_router(state.clone()), state)
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
