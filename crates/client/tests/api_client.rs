//! Integration tests for [`ReviewApi`] against a local mock backend.
//!
//! Each test binds a throwaway axum router on `127.0.0.1:0` and points the
//! client at it, so the full request/response path (URL building, query
//! encoding, status handling, body decoding) is exercised.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use feedback_client::error::{
    GENERIC_ERROR_MESSAGE, REVIEWS_NETWORK_MESSAGE, STATS_NETWORK_MESSAGE, SUBMIT_NETWORK_MESSAGE,
    UNEXPECTED_RESPONSE_MESSAGE,
};
use feedback_client::{ApiError, ClientConfig, ReviewApi};
use feedback_core::review::{ReviewStatus, ReviewSubmission};

type SeenQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Serve `app` on an ephemeral port and return a client pointed at it.
async fn spawn_backend(app: Router) -> ReviewApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ReviewApi::new(&ClientConfig::new(format!("http://{addr}"))).unwrap()
}

/// A client pointed at a port nothing listens on.
async fn unreachable_client() -> ReviewApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ReviewApi::new(&ClientConfig::new(format!("http://{addr}"))).unwrap()
}

fn stats_json() -> Value {
    json!({
        "total_reviews": 12,
        "average_rating": 4.5,
        "success_count": 11,
        "failed_count": 1,
        "recent_24h_count": 4,
        "rating_distribution": {"5": 10, "3": 2}
    })
}

fn review_json(id: i64, rating: u8) -> Value {
    json!({
        "id": id,
        "rating": rating,
        "review_text": "Great service",
        "ai_summary": "Customer is happy",
        "ai_actions": "Keep it up",
        "status": "success",
        "created_at": "2024-01-15T10:30:00"
    })
}

async fn list_reviews(
    State(seen): State<SeenQueries>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    seen.lock().unwrap().push(params);
    Json(json!({ "reviews": [review_json(1, 3)], "total": 1 }))
}

// ---------------------------------------------------------------------------
// Test: successful submission returns the acknowledgment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_review_returns_ai_response() {
    let app = Router::new().route(
        "/reviews",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["rating"], 5);
            assert_eq!(body["review_text"], "Great service");
            (
                StatusCode::CREATED,
                Json(json!({ "success": true, "ai_response": "Thank you!" })),
            )
        }),
    );
    let api = spawn_backend(app).await;

    let response = api
        .submit_review(&ReviewSubmission {
            rating: 5,
            review_text: "Great service".into(),
        })
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.ai_response, "Thank you!");
}

// ---------------------------------------------------------------------------
// Test: backend `detail` becomes the error message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_2xx_detail_is_surfaced() {
    let app = Router::new().route(
        "/reviews",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "Review text is too long" })),
            )
        }),
    );
    let api = spawn_backend(app).await;

    let err = api
        .submit_review(&ReviewSubmission {
            rating: 2,
            review_text: "x".into(),
        })
        .await
        .unwrap_err();

    assert_matches!(err, ApiError::Status { status: 400, .. });
    assert_eq!(err.message(), "Review text is too long");
    assert_eq!(err.data().unwrap()["detail"], "Review text is too long");
}

// ---------------------------------------------------------------------------
// Test: unparsable error body falls back to a fixed message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_2xx_unparsable_body_uses_fallback() {
    let app = Router::new().route(
        "/admin/stats",
        get(|| async { (StatusCode::BAD_GATEWAY, "<html>upstream down</html>") }),
    );
    let api = spawn_backend(app).await;

    let err = api.get_admin_stats().await.unwrap_err();

    assert_eq!(err.status(), 502);
    assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
    assert!(err.data().is_none());
}

// ---------------------------------------------------------------------------
// Test: a 2xx body that is not JSON is a decode error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_with_garbage_body_is_decode_error() {
    let app = Router::new().route("/admin/stats", get(|| async { "definitely not json" }));
    let api = spawn_backend(app).await;

    let err = api.get_admin_stats().await.unwrap_err();

    assert_matches!(err, ApiError::Decode { status: 200, .. });
    assert_eq!(err.message(), UNEXPECTED_RESPONSE_MESSAGE);
}

// ---------------------------------------------------------------------------
// Test: transport failures report status 0 with per-operation messages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_backend_reports_status_zero() {
    let api = unreachable_client().await;

    let submit = api
        .submit_review(&ReviewSubmission {
            rating: 5,
            review_text: String::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(submit.status(), 0);
    assert_eq!(submit.message(), SUBMIT_NETWORK_MESSAGE);

    let list = api.get_admin_reviews(100, 0, None).await.unwrap_err();
    assert_matches!(list, ApiError::Network { .. });
    assert_eq!(list.message(), REVIEWS_NETWORK_MESSAGE);

    let stats = api.get_admin_stats().await.unwrap_err();
    assert_eq!(stats.message(), STATS_NETWORK_MESSAGE);
}

// ---------------------------------------------------------------------------
// Test: rating filter is only forwarded when set
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rating_filter_forwarded_only_when_present() {
    let seen: SeenQueries = Arc::default();
    let app = Router::new()
        .route("/admin/reviews", get(list_reviews))
        .with_state(Arc::clone(&seen));
    let api = spawn_backend(app).await;

    let unfiltered = api.get_admin_reviews(100, 0, None).await.unwrap();
    api.get_admin_reviews(100, 0, Some(3)).await.unwrap();
    api.get_admin_reviews(50, 10, Some(0)).await.unwrap();

    assert_eq!(unfiltered.total, 1);
    assert_eq!(unfiltered.reviews[0].status, ReviewStatus::Success);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);

    assert_eq!(seen[0].get("limit").map(String::as_str), Some("100"));
    assert_eq!(seen[0].get("offset").map(String::as_str), Some("0"));
    assert!(!seen[0].contains_key("rating"));

    assert_eq!(seen[1].get("rating").map(String::as_str), Some("3"));

    assert!(!seen[2].contains_key("rating"));
    assert_eq!(seen[2].get("offset").map(String::as_str), Some("10"));
}

// ---------------------------------------------------------------------------
// Test: stats fetches are idempotent without intervening writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stats_fetched_twice_are_identical() {
    let app = Router::new().route("/admin/stats", get(|| async { Json(stats_json()) }));
    let api = spawn_backend(app).await;

    let first = api.get_admin_stats().await.unwrap();
    let second = api.get_admin_stats().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.count_for(5), 10);
    assert_eq!(first.count_for(4), 0);
}

// ---------------------------------------------------------------------------
// Test: health probe never errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_probe_reflects_status() {
    let healthy = spawn_backend(
        Router::new().route("/health", get(|| async { Json(json!({ "status": "healthy" })) })),
    )
    .await;
    assert!(healthy.check_health().await);

    let degraded = spawn_backend(
        Router::new().route("/health", get(|| async { StatusCode::SERVICE_UNAVAILABLE })),
    )
    .await;
    assert!(!degraded.check_health().await);

    assert!(!unreachable_client().await.check_health().await);
}
