//! REST API client for the feedback backend.
//!
//! Wraps review submission, the admin listing, aggregate stats and the
//! health probe using [`reqwest`]. Nothing from `reqwest` escapes this
//! module: every failure is turned into an [`ApiError`].

use feedback_core::review::{AdminReviewsResponse, AdminStats, ReviewResponse, ReviewSubmission};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{
    ApiError, REVIEWS_NETWORK_MESSAGE, STATS_NETWORK_MESSAGE, SUBMIT_NETWORK_MESSAGE,
    UNEXPECTED_RESPONSE_MESSAGE,
};

/// HTTP client for one feedback backend.
#[derive(Debug, Clone)]
pub struct ReviewApi {
    client: reqwest::Client,
    api_url: String,
}

impl ReviewApi {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to build HTTP client");
                ApiError::network("Failed to initialise the HTTP client.")
            })?;

        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are issued against.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Submit a new review.
    ///
    /// Sends `POST /reviews` and returns the backend's acknowledgment.
    pub async fn submit_review(
        &self,
        input: &ReviewSubmission,
    ) -> Result<ReviewResponse, ApiError> {
        tracing::debug!(
            rating = input.rating,
            text_chars = input.review_text.chars().count(),
            "Submitting review",
        );

        let response = self
            .client
            .post(format!("{}/reviews", self.api_url))
            .json(input)
            .send()
            .await
            .map_err(|e| transport_error("submit_review", SUBMIT_NETWORK_MESSAGE, e))?;

        Self::parse_response(response, SUBMIT_NETWORK_MESSAGE).await
    }

    /// List reviews for the admin dashboard.
    ///
    /// Sends `GET /admin/reviews`. A `rating` of `None` or `Some(0)` means
    /// "no filter" and is left out of the query string.
    pub async fn get_admin_reviews(
        &self,
        limit: u32,
        offset: u32,
        rating: Option<u8>,
    ) -> Result<AdminReviewsResponse, ApiError> {
        let query = admin_reviews_query(limit, offset, rating);
        tracing::debug!(limit, offset, rating = ?rating, "Fetching admin reviews");

        let response = self
            .client
            .get(format!("{}/admin/reviews", self.api_url))
            .query(&query)
            .send()
            .await
            .map_err(|e| transport_error("get_admin_reviews", REVIEWS_NETWORK_MESSAGE, e))?;

        Self::parse_response(response, REVIEWS_NETWORK_MESSAGE).await
    }

    /// Fetch aggregate counters via `GET /admin/stats`.
    pub async fn get_admin_stats(&self) -> Result<AdminStats, ApiError> {
        tracing::debug!("Fetching admin stats");

        let response = self
            .client
            .get(format!("{}/admin/stats", self.api_url))
            .send()
            .await
            .map_err(|e| transport_error("get_admin_stats", STATS_NETWORK_MESSAGE, e))?;

        Self::parse_response(response, STATS_NETWORK_MESSAGE).await
    }

    /// Best-effort liveness probe against `GET /health`.
    ///
    /// Any 2xx counts as healthy; every failure is `false`, never an error.
    pub async fn check_health(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.api_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Health probe failed");
                false
            }
        }
    }

    // ---- private helpers ----

    /// Decode a success body, or turn a non-2xx response into an
    /// [`ApiError::Status`] built from its body.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        network_message: &'static str,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            // An unreadable body is handled like an unparsable one.
            let body = response.bytes().await.unwrap_or_default();
            let err = ApiError::from_error_body(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), message = err.message(), "Backend rejected request");
            return Err(err);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error("read_body", network_message, e))?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(status = status.as_u16(), error = %e, "Backend response did not decode");
            ApiError::Decode {
                status: status.as_u16(),
                message: UNEXPECTED_RESPONSE_MESSAGE.to_string(),
            }
        })
    }
}

/// Query pairs for `GET /admin/reviews`.
///
/// `rating` is only forwarded when it is present and non-zero.
pub fn admin_reviews_query(
    limit: u32,
    offset: u32,
    rating: Option<u8>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
    if let Some(rating) = rating.filter(|r| *r != 0) {
        query.push(("rating", rating.to_string()));
    }
    query
}

/// Log the underlying transport failure and replace it with the
/// operation's connectivity message.
fn transport_error(operation: &'static str, message: &'static str, err: reqwest::Error) -> ApiError {
    tracing::error!(
        operation,
        timeout = err.is_timeout(),
        connect = err.is_connect(),
        error = %err,
        "Request to backend failed",
    );
    ApiError::network(message)
}
