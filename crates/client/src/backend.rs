//! Abstraction over the feedback backend.
//!
//! The submission form and the admin dashboard talk to this trait rather
//! than to [`ReviewApi`] directly so they can run against in-memory doubles.

use async_trait::async_trait;
use feedback_core::review::{AdminReviewsResponse, AdminStats, ReviewResponse, ReviewSubmission};

use crate::api::ReviewApi;
use crate::error::ApiError;

/// Operations the UI needs from the backend of record.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Create a review and return the AI acknowledgment.
    async fn submit_review(&self, input: &ReviewSubmission) -> Result<ReviewResponse, ApiError>;

    /// List reviews, optionally restricted to one rating.
    async fn get_admin_reviews(
        &self,
        limit: u32,
        offset: u32,
        rating: Option<u8>,
    ) -> Result<AdminReviewsResponse, ApiError>;

    /// Aggregate counters across all reviews.
    async fn get_admin_stats(&self) -> Result<AdminStats, ApiError>;

    /// Whether the backend currently answers its health probe.
    async fn check_health(&self) -> bool;
}

#[async_trait]
impl ReviewBackend for ReviewApi {
    async fn submit_review(&self, input: &ReviewSubmission) -> Result<ReviewResponse, ApiError> {
        ReviewApi::submit_review(self, input).await
    }

    async fn get_admin_reviews(
        &self,
        limit: u32,
        offset: u32,
        rating: Option<u8>,
    ) -> Result<AdminReviewsResponse, ApiError> {
        ReviewApi::get_admin_reviews(self, limit, offset, rating).await
    }

    async fn get_admin_stats(&self) -> Result<AdminStats, ApiError> {
        ReviewApi::get_admin_stats(self).await
    }

    async fn check_health(&self) -> bool {
        ReviewApi::check_health(self).await
    }
}
