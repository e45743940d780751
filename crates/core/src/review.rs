//! Review data model, bounds, and validation.
//!
//! These are view-model copies of what the backend owns. The backend is the
//! record of truth; nothing here is authoritative and a refetch always wins.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Lowest selectable star rating.
pub const MIN_RATING: u8 = 1;

/// Highest selectable star rating.
pub const MAX_RATING: u8 = 5;

/// Maximum number of characters accepted in a review's text.
pub const MAX_REVIEW_CHARS: usize = 5_000;

/// Every selectable rating, lowest first.
pub const ALL_RATINGS: [u8; 5] = [1, 2, 3, 4, 5];

/* --------------------------------------------------------------------------
Wire types
-------------------------------------------------------------------------- */

/// Body of `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub rating: u8,
    #[serde(default)]
    pub review_text: String,
}

impl ReviewSubmission {
    /// Check the rating range and the text bound before anything goes out.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_rating(self.rating)?;
        validate_review_text(&self.review_text)
    }
}

/// Acknowledgment returned by the backend for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub success: bool,
    pub ai_response: String,
}

/// Processing state of a stored review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Success,
    Failed,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Success => "success",
            ReviewStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored review as listed by the admin endpoints.
///
/// `ai_summary` and `ai_actions` are only filled in once the backend has
/// processed the review successfully; pending and failed records usually
/// carry neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDetail {
    pub id: DbId,
    pub rating: u8,
    #[serde(default)]
    pub review_text: String,
    pub ai_summary: Option<String>,
    pub ai_actions: Option<String>,
    pub status: ReviewStatus,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: Timestamp,
}

/// Page of reviews returned by `GET /admin/reviews`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminReviewsResponse {
    pub reviews: Vec<ReviewDetail>,
    pub total: i64,
}

/// Aggregate counters returned by `GET /admin/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub success_count: i64,
    pub failed_count: i64,
    pub recent_24h_count: i64,
    /// Sparse: ratings with no reviews may be missing entirely.
    #[serde(default)]
    pub rating_distribution: BTreeMap<u8, i64>,
}

impl AdminStats {
    /// Number of reviews with the given rating; a missing key counts as zero.
    pub fn count_for(&self, rating: u8) -> i64 {
        self.rating_distribution.get(&rating).copied().unwrap_or(0)
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a rating is within `MIN_RATING..=MAX_RATING`.
pub fn validate_rating(rating: u8) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}

/// Validate that review text stays within `MAX_REVIEW_CHARS` characters.
pub fn validate_review_text(text: &str) -> Result<(), CoreError> {
    let len = text.chars().count();
    if len > MAX_REVIEW_CHARS {
        return Err(CoreError::Validation(format!(
            "Review text must be at most {MAX_REVIEW_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

/// Cut `text` down to at most `max_chars` characters, on a char boundary.
pub fn clip_to_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 with an offset, or a naive ISO-8601 date-time which is
/// taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}
