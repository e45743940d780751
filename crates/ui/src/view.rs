//! Display data derived from dashboard state.
//!
//! Pure functions only: the pages turn these into markup.

use feedback_core::review::{AdminStats, ReviewDetail, ReviewStatus, ALL_RATINGS};
use feedback_core::types::{DbId, Timestamp};

/// Characters shown in table previews before truncation.
pub const PREVIEW_CHARS: usize = 50;

/// One headline number on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

/// One rating filter button with its count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    /// `None` is the "All" button.
    pub rating: Option<u8>,
    pub label: String,
    pub count: i64,
    pub active: bool,
}

/// One row of the review table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub id: DbId,
    pub rating: u8,
    /// `None` when the review has no text.
    pub preview: Option<String>,
    pub summary_preview: String,
    pub status: &'static str,
    pub created_at: String,
}

/// Everything the detail view shows, placeholders filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: DbId,
    pub rating: u8,
    pub status: &'static str,
    pub submitted: String,
    pub review_text: String,
    /// Character count, only when there is text.
    pub char_count: Option<usize>,
    pub summary: String,
    pub actions: String,
}

pub fn stat_cards(stats: &AdminStats) -> Vec<StatCard> {
    vec![
        StatCard {
            label: "Total Reviews",
            value: stats.total_reviews.to_string(),
        },
        StatCard {
            label: "Avg Rating",
            value: format!("{:.1}", stats.average_rating),
        },
        StatCard {
            label: "Successful",
            value: stats.success_count.to_string(),
        },
        StatCard {
            label: "Failed",
            value: stats.failed_count.to_string(),
        },
        StatCard {
            label: "Last 24h",
            value: stats.recent_24h_count.to_string(),
        },
    ]
}

/// "All" first, then ratings from 5 down to 1. Ratings missing from the
/// distribution count as zero.
pub fn filter_buttons(stats: &AdminStats, active: Option<u8>) -> Vec<FilterButton> {
    let mut buttons = Vec::with_capacity(ALL_RATINGS.len() + 1);
    buttons.push(FilterButton {
        rating: None,
        label: format!("All ({})", stats.total_reviews),
        count: stats.total_reviews,
        active: active.is_none(),
    });

    for &rating in ALL_RATINGS.iter().rev() {
        let count = stats.count_for(rating);
        buttons.push(FilterButton {
            rating: Some(rating),
            label: format!("{rating} ★ ({count})"),
            count,
            active: active == Some(rating),
        });
    }
    buttons
}

pub fn status_badge(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Success => "Success",
        ReviewStatus::Failed => "Failed",
        ReviewStatus::Pending => "Pending",
    }
}

/// Shorten `text` to `max_chars` characters, marking the cut with `...`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

/// e.g. `Jan 15, 2024, 10:30 AM` (UTC).
pub fn format_date(ts: &Timestamp) -> String {
    ts.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Caption above the table, e.g. `3 reviews with 5★ rating`.
pub fn list_caption(count: usize, filter: Option<u8>) -> String {
    let noun = if count == 1 { "review" } else { "reviews" };
    match filter {
        Some(rating) => format!("{count} {noun} with {rating}★ rating"),
        None => format!("{count} {noun}"),
    }
}

pub fn review_rows(reviews: &[ReviewDetail]) -> Vec<ReviewRow> {
    reviews
        .iter()
        .map(|review| ReviewRow {
            id: review.id,
            rating: review.rating,
            preview: (!review.review_text.is_empty())
                .then(|| truncate(&review.review_text, PREVIEW_CHARS)),
            summary_preview: review
                .ai_summary
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| truncate(s, PREVIEW_CHARS))
                .unwrap_or_else(|| "-".to_string()),
            status: status_badge(review.status),
            created_at: format_date(&review.created_at),
        })
        .collect()
}

pub fn detail_view(review: &ReviewDetail) -> DetailView {
    let has_text = !review.review_text.is_empty();
    DetailView {
        id: review.id,
        rating: review.rating,
        status: status_badge(review.status),
        submitted: format!("Submitted on {}", format_date(&review.created_at)),
        review_text: if has_text {
            review.review_text.clone()
        } else {
            "No text provided".to_string()
        },
        char_count: has_text.then(|| review.review_text.chars().count()),
        summary: non_empty_or(review.ai_summary.as_deref(), "No summary available"),
        actions: non_empty_or(review.ai_actions.as_deref(), "No actions recommended"),
    }
}

fn non_empty_or(value: Option<&str>, placeholder: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}
