//! Route tree.
//!
//! ```text
//! /health                      service and backend health (JSON)
//!
//! /                            submission form (GET), submit (POST)
//!
//! /admin                       dashboard
//! /admin/filter                set rating filter (POST)
//! /admin/refresh               manual refresh (POST)
//! /admin/dismiss-error         dismiss error banner (POST)
//! /admin/reviews/{id}          review detail
//! ```

pub mod admin;
pub mod feedback;
pub mod health;

use crate::error::AppError;

/// Parse an optional rating form field. Empty means "no rating".
pub(crate) fn parse_rating_field(raw: &str) -> Result<Option<u8>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Invalid rating: {raw}")))
}
