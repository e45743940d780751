//! Shared domain types for the feedback console.
//!
//! Holds the review data model exchanged with the backend, the rating and
//! text bounds, and the validation helpers used by the submission form and
//! the dashboard's rating filter.

pub mod error;
pub mod review;
pub mod types;
