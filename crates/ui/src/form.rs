//! Review submission form.
//!
//! [`SubmissionForm`] owns the draft (rating + text) and walks through
//! `Idle -> Submitting -> Succeeded | Failed`. Event-loop UIs can drive it
//! in two halves with [`begin_submit`](SubmissionForm::begin_submit) and
//! [`finish_submit`](SubmissionForm::finish_submit); everything else can
//! call [`submit`](SubmissionForm::submit).

use feedback_client::{ApiError, ReviewBackend};
use feedback_core::error::CoreError;
use feedback_core::review::{clip_to_chars, ReviewResponse, ReviewSubmission, MAX_REVIEW_CHARS};

use crate::rating::{RatingInput, RatingKey};

/// Shown when submit is pressed before any star is picked.
pub const RATING_REQUIRED_MESSAGE: &str = "Please select a rating before submitting.";

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Draft state plus the outcome of the last submission.
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    rating: u8,
    review_text: String,
    status: FormStatus,
    response: Option<ReviewResponse>,
    error: Option<String>,
}

impl Default for SubmissionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self {
            rating: 0,
            review_text: String::new(),
            status: FormStatus::Idle,
            response: None,
            error: None,
        }
    }

    /// A form pre-filled the way a user would fill it: the rating goes
    /// through the rating widget and the text through the length bound.
    pub fn with_draft(rating: u8, review_text: &str) -> Self {
        let mut form = Self::new();
        form.set_rating(rating);
        form.set_review_text(review_text);
        form
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn review_text(&self) -> &str {
        &self.review_text
    }

    /// Acknowledgment from the last successful submission.
    pub fn response(&self) -> Option<&ReviewResponse> {
        self.response.as_ref()
    }

    /// Message for the error banner, local or from the backend.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.rating != 0
    }

    /// Whether the "new review" control should be offered.
    pub fn can_reset(&self) -> bool {
        !self.is_submitting() && (self.response.is_some() || self.error.is_some())
    }

    pub fn char_count(&self) -> usize {
        self.review_text.chars().count()
    }

    /// The rating widget bound to this form; disabled while submitting.
    pub fn rating_input(&self) -> RatingInput {
        RatingInput::new(self.rating).disabled(self.is_submitting())
    }

    /// Select a star. Ignored while submitting or for values outside 1..=5.
    pub fn set_rating(&mut self, value: u8) {
        let input = self.rating_input();
        input.click(value, |v| self.rating = v);
    }

    pub fn handle_rating_key(&mut self, key: RatingKey) {
        let input = self.rating_input();
        input.key(key, |v| self.rating = v);
    }

    /// Replace the review text.
    ///
    /// Characters past [`MAX_REVIEW_CHARS`] are dropped at input time, so the
    /// draft can never exceed the bound. Returns `false` when anything was
    /// dropped or the field is locked by an in-flight submission.
    pub fn set_review_text(&mut self, text: &str) -> bool {
        if self.is_submitting() {
            return false;
        }
        let clipped = clip_to_chars(text, MAX_REVIEW_CHARS);
        self.review_text = clipped.to_string();
        clipped.len() == text.len()
    }

    /// Validate the draft and enter `Submitting`.
    ///
    /// Returns the payload to send, or `None` when nothing should go out:
    /// either a submission is already in flight, or the draft fails
    /// [`ReviewSubmission::validate`] (the form then moves to `Failed`, with
    /// [`RATING_REQUIRED_MESSAGE`] when no star is picked).
    pub fn begin_submit(&mut self) -> Option<ReviewSubmission> {
        if self.is_submitting() {
            tracing::debug!("Submission already in flight, ignoring submit");
            return None;
        }

        if self.rating == 0 {
            self.fail_locally(RATING_REQUIRED_MESSAGE.to_string());
            return None;
        }

        let submission = ReviewSubmission {
            rating: self.rating,
            review_text: self.review_text.clone(),
        };
        if let Err(e) = submission.validate() {
            let message = match e {
                CoreError::Validation(msg) => msg,
                other => other.to_string(),
            };
            self.fail_locally(message);
            return None;
        }

        self.response = None;
        self.error = None;
        self.status = FormStatus::Submitting;
        Some(submission)
    }

    fn fail_locally(&mut self, message: String) {
        tracing::debug!(error = %message, "Submission rejected before sending");
        self.response = None;
        self.error = Some(message);
        self.status = FormStatus::Failed;
    }

    /// Record the outcome of the submission started by `begin_submit`.
    ///
    /// Success clears the draft for a fresh entry; failure keeps it so the
    /// user does not have to retype.
    pub fn finish_submit(&mut self, result: Result<ReviewResponse, ApiError>) {
        if !self.is_submitting() {
            tracing::warn!(status = ?self.status, "Submission result arrived with no submission in flight");
            return;
        }

        match result {
            Ok(response) => {
                tracing::info!(rating = self.rating, "Review submitted");
                self.response = Some(response);
                self.rating = 0;
                self.review_text.clear();
                self.status = FormStatus::Succeeded;
            }
            Err(e) => {
                tracing::warn!(status = e.status(), error = %e, "Review submission failed");
                self.error = Some(e.message().to_string());
                self.status = FormStatus::Failed;
            }
        }
    }

    /// Run one full submission against `backend`.
    pub async fn submit(&mut self, backend: &dyn ReviewBackend) -> FormStatus {
        let Some(submission) = self.begin_submit() else {
            return self.status;
        };
        let result = backend.submit_review(&submission).await;
        self.finish_submit(result);
        self.status
    }

    /// Back to a blank `Idle` form. Refused while a submission is in flight.
    pub fn reset(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.rating = 0;
        self.review_text.clear();
        self.response = None;
        self.error = None;
        self.status = FormStatus::Idle;
        true
    }
}
