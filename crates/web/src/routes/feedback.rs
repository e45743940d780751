//! Public review submission page.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use feedback_ui::form::{FormStatus, SubmissionForm};
use serde::Deserialize;

use crate::error::AppResult;
use crate::render;
use crate::routes::parse_rating_field;
use crate::state::AppState;

/// Urlencoded body of `POST /`. Both fields may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review_text: String,
}

/// GET / -- blank form.
async fn show_form() -> Html<String> {
    Html(render::form_page(&SubmissionForm::new()))
}

/// POST / -- run one submission and render the outcome.
///
/// On failure the rating and text are rendered back so nothing is lost.
async fn submit(
    State(state): State<AppState>,
    Form(input): Form<SubmitForm>,
) -> AppResult<Html<String>> {
    let rating = parse_rating_field(&input.rating)?.unwrap_or(0);
    let mut form = SubmissionForm::with_draft(rating, &input.review_text);

    let status = form.submit(state.backend.as_ref()).await;
    if status == FormStatus::Failed {
        tracing::debug!(rating, error = ?form.error(), "Rendering form with error");
    }

    Ok(Html(render::form_page(&form)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show_form).post(submit))
}
