//! Admin dashboard pages. Everything renders from the shared
//! [`AdminDashboard`](feedback_ui::dashboard::AdminDashboard); only filter
//! and refresh actions reach the backend.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use feedback_core::error::CoreError;
use feedback_core::types::DbId;
use feedback_ui::dashboard::{RefreshKind, RefreshOutcome};
use feedback_ui::view;
use serde::Deserialize;

use crate::error::AppResult;
use crate::render;
use crate::routes::parse_rating_field;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FilterForm {
    /// Empty clears the filter.
    #[serde(default)]
    pub rating: String,
}

/// GET /admin -- dashboard snapshot. Visiting it closes any open detail.
async fn show_dashboard(State(state): State<AppState>) -> Html<String> {
    state.dashboard.close_detail().await;
    let snapshot = state.dashboard.snapshot().await;
    Html(render::dashboard_page(&snapshot))
}

/// POST /admin/filter
async fn set_filter(
    State(state): State<AppState>,
    Form(input): Form<FilterForm>,
) -> AppResult<Redirect> {
    let rating = parse_rating_field(&input.rating)?;
    let outcome = state.dashboard.set_rating_filter(rating).await?;
    log_outcome("filter", &outcome);
    Ok(Redirect::to("/admin"))
}

/// POST /admin/refresh
async fn refresh(State(state): State<AppState>) -> Redirect {
    let outcome = state.dashboard.refresh(RefreshKind::Manual).await;
    log_outcome("manual refresh", &outcome);
    Redirect::to("/admin")
}

/// POST /admin/dismiss-error
async fn dismiss_error(State(state): State<AppState>) -> Redirect {
    state.dashboard.dismiss_error().await;
    Redirect::to("/admin")
}

/// GET /admin/reviews/{id} -- detail from the list already fetched.
async fn show_review(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Html<String>> {
    let review = state
        .dashboard
        .select(id)
        .await
        .ok_or(CoreError::NotFound {
            entity: "Review",
            id,
        })?;
    Ok(Html(render::detail_page(&view::detail_view(&review))))
}

fn log_outcome(action: &str, outcome: &RefreshOutcome) {
    match outcome {
        RefreshOutcome::Applied => tracing::debug!(action, "Dashboard updated"),
        RefreshOutcome::Stale => tracing::debug!(action, "Dashboard result superseded"),
        RefreshOutcome::Failed(e) => {
            tracing::warn!(action, status = e.status(), error = %e, "Dashboard fetch failed")
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show_dashboard))
        .route("/filter", post(set_filter))
        .route("/refresh", post(refresh))
        .route("/dismiss-error", post(dismiss_error))
        .route("/reviews/{id}", get(show_review))
}
