//! HTML pages for the feedback form and the admin dashboard.
//!
//! Every piece of user or backend supplied text goes through
//! `html_escape` before it lands in markup.

use std::borrow::Cow;

use axum::http::StatusCode;
use feedback_core::review::MAX_REVIEW_CHARS;
use feedback_ui::dashboard::DashboardState;
use feedback_ui::form::{FormStatus, SubmissionForm};
use feedback_ui::rating::rating_label;
use feedback_ui::view::{self, DetailView};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; color: #1f2937; }
.banner { padding: .75rem 1rem; border-radius: 6px; margin: 1rem 0; }
.banner.error { background: #fee2e2; color: #991b1b; }
.banner.success { background: #dcfce7; color: #166534; }
.stars label { font-size: 1.75rem; cursor: pointer; color: #d1d5db; }
.stars label.filled { color: #f59e0b; }
.stars input { position: absolute; opacity: 0; }
.cards { display: flex; gap: 1rem; }
.card { flex: 1; border: 1px solid #e5e7eb; border-radius: 6px; padding: .75rem; }
.filters form { display: inline; }
.filters button.active { font-weight: bold; }
table { width: 100%; border-collapse: collapse; }
td, th { border-bottom: 1px solid #e5e7eb; padding: .5rem; text-align: left; }
.badge { padding: 0 .5rem; border-radius: 999px; background: #f3f4f6; }
"#;

fn esc(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

fn attr(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Wrap `body` in the shared page shell.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = esc(title),
    )
}

// ---------------------------------------------------------------------------
// Submission form
// ---------------------------------------------------------------------------

pub fn form_page(form: &SubmissionForm) -> String {
    let mut body = String::from("<h1>Share Your Feedback</h1>\n");

    if form.status() == FormStatus::Succeeded {
        if let Some(response) = form.response() {
            body.push_str(&format!(
                "<div class=\"banner success\" role=\"status\"><strong>Thank you for your feedback!</strong><p>{}</p>\
                 <a href=\"/\">Submit another review</a></div>\n",
                esc(&response.ai_response),
            ));
        }
    }
    if let Some(error) = form.error() {
        body.push_str(&error_banner(error));
    }

    body.push_str("<form method=\"post\" action=\"/\">\n");
    body.push_str(&rating_group(form));
    body.push_str(&format!(
        "<label for=\"review_text\">Your review (optional)</label>\n\
         <textarea id=\"review_text\" name=\"review_text\" rows=\"6\" maxlength=\"{max}\" \
         placeholder=\"Tell us about your experience...\">{text}</textarea>\n\
         <p class=\"counter\">{count}/{max} characters</p>\n",
        max = MAX_REVIEW_CHARS,
        text = esc(form.review_text()),
        count = form.char_count(),
    ));
    let disabled = if form.is_submitting() { " disabled" } else { "" };
    body.push_str(&format!(
        "<button type=\"submit\"{disabled}>{}</button>\n</form>\n",
        if form.is_submitting() {
            "Submitting..."
        } else {
            "Submit Review"
        },
    ));

    layout("Share Your Feedback", &body)
}

fn rating_group(form: &SubmissionForm) -> String {
    let input = form.rating_input();
    let mut group = String::from(
        "<fieldset class=\"stars\" role=\"radiogroup\" aria-label=\"Rating\">\n<legend>Rating</legend>\n",
    );
    for star in input.stars() {
        let checked = if star.value == input.rating() {
            " checked"
        } else {
            ""
        };
        let class = if star.filled { "filled" } else { "" };
        group.push_str(&format!(
            "<label class=\"{class}\"><input type=\"radio\" name=\"rating\" value=\"{value}\" \
             aria-label=\"{label}\"{checked}>★</label>\n",
            value = star.value,
            label = attr(&star.label),
        ));
    }
    if let Some(label) = rating_label(input.rating()) {
        group.push_str(&format!("<span class=\"rating-label\">{label}</span>\n"));
    }
    group.push_str("</fieldset>\n");
    group
}

// ---------------------------------------------------------------------------
// Admin dashboard
// ---------------------------------------------------------------------------

pub fn dashboard_page(state: &DashboardState) -> String {
    let mut body = String::from("<h1>Admin Dashboard</h1>\n");

    body.push_str("<div class=\"toolbar\">\n");
    if let Some(updated) = &state.last_updated {
        body.push_str(&format!(
            "<span class=\"updated\">Last updated: {}</span>\n",
            view::format_date(updated),
        ));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"/admin/refresh\"><button type=\"submit\">{}</button></form>\n</div>\n",
        if state.is_loading {
            "Refreshing..."
        } else {
            "Refresh"
        },
    ));

    if let Some(error) = &state.error {
        body.push_str(&format!(
            "<div class=\"banner error\" role=\"alert\">{}\
             <form method=\"post\" action=\"/admin/dismiss-error\"><button type=\"submit\" aria-label=\"Dismiss\">×</button></form></div>\n",
            esc(error),
        ));
    }

    let Some(stats) = &state.stats else {
        body.push_str("<p class=\"loading\">Loading dashboard...</p>\n");
        return layout("Admin Dashboard", &body);
    };

    body.push_str("<div class=\"cards\">\n");
    for card in view::stat_cards(stats) {
        body.push_str(&format!(
            "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
            card.label,
            esc(&card.value),
        ));
    }
    body.push_str("</div>\n");

    body.push_str("<div class=\"filters\">\n");
    for button in view::filter_buttons(stats, state.rating_filter) {
        let value = button.rating.map(|r| r.to_string()).unwrap_or_default();
        let class = if button.active { "active" } else { "" };
        body.push_str(&format!(
            "<form method=\"post\" action=\"/admin/filter\"><input type=\"hidden\" name=\"rating\" value=\"{value}\">\
             <button type=\"submit\" class=\"{class}\">{}</button></form>\n",
            esc(&button.label),
        ));
    }
    body.push_str("</div>\n");

    body.push_str(&format!(
        "<p class=\"caption\">{}</p>\n",
        view::list_caption(state.reviews.len(), state.rating_filter),
    ));

    if state.reviews.is_empty() {
        body.push_str("<p class=\"empty\">No reviews found</p>\n");
        return layout("Admin Dashboard", &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>Rating</th><th>Review</th><th>AI Summary</th><th>Status</th><th>Date</th></tr></thead>\n<tbody>\n",
    );
    for row in view::review_rows(&state.reviews) {
        let preview = match &row.preview {
            Some(text) => esc(text).into_owned(),
            None => "<em>No text</em>".to_string(),
        };
        body.push_str(&format!(
            "<tr><td>{stars}</td><td><a href=\"/admin/reviews/{id}\">{preview}</a></td><td>{summary}</td>\
             <td><span class=\"badge\">{status}</span></td><td>{date}</td></tr>\n",
            stars = "★".repeat(row.rating as usize),
            id = row.id,
            summary = esc(&row.summary_preview),
            status = row.status,
            date = row.created_at,
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    layout("Admin Dashboard", &body)
}

pub fn detail_page(detail: &DetailView) -> String {
    let count = detail
        .char_count
        .map(|n| format!("<p class=\"counter\">{n} characters</p>\n"))
        .unwrap_or_default();

    let body = format!(
        "<a href=\"/admin\">Close</a>\n\
         <h1>Review #{id}</h1>\n\
         <p>{stars} <span class=\"badge\">{status}</span></p>\n\
         <p class=\"submitted\">{submitted}</p>\n\
         <h2>Review</h2>\n<p class=\"review-text\">{text}</p>\n{count}\
         <h2>AI Summary</h2>\n<p class=\"summary\">{summary}</p>\n\
         <h2>Recommended Actions</h2>\n<p class=\"actions\">{actions}</p>\n",
        id = detail.id,
        stars = "★".repeat(detail.rating as usize),
        status = detail.status,
        submitted = esc(&detail.submitted),
        text = esc(&detail.review_text),
        summary = esc(&detail.summary),
        actions = esc(&detail.actions),
    );

    layout(&format!("Review #{}", detail.id), &body)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

fn error_banner(message: &str) -> String {
    format!(
        "<div class=\"banner error\" role=\"alert\">{}</div>\n",
        esc(message)
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{}</h1>\n{}<a href=\"/\">Back</a>\n",
        esc(title),
        error_banner(message),
    );
    layout(title, &body)
}
