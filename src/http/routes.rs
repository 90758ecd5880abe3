//! Route handlers for the content API and the contact endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AppState;
use crate::content::CaseStudySummary;
use crate::models::case_study::CaseStudy;
use crate::models::contact::ContactReply;

/// Error message for an unknown slug.
pub const CASE_STUDY_NOT_FOUND: &str = "Case study not found";

/// Handler for `GET /health`: 200 OK with a plain-text body.
pub async fn health() -> &'static str {
    "ok"
}

/// Filters accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only entries not marked as coming soon.
    #[serde(default)]
    pub published: bool,
    /// Only entries carrying this tag (case-insensitive).
    pub tag: Option<String>,
}

/// Detail view: the full record plus its derived category.
#[derive(Debug, Serialize)]
struct CaseStudyView<'a> {
    #[serde(flatten)]
    study: &'a CaseStudy,
    category: &'a str,
}

/// `GET /api/case-studies`: summaries in declaration order.
pub async fn list_case_studies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<CaseStudySummary>> {
    let content = &state.content;
    let studies = match query.tag.as_deref() {
        Some(tag) => content.list_by_tag(tag),
        None => content.list_all().iter().collect(),
    };
    let summaries = studies
        .into_iter()
        .filter(|study| !query.published || study.is_published())
        .map(CaseStudySummary::from)
        .collect();
    Json(summaries)
}

/// `GET /api/case-studies/slugs`: every slug in declaration order.
pub async fn case_study_slugs(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.content.slugs().into_iter().map(str::to_owned).collect())
}

/// `GET /api/case-studies/{slug}`: full record or 404.
pub async fn get_case_study(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.content.get_by_slug(&slug) {
        Some(study) => Json(CaseStudyView {
            study,
            category: study.category(),
        })
        .into_response(),
        None => {
            debug!(%slug, "case study not found");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": CASE_STUDY_NOT_FOUND })),
            )
                .into_response()
        }
    }
}

/// `POST /api/send-email`: relay a contact form submission.
///
/// The body is taken raw so the credential check runs before parsing.
pub async fn send_email(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match state.contact.submit(&body).await {
        Ok(_) => (StatusCode::OK, Json(ContactReply::sent())).into_response(),
        Err(err) => {
            let status =
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(err.reply())).into_response()
        }
    }
}
