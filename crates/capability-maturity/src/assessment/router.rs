use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AssessmentContext, AssessmentDraft, AssessmentId};
use super::repository::{AssessmentRepository, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};
use crate::scoring::ScoreValue;

/// Body of a score write; `null`, `0`, or a missing `score` clears the rating.
#[derive(Debug, Deserialize)]
pub struct ScoreUpdate {
    #[serde(default)]
    pub score: Option<i64>,
}

/// Body of a notes write; a missing or blank `notes` clears them.
#[derive(Debug, Deserialize)]
pub struct NotesUpdate {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PriorityUpdate {
    pub priority: bool,
}

/// Body of an override write.
#[derive(Debug, Deserialize)]
pub struct OverrideUpdate {
    #[serde(default)]
    pub manual_score: Option<f64>,
    #[serde(default = "default_manual")]
    pub is_manual: bool,
}

fn default_manual() -> bool {
    true
}

/// Router builder exposing the assessment lifecycle over HTTP.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments",
            post(create_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/assessments/:assessment_id", get(status_handler::<R>))
        .route(
            "/api/v1/assessments/:assessment_id/report",
            get(report_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/scores/:process_id",
            put(score_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/scores/:process_id/notes",
            put(notes_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/scores/:process_id/priority",
            put(priority_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/context",
            put(context_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/categories/:category_id/override",
            put(override_handler::<R>).delete(reset_override_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/close",
            post(close_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/reopen",
            post(reopen_handler::<R>),
        )
        .with_state(service)
}

pub(crate) fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Repository(RepositoryError::Conflict)
        | AssessmentServiceError::Closed(_) => StatusCode::CONFLICT,
        AssessmentServiceError::UnknownProcess(_)
        | AssessmentServiceError::UnknownCategory(_)
        | AssessmentServiceError::InvalidOverride(_)
        | AssessmentServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Json(draft): Json<AssessmentDraft>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.create(draft) {
        Ok(assessment) => (
            StatusCode::CREATED,
            Json(assessment.status_view(service.framework())),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<AssessmentService<R>>>) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.list() {
        Ok(assessments) => {
            let views: Vec<_> = assessments
                .iter()
                .map(|assessment| assessment.status_view(service.framework()))
                .collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.get(&AssessmentId(assessment_id)) {
        Ok(assessment) => {
            (StatusCode::OK, Json(assessment.status_view(service.framework()))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.report(&AssessmentId(assessment_id)) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path((assessment_id, process_id)): Path<(String, String)>,
    Json(update): Json<ScoreUpdate>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let score = match update.score.map(ScoreValue::from_raw).transpose() {
        Ok(score) => score.flatten(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    };

    match service.record_score(&AssessmentId(assessment_id), &process_id, score) {
        Ok(assessment) => {
            (StatusCode::OK, Json(assessment.status_view(service.framework()))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn notes_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path((assessment_id, process_id)): Path<(String, String)>,
    Json(update): Json<NotesUpdate>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.annotate_process(&AssessmentId(assessment_id), &process_id, update.notes) {
        Ok(assessment) => {
            (StatusCode::OK, Json(assessment.status_view(service.framework()))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn priority_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path((assessment_id, process_id)): Path<(String, String)>,
    Json(update): Json<PriorityUpdate>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.set_priority(&AssessmentId(assessment_id), &process_id, update.priority) {
        Ok(assessment) => {
            (StatusCode::OK, Json(assessment.status_view(service.framework()))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn context_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
    Json(context): Json<AssessmentContext>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.update_context(&AssessmentId(assessment_id), context) {
        Ok(assessment) => {
            (StatusCode::OK, Json(assessment.status_view(service.framework()))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn override_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path((assessment_id, category_id)): Path<(String, String)>,
    Json(update): Json<OverrideUpdate>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.set_category_override(
        &AssessmentId(assessment_id),
        &category_id,
        update.manual_score,
        update.is_manual,
    ) {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_override_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path((assessment_id, category_id)): Path<(String, String)>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.reset_category_to_automatic(&AssessmentId(assessment_id), &category_id) {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn close_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.close(&AssessmentId(assessment_id)) {
        Ok(assessment) => {
            (StatusCode::OK, Json(assessment.status_view(service.framework()))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reopen_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.reopen(&AssessmentId(assessment_id)) {
        Ok(assessment) => {
            (StatusCode::OK, Json(assessment.status_view(service.framework()))).into_response()
        }
        Err(error) => error_response(error),
    }
}
