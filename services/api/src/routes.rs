use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use capability_maturity::assessment::report::build_report;
use capability_maturity::assessment::{
    assessment_router, AssessmentReport, AssessmentRepository, AssessmentService, ScoreImporter,
};
use capability_maturity::error::AppError;
use capability_maturity::framework::Framework;
use capability_maturity::scoring::{CategoryScoreOverride, ProcessScore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Ad-hoc roll-up request. CSV rows are appended after the body entries, so
/// a process or category given in both keeps the body value.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MaturityReportRequest {
    #[serde(default)]
    pub(crate) scores: Vec<ProcessScore>,
    #[serde(default)]
    pub(crate) overrides: Vec<CategoryScoreOverride>,
    #[serde(default)]
    pub(crate) scores_csv: Option<String>,
    #[serde(default)]
    pub(crate) overrides_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MaturityReportResponse {
    pub(crate) data_source: ScoreDataSource,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) skipped: Vec<String>,
    #[serde(flatten)]
    pub(crate) report: AssessmentReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ScoreDataSource {
    Request,
    Csv,
}

pub(crate) fn with_assessment_routes<R>(service: Arc<AssessmentService<R>>) -> axum::Router
where
    R: AssessmentRepository + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/maturity/report",
            axum::routing::post(maturity_report_endpoint),
        )
        .route("/api/v1/framework", axum::routing::get(framework_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn framework_endpoint(Extension(state): Extension<AppState>) -> Json<Framework> {
    Json(state.framework.as_ref().clone())
}

pub(crate) async fn maturity_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<MaturityReportRequest>,
) -> Result<Json<MaturityReportResponse>, AppError> {
    let MaturityReportRequest {
        mut scores,
        mut overrides,
        scores_csv,
        overrides_csv,
    } = payload;

    let framework = state.framework.as_ref();
    let importer = ScoreImporter::new(framework);
    let mut skipped = Vec::new();
    let mut data_source = ScoreDataSource::Request;

    if let Some(csv) = scores_csv {
        let import = importer.scores_from_reader(Cursor::new(csv.into_bytes()))?;
        scores.extend(import.scores);
        skipped.extend(import.skipped);
        data_source = ScoreDataSource::Csv;
    }
    if let Some(csv) = overrides_csv {
        let import = importer.overrides_from_reader(Cursor::new(csv.into_bytes()))?;
        overrides.extend(import.overrides);
        skipped.extend(import.skipped);
        data_source = ScoreDataSource::Csv;
    }

    let report = build_report(framework, &scores, &overrides);

    Ok(Json(MaturityReportResponse {
        data_source,
        skipped,
        report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryAssessmentRepository;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use capability_maturity::scoring::MaturityBand;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            framework: Arc::new(Framework::standard()),
        }
    }

    fn rated(process_id: &str, raw: i64) -> ProcessScore {
        ProcessScore::rated(process_id, raw).expect("valid rating")
    }

    #[tokio::test]
    async fn maturity_report_rolls_up_request_scores() {
        let request = MaturityReportRequest {
            scores: vec![
                rated("align-it-strategy-with-business-objectives", 3),
                rated("define-and-execute-it-strategy", 4),
            ],
            ..MaturityReportRequest::default()
        };

        let Json(body) = maturity_report_endpoint(Extension(app_state(true)), Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.data_source, ScoreDataSource::Request);
        assert_eq!(body.report.global_score, 3.5);
        assert_eq!(body.report.global_band, MaturityBand::Good);
        let plan = body.report.domain("plan-strategy").expect("plan domain");
        assert_eq!(plan.categories[0].score, 3.5);
        assert!(body.skipped.is_empty());
    }

    #[tokio::test]
    async fn maturity_report_accepts_csv_exports() {
        let request = MaturityReportRequest {
            scores_csv: Some(
                "Process ID,Score\nmanage-requests,2\nmanage-problems,4\nretired-process,5\n"
                    .to_string(),
            ),
            overrides_csv: Some(
                "Category ID,Manual Score,Is Manual\nit-strategy,4.2,true\n".to_string(),
            ),
            ..MaturityReportRequest::default()
        };

        let Json(body) = maturity_report_endpoint(Extension(app_state(true)), Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.data_source, ScoreDataSource::Csv);
        assert_eq!(body.skipped, vec!["retired-process".to_string()]);
        assert_eq!(body.report.domain("support-users").expect("domain").score, 3.0);
        assert_eq!(body.report.domain("plan-strategy").expect("domain").score, 4.2);
        assert_eq!(body.report.overridden_categories().count(), 1);
    }

    #[tokio::test]
    async fn maturity_report_rejects_out_of_range_csv_scores() {
        let request = MaturityReportRequest {
            scores_csv: Some("Process ID,Score\nmanage-requests,9\n".to_string()),
            ..MaturityReportRequest::default()
        };

        let err = maturity_report_endpoint(Extension(app_state(true)), Json(request))
            .await
            .expect_err("score rejected");
        assert!(matches!(err, AppError::Import(_)));
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = readiness_endpoint(Extension(app_state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(app_state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn router_serves_framework_and_assessments() {
        let framework = Arc::new(Framework::standard());
        let service = Arc::new(AssessmentService::new(
            Arc::new(InMemoryAssessmentRepository::default()),
            framework,
        ));
        let app = with_assessment_routes(service).layer(Extension(app_state(true)));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/framework")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["domains"].as_array().map(Vec::len), Some(8));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/assessments")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"company_id":"acme","title":"Baseline"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
