use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::assessment::router::{assessment_router, create_handler, ScoreUpdate};
use crate::assessment::service::AssessmentService;
use crate::framework::Framework;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn create_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(AssessmentService::new(
        Arc::new(UnavailableRepository),
        Arc::new(Framework::standard()),
    ));

    let response = create_handler::<UnavailableRepository>(State(service), Json(draft())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn score_handler_rejects_out_of_range_ratings() {
    let (service, _) = build_service();
    let assessment = service.create(draft()).expect("created");

    let response = crate::assessment::router::score_handler::<MemoryRepository>(
        State(service),
        Path((assessment.id.0.clone(), "manage-requests".to_string())),
        Json(ScoreUpdate { score: Some(7) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_route_returns_created_status_view() {
    let (service, _) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/assessments",
            json!({ "company_id": "acme", "title": "Baseline" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["status"], "Partial");
    assert_eq!(body["is_open"], true);
    assert_eq!(body["completion_percentage"], 0);
}

#[tokio::test]
async fn status_route_returns_not_found_for_unknown_assessment() {
    let (service, _) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/assessments/asm-missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn score_then_report_routes_reflect_new_rating() {
    let (service, _) = build_service();
    let assessment = service.create(draft()).expect("created");
    let router = assessment_router(service);

    let uri = format!("/api/v1/assessments/{}/scores/manage-requests", assessment.id);
    let response = router
        .clone()
        .oneshot(json_request("PUT", &uri, json!({ "score": 4 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report_uri = format!("/api/v1/assessments/{}/report", assessment.id);
    let response = router
        .oneshot(Request::get(report_uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["global_score"], 4.0);
    assert_eq!(body["global_label"], "Excellent");
}

#[tokio::test]
async fn close_route_makes_score_writes_conflict() {
    let (service, _) = build_service();
    let assessment = service.create(draft()).expect("created");
    let router = assessment_router(service);

    let close_uri = format!("/api/v1/assessments/{}/close", assessment.id);
    let response = router
        .clone()
        .oneshot(Request::post(close_uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/api/v1/assessments/{}/scores/manage-requests", assessment.id);
    let response = router
        .oneshot(json_request("PUT", &uri, json!({ "score": 2 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn override_routes_set_and_reset() {
    let (service, _) = build_service();
    let assessment = service.create(draft()).expect("created");
    let router = assessment_router(service);

    let uri = format!(
        "/api/v1/assessments/{}/categories/it-strategy/override",
        assessment.id
    );
    let response = router
        .clone()
        .oneshot(json_request("PUT", &uri, json!({ "manual_score": 4.2 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["manual_score"], 4.2);
    assert_eq!(body["is_manual"], true);

    let response = router
        .oneshot(Request::delete(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["manual_score"].is_null());
    assert_eq!(body["is_manual"], false);
}

#[tokio::test]
async fn priority_and_notes_routes_annotate_the_process() {
    let (service, _) = build_service();
    let assessment = service.create(draft()).expect("created");
    let router = assessment_router(service.clone());

    let base = format!("/api/v1/assessments/{}/scores/manage-problems", assessment.id);
    let response = router
        .clone()
        .oneshot(json_request("PUT", &format!("{base}/priority"), json!({ "priority": true })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("{base}/notes"),
            json!({ "notes": "No root cause reviews" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = service.get(&assessment.id).expect("stored");
    assert_eq!(stored.scores.len(), 1);
    assert!(stored.scores[0].priority);
    assert_eq!(stored.scores[0].notes.as_deref(), Some("No root cause reviews"));
    assert_eq!(stored.scores[0].score, None);

    let unknown = format!("/api/v1/assessments/{}/scores/no-such-process/priority", assessment.id);
    let response = router
        .oneshot(json_request("PUT", &unknown, json!({ "priority": true })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn context_route_replaces_engagement_framing() {
    let (service, _) = build_service();
    let assessment = service.create(draft()).expect("created");
    let router = assessment_router(service.clone());

    let uri = format!("/api/v1/assessments/{}/context", assessment.id);
    let response = router
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({ "scope": "Group IT", "stakeholders": "CIO, CFO" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = service.get(&assessment.id).expect("stored");
    assert_eq!(stored.context.scope.as_deref(), Some("Group IT"));
    assert_eq!(stored.context.stakeholders.as_deref(), Some("CIO, CFO"));
    assert_eq!(stored.context.objectives, None);
}
