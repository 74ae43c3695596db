//! Submitter and retry policy behaviour against a scripted scoring endpoint

mod common;

use common::*;
use patient_triage::client::{AssessmentSubmitter, HttpMethod};
use patient_triage::models::SubmissionPayload;
use patient_triage::TriageError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn submitter(transport: &Arc<ScriptedTransport>) -> AssessmentSubmitter<ScriptedTransport> {
    AssessmentSubmitter::new(Arc::clone(transport), &test_config())
}

fn payload() -> SubmissionPayload {
    SubmissionPayload {
        high_risk_patients: vec!["DEMO002".into(), "DEMO031".into()],
        fever_patients: vec!["DEMO005".into()],
        data_quality_issues: vec!["DEMO004".into()],
    }
}

#[tokio::test(start_paused = true)]
async fn test_posts_payload_and_passes_result_through() {
    let transport = Arc::new(ScriptedTransport::new().respond(
        SUBMIT,
        json_response(
            200,
            json!({
                "success": true,
                "message": "Assessment submitted successfully",
                "results": {
                    "score": 91.94,
                    "percentage": 92,
                    "status": "PASS",
                    "breakdown": {"fever": {"score": 19, "max": 25}}
                },
                "remaining_attempts": 2
            }),
        ),
    ));

    let result = submitter(&transport)
        .submit_assessment(&payload())
        .await
        .unwrap();

    assert!(result.success());
    assert_eq!(result.score(), Some(91.94));
    assert_eq!(result.get("remaining_attempts"), Some(&json!(2)));

    let requests = transport.requests_to(SUBMIT);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].request.method, HttpMethod::Post);
    assert_eq!(
        requests[0].request.body,
        Some(json!({
            "high_risk_patients": ["DEMO002", "DEMO031"],
            "fever_patients": ["DEMO005"],
            "data_quality_issues": ["DEMO004"]
        }))
    );
}

#[tokio::test(start_paused = true)]
async fn test_service_unavailable_then_success_waits_one_backoff() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(SUBMIT, json_response(503, json!({"error": "busy"})))
            .respond(SUBMIT, assessment_accepted()),
    );

    let start = Instant::now();
    let result = submitter(&transport)
        .submit_assessment(&payload())
        .await
        .unwrap();

    assert!(result.success());
    assert_eq!(start.elapsed(), Duration::from_millis(1000));
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_without_header_uses_linear_backoff() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(SUBMIT, rate_limited(None))
            .respond(SUBMIT, rate_limited(None))
            .respond(SUBMIT, assessment_accepted()),
    );

    let start = Instant::now();
    submitter(&transport)
        .submit_assessment(&payload())
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[1].sent_at - requests[0].sent_at, Duration::from_millis(1000));
    assert_eq!(requests[2].sent_at - requests[1].sent_at, Duration::from_millis(2000));
    assert_eq!(start.elapsed(), Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn test_persistent_rate_limit_exceeds_max_retries() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(SUBMIT, rate_limited(Some("1")))
            .respond(SUBMIT, rate_limited(Some("1")))
            .respond(SUBMIT, rate_limited(Some("1")))
            .respond(SUBMIT, assessment_accepted()),
    );

    let start = Instant::now();
    let err = submitter(&transport)
        .submit_assessment(&payload())
        .await
        .unwrap_err();

    match &err {
        TriageError::MaxRetriesExceeded {
            operation,
            attempts,
        } => {
            assert_eq!(operation, "POST /submit-assessment");
            assert_eq!(*attempts, 3);
        }
        other => panic!("expected MaxRetriesExceeded, got {other:?}"),
    }
    assert_eq!(transport.requests().len(), 3);
    // No wait after the final rate-limited attempt
    assert_eq!(start.elapsed(), Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn test_server_error_on_every_attempt_surfaces_status() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(SUBMIT, json_response(500, json!({})))
            .respond(SUBMIT, json_response(500, json!({})))
            .respond(SUBMIT, json_response(500, json!({}))),
    );

    let start = Instant::now();
    let err = submitter(&transport)
        .submit_assessment(&payload())
        .await
        .unwrap_err();

    assert!(matches!(err, TriageError::Api { status: 500, .. }));
    assert_eq!(
        err.to_string(),
        "API error: 500 - Failed to submit assessment: Internal Server Error"
    );
    assert_eq!(start.elapsed(), Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn test_client_error_is_not_retried() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(SUBMIT, json_response(400, json!({"error": "bad payload"})))
            .respond(SUBMIT, assessment_accepted()),
    );

    let start = Instant::now();
    let err = submitter(&transport)
        .submit_assessment(&payload())
        .await
        .unwrap_err();

    assert!(matches!(err, TriageError::Api { status: 400, .. }));
    assert!(!err.is_recoverable());
    assert_eq!(transport.requests().len(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_fractional_retry_after_waits_whole_seconds() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(SUBMIT, rate_limited(Some("2.5")))
            .respond(SUBMIT, assessment_accepted()),
    );

    let start = Instant::now();
    submitter(&transport)
        .submit_assessment(&payload())
        .await
        .unwrap();

    assert_eq!(start.elapsed(), Duration::from_secs(2));
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_unexpected_result_shape_is_returned_verbatim() {
    let body = json!({
        "success": "true",
        "message": null,
        "results": null,
        "score": 90,
        "extra": 1
    });
    let transport =
        Arc::new(ScriptedTransport::new().respond(SUBMIT, json_response(200, body.clone())));

    let result = submitter(&transport)
        .submit_assessment(&payload())
        .await
        .unwrap();

    assert!(!result.success());
    assert_eq!(result.score(), None);
    assert_eq!(serde_json::to_value(&result).unwrap(), body);
}
