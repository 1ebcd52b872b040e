//! Contract tests for AuthClient against the backend guest login endpoint.
//!
//! These tests use wiremock to simulate `POST /api/v1/auth/guest-login`
//! with the backend's response envelope.

use formgate_client::{AuthClient, ClientConfig};
use formgate_core::CaseId;
use formgate_schema::{guest_login_validator, GuestLoginRequest, Locale};
use formgate_state::{
    SubmissionController, SubmissionStatus, SubmitReport, Transport, TransportError,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> AuthClient {
    let config = ClientConfig::new(&mock_server.uri()).unwrap();
    AuthClient::new(&config).unwrap()
}

fn guest_info(in_case: bool, case_id: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "code": "OK",
        "message": null,
        "data": {
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "username": "alex",
            "in_case": in_case,
            "current_case_id": case_id
        },
        "meta": null
    })
}

#[tokio::test]
async fn guest_login_returns_outcome() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/guest-login"))
        .and(body_json(serde_json::json!({"username": "alex"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(guest_info(true, Some("42"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let outcome = client
        .guest_login(&GuestLoginRequest {
            username: "alex".into(),
        })
        .await
        .unwrap();

    assert!(outcome.in_case);
    assert_eq!(outcome.current_case_id, Some(CaseId::new("42").unwrap()));
    assert_eq!(outcome.username.as_deref(), Some("alex"));
    assert_eq!(
        outcome.user_id.map(|id| id.as_uuid().to_string()),
        Some("550e8400-e29b-41d4-a716-446655440000".to_string())
    );
}

#[tokio::test]
async fn validated_draft_is_posted_as_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/guest-login"))
        .and(body_json(serde_json::json!({"username": "alex"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(guest_info(false, None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let validator = guest_login_validator(Locale::En).unwrap();
    let value = validator
        .validate(&serde_json::json!({"username": "alex", "extra": true}))
        .unwrap();

    let outcome = test_client(&mock_server).submit(&value).await.unwrap();
    assert!(!outcome.in_case);
    assert!(outcome.current_case_id.is_none());
}

#[tokio::test]
async fn validation_error_carries_field_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/guest-login"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "ok": false,
            "code": "VALIDATION_ERROR",
            "message": null,
            "data": null,
            "meta": {"fields": [{
                "field": "body.username",
                "message": "String should have at least 3 characters",
                "type": "string_too_short"
            }]}
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .guest_login(&GuestLoginRequest {
            username: "al".into(),
        })
        .await
        .unwrap_err();

    match err {
        TransportError::Rejected {
            status,
            code,
            message,
            fields,
        } => {
            assert_eq!(status, 422);
            assert_eq!(code.as_deref(), Some("VALIDATION_ERROR"));
            assert_eq!(message, "Unprocessable Entity");
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "body.username");
            assert_eq!(fields[0].kind, "string_too_short");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn ok_false_is_rejected_even_with_200() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/guest-login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": false,
            "code": "AUTH_UNAUTHORIZED",
            "message": "not allowed",
            "data": null,
            "meta": null
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .guest_login(&GuestLoginRequest {
            username: "alex".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransportError::Rejected { status: 200, code: Some(ref c), ref message, .. }
            if c == "AUTH_UNAUTHORIZED" && message == "not allowed"
    ));
}

#[tokio::test]
async fn inconsistent_case_flag_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/guest-login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(guest_info(true, None)))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .guest_login(&GuestLoginRequest {
            username: "alex".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::MalformedResponse { .. }));
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/guest-login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .guest_login(&GuestLoginRequest {
            username: "alex".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::MalformedResponse { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_reported() {
    // Port 9 (discard) is not expected to have an HTTP listener.
    let client = AuthClient::new(&ClientConfig::local_mock(9).unwrap()).unwrap();
    let err = client
        .guest_login(&GuestLoginRequest {
            username: "alex".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TransportError::Unreachable { .. } | TransportError::Timeout { .. }
    ));
}

#[tokio::test]
async fn slow_backend_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/guest-login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(guest_info(false, None))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = ClientConfig::new(&mock_server.uri()).unwrap();
    config.timeout_secs = 1;
    let err = AuthClient::new(&config)
        .unwrap()
        .guest_login(&GuestLoginRequest {
            username: "alex".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Timeout { .. }));
}

#[tokio::test]
async fn controller_submits_once_through_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/guest-login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(guest_info(true, Some("7"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = SubmissionController::new(
        guest_login_validator(Locale::En).unwrap(),
        test_client(&mock_server),
    );
    controller.set_field("username", "alex");

    let (first, second) = tokio::join!(controller.submit(), controller.submit());
    assert!(matches!(first, SubmitReport::Completed(Ok(_))));
    assert_eq!(second, SubmitReport::Rejected);
    assert_eq!(controller.status(), SubmissionStatus::Succeeded);
}
