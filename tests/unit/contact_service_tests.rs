//! Unit tests for the contact submission flow and its error taxonomy.

use std::sync::Arc;

use portfolio_site::config::EmailConfig;
use portfolio_site::contact::{
    ContactService, SubmissionError, FIELDS_REQUIRED_MESSAGE, INTERNAL_ERROR_MESSAGE,
    NOT_CONFIGURED_MESSAGE, SEND_FAILED_MESSAGE,
};
use portfolio_site::email::{EmailProvider, ProviderFailure};
use portfolio_site::models::contact::ContactPayload;

use super::fixtures::{email_config, RecordingProvider};

fn service(config: EmailConfig, provider: &Arc<RecordingProvider>) -> ContactService {
    let provider: Arc<dyn EmailProvider> = provider.clone();
    ContactService::new(config, provider)
}

fn unconfigured() -> EmailConfig {
    EmailConfig {
        api_key: None,
        ..EmailConfig::default()
    }
}

const VALID_BODY: &[u8] = br#"{"name":"Ada","email":"ada@example.com","message":"Hi there"}"#;

// ── Configuration ────────────────────────────────────────────

#[tokio::test]
async fn missing_credential_is_service_unavailable_for_valid_input() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(unconfigured(), &provider);

    let err = svc.submit(VALID_BODY).await.unwrap_err();
    assert_eq!(err, SubmissionError::Configuration);
    assert_eq!(err.status(), 503);
    assert_eq!(err.public_message(), NOT_CONFIGURED_MESSAGE);
    assert!(provider.calls().is_empty());
    assert!(!svc.is_configured());
}

#[tokio::test]
async fn missing_credential_wins_over_invalid_fields() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(unconfigured(), &provider);

    let err = svc.submit(br#"{"name":""}"#).await.unwrap_err();
    assert_eq!(err, SubmissionError::Configuration);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn missing_credential_wins_over_malformed_body() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(unconfigured(), &provider);

    let err = svc.submit(b"not json").await.unwrap_err();
    assert_eq!(err.status(), 503);
}

// ── Validation ───────────────────────────────────────────────

#[tokio::test]
async fn all_fields_empty_is_bad_request() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(email_config(), &provider);

    let err = svc
        .submit(br#"{"name":"","email":"","message":""}"#)
        .await
        .unwrap_err();
    assert_eq!(err, SubmissionError::Validation);
    assert_eq!(err.status(), 400);
    assert_eq!(err.public_message(), FIELDS_REQUIRED_MESSAGE);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn single_missing_field_is_bad_request() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(email_config(), &provider);

    let err = svc
        .submit(br#"{"name":"Ada","email":"ada@example.com"}"#)
        .await
        .unwrap_err();
    assert_eq!(err.status(), 400);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn malformed_body_is_internal_error() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(email_config(), &provider);

    let err = svc.submit(b"{name: Ada").await.unwrap_err();
    assert!(matches!(err, SubmissionError::Unexpected(_)));
    assert_eq!(err.status(), 500);
    assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn array_body_is_bad_request_without_delivery() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(email_config(), &provider);

    let err = svc
        .submit(br#"["Ada","ada@example.com","Hi"]"#)
        .await
        .unwrap_err();
    assert_eq!(err, SubmissionError::Validation);
    assert_eq!(err.status(), 400);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn scalar_body_is_bad_request() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(email_config(), &provider);

    let bodies: [&[u8]; 3] = [br#""just a string""#, b"42", b"false"];
    for body in bodies {
        let err = svc.submit(body).await.unwrap_err();
        assert_eq!(err, SubmissionError::Validation);
    }
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn null_body_is_internal_error() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(email_config(), &provider);

    let err = svc.submit(b"null").await.unwrap_err();
    assert!(matches!(err, SubmissionError::Unexpected(_)));
    assert_eq!(err.status(), 500);
    assert!(provider.calls().is_empty());
}

// ── Delivery ─────────────────────────────────────────────────

#[tokio::test]
async fn accepted_message_returns_receipt() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(email_config(), &provider);

    let receipt = svc.submit(VALID_BODY).await.unwrap();
    assert_eq!(receipt.message_id.as_deref(), Some("msg_123"));
}

#[tokio::test]
async fn exactly_one_attempt_with_credential_and_composed_email() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(email_config(), &provider);

    svc.submit(VALID_BODY).await.unwrap();

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    let (api_key, email) = &calls[0];
    assert_eq!(api_key, "re_test_key");
    assert_eq!(email.reply_to, "ada@example.com");
    assert!(email.subject.contains("Ada"));
    assert!(email.html.contains("Hi there"));
}

#[tokio::test]
async fn provider_rejection_is_delivery_error_without_detail() {
    let provider = Arc::new(RecordingProvider::rejecting("domain not verified"));
    let svc = service(email_config(), &provider);

    let err = svc.submit(VALID_BODY).await.unwrap_err();
    assert!(matches!(err, SubmissionError::Delivery(ref detail) if detail.contains("domain not verified")));
    assert_eq!(err.status(), 500);
    assert_eq!(err.public_message(), SEND_FAILED_MESSAGE);

    let body = serde_json::to_string(&err.reply()).unwrap();
    assert!(!body.contains("domain not verified"));
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn transport_failure_is_unexpected_error() {
    let provider = Arc::new(RecordingProvider::failing("connection reset"));
    let svc = service(email_config(), &provider);

    let err = svc.submit(VALID_BODY).await.unwrap_err();
    assert_eq!(err, SubmissionError::Unexpected("connection reset".into()));
    assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);

    let body = serde_json::to_string(&err.reply()).unwrap();
    assert!(!body.contains("connection reset"));
}

#[tokio::test]
async fn failures_are_not_retried() {
    let provider = Arc::new(RecordingProvider::failing("timed out"));
    let svc = service(email_config(), &provider);

    let _ = svc.submit(VALID_BODY).await;
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn typed_payload_follows_same_flow() {
    let provider = Arc::new(RecordingProvider::accepting());
    let svc = service(email_config(), &provider);

    svc.submit_payload(ContactPayload::new("Ada", "a@x.io", "Hi"))
        .await
        .unwrap();
    let err = svc
        .submit_payload(ContactPayload::default())
        .await
        .unwrap_err();
    assert_eq!(err, SubmissionError::Validation);
    assert_eq!(provider.calls().len(), 1);
}

#[test]
fn provider_failures_map_to_taxonomy() {
    let rejected = SubmissionError::from(ProviderFailure::Rejected {
        status: 403,
        message: "forbidden".into(),
    });
    assert_eq!(rejected, SubmissionError::Delivery("rejected (403): forbidden".into()));

    let transport = SubmissionError::from(ProviderFailure::Transport("dns".into()));
    assert_eq!(transport, SubmissionError::Unexpected("dns".into()));
}
