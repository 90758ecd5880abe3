//! Shared helpers for HTTP-level integration tests.
//!
//! Servers bind an ephemeral port on loopback and shut down when the
//! returned `CancellationToken` is cancelled.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use portfolio_site::config::{EmailConfig, GlobalConfig};
use portfolio_site::contact::ContactService;
use portfolio_site::content::ContentRepository;
use portfolio_site::email::EmailProvider;
use portfolio_site::http::{serve_on, AppState};

#[path = "../unit/fixtures.rs"]
pub mod fixtures;

/// Start the site on an ephemeral port with the fixture content table.
pub async fn spawn_site(
    email: EmailConfig,
    provider: Arc<dyn EmailProvider>,
) -> (String, CancellationToken) {
    let content = ContentRepository::new(fixtures::table()).expect("fixture table");
    spawn_site_with(content, email, provider).await
}

pub async fn spawn_site_with(
    content: ContentRepository,
    email: EmailConfig,
    provider: Arc<dyn EmailProvider>,
) -> (String, CancellationToken) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral");
    let addr = listener.local_addr().expect("local addr");

    let config = GlobalConfig {
        http_port: addr.port(),
        email: email.clone(),
        ..GlobalConfig::default()
    };
    let state = Arc::new(AppState {
        config: Arc::new(config),
        content: Arc::new(content),
        contact: ContactService::new(email, provider),
    });

    let ct = CancellationToken::new();
    let server_ct = ct.clone();
    tokio::spawn(async move {
        let _ = serve_on(listener, state, server_ct).await;
    });

    (format!("http://{addr}"), ct)
}

/// What the fake email provider saw on one call.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

/// How the fake email provider answers.
#[derive(Debug, Clone)]
pub enum ProviderBehavior {
    Accept,
    Reject,
    Stall(std::time::Duration),
}

#[derive(Clone)]
struct FakeProviderState {
    behavior: ProviderBehavior,
    seen: Arc<Mutex<Vec<ProviderRequest>>>,
}

async fn fake_send(
    State(state): State<FakeProviderState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.seen.lock().unwrap().push(ProviderRequest {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body,
    });

    match state.behavior {
        ProviderBehavior::Accept => (StatusCode::OK, Json(json!({ "id": "email_42" }))),
        ProviderBehavior::Reject => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "statusCode": 422,
                "name": "validation_error",
                "message": "The gmail.com domain is not verified"
            })),
        ),
        ProviderBehavior::Stall(delay) => {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, Json(json!({ "id": "too_late" })))
        }
    }
}

/// Start a fake transactional email API exposing `POST /emails`.
///
/// Returns its base URL, the log of received requests, and a shutdown token.
pub async fn spawn_fake_provider(
    behavior: ProviderBehavior,
) -> (String, Arc<Mutex<Vec<ProviderRequest>>>, CancellationToken) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/emails", post(fake_send))
        .with_state(FakeProviderState {
            behavior,
            seen: Arc::clone(&seen),
        });

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral");
    let addr = listener.local_addr().expect("local addr");
    let ct = CancellationToken::new();
    let server_ct = ct.clone();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router)
            .with_graceful_shutdown(async move { server_ct.cancelled().await })
            .await;
    });

    (format!("http://{addr}"), seen, ct)
}
