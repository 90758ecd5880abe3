//! HTTP transport for the content API and contact endpoint.

pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::GlobalConfig;
use crate::contact::ContactService;
use crate::content::ContentRepository;
use crate::{AppError, Result};

/// Path of the contact form endpoint.
pub const SEND_EMAIL_PATH: &str = "/api/send-email";

/// Shared, read-only state handed to every request handler.
pub struct AppState {
    /// Effective configuration.
    pub config: Arc<GlobalConfig>,
    /// Case study table, built once at startup.
    pub content: Arc<ContentRepository>,
    /// Contact form relay.
    pub contact: ContactService,
}

/// Build the application router.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/case-studies", get(routes::list_case_studies))
        .route("/api/case-studies/slugs", get(routes::case_study_slugs))
        .route("/api/case-studies/{slug}", get(routes::get_case_study))
        .route(SEND_EMAIL_PATH, post(routes::send_email))
        .with_state(state)
}

/// Bind `config.http_host:http_port` and serve until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Http` if the server fails to bind or serve.
pub async fn serve(state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let bind = state.config.bind_addr()?;
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Http(format!("failed to bind {bind}: {err}")))?;
    serve_on(listener, state, ct).await
}

/// Serve on an already-bound listener until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Http` if the server fails.
pub async fn serve_on(
    listener: TcpListener,
    state: Arc<AppState>,
    ct: CancellationToken,
) -> Result<()> {
    let local = listener
        .local_addr()
        .map_err(|err| AppError::Http(format!("listener has no local address: {err}")))?;
    info!(%local, "starting HTTP server");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Http(format!("server error: {err}")))?;

    info!("HTTP server shut down");
    Ok(())
}
