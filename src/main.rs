#![forbid(unsafe_code)]

//! `portfolio-site`: portfolio backend server binary.
//!
//! Bootstraps configuration, loads the case study table, and serves the
//! content API and contact form endpoint over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use portfolio_site::config::GlobalConfig;
use portfolio_site::contact::ContactService;
use portfolio_site::content::ContentRepository;
use portfolio_site::email::ResendClient;
use portfolio_site::http::{self, AppState};
use portfolio_site::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "portfolio-site", about = "Portfolio site backend", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Override the HTTP port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the content table with a JSON file.
    #[arg(long)]
    content: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("portfolio-site server bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let mut config = match &args.config {
        Some(path) => GlobalConfig::load_from_path(path)?,
        None => GlobalConfig::default(),
    };
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(content) = args.content {
        config.content_path = Some(content);
    }
    config.load_credentials();
    let config = Arc::new(config);
    info!("configuration loaded");

    // ── Load content table ──────────────────────────────
    let content = match &config.content_path {
        Some(path) => ContentRepository::load_from_path(path)?,
        None => ContentRepository::embedded()?,
    };
    info!(
        case_studies = content.len(),
        published = content.list_published().len(),
        "content table loaded"
    );

    // ── Build shared application state ──────────────────
    let provider = ResendClient::new(&config.email.api_base_url, config.email.timeout())?;
    let contact = ContactService::new(config.email.clone(), Arc::new(provider));
    let state = Arc::new(AppState {
        config: Arc::clone(&config),
        content: Arc::new(content),
        contact,
    });

    // ── Start HTTP server ───────────────────────────────
    let ct = CancellationToken::new();
    let server_ct = ct.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(err) = http::serve(state, server_ct.clone()).await {
            error!(%err, "http server failed");
            server_ct.cancel();
        }
    });

    // ── Wait for shutdown signal ────────────────────────
    tokio::select! {
        () = shutdown_signal() => info!("shutdown signal received"),
        _ = ct.cancelled() => {}
    }
    ct.cancel();

    if let Err(err) = server_handle.await {
        error!(%err, "http server task panicked");
    }
    info!("portfolio-site shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
