//! Workflow Audit server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use workflow_audit::adapters::http::{app, AuditAppState};
use workflow_audit::adapters::InMemoryRateLimiter;
use workflow_audit::config::{AppConfig, ServerConfig};

/// How often expired rate limit windows are dropped.
const RATE_LIMIT_PURGE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        ai_configured = config.ai.has_openai(),
        email_configured = config.email.api_key().is_some(),
        "Starting workflow audit service"
    );

    let limiter = InMemoryRateLimiter::new(config.rate_limit.clone());
    spawn_rate_limit_purge(limiter.clone());

    let state = AuditAppState::from_config(&config);
    let router = app(state, Arc::new(limiter), &config.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, compact human-readable logs elsewhere.
/// `RUST_LOG` overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}

fn spawn_rate_limit_purge(limiter: InMemoryRateLimiter) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = limiter.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Purged expired rate limit windows");
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down gracefully"),
    }
}
