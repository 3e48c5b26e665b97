//! dpfa-web - Fan archive catalog service
//!
//! Serves the read-only catalog API and website from a SQLite snapshot of
//! the archive database.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dpfa_common::config::{load_settings, ConfigLayer};
use dpfa_common::db::{connect_readonly, SqliteRowSource};
use dpfa_web::contact::ContactNotifier;
use dpfa_web::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for dpfa-web
#[derive(Parser, Debug)]
#[command(name = "dpfa-web")]
#[command(about = "Fan archive catalog API and website")]
#[command(version)]
struct Args {
    /// TOML config file (default: <config_dir>/dpfa/config.toml if present)
    #[arg(short, long, env = "DPFA_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog database file
    #[arg(short, long, env = "DPFA_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "DPFA_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "DPFA_PORT")]
    port: Option<u16>,

    /// Public site origin used in the sitemap and robots.txt
    #[arg(long, env = "DPFA_BASE_URL")]
    base_url: Option<String>,

    /// Webhook receiving contact form submissions
    #[arg(long, env = "DPFA_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "dpfa_web=info,dpfa_common=info,tower_http=info", env = "DPFA_LOG")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            database_path: self.database.clone(),
            bind_addr: self.bind.clone(),
            port: self.port,
            base_url: self.base_url.clone(),
            webhook_url: self.webhook_url.clone(),
            webhook_timeout_ms: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting dpfa-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let settings = load_settings(&args.overrides(), args.config.as_deref())
        .context("Failed to load configuration")?;
    info!("Database path: {}", settings.database_path.display());

    let pool = connect_readonly(&settings.database_path)
        .await
        .context("Failed to open catalog database")?;
    info!("Connected to database (read-only)");

    let notifier = ContactNotifier::new(settings.webhook_url.clone(), settings.webhook_timeout)
        .context("Failed to build webhook client")?;
    if !notifier.is_enabled() {
        info!("Contact webhook not configured; submissions will not be forwarded");
    }

    let state = AppState::new(
        Arc::new(SqliteRowSource::new(pool)),
        notifier,
        settings.base_url.clone(),
    );
    let app = build_router(state);

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("dpfa-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
