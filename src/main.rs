// Main entry point for the accounts content server

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use accounts_server::api::{create_router, AppState};
use accounts_server::auth::HttpAuthClient;
use accounts_server::config::Config;
use accounts_server::metrics::amplitude::AmplitudeLogger;
use accounts_server::metrics::collector::MetricsCollector;
use accounts_server::metrics::flow_event::StdoutFlowLogger;
use accounts_server::settings::broker::BaseBroker;
use accounts_server::state::notifier::ChannelNotifier;
use accounts_server::state::user_store::InMemoryUserStore;
use accounts_server::views::TemplateRenderer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load and validate configuration first (before any logging)
    let config = Config::from_env().context("configuration error")?;

    // 2. Initialize tracing subscriber with config values
    init_tracing(&config)?;

    info!("Starting accounts content server");

    info!(
        bind_address = %config.bind_address,
        port = config.port,
        "Configuration loaded"
    );

    // 3. Initialize auth-server client
    let auth_client = Arc::new(
        HttpAuthClient::new(&config.auth_server_url, config.auth_server_timeout_secs)
            .context("failed to create auth client")?,
    );

    info!(auth_server = %config.auth_server_url, "Auth client initialized");

    // 4. Create AppState
    let app_state = AppState {
        amplitude: Arc::new(AmplitudeLogger::new()),
        flow_logger: Arc::new(StdoutFlowLogger::new()),
        renderer: Arc::new(TemplateRenderer::new()),
        auth_client,
        user_store: Arc::new(InMemoryUserStore::new()),
        broker: Arc::new(BaseBroker::new()),
        metrics: Arc::new(MetricsCollector::new()),
        notifier: Arc::new(ChannelNotifier::default()),
        config: Arc::new(config.clone()),
    };

    // 5. Create router
    let router = create_router(&app_state).with_state(app_state);

    info!("Router created");

    // 6. Start HTTP server
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    info!(addr = %addr, "Server listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing subscriber based on configuration
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_env_filter(filter);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            info!("SIGTERM received, starting graceful shutdown");
        },
    }
}
