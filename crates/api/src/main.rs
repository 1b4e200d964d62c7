use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use greenlight_api::background::token_cleanup;
use greenlight_api::config::ServerConfig;
use greenlight_api::mailer::Mailer;
use greenlight_api::router::build_app_router;
use greenlight_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // JSON lines by default; LOG_FORMAT=pretty for local development.
    let pretty = std::env::var("LOG_FORMAT").is_ok_and(|f| f == "pretty");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenlight_api=debug,tower_http=debug".into()),
        )
        .with(pretty.then(|| tracing_subscriber::fmt::layer()))
        .with((!pretty).then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid configuration");
    tracing::info!(
        host = %config.host,
        port = config.port,
        env = %config.env,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = greenlight_db::create_pool(&config.db)
        .await
        .expect("Failed to connect to database");
    tracing::info!(
        max_open_conns = config.db.max_open_conns,
        "Database connection pool created"
    );

    greenlight_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    greenlight_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Mailer ---
    let mailer = match &config.smtp {
        Some(smtp) => {
            let mailer = Mailer::new(smtp).expect("Invalid SMTP configuration");
            tracing::info!(host = %smtp.host, port = smtp.port, "SMTP mailer configured");
            Some(Arc::new(mailer))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, outgoing email disabled");
            None
        }
    };

    // --- Background jobs ---
    let background = TaskTracker::new();
    let cleanup_cancel = CancellationToken::new();
    let cleanup_handle = tokio::spawn(token_cleanup::run(pool.clone(), cleanup_cancel.clone()));

    // --- App state & router ---
    let addr = SocketAddr::new(config.host, config.port);
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer,
        background: background.clone(),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    tracing::info!(%addr, env = %config.env, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cleanup_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), cleanup_handle).await;

    background.close();
    tracing::info!(pending = background.len(), "Waiting for background tasks");
    if tokio::time::timeout(shutdown_timeout, background.wait())
        .await
        .is_err()
    {
        tracing::warn!(
            timeout_secs = shutdown_timeout.as_secs(),
            "Background tasks still running at shutdown deadline"
        );
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
