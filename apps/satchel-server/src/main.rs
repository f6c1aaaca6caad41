use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{info, warn};

use satchel_api::{build_app, AppState};
use satchel_core::{AuthConfig, AuthService, CredentialsProvider, StaticCredentials};
use satchel_infrastructure::{create_pool, SqliteSessionRepository, SqliteUserRepository};
use satchel_shared::{config::AppConfig, telemetry};

mod prompt;

use prompt::TerminalPrompt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env included)
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    telemetry::init_telemetry(&config.telemetry)?;
    info!("{} starting ({})", config.app.name, config.app.env);

    // Connect to database and apply migrations
    let pool = create_pool(&config.database).await?;
    info!("Database ready");

    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let sessions = Arc::new(SqliteSessionRepository::new(pool.clone()));
    let auth = Arc::new(AuthService::new(
        users,
        sessions,
        AuthConfig::from(&config.auth),
    ));

    // Initial admin, before any traffic is accepted
    let provider: Box<dyn CredentialsProvider> = match config.bootstrap.seed() {
        Some((username, password)) => Box::new(StaticCredentials::new(username, password)),
        None => Box::new(TerminalPrompt),
    };
    if let Some(admin) = auth.bootstrap(provider.as_ref()).await? {
        info!("Created initial user. Id: {}; Name: {}", admin.id, admin.username);
    }

    let cleanup = auth.spawn_session_cleanup();
    info!("Services are ready");

    let state = AppState::new(auth, config.auth.cookie_name.clone());
    let app = build_app(state).into_router();

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = stop_rx.await;
        })
        .into_future();
    let mut server = std::pin::pin!(server);
    let grace = Duration::from_secs(config.server.shutdown_grace_secs);

    tokio::select! {
        result = &mut server => result?,
        _ = shutdown_signal() => {
            info!("Shutdown signal received, draining connections for up to {:?}", grace);
            let _ = stop_tx.send(());
            match tokio::time::timeout(grace, server).await {
                Ok(result) => result?,
                Err(_) => warn!("Grace period elapsed, dropping in-flight requests"),
            }
        }
    }

    cleanup.stop().await;
    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
