use peez_lobby::config::{Config, CredentialsMode};
use peez_lobby::server::telemetry::{init_telemetry, shutdown_telemetry};
use peez_lobby::server::{create_router, AppState, PageData, StatusPage};
use peez_lobby::store::{AmbientCredentials, FirebaseStore, StaticToken, StoreError, TokenSource};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_telemetry(&config.service)?;

    let store = database_credentials(&config)
        .await
        .and_then(|credentials| {
            FirebaseStore::new(config.project_id.clone(), &config.database_url, credentials)
        })
        .inspect_err(|e| error!(error = %e, "Failed to initialize realtime database client"))?;

    let status_page = StatusPage::load(&config.template_path, PageData::from(&config));
    let state = AppState::new(Arc::new(store), status_page);
    let app = create_router(state, &config.assets_dir);

    let listener = TcpListener::bind(config.listen_addr()).await?;
    info!("Lobby server started and is listening for HTTP requests on $PORT");
    info!(port = config.port, "Listening on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    shutdown_telemetry();
    Ok(())
}

async fn database_credentials(
    config: &Config,
) -> Result<Option<Arc<dyn TokenSource>>, StoreError> {
    if let Some(token) = &config.auth_token {
        info!("Using static access token for the realtime database");
        let source: Arc<dyn TokenSource> = Arc::new(StaticToken::new(token.clone()));
        return Ok(Some(source));
    }
    match config.credentials {
        CredentialsMode::Ambient => {
            let source: Arc<dyn TokenSource> = Arc::new(AmbientCredentials::discover().await?);
            Ok(Some(source))
        }
        CredentialsMode::Anonymous => {
            warn!("Realtime database requests are sent without credentials");
            Ok(None)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
