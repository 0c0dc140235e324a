use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use sepatu_wash_api as api;

use api::store::{MemoryStore, RestStore, TicketStore, UnconfiguredStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Select the storage backend. Missing REST credentials are a warning,
    // not a startup failure: requests fail at the first storage call.
    let store: Arc<dyn TicketStore> = match cfg.storage_backend.as_str() {
        "memory" => {
            info!("Using in-memory ticket store; data is not persisted");
            Arc::new(MemoryStore::new())
        }
        _ => match cfg.rest_credentials() {
            Some((url, key)) => Arc::new(RestStore::new(url, key)?),
            None => {
                warn!("Missing APP__STORAGE_URL or APP__STORAGE_SERVICE_KEY; storage calls will fail");
                Arc::new(UnconfiguredStore)
            }
        },
    };

    let app = api::app(api::AppState { store })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port).parse()?;
    info!("Sepatu Wash API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
