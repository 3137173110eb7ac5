use std::{net::SocketAddr, sync::Arc};

use tokio::signal;
use tracing::{info, warn};

use supply_room_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    let pool = api::db::establish_connection_from_app_config(&cfg).await?;
    if cfg.auto_migrate {
        api::db::run_migrations(&pool).await?;
    }

    let db = Arc::new(pool);
    let services = api::handlers::AppServices::new(db.clone(), cfg.store_op_timeout());
    let state = api::AppState {
        db: db.clone(),
        config: cfg.clone(),
        services,
    };

    let app = api::app(state);

    let addr = SocketAddr::new(cfg.host.parse()?, cfg.port);
    info!("supply-room-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Router and services are gone once serve returns; reclaim the pool and
    // release it cleanly.
    match Arc::into_inner(db) {
        Some(pool) => api::db::close_pool(pool).await?,
        None => warn!("store pool still referenced at shutdown; skipping close"),
    }

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
