mod api;
mod config;
mod logging;
mod range;
mod state;
mod utils;

use std::env;

use api::api_router;
use config::{
    apply_env_overrides, config_path_from_env, load_or_create_config, resolve_dir,
};
use library::{Library, TracingSink};
use logging::init_tracing;
use state::AppState;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path_from_env();
    let (config, created) = load_or_create_config(&config_path)?;
    let config = apply_env_overrides(config, |key| env::var(key).ok())?;

    let log_dir = resolve_dir(&config_path, &config.log_dir);
    init_tracing(log_dir.as_deref())?;

    if created {
        info!("Created default config at {:?}", config_path);
    } else {
        info!("Loaded config from {:?}", config_path);
    }
    if let Some(log_dir) = &log_dir {
        info!("Writing logs to {}", log_dir.display());
    }

    let source = resolve_dir(&config_path, &config.source_dir)
        .ok_or("source directory not configured; set source_dir or LYREBOX_SOURCE")?;

    // The index is complete before the listener binds; handlers only read it.
    let library = Library::build(&source, &TracingSink)?;
    let stats = library.stats();
    info!(
        "Library ready: {} identifiers, {} resources",
        stats.identifiers, stats.resources
    );

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(library, config);
    let app = api_router(state)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {}", bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = match signal(SignalKind::terminate()) {
            Ok(signal) => signal,
            Err(err) => {
                warn!("Failed to install terminate signal handler: {}", err);
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", err);
        }
    }

    info!("Shutdown signal received.");
}
