//! TaxiFare HTTP Server
//!
//! Main entry point for the HTTP server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use application::{
    FarePredictionPort, FareService, GeocodingPort, HealthService, LocationResolver,
    SessionService, SessionStorePort,
};
use infrastructure::{
    AppConfig, FarePredictionAdapter, GeocodingAdapter, MokaSessionStore, init_telemetry,
};
use presentation_http::{AppState, PageRenderer, apply_middleware, create_router};
use tokio::{net::TcpListener, signal, sync::watch};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let _telemetry = init_telemetry(
        &config
            .telemetry
            .to_telemetry_config(config.server.json_logs()),
    )?;

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!("🚕 TaxiFare v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        geocoding = %config.geocoding.base_url,
        prediction = %config.prediction.base_url,
        "Configuration loaded"
    );
    if !config.geocoding.has_api_key() {
        warn!("Geocoding API key not configured; address search and suggestions are disabled");
    }

    let geocoding: Arc<dyn GeocodingPort> = Arc::new(
        GeocodingAdapter::new(config.geocoding.to_geocoding_config())
            .map_err(|e| anyhow::anyhow!("Failed to initialize geocoding: {e}"))?,
    );
    let prediction: Arc<dyn FarePredictionPort> = Arc::new(
        FarePredictionAdapter::new(config.prediction.to_prediction_config())
            .map_err(|e| anyhow::anyhow!("Failed to initialize fare prediction: {e}"))?,
    );
    let sessions: Arc<dyn SessionStorePort> = Arc::new(MokaSessionStore::with_config(
        config.session.to_store_config(),
    ));

    let state = AppState {
        resolver: Arc::new(
            LocationResolver::new(Arc::clone(&geocoding))
                .with_config(config.geocoding.to_resolver_config()),
        ),
        fare_service: Arc::new(FareService::new(Arc::clone(&prediction))),
        session_service: Arc::new(SessionService::new(sessions)),
        health_service: Arc::new(
            HealthService::new(geocoding, prediction).with_config(config.health.to_health_config()),
        ),
        pages: Arc::new(PageRenderer::new()?),
        cookie_name: Arc::from(config.session.cookie_name.as_str()),
    };

    let app = apply_middleware(create_router(state), &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("🚀 Server listening on http://{}", addr);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(stopped(shutdown_rx.clone()))
        .into_future();
    let drain_limit = config.server.shutdown_timeout_secs.map(Duration::from_secs);

    tokio::select! {
        result = server => result?,
        () = drain_deadline(shutdown_rx, drain_limit) => {
            warn!("Connections still open after {:?}, exiting anyway", drain_limit);
        }
    }

    info!("👋 Server shutdown complete");
    Ok(())
}

async fn stopped(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

/// Resolves once shutdown has begun and `limit` has passed; never without a limit
async fn drain_deadline(rx: watch::Receiver<bool>, limit: Option<Duration>) {
    stopped(rx).await;
    match limit {
        Some(limit) => {
            info!("⏳ Waiting up to {:?} for connections to close...", limit);
            tokio::time::sleep(limit).await;
        },
        None => std::future::pending::<()>().await,
    }
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
