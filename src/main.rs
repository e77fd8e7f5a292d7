// Main entry point for the sw_admin service

use anyhow::{bail, Context};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use sw_admin::api::{create_router, host_routes, AppState};
use sw_admin::auth::auth_middleware::{ApiKeyAuthorizer, Authorizer};
use sw_admin::config::Config;
use sw_admin::state::memory_store::MemoryCacheStore;
use sw_admin::state::redis_store::RedisCacheStore;
use sw_admin::state::CacheStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load and validate configuration first (before any logging)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // 2. Initialize tracing subscriber with config values
    init_tracing(&config)?;

    info!(
        bind_address = %config.bind_address,
        port = config.port,
        sw_admin_enabled = config.feature.enabled,
        reseller_prefix = ?config.feature.default_reseller_prefix().ok(),
        "Configuration loaded"
    );

    // 3. Shared cache client, built once
    let cache = connect_cache(&config).await?;
    info!("Cache store initialized");

    // 4. Authorization collaborator
    if config.admin_api_key_hashes.is_empty() {
        warn!("ADMIN_API_KEY_HASHES is empty; every admin request will be denied");
    }
    let authorizer: Arc<dyn Authorizer> =
        Arc::new(ApiKeyAuthorizer::new(config.admin_api_key_hashes.clone()));

    // 5. Router
    let addr = format!("{}:{}", config.bind_address, config.port);
    let app_state = AppState::new(config, cache).context("Failed to build application state")?;
    let router = create_router(app_state, host_routes(), Some(authorizer));

    // 6. Start HTTP server
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!(error = %e, addr = %addr, "Failed to bind to address");
        e
    })?;

    info!(addr = %addr, "Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Pick the backend from the endpoint schemes; mixing schemes is rejected
async fn connect_cache(config: &Config) -> anyhow::Result<Arc<dyn CacheStore>> {
    let endpoints = &config.feature.cache_endpoints;
    let memory = endpoints
        .iter()
        .filter(|e| e.starts_with("memory://"))
        .count();

    if memory == endpoints.len() {
        warn!("Using in-process memory cache; invalidations only affect this process");
        return Ok(Arc::new(MemoryCacheStore::new()));
    }
    if memory > 0 {
        bail!("CACHE_ENDPOINTS mixes memory:// and redis endpoints");
    }

    let store = RedisCacheStore::connect(endpoints, config.cache_connection_timeout())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to initialize cache store");
            e
        })?;
    Ok(Arc::new(store))
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
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
