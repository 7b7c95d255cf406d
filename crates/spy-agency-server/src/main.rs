// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use spy_agency_server::{
    build_router, ApiConfig, AppState, BreedCache, BreedCatalogConfig, TheCatApiCatalog,
};
use spy_agency_store::{AgencyStore, StoreConfig};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

fn env_list(name: &str, default: &[String]) -> Vec<String> {
    match env::var(name) {
        Ok(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect(),
        Err(_) => default.to_vec(),
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                error!("failed to register unix signal handlers; falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("AGENCY_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();
    let bind_addr = env::var("AGENCY_BIND").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let db_path = PathBuf::from(
        env::var("AGENCY_DB_PATH").unwrap_or_else(|_| "spy_cat_agency.sqlite".to_string()),
    );

    let api_defaults = ApiConfig::default();
    let api = ApiConfig {
        max_body_bytes: env_usize("AGENCY_MAX_BODY_BYTES", api_defaults.max_body_bytes),
        request_timeout: env_duration_ms("AGENCY_REQUEST_TIMEOUT_MS", 10_000),
        cors_allowed_origins: env_list(
            "AGENCY_CORS_ALLOWED_ORIGINS",
            &api_defaults.cors_allowed_origins,
        ),
        enable_audit_log: env_bool("AGENCY_ENABLE_AUDIT_LOG", api_defaults.enable_audit_log),
    };

    let catalog_defaults = BreedCatalogConfig::default();
    let catalog = BreedCatalogConfig {
        url: env::var("AGENCY_BREED_CATALOG_URL").unwrap_or(catalog_defaults.url),
        cache_ttl: Duration::from_secs(env_u64(
            "AGENCY_BREED_CACHE_TTL_SECS",
            catalog_defaults.cache_ttl.as_secs(),
        )),
        fetch_timeout: env_duration_ms("AGENCY_BREED_FETCH_TIMEOUT_MS", 10_000),
    };

    let store_cfg = StoreConfig {
        busy_timeout: env_duration_ms("AGENCY_SQLITE_BUSY_TIMEOUT_MS", 2_000),
    };
    let store = AgencyStore::open(&db_path, store_cfg)
        .map_err(|e| format!("failed to open store {}: {e}", db_path.display()))?;

    let backend = TheCatApiCatalog::new(catalog.url.clone(), catalog.fetch_timeout);
    let breeds = Arc::new(BreedCache::new(Arc::new(backend), catalog.cache_ttl));
    let state = AppState::with_config(store, breeds, api);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!(
        bind = %bind_addr,
        db_path = %db_path.display(),
        breed_catalog = %catalog.url,
        "spy-agency-server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            wait_for_shutdown_signal().await;
            info!("shutdown signal received, draining connections");
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
