// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use spy_agency_store::AgencyStore;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod breeds;
mod config;
mod http;
mod middleware;

pub use breeds::{
    BreedCache, BreedCatalogBackend, CatalogError, FakeBreedCatalog, TheCatApiCatalog,
    DEFAULT_BREED_CATALOG_URL,
};
pub use config::{ApiConfig, BreedCatalogConfig};

pub const CRATE_NAME: &str = "spy-agency-server";

#[derive(Clone)]
pub struct AppState {
    pub store: AgencyStore,
    pub breeds: Arc<BreedCache>,
    pub api: ApiConfig,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: AgencyStore, breeds: Arc<BreedCache>) -> Self {
        Self::with_config(store, breeds, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: AgencyStore, breeds: Arc<BreedCache>, api: ApiConfig) -> Self {
        Self {
            store,
            breeds,
            api,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::landing_handler))
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/openapi.json", get(http::handlers::openapi_handler))
        .route(
            "/spy_cats",
            get(http::cats::list_spy_cats_handler).post(http::cats::create_spy_cat_handler),
        )
        .route(
            "/spy_cats/:cat_id",
            get(http::cats::get_spy_cat_handler).delete(http::cats::delete_spy_cat_handler),
        )
        .route(
            "/spy_cats/:cat_id/salary",
            put(http::cats::update_salary_handler),
        )
        .route(
            "/missions",
            get(http::missions::list_missions_handler)
                .post(http::missions::create_mission_handler),
        )
        .route(
            "/missions/:mission_id",
            get(http::missions::get_mission_handler)
                .delete(http::missions::delete_mission_handler),
        )
        .route(
            "/missions/:mission_id/targets",
            put(http::missions::update_targets_handler),
        )
        .route(
            "/missions/:mission_id/assign",
            put(http::missions::assign_cat_handler),
        )
        .route(
            "/missions/mark_target_complete/:target_id",
            post(http::missions::complete_target_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::timeout::timeout_middleware,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::cors::cors_middleware,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::audit::audit_middleware,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
