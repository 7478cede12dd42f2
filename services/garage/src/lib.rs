//! HTTP surface of the garage tracker: the car registry, per-car service
//! journals and the cached car catalog behind a single axum router.

pub mod api_error;
pub mod config;
mod kv_exec;
pub mod routes_cars;
pub mod routes_catalog;
pub mod routes_services;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::state::SharedState;

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/cars", get(routes_cars::list_cars).post(routes_cars::post_car))
        .route("/cars/:id", get(routes_cars::get_car))
        .route(
            "/cars/:id/services",
            get(routes_services::get_history).post(routes_services::post_service),
        )
        .route("/cars/:id/services/:service_id", get(routes_services::get_service))
        .route("/services/works-presets", get(routes_services::get_works_presets))
        .route("/catalog", get(routes_catalog::get_catalog_info))
        .route("/catalog/brands", get(routes_catalog::get_brands))
        .route("/catalog/brands/popular", get(routes_catalog::get_popular_brands))
        .route("/catalog/brands/:id/models", get(routes_catalog::get_models))
        .route("/catalog/cache/clear", post(routes_catalog::post_clear_cache))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
