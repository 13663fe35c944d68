//! # taxon-api
//!
//! HTTP surface of the taxon engine: namespace pages under the configured
//! base path, location (de)indexing, and fragment rendering.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::http::{header, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

use handlers::{health_check, locations, namespace, render};

/// Build the application router.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let base = state.registry.base_path().to_string();

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/v1/locations",
            put(locations::index_location).delete(locations::deindex_location),
        )
        .route("/api/v1/render", post(render::render));

    if !base.is_empty() {
        app = app.route(&base, get(namespace::namespace_page));
    }
    app = app
        .route(&format!("{}/", base), get(namespace::namespace_page))
        .route(&format!("{}/*path", base), get(namespace::namespace_page));

    app.layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(std::time::Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .with_state(state)
}
