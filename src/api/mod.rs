pub mod earthquakes;
pub mod health;

use crate::gateway::QueryGateway;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub gateway: QueryGateway,
}

impl AppState {
    pub fn new(gateway: QueryGateway) -> Self {
        Self { gateway }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(earthquakes::usage))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/list", get(earthquakes::list_all))
        .route("/minmag/:threshold", get(earthquakes::list_by_min_magnitude))
        .route("/new", post(earthquakes::insert))
        .route("/delete/:id", delete(earthquakes::delete_by_id))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
