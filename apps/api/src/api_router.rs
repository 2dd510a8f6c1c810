use axum::Router;
use axum::routing::{get, post};
use iamview_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/navigation",
            get(handlers::navigation::navigation_handler),
        )
        .route(
            "/api/navigation/{route_name}",
            get(handlers::navigation::route_visibility_handler),
        )
        .route(
            "/api/aggregations/preview",
            post(handlers::aggregations::preview_aggregations_handler),
        )
        .route(
            "/api/aggregations/paste",
            post(handlers::aggregations::paste_aggregations_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
