//! iamview API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use iamview_application::NavigationService;
use iamview_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let translator = Arc::new(config.load_translator()?);
    let navigation_service = NavigationService::new(config.navigation_fallback);
    info!(
        fallback = config.navigation_fallback.as_str(),
        "navigation fallback policy configured"
    );

    let app_state = AppState::new(navigation_service, translator);
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "iamview-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
