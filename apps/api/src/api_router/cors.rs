use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use iamview_core::AppError;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Builds the CORS layer for the console origins. `frontend_url` may list
/// several origins separated by commas.
pub(super) fn build_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(parse_origins(frontend_url)?))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]))
}

fn parse_origins(frontend_url: &str) -> Result<Vec<HeaderValue>, AppError> {
    let origins = frontend_url
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Err(AppError::Validation(
                    "FRONTEND_URL must list explicit origins".to_owned(),
                ));
            }

            HeaderValue::from_str(origin.trim_end_matches('/')).map_err(|error| {
                AppError::Validation(format!("invalid FRONTEND_URL origin '{origin}': {error}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(AppError::Validation(
            "FRONTEND_URL must name at least one origin".to_owned(),
        ));
    }

    Ok(origins)
}
