use axum::Json;
use axum::extract::{Path, Query, State};
use iamview_core::AppError;
use iamview_domain::{Role, RouteName};

use crate::dto::{NavigationQuery, NavigationResponse, RouteVisibilityResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn navigation_handler(
    State(state): State<AppState>,
    Query(query): Query<NavigationQuery>,
) -> Json<NavigationResponse> {
    let resolution = state.navigation_service.resolve(query.role.as_deref());

    Json(NavigationResponse::from_resolution(
        resolution,
        state.navigation_service.fallback(),
        state.translator.as_ref(),
    ))
}

pub async fn route_visibility_handler(
    State(state): State<AppState>,
    Path(route_name): Path<String>,
    Query(query): Query<NavigationQuery>,
) -> ApiResult<Json<RouteVisibilityResponse>> {
    let route = RouteName::from_transport(route_name.as_str())
        .map_err(|_| AppError::NotFound(format!("route '{route_name}' does not exist")))?;
    let role_tag = query.role.as_deref();

    Ok(Json(RouteVisibilityResponse {
        route: route.as_str().to_owned(),
        role: Role::classify(role_tag).as_str().to_owned(),
        visible: state.navigation_service.is_route_visible(role_tag, route),
    }))
}
