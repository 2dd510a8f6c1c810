use iamview_application::NavigationResolution;
use iamview_domain::{BackTarget, FallbackPolicy, RouteName, Translator};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query string of navigation lookups.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/navigation-query.ts"
)]
pub struct NavigationQuery {
    pub role: Option<String>,
}

/// API representation of one visible route.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/route-response.ts"
)]
pub struct RouteResponse {
    pub name: String,
    pub path: String,
    pub area: String,
    /// Route token, `"-1"` for history back, absent without a back button.
    pub back_route: Option<String>,
    pub title: Option<String>,
}

/// Routes the menu may mount for a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/navigation-response.ts"
)]
pub struct NavigationResponse {
    pub role: String,
    pub used_fallback: bool,
    pub fallback_policy: String,
    pub routes: Vec<RouteResponse>,
}

/// Visibility of a single route for a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/route-visibility-response.ts"
)]
pub struct RouteVisibilityResponse {
    pub route: String,
    pub role: String,
    pub visible: bool,
}

impl RouteResponse {
    pub fn from_route(route: RouteName, translator: &dyn Translator) -> Self {
        let meta = route.meta();
        Self {
            name: route.as_str().to_owned(),
            path: meta.path().to_owned(),
            area: meta.area().as_str().to_owned(),
            back_route: meta.back().map(|back| match back {
                BackTarget::Route(target) => target.as_str().to_owned(),
                BackTarget::History => "-1".to_owned(),
            }),
            title: meta.header_title().map(|title| title.translate(translator)),
        }
    }
}

impl NavigationResponse {
    pub fn from_resolution(
        resolution: NavigationResolution,
        fallback: FallbackPolicy,
        translator: &dyn Translator,
    ) -> Self {
        Self {
            role: resolution.role.as_str().to_owned(),
            used_fallback: resolution.used_fallback,
            fallback_policy: fallback.as_str().to_owned(),
            routes: resolution
                .routes
                .iter()
                .map(|route| RouteResponse::from_route(route, translator))
                .collect(),
        }
    }
}
