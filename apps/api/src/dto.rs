use serde::Serialize;
use ts_rs::TS;

mod aggregations;
mod navigation;

pub use aggregations::{
    AggregationListResponse, AggregationPasteRequest, AggregationPayload,
    AggregationPreviewRequest, AggregationSummaryResponse, GrantDetailPayload, GrantPayload,
    ResourceInstancePayload, ResourceInstanceResponse, ResourceTypePayload, SystemPayload,
};
pub use navigation::{
    NavigationQuery, NavigationResponse, RouteResponse, RouteVisibilityResponse,
};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}
