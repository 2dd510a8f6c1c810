use axum::Json;
use axum::extract::State;
use iamview_application::AssembledAggregations;
use iamview_domain::AggregationPolicyPayload;

use crate::dto::{
    AggregationListResponse, AggregationPasteRequest, AggregationPayload,
    AggregationPreviewRequest, AggregationSummaryResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn preview_aggregations_handler(
    State(state): State<AppState>,
    Json(payload): Json<AggregationPreviewRequest>,
) -> ApiResult<Json<AggregationListResponse>> {
    let mut assembled = assemble(&state, payload.aggregations)?;
    let error_count = state
        .aggregation_service
        .validate(assembled.groups_mut());

    Ok(Json(list_response(&state, &assembled, error_count, 0)))
}

/// Indices in the request body address request positions, including
/// duplicates that assembly folds into an earlier group.
pub async fn paste_aggregations_handler(
    State(state): State<AppState>,
    Json(payload): Json<AggregationPasteRequest>,
) -> ApiResult<Json<AggregationListResponse>> {
    let mut assembled = assemble(&state, payload.aggregations)?;
    let source_index = assembled.group_index(payload.source_index)?;
    let target_indices = assembled.group_indices(&payload.target_indices)?;

    state
        .aggregation_service
        .mark_paste_targets(assembled.groups_mut(), &target_indices)?;
    let pasted_count = state
        .aggregation_service
        .paste_into_compatible(assembled.groups_mut(), source_index)?;
    let error_count = state
        .aggregation_service
        .validate(assembled.groups_mut());

    Ok(Json(list_response(
        &state,
        &assembled,
        error_count,
        pasted_count,
    )))
}

fn assemble(
    state: &AppState,
    aggregations: Vec<AggregationPayload>,
) -> ApiResult<AssembledAggregations> {
    let payloads = aggregations
        .into_iter()
        .map(AggregationPolicyPayload::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(state.aggregation_service.assemble_indexed(payloads)?)
}

fn list_response(
    state: &AppState,
    assembled: &AssembledAggregations,
    error_count: usize,
    pasted_count: usize,
) -> AggregationListResponse {
    AggregationListResponse {
        aggregations: assembled
            .groups()
            .iter()
            .enumerate()
            .map(|(index, group)| {
                AggregationSummaryResponse::from_summary(
                    state.aggregation_service.summarize(group),
                    assembled.request_indices_of(index),
                )
            })
            .collect(),
        error_count,
        pasted_count,
    }
}
