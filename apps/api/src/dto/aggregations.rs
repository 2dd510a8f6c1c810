use iamview_application::AggregationSummary;
use iamview_core::{AppError, NonEmptyString};
use iamview_domain::{
    AggregateResourceType, AggregationPolicyPayload, Grant, GrantDetail, ResourceInstance,
    SystemRef,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Owning system of a grant.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/system-payload.ts"
)]
pub struct SystemPayload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Definition a grant was issued under.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/grant-detail-payload.ts"
)]
pub struct GrantDetailPayload {
    #[serde(default)]
    #[ts(type = "number")]
    pub id: i64,
    #[serde(default)]
    pub system: SystemPayload,
}

/// One action grant.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/grant-payload.ts"
)]
pub struct GrantPayload {
    #[serde(alias = "actionId")]
    pub id: String,
    #[serde(default, alias = "actionName")]
    pub name: String,
    #[serde(default)]
    pub detail: GrantDetailPayload,
}

/// One selected resource instance.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resource-instance-payload.ts"
)]
pub struct ResourceInstancePayload {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Fields the console attaches to an instance, returned unchanged.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

/// Aggregated resource type descriptor.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resource-type-payload.ts"
)]
pub struct ResourceTypePayload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub system_id: String,
    #[serde(default)]
    pub name: String,
}

/// One aggregation group as composed by the permission request UI.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/aggregation-payload.ts"
)]
pub struct AggregationPayload {
    #[serde(default)]
    pub actions: Vec<GrantPayload>,
    #[serde(default)]
    pub aggregate_resource_type: ResourceTypePayload,
    #[serde(default)]
    pub instances: Vec<ResourceInstancePayload>,
    #[serde(default, alias = "aggregationId")]
    pub aggregation_id: Option<String>,
}

/// Incoming payload for aggregation previews.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/aggregation-preview-request.ts"
)]
pub struct AggregationPreviewRequest {
    pub aggregations: Vec<AggregationPayload>,
}

/// Incoming payload for cross-group instance paste.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/aggregation-paste-request.ts"
)]
pub struct AggregationPasteRequest {
    pub aggregations: Vec<AggregationPayload>,
    pub source_index: usize,
    pub target_indices: Vec<usize>,
}

/// API representation of one selected resource instance.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resource-instance-response.ts"
)]
pub struct ResourceInstanceResponse {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

/// API representation of one aggregation group.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/aggregation-summary-response.ts"
)]
pub struct AggregationSummaryResponse {
    /// Request positions this group stands for; more than one when sibling
    /// duplicates were folded into it.
    pub request_indices: Vec<usize>,
    pub aggregation_id: String,
    pub system_id: String,
    pub system_name: String,
    pub resource_type_id: String,
    pub name: String,
    pub key: String,
    pub value: String,
    pub is_aggregate: bool,
    pub is_template: bool,
    pub empty: bool,
    pub is_modified: bool,
    pub can_paste: bool,
    pub is_error: bool,
    pub instance_count: usize,
    pub instances: Vec<ResourceInstanceResponse>,
    pub instances_backup: Vec<ResourceInstanceResponse>,
}

/// API representation of a set of aggregation groups.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/aggregation-list-response.ts"
)]
pub struct AggregationListResponse {
    pub aggregations: Vec<AggregationSummaryResponse>,
    pub error_count: usize,
    pub pasted_count: usize,
}

impl TryFrom<GrantPayload> for Grant {
    type Error = AppError;

    fn try_from(value: GrantPayload) -> Result<Self, Self::Error> {
        let id = NonEmptyString::new(value.id)
            .map_err(|_| AppError::Validation("grant id must not be empty".to_owned()))?;
        Ok(Grant::new(
            id,
            value.name,
            GrantDetail::new(
                value.detail.id,
                SystemRef::new(value.detail.system.id, value.detail.system.name),
            ),
        ))
    }
}

impl From<ResourceInstancePayload> for ResourceInstance {
    fn from(value: ResourceInstancePayload) -> Self {
        ResourceInstance::new(value.id, value.name).with_extra(value.extra)
    }
}

impl From<ResourceTypePayload> for AggregateResourceType {
    fn from(value: ResourceTypePayload) -> Self {
        AggregateResourceType::new(value.id, value.system_id, value.name)
    }
}

impl TryFrom<AggregationPayload> for AggregationPolicyPayload {
    type Error = AppError;

    fn try_from(value: AggregationPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            actions: value
                .actions
                .into_iter()
                .map(Grant::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            aggregate_resource_type: value.aggregate_resource_type.into(),
            instances: value.instances.into_iter().map(ResourceInstance::from).collect(),
            aggregation_id: value.aggregation_id,
        })
    }
}

impl From<&ResourceInstance> for ResourceInstanceResponse {
    fn from(value: &ResourceInstance) -> Self {
        Self {
            id: value.id().to_owned(),
            name: value.name().to_owned(),
            extra: value.extra().clone(),
        }
    }
}

impl AggregationSummaryResponse {
    pub fn from_summary(value: AggregationSummary, request_indices: Vec<usize>) -> Self {
        Self {
            request_indices,
            aggregation_id: value.aggregation_id,
            system_id: value.system_id,
            system_name: value.system_name,
            resource_type_id: value.resource_type_id,
            name: value.name,
            key: value.key,
            value: value.value,
            is_aggregate: true,
            is_template: value.is_template,
            empty: value.is_empty,
            is_modified: value.is_modified,
            can_paste: value.can_paste,
            is_error: value.is_error,
            instance_count: value.instance_count,
            instances: value
                .instances
                .iter()
                .map(ResourceInstanceResponse::from)
                .collect(),
            instances_backup: value
                .instances_backup
                .iter()
                .map(ResourceInstanceResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use iamview_domain::AggregationPolicyPayload;

    use super::AggregationPreviewRequest;

    #[test]
    fn console_field_names_are_accepted() -> Result<(), serde_json::Error> {
        let request: AggregationPreviewRequest = serde_json::from_str(
            r#"{
                "aggregations": [{
                    "aggregationId": "agg-1",
                    "actions": [{
                        "actionId": "execute_script",
                        "actionName": "Execute",
                        "detail": { "id": 12, "system": { "id": "bk_job", "name": "Job" } }
                    }],
                    "aggregate_resource_type": { "id": "script", "system_id": "bk_job", "name": "Script" },
                    "instances": [{ "id": "1", "name": "backup.sh", "path": [["biz", "3"]] }]
                }]
            }"#,
        )?;

        let payload = request.aggregations.into_iter().next().map(AggregationPolicyPayload::try_from);
        let Some(Ok(payload)) = payload else {
            panic!("payload should convert");
        };
        assert_eq!(payload.aggregation_id.as_deref(), Some("agg-1"));
        assert_eq!(payload.actions.len(), 1);
        assert_eq!(payload.actions[0].name(), "Execute");
        assert_eq!(payload.instances[0].name(), "backup.sh");
        assert!(payload.instances[0].extra().contains_key("path"));

        Ok(())
    }

    #[test]
    fn missing_collections_default_to_empty() -> Result<(), serde_json::Error> {
        let request: AggregationPreviewRequest =
            serde_json::from_str(r#"{"aggregations": [{}]}"#)?;

        assert!(request.aggregations[0].actions.is_empty());
        assert!(request.aggregations[0].instances.is_empty());
        assert!(request.aggregations[0].aggregation_id.is_none());

        Ok(())
    }
}
