use std::sync::Arc;

use iamview_core::{AppError, AppResult};
use iamview_domain::{
    AggregationPolicy, AggregationPolicyPayload, ResourceInstance, Translator,
};
use tracing::{debug, info};

/// Read-only projection of one aggregation group for display.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSummary {
    /// Group id.
    pub aggregation_id: String,
    /// System of the first action.
    pub system_id: String,
    /// System display name of the first action.
    pub system_name: String,
    /// Aggregated resource type id.
    pub resource_type_id: String,
    /// Joined action names.
    pub name: String,
    /// Concatenated action ids.
    pub key: String,
    /// Joined instance names or the localized placeholder.
    pub value: String,
    /// Whether the group comes from a permission template.
    pub is_template: bool,
    /// Whether no instance is selected.
    pub is_empty: bool,
    /// Whether the selection differs from its snapshot.
    pub is_modified: bool,
    /// Whether the group accepts pasted instances.
    pub can_paste: bool,
    /// Whether the group failed validation.
    pub is_error: bool,
    /// Number of selected instances.
    pub instance_count: usize,
    /// Current selection.
    pub instances: Vec<ResourceInstance>,
    /// Selection as it was when the group was built.
    pub instances_backup: Vec<ResourceInstance>,
}

/// Groups built from one request, with the mapping from request positions
/// to the group each position ended up in.
#[derive(Debug, Clone)]
pub struct AssembledAggregations {
    groups: Vec<AggregationPolicy>,
    group_of_request: Vec<usize>,
}

impl AssembledAggregations {
    /// Returns the assembled groups.
    #[must_use]
    pub fn groups(&self) -> &[AggregationPolicy] {
        &self.groups
    }

    /// Returns the assembled groups for mutation.
    pub fn groups_mut(&mut self) -> &mut [AggregationPolicy] {
        &mut self.groups
    }

    /// Consumes the assembly and returns the groups.
    #[must_use]
    pub fn into_groups(self) -> Vec<AggregationPolicy> {
        self.groups
    }

    /// Returns the number of request positions.
    #[must_use]
    pub fn request_len(&self) -> usize {
        self.group_of_request.len()
    }

    /// Maps a request position to its group. A dropped duplicate maps to the
    /// group it repeated.
    pub fn group_index(&self, request_index: usize) -> AppResult<usize> {
        self.group_of_request
            .get(request_index)
            .copied()
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "aggregation at index {request_index} does not exist"
                ))
            })
    }

    /// Maps several request positions to their groups.
    pub fn group_indices(&self, request_indices: &[usize]) -> AppResult<Vec<usize>> {
        request_indices
            .iter()
            .map(|index| self.group_index(*index))
            .collect()
    }

    /// Returns the request positions a group stands for, in request order.
    #[must_use]
    pub fn request_indices_of(&self, group_index: usize) -> Vec<usize> {
        self.group_of_request
            .iter()
            .enumerate()
            .filter(|(_, group)| **group == group_index)
            .map(|(request_index, _)| request_index)
            .collect()
    }
}

/// Application service building and projecting aggregation groups.
#[derive(Clone)]
pub struct AggregationService {
    translator: Arc<dyn Translator>,
}

impl AggregationService {
    /// Creates a new aggregation service.
    #[must_use]
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Builds groups from payloads.
    ///
    /// Every payload must carry at least one action. Missing group ids are
    /// derived from system, resource type and key. A payload whose resource
    /// type and key repeat an earlier group is dropped.
    pub fn assemble(
        &self,
        payloads: Vec<AggregationPolicyPayload>,
    ) -> AppResult<Vec<AggregationPolicy>> {
        Ok(self.assemble_indexed(payloads)?.into_groups())
    }

    /// Builds groups like [`Self::assemble`] and keeps track of which request
    /// positions each group stands for.
    pub fn assemble_indexed(
        &self,
        payloads: Vec<AggregationPolicyPayload>,
    ) -> AppResult<AssembledAggregations> {
        let mut groups: Vec<AggregationPolicy> = Vec::with_capacity(payloads.len());
        let mut group_of_request = Vec::with_capacity(payloads.len());

        for (index, mut payload) in payloads.into_iter().enumerate() {
            if payload
                .aggregation_id
                .as_deref()
                .is_none_or(|value| value.trim().is_empty())
            {
                payload.aggregation_id = Some(derive_aggregation_id(&payload));
            }

            let policy = AggregationPolicy::try_new(payload).map_err(|error| {
                AppError::Validation(format!("aggregation at index {index} is malformed: {error}"))
            })?;

            let duplicate_of = groups.iter().position(|existing| {
                existing
                    .aggregate_resource_type()
                    .same_type(policy.aggregate_resource_type())
                    && existing.key() == policy.key()
            });
            if let Some(kept) = duplicate_of {
                debug!(
                    index,
                    kept,
                    key = %policy.key(),
                    resource_type = policy.aggregate_resource_type().id(),
                    "dropping duplicate aggregation group"
                );
                group_of_request.push(kept);
                continue;
            }

            group_of_request.push(groups.len());
            groups.push(policy);
        }

        Ok(AssembledAggregations {
            groups,
            group_of_request,
        })
    }

    /// Projects a group for display.
    #[must_use]
    pub fn summarize(&self, policy: &AggregationPolicy) -> AggregationSummary {
        AggregationSummary {
            aggregation_id: policy.aggregation_id().to_owned(),
            system_id: policy.system_id().to_owned(),
            system_name: policy.system_name().to_owned(),
            resource_type_id: policy.aggregate_resource_type().id().to_owned(),
            name: policy.name(),
            key: policy.key(),
            value: policy.value(self.translator.as_ref()),
            is_template: policy.is_template(),
            is_empty: policy.is_empty(),
            is_modified: policy.is_modified(),
            can_paste: policy.can_paste(),
            is_error: policy.is_error(),
            instance_count: policy.instances().len(),
            instances: policy.instances().to_vec(),
            instances_backup: policy.instances_backup().to_vec(),
        }
    }

    /// Flags every group with an empty selection and clears the flag on the
    /// rest. Returns the number of flagged groups.
    pub fn validate(&self, groups: &mut [AggregationPolicy]) -> usize {
        let mut flagged = 0;
        for group in groups.iter_mut() {
            let is_error = group.is_empty();
            group.set_error(is_error);
            if is_error {
                flagged += 1;
            }
        }

        flagged
    }

    /// Opens the given groups for paste.
    pub fn mark_paste_targets(
        &self,
        groups: &mut [AggregationPolicy],
        target_indices: &[usize],
    ) -> AppResult<()> {
        for index in target_indices {
            let group = groups.get_mut(*index).ok_or_else(|| {
                AppError::NotFound(format!("aggregation at index {index} does not exist"))
            })?;
            group.set_can_paste(true);
        }

        Ok(())
    }

    /// Copies the selection of the group at `source_index` into every other
    /// group that accepts paste and aggregates the same resource type.
    /// Returns the number of groups updated.
    pub fn paste_into_compatible(
        &self,
        groups: &mut [AggregationPolicy],
        source_index: usize,
    ) -> AppResult<usize> {
        let source = groups.get(source_index).cloned().ok_or_else(|| {
            AppError::NotFound(format!("aggregation at index {source_index} does not exist"))
        })?;

        let mut updated = 0;
        for (index, group) in groups.iter_mut().enumerate() {
            if index == source_index
                || !group.can_paste()
                || !group
                    .aggregate_resource_type()
                    .same_type(source.aggregate_resource_type())
            {
                continue;
            }

            group.paste_from(&source)?;
            updated += 1;
        }

        info!(
            source = %source.key(),
            instance_count = source.instances().len(),
            updated,
            "pasted aggregation instances"
        );

        Ok(updated)
    }
}

fn derive_aggregation_id(payload: &AggregationPolicyPayload) -> String {
    let system_id = payload
        .actions
        .first()
        .map(|grant| grant.detail().system().id())
        .unwrap_or_default();
    let key: String = payload
        .actions
        .iter()
        .map(|grant| grant.id().as_str())
        .collect();

    format!(
        "{system_id}:{}:{key}",
        payload.aggregate_resource_type.id()
    )
}

#[cfg(test)]
mod tests;
