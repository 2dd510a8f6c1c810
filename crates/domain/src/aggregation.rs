//! Aggregation of same-definition grants into one editable unit.
//!
//! Every projection (`is_template`, `is_empty`, `value`, `name`, `key`) is
//! computed from the live `actions` and `instances` on each call.

use iamview_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::grant::{AggregateResourceType, Grant, GrantDetail, ResourceInstance};
use crate::translation::{PLEASE_SELECT, Translator};

const VALUE_SEPARATOR: &str = "；";
const NAME_SEPARATOR: &str = "，";

/// Raw construction payload, typically deserialized from an API response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationPolicyPayload {
    /// Grants collapsed into the group.
    #[serde(default)]
    pub actions: Vec<Grant>,
    /// Resource type the instances belong to.
    #[serde(default)]
    pub aggregate_resource_type: AggregateResourceType,
    /// Initially selected instances.
    #[serde(default)]
    pub instances: Vec<ResourceInstance>,
    /// Externally assigned group id.
    #[serde(default, alias = "aggregationId")]
    pub aggregation_id: Option<String>,
}

/// Group of grants sharing one display definition.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationPolicy {
    actions: Vec<Grant>,
    aggregate_resource_type: AggregateResourceType,
    instances: Vec<ResourceInstance>,
    instances_backup: Vec<ResourceInstance>,
    system_id: String,
    system_name: String,
    detail: Option<GrantDetail>,
    aggregation_id: String,
    can_paste: bool,
    is_error: bool,
}

impl AggregationPolicy {
    /// Builds a group from a payload.
    ///
    /// An empty action list is accepted; `system_id` and `system_name` are
    /// then empty strings and `detail` is `None`. Use [`Self::try_new`] when
    /// the system is required.
    #[must_use]
    pub fn new(payload: AggregationPolicyPayload) -> Self {
        let AggregationPolicyPayload {
            actions,
            aggregate_resource_type,
            instances,
            aggregation_id,
        } = payload;

        let detail = actions.first().map(|grant| grant.detail().clone());
        let (system_id, system_name) = detail
            .as_ref()
            .map(|detail| {
                (
                    detail.system().id().to_owned(),
                    detail.system().name().to_owned(),
                )
            })
            .unwrap_or_default();
        let instances_backup = instances.clone();

        Self {
            actions,
            aggregate_resource_type,
            instances,
            instances_backup,
            system_id,
            system_name,
            detail,
            aggregation_id: aggregation_id.unwrap_or_default(),
            can_paste: false,
            is_error: false,
        }
    }

    /// Builds a group, failing when the payload carries no action.
    pub fn try_new(payload: AggregationPolicyPayload) -> AppResult<Self> {
        if payload.actions.is_empty() {
            return Err(AppError::Validation(
                "aggregation policy requires at least one action".to_owned(),
            ));
        }

        Ok(Self::new(payload))
    }

    /// Returns the grants collapsed into the group.
    #[must_use]
    pub fn actions(&self) -> &[Grant] {
        self.actions.as_slice()
    }

    /// Returns the aggregated resource type.
    #[must_use]
    pub fn aggregate_resource_type(&self) -> &AggregateResourceType {
        &self.aggregate_resource_type
    }

    /// Returns the live instance selection.
    #[must_use]
    pub fn instances(&self) -> &[ResourceInstance] {
        self.instances.as_slice()
    }

    /// Returns the selection captured at construction.
    #[must_use]
    pub fn instances_backup(&self) -> &[ResourceInstance] {
        self.instances_backup.as_slice()
    }

    /// Always `true`; distinguishes groups from single grants in mixed lists.
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        true
    }

    /// Returns the system id taken from the first action.
    #[must_use]
    pub fn system_id(&self) -> &str {
        self.system_id.as_str()
    }

    /// Returns the system name taken from the first action.
    #[must_use]
    pub fn system_name(&self) -> &str {
        self.system_name.as_str()
    }

    /// Returns the first action's definition, `None` without actions.
    #[must_use]
    pub fn detail(&self) -> Option<&GrantDetail> {
        self.detail.as_ref()
    }

    /// Returns the group id, empty when none was assigned.
    #[must_use]
    pub fn aggregation_id(&self) -> &str {
        self.aggregation_id.as_str()
    }

    /// Returns whether the group accepts instances pasted from another group.
    #[must_use]
    pub fn can_paste(&self) -> bool {
        self.can_paste
    }

    /// Returns whether the hosting UI flagged the group as invalid.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Whether the first action was issued under a permission template.
    #[must_use]
    pub fn is_template(&self) -> bool {
        self.actions
            .first()
            .map(|grant| grant.detail().is_template())
            .unwrap_or(false)
    }

    /// Whether no instance is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Display value of the selection, or the localized placeholder.
    #[must_use]
    pub fn value(&self, translator: &dyn Translator) -> String {
        if self.is_empty() {
            return PLEASE_SELECT.translate(translator);
        }

        self.instances
            .iter()
            .map(ResourceInstance::name)
            .collect::<Vec<_>>()
            .join(VALUE_SEPARATOR)
    }

    /// Action names joined for display.
    #[must_use]
    pub fn name(&self) -> String {
        self.actions
            .iter()
            .map(Grant::name)
            .collect::<Vec<_>>()
            .join(NAME_SEPARATOR)
    }

    /// Concatenated action ids, identifying the group among siblings of the
    /// same resource type.
    #[must_use]
    pub fn key(&self) -> String {
        self.actions
            .iter()
            .map(|grant| grant.id().as_str())
            .collect()
    }

    /// Whether the selection differs from the construction snapshot.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.instances != self.instances_backup
    }

    /// Appends an instance to the selection.
    pub fn push_instance(&mut self, instance: ResourceInstance) {
        self.instances.push(instance);
    }

    /// Removes the first instance with the given id.
    pub fn remove_instance(&mut self, instance_id: &str) -> Option<ResourceInstance> {
        let position = self
            .instances
            .iter()
            .position(|instance| instance.id() == instance_id)?;
        Some(self.instances.remove(position))
    }

    /// Replaces the whole selection.
    pub fn replace_instances(&mut self, instances: Vec<ResourceInstance>) {
        self.instances = instances;
    }

    /// Clears the selection.
    pub fn clear_instances(&mut self) {
        self.instances.clear();
    }

    /// Mutable access to one selected instance.
    pub fn instance_mut(&mut self, instance_id: &str) -> Option<&mut ResourceInstance> {
        self.instances
            .iter_mut()
            .find(|instance| instance.id() == instance_id)
    }

    /// Rolls the selection back to the construction snapshot.
    pub fn restore_instances(&mut self) {
        self.instances = self.instances_backup.clone();
    }

    /// Sets the validation flag.
    pub fn set_error(&mut self, is_error: bool) {
        self.is_error = is_error;
    }

    /// Sets whether the group accepts pasted instances.
    pub fn set_can_paste(&mut self, can_paste: bool) {
        self.can_paste = can_paste;
    }

    /// Replaces the selection with a copy of `source`'s selection.
    ///
    /// The target must accept paste and both groups must aggregate the same
    /// resource type. The snapshot of the target is left untouched.
    pub fn paste_from(&mut self, source: &AggregationPolicy) -> AppResult<usize> {
        if !self.can_paste {
            return Err(AppError::Conflict(format!(
                "aggregation '{}' does not accept pasted instances",
                self.key()
            )));
        }

        if !self
            .aggregate_resource_type
            .same_type(&source.aggregate_resource_type)
        {
            return Err(AppError::Validation(format!(
                "cannot paste '{}' instances into a '{}' aggregation",
                source.aggregate_resource_type.id(),
                self.aggregate_resource_type.id()
            )));
        }

        self.instances = source.instances.clone();
        Ok(self.instances.len())
    }
}

impl From<AggregationPolicyPayload> for AggregationPolicy {
    fn from(payload: AggregationPolicyPayload) -> Self {
        Self::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use iamview_core::NonEmptyString;
    use serde_json::json;

    use super::{AggregationPolicy, AggregationPolicyPayload};
    use crate::grant::{
        AggregateResourceType, CUSTOM_PERM_TEMPLATE_ID, Grant, GrantDetail, ResourceInstance,
        SystemRef,
    };

    fn grant(id: &str, name: &str, template_id: i64) -> Grant {
        let id = NonEmptyString::new(id).unwrap_or_else(|_| unreachable!());
        Grant::new(
            id,
            name,
            GrantDetail::new(template_id, SystemRef::new("bk_cmdb", "CMDB")),
        )
    }

    fn host_type() -> AggregateResourceType {
        AggregateResourceType::new("host", "bk_cmdb", "Host")
    }

    fn payload(actions: Vec<Grant>, instances: Vec<ResourceInstance>) -> AggregationPolicyPayload {
        AggregationPolicyPayload {
            actions,
            aggregate_resource_type: host_type(),
            instances,
            aggregation_id: None,
        }
    }

    fn placeholder(namespace: &str, key: &str) -> String {
        format!("[{namespace}:{key}]")
    }

    #[test]
    fn backup_is_independent_of_live_instances() {
        let a = ResourceInstance::new("a", "A");
        let b = ResourceInstance::new("b", "B");
        let mut policy = AggregationPolicy::new(payload(
            vec![grant("view_host", "View", 3)],
            vec![a.clone(), b.clone()],
        ));

        policy.push_instance(ResourceInstance::new("c", "C"));
        if let Some(first) = policy.instance_mut("a") {
            first.set_name("renamed");
        }

        assert_eq!(policy.instances_backup(), &[a, b]);
        assert_eq!(policy.instances().len(), 3);
        assert!(policy.is_modified());
    }

    #[test]
    fn restore_rolls_back_to_snapshot() {
        let mut policy = AggregationPolicy::new(payload(
            vec![grant("view_host", "View", 3)],
            vec![ResourceInstance::new("a", "A")],
        ));
        policy.clear_instances();
        assert!(policy.is_empty());

        policy.restore_instances();
        assert!(!policy.is_modified());
        assert_eq!(policy.instances().len(), 1);

        policy.clear_instances();
        assert_eq!(policy.instances_backup().len(), 1);
    }

    #[test]
    fn empty_flips_on_next_read() {
        let mut policy = AggregationPolicy::new(payload(vec![grant("view_host", "View", 3)], vec![]));
        assert!(policy.is_empty());

        policy.push_instance(ResourceInstance::new("x", "X"));
        assert!(!policy.is_empty());

        assert!(policy.remove_instance("x").is_some());
        assert!(policy.is_empty());
        assert!(policy.remove_instance("x").is_none());
    }

    #[test]
    fn value_joins_names_or_shows_placeholder() {
        let mut policy = AggregationPolicy::new(payload(vec![grant("view_host", "View", 3)], vec![]));
        assert_eq!(policy.value(&placeholder), "[verify:请选择]");

        policy.replace_instances(vec![
            ResourceInstance::new("x", "X"),
            ResourceInstance::new("y", "Y"),
        ]);
        assert_eq!(policy.value(&placeholder), "X；Y");
    }

    #[test]
    fn name_and_key_follow_action_order() {
        let policy = AggregationPolicy::new(payload(
            vec![grant("a", "Edit", 3), grant("b", "Delete", 3)],
            vec![],
        ));
        assert_eq!(policy.key(), "ab");
        assert_eq!(policy.name(), "Edit，Delete");
    }

    #[test]
    fn empty_actions_fall_back_to_empty_projections() {
        let policy = AggregationPolicy::new(AggregationPolicyPayload::default());
        assert_eq!(policy.key(), "");
        assert_eq!(policy.name(), "");
        assert_eq!(policy.system_id(), "");
        assert_eq!(policy.system_name(), "");
        assert!(policy.detail().is_none());
        assert!(!policy.is_template());
        assert!(policy.is_aggregate());
        assert_eq!(policy.aggregation_id(), "");
    }

    #[test]
    fn validated_constructor_rejects_empty_actions() {
        assert!(AggregationPolicy::try_new(AggregationPolicyPayload::default()).is_err());

        let policy = AggregationPolicy::try_new(payload(vec![grant("view_host", "View", 3)], vec![]));
        assert_eq!(
            policy.map(|policy| policy.system_name().to_owned()).ok(),
            Some("CMDB".to_owned())
        );
    }

    #[test]
    fn template_flag_compares_against_custom_sentinel() {
        let custom = AggregationPolicy::new(payload(
            vec![grant("view_host", "View", CUSTOM_PERM_TEMPLATE_ID)],
            vec![],
        ));
        let templated = AggregationPolicy::new(payload(vec![grant("view_host", "View", 42)], vec![]));

        assert!(!custom.is_template());
        assert!(templated.is_template());
        assert_eq!(templated.detail().map(|detail| detail.id()), Some(42));
    }

    #[test]
    fn flags_are_plain_and_default_off() {
        let mut policy = AggregationPolicy::new(payload(vec![grant("view_host", "View", 3)], vec![]));
        assert!(!policy.is_error());
        assert!(!policy.can_paste());

        policy.set_error(true);
        policy.set_can_paste(true);
        assert!(policy.is_error());
        assert!(policy.can_paste());
        assert!(policy.is_empty());
    }

    #[test]
    fn paste_copies_instances_without_sharing() {
        let source = AggregationPolicy::new(payload(
            vec![grant("view_host", "View", 3)],
            vec![ResourceInstance::new("h1", "host-1")],
        ));
        let mut target = AggregationPolicy::new(payload(vec![grant("edit_host", "Edit", 3)], vec![]));

        assert!(target.paste_from(&source).is_err());

        target.set_can_paste(true);
        assert_eq!(target.paste_from(&source).ok(), Some(1));
        assert!(target.instances_backup().is_empty());

        if let Some(instance) = target.instance_mut("h1") {
            instance.set_name("changed");
        }
        assert_eq!(source.instances()[0].name(), "host-1");
    }

    #[test]
    fn paste_rejects_other_resource_types() {
        let source = AggregationPolicy::new(AggregationPolicyPayload {
            actions: vec![grant("view_set", "View", 3)],
            aggregate_resource_type: AggregateResourceType::new("set", "bk_cmdb", "Set"),
            instances: vec![ResourceInstance::new("s1", "set-1")],
            aggregation_id: None,
        });
        let mut target = AggregationPolicy::new(payload(vec![grant("edit_host", "Edit", 3)], vec![]));
        target.set_can_paste(true);

        assert!(target.paste_from(&source).is_err());
        assert!(target.is_empty());
    }

    #[test]
    fn payload_defaults_absent_collections() {
        let payload: Result<AggregationPolicyPayload, _> = serde_json::from_value(json!({
            "actions": [{"id": "view_host", "name": "View", "detail": {"id": 1, "system": {"id": "bk_cmdb", "name": "CMDB"}}}],
            "aggregationId": "group-1"
        }));
        let policy = AggregationPolicy::from(payload.unwrap_or_default());

        assert_eq!(policy.aggregation_id(), "group-1");
        assert!(policy.is_empty());
        assert_eq!(policy.system_id(), "bk_cmdb");
        assert_eq!(policy.aggregate_resource_type().id(), "");
    }
}
