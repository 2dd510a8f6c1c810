use std::sync::Arc;

use iamview_core::NonEmptyString;
use iamview_domain::{
    AggregateResourceType, AggregationPolicyPayload, Grant, GrantDetail, ResourceInstance,
    SystemRef,
};

use super::AggregationService;
use crate::CatalogTranslator;

fn service() -> AggregationService {
    let mut catalogue = CatalogTranslator::new();
    catalogue.insert("verify", "请选择", "Please select");
    AggregationService::new(Arc::new(catalogue))
}

fn grant(id: &str, name: &str) -> Grant {
    let id = NonEmptyString::new(id).unwrap_or_else(|_| unreachable!());
    Grant::new(id, name, GrantDetail::new(7, SystemRef::new("bk_cmdb", "CMDB")))
}

fn payload(
    resource_type: &str,
    actions: Vec<Grant>,
    instances: Vec<ResourceInstance>,
) -> AggregationPolicyPayload {
    AggregationPolicyPayload {
        actions,
        aggregate_resource_type: AggregateResourceType::new(resource_type, "bk_cmdb", resource_type),
        instances,
        aggregation_id: None,
    }
}

#[test]
fn assemble_derives_missing_ids_and_keeps_given_ones() {
    let mut named = payload("host", vec![grant("edit_host", "Edit")], vec![]);
    named.aggregation_id = Some("group-7".to_owned());

    let groups = service()
        .assemble(vec![
            payload("host", vec![grant("view_host", "View")], vec![]),
            named,
        ])
        .unwrap_or_default();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].aggregation_id(), "bk_cmdb:host:view_host");
    assert_eq!(groups[1].aggregation_id(), "group-7");
}

#[test]
fn assemble_drops_sibling_duplicates_of_the_same_type() {
    let groups = service()
        .assemble(vec![
            payload("host", vec![grant("a", "A"), grant("b", "B")], vec![]),
            payload("host", vec![grant("a", "A"), grant("b", "B")], vec![]),
            payload("set", vec![grant("a", "A"), grant("b", "B")], vec![]),
        ])
        .unwrap_or_default();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].aggregate_resource_type().id(), "set");
}

#[test]
fn assemble_rejects_action_less_payloads() {
    let result = service().assemble(vec![
        payload("host", vec![grant("a", "A")], vec![]),
        payload("host", vec![], vec![]),
    ]);

    let message = result.err().map(|error| error.to_string()).unwrap_or_default();
    assert!(message.contains("index 1"));
}

#[test]
fn summary_localizes_placeholder() {
    let service = service();
    let groups = service
        .assemble(vec![payload("host", vec![grant("view_host", "View")], vec![])])
        .unwrap_or_default();

    let summary = service.summarize(&groups[0]);
    assert_eq!(summary.value, "Please select");
    assert!(summary.is_empty);
    assert!(summary.is_template);
    assert_eq!(summary.system_name, "CMDB");
    assert_eq!(summary.name, "View");
    assert_eq!(summary.instance_count, 0);
}

#[test]
fn validate_flags_only_empty_groups() {
    let service = service();
    let mut groups = service
        .assemble(vec![
            payload("host", vec![grant("a", "A")], vec![ResourceInstance::new("h1", "host-1")]),
            payload("host", vec![grant("b", "B")], vec![]),
        ])
        .unwrap_or_default();

    assert_eq!(service.validate(&mut groups), 1);
    assert!(!groups[0].is_error());
    assert!(groups[1].is_error());

    groups[1].push_instance(ResourceInstance::new("h2", "host-2"));
    assert_eq!(service.validate(&mut groups), 0);
    assert!(!groups[1].is_error());
}

#[test]
fn paste_updates_only_open_groups_of_the_same_type() {
    let service = service();
    let mut groups = service
        .assemble(vec![
            payload("host", vec![grant("a", "A")], vec![ResourceInstance::new("h1", "host-1")]),
            payload("host", vec![grant("b", "B")], vec![]),
            payload("host", vec![grant("c", "C")], vec![]),
            payload("set", vec![grant("d", "D")], vec![]),
        ])
        .unwrap_or_default();

    assert!(service.mark_paste_targets(&mut groups, &[1, 3]).is_ok());
    assert_eq!(service.paste_into_compatible(&mut groups, 0).ok(), Some(1));

    assert_eq!(groups[1].value(&|_: &str, key: &str| key.to_owned()), "host-1");
    assert!(groups[2].is_empty());
    assert!(groups[3].is_empty());
    assert!(groups[1].instances_backup().is_empty());
}

#[test]
fn paste_with_unknown_indices_is_not_found() {
    let service = service();
    let mut groups = service
        .assemble(vec![payload("host", vec![grant("a", "A")], vec![])])
        .unwrap_or_default();

    assert!(service.mark_paste_targets(&mut groups, &[4]).is_err());
    assert!(service.paste_into_compatible(&mut groups, 2).is_err());
}

#[test]
fn request_positions_survive_duplicate_removal() {
    let service = service();
    let mut assembled = service
        .assemble_indexed(vec![
            payload("script", vec![grant("a", "A")], vec![]),
            payload("script", vec![grant("a", "A")], vec![]),
            payload("script", vec![grant("b", "B")], vec![ResourceInstance::new("s1", "SRC")]),
            payload("script", vec![grant("c", "C")], vec![]),
            payload("script", vec![grant("d", "D")], vec![]),
        ])
        .unwrap_or_else(|error| panic!("assembly failed: {error}"));

    assert_eq!(assembled.groups().len(), 4);
    assert_eq!(assembled.request_len(), 5);
    assert_eq!(assembled.group_index(1).ok(), Some(0));
    assert_eq!(assembled.request_indices_of(0), vec![0, 1]);
    assert_eq!(assembled.request_indices_of(2), vec![3]);

    let source = assembled.group_index(2).unwrap_or(usize::MAX);
    let targets = assembled.group_indices(&[3]).unwrap_or_default();
    assert!(service.mark_paste_targets(assembled.groups_mut(), &targets).is_ok());
    assert_eq!(
        service.paste_into_compatible(assembled.groups_mut(), source).ok(),
        Some(1)
    );

    let groups = assembled.groups();
    assert_eq!(groups[2].key(), "c");
    assert_eq!(groups[2].instances().len(), 1);
    assert_eq!(groups[2].instances()[0].name(), "SRC");
    assert!(groups[3].is_empty());
}

#[test]
fn unknown_request_positions_are_not_found() {
    let assembled = service()
        .assemble_indexed(vec![payload("host", vec![grant("a", "A")], vec![])])
        .unwrap_or_else(|error| panic!("assembly failed: {error}"));

    assert!(assembled.group_index(1).is_err());
    assert!(assembled.group_indices(&[0, 4]).is_err());
}

#[test]
fn summary_lists_current_and_snapshot_selection() {
    let service = service();
    let mut groups = service
        .assemble(vec![payload(
            "host",
            vec![grant("a", "A")],
            vec![ResourceInstance::new("h1", "host-1")],
        )])
        .unwrap_or_default();
    groups[0].push_instance(ResourceInstance::new("h2", "host-2"));

    let summary = service.summarize(&groups[0]);
    assert_eq!(summary.instances.len(), 2);
    assert_eq!(summary.instances_backup.len(), 1);
    assert_eq!(summary.instances_backup[0].id(), "h1");
}
