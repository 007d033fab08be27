//! Tests for the node type registry and the node factory.
use kumiki::node::{FilterOperator, LimitConfig, SortDirection};
use kumiki::prelude::*;
use std::collections::HashSet;

#[test]
fn test_create_node_for_every_type() {
    for &node_type in NodeType::ALL {
        let node = create_node(node_type, Position::new(10.0, 20.0));
        assert_eq!(node.node_type, node_type);
        assert_eq!(node.status, NodeStatus::Idle);
        assert_eq!(node.data.category(), node_type.category());
        assert_eq!(node.data.label, node_type.label());
        assert_eq!(node.config.node_type(), node_type);
        assert!(node.preview.is_none());
    }
}

#[test]
fn test_registry_has_fifteen_types_in_three_categories() {
    assert_eq!(NodeType::ALL.len(), 15);
    assert_eq!(NodeType::by_category(NodeCategory::Source).count(), 3);
    assert_eq!(NodeType::by_category(NodeCategory::Transform).count(), 10);
    assert_eq!(NodeType::by_category(NodeCategory::Output).count(), 2);
    assert_eq!(NodeType::RenameFields.category(), NodeCategory::Transform);
    assert_eq!(NodeType::CsvUpload.category(), NodeCategory::Source);
    assert_eq!(NodeType::Preview.category(), NodeCategory::Output);
}

#[test]
fn test_node_ids_are_unique() {
    let ids: HashSet<_> = (0..500)
        .map(|i| create_node(NodeType::Map, Position::new(i as f64, 0.0)).id)
        .collect();
    assert_eq!(ids.len(), 500);
}

#[test]
fn test_non_finite_position_is_zeroed() {
    let cases = [
        (f64::NAN, 5.0, 0.0, 5.0),
        (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0.0),
        (-3.0, f64::NAN, -3.0, 0.0),
    ];
    for (x, y, want_x, want_y) in cases {
        let node = create_node(NodeType::Sort, Position::new(x, y));
        assert_eq!(node.position.x, want_x);
        assert_eq!(node.position.y, want_y);
    }
}

#[test]
fn test_finite_position_is_kept_exactly() {
    let node = create_node(NodeType::Limit, Position::new(123.456, -7.0));
    assert_eq!(node.position.x, 123.456);
    assert_eq!(node.position.y, -7.0);

    let node = create_node(NodeType::Limit, Position::new(1e12, 42.0));
    assert_eq!(node.position, Position::new(1e12, 42.0));
}

#[test]
fn test_default_configs_have_type_specific_shapes() {
    let value = |t: NodeType| NodeConfig::default_for(t).to_value();

    let api = value(NodeType::ApiFetch);
    for key in ["url", "method", "headers", "authentication"] {
        assert!(api.get(key).is_some(), "api-fetch default lacks '{}'", key);
    }
    let filter = value(NodeType::Filter);
    for key in ["condition", "field", "operator", "value"] {
        assert!(filter.get(key).is_some(), "filter default lacks '{}'", key);
    }
    let join = value(NodeType::Join);
    for key in ["joinType", "leftKey", "rightKey"] {
        assert!(join.get(key).is_some(), "join default lacks '{}'", key);
    }
    assert_eq!(value(NodeType::Sort)["direction"], "asc");
    assert_eq!(value(NodeType::Limit)["count"], 10);
    assert_eq!(value(NodeType::Limit)["offset"], 0);
    assert_eq!(value(NodeType::Export)["format"], "csv");
    assert_eq!(value(NodeType::Export)["filename"], "export");

    match NodeConfig::default_for(NodeType::Filter) {
        NodeConfig::Filter(c) => assert_eq!(c.operator.known(), Some(&FilterOperator::Equals)),
        other => panic!("Expected filter config, got {:?}", other),
    }
    match NodeConfig::default_for(NodeType::Sort) {
        NodeConfig::Sort(c) => assert_eq!(c.direction.known(), Some(&SortDirection::Asc)),
        other => panic!("Expected sort config, got {:?}", other),
    }
}

#[test]
fn test_create_by_name() {
    let node = create_node_by_name("rename-fields", Position::default()).expect("known type");
    assert_eq!(node.node_type, NodeType::RenameFields);

    match create_node_by_name("teleport", Position::default()) {
        Err(NodeError::UnknownNodeType(name)) => assert_eq!(name, "teleport"),
        other => panic!("Expected UnknownNodeType, got {:?}", other),
    }
}

#[test]
fn test_type_names_round_trip_through_from_str() {
    for &node_type in NodeType::ALL {
        let parsed: NodeType = node_type.as_str().parse().expect("registered name");
        assert_eq!(parsed, node_type);
        assert_eq!(node_type.to_string(), node_type.as_str());
    }
}

#[test]
fn test_factory_with_alias_and_default_override() {
    let factory = NodeFactory::builder()
        .with_type_alias("http-request", NodeType::ApiFetch)
        .with_default_config(NodeType::Limit, LimitConfig::new(50, 5).into())
        .build()
        .expect("matching overrides");

    let node = factory
        .create_named("http-request", Position::default())
        .expect("alias resolves");
    assert_eq!(node.node_type, NodeType::ApiFetch);

    let limit = factory.create(NodeType::Limit, Position::default());
    assert_eq!(limit.config.to_value()["count"], 50);
    assert_eq!(limit.config.to_value()["offset"], 5);

    let sort = factory.create(NodeType::Sort, Position::default());
    assert_eq!(sort.config, NodeConfig::default_for(NodeType::Sort));
}

#[test]
fn test_factory_rejects_override_for_another_type() {
    let result = NodeFactory::builder()
        .with_default_config(NodeType::Sort, NodeConfig::default_for(NodeType::Join))
        .with_default_config(NodeType::Limit, NodeConfig::default_for(NodeType::Export))
        .build();

    match result {
        Err(ConfigError::TypeMismatch { expected, found }) => {
            assert_eq!(expected, "sort");
            assert_eq!(found, "join");
        }
        Err(other) => panic!("Expected TypeMismatch, got {:?}", other),
        Ok(_) => panic!("Expected TypeMismatch, got a factory"),
    }
}
