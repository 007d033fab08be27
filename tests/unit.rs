//! Unit tests for core kumiki types.
use kumiki::node::{Authentication, JoinConfig, JoinType, Lenient};
use kumiki::prelude::*;
use serde_json::json;

#[test]
fn test_field_type_display() {
    assert_eq!(format!("{}", FieldType::Number), "number");
    assert_eq!(format!("{}", FieldType::Date), "date");
    assert_eq!(format!("{:<8}|", FieldType::Array), "array   |");
}

#[test]
fn test_wire_names() {
    assert_eq!(serde_json::to_value(NodeType::ApiFetch).unwrap(), "api-fetch");
    assert_eq!(
        serde_json::to_value(NodeType::MathTransform).unwrap(),
        "math-transform"
    );
    assert_eq!(serde_json::to_value(NodeStatus::Processing).unwrap(), "processing");
    assert_eq!(serde_json::to_value(NodeCategory::Output).unwrap(), "output");
    assert_eq!(
        serde_json::to_value(SchemaField::new("when", FieldType::Date, true)).unwrap(),
        json!({"name": "when", "type": "date", "nullable": true})
    );
}

#[test]
fn test_config_from_raw_value() {
    let config = NodeConfig::from_value(
        NodeType::ApiFetch,
        json!({
            "url": "https://example.com",
            "method": "POST",
            "authentication": {"type": "bearer", "token": "abc"},
            "timeoutMs": 500
        }),
    )
    .expect("valid api-fetch config");

    match &config {
        NodeConfig::ApiFetch(c) => {
            assert_eq!(c.method.as_deref(), Some("POST"));
            assert_eq!(
                c.authentication.known(),
                Some(&Authentication::Bearer {
                    token: "abc".to_string()
                })
            );
            assert_eq!(c.extra["timeoutMs"], 500);
        }
        other => panic!("Expected api-fetch config, got {:?}", other),
    }
    assert_eq!(config.to_value()["timeoutMs"], 500);

    let err = NodeConfig::from_value(NodeType::Join, json!({"leftKey": 42}))
        .expect_err("numeric join key");
    assert!(matches!(err, ConfigError::InvalidShape { ref node_type, .. } if node_type == "join"));
}

#[test]
fn test_unknown_choice_is_kept_verbatim() {
    let config = NodeConfig::from_value(NodeType::Join, json!({"joinType": "sideways"}))
        .expect("unknown join type still decodes");
    match &config {
        NodeConfig::Join(JoinConfig { join_type, .. }) => {
            assert_eq!(join_type.known(), None);
            assert_eq!(join_type.unknown(), Some(&json!("sideways")));
        }
        other => panic!("Expected join config, got {:?}", other),
    }
    assert_eq!(config.to_value()["joinType"], "sideways");

    let known = NodeConfig::from_value(NodeType::Join, json!({"joinType": "left"})).unwrap();
    match known {
        NodeConfig::Join(c) => assert_eq!(c.join_type, Lenient::Known(JoinType::Left)),
        other => panic!("Expected join config, got {:?}", other),
    }
}

#[test]
fn test_error_display() {
    let err = NodeError::UnknownNodeType("teleport".to_string());
    assert!(err.to_string().contains("teleport"));

    let err = SerializationError::InvalidNode {
        node_id: "n-1".to_string(),
        message: "bad config".to_string(),
    };
    assert!(err.to_string().contains("n-1"));
    assert!(err.to_string().contains("bad config"));

    let err = SerializationError::InvalidSentinel("Huge".to_string());
    assert!(err.to_string().contains("Huge"));

    let err = ConfigError::TypeMismatch {
        expected: "sort".to_string(),
        found: "limit".to_string(),
    };
    assert!(err.to_string().contains("sort"));
    assert!(err.to_string().contains("limit"));
}

#[test]
fn test_position_helpers() {
    let p = Position::new(f64::NAN, f64::NEG_INFINITY).normalized();
    assert_eq!(p, Position::new(0.0, 0.0));

    let nan = Position::new(f64::NAN, 1.0);
    assert!(nan.same_as(&Position::new(f64::NAN, 1.0)));
    assert!(!nan.same_as(&Position::new(0.0, 1.0)));
}

#[test]
fn test_set_config_rejects_other_types() {
    let mut node = create_node(NodeType::Sort, Position::default());
    let err = node
        .set_config(NodeConfig::default_for(NodeType::Limit))
        .expect_err("limit config on a sort node");
    assert_eq!(
        err,
        ConfigError::TypeMismatch {
            expected: "sort".to_string(),
            found: "limit".to_string(),
        }
    );
    assert_eq!(node.config, NodeConfig::default_for(NodeType::Sort));

    node.set_config(NodeConfig::default_for(NodeType::Sort))
        .expect("matching config");
}
