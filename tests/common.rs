//! Common test utilities for building pipelines, records and schemas.
use kumiki::node::{ExportConfig, FilterConfig, LimitConfig, MathOperation, MathTransformConfig};
use kumiki::prelude::*;
use serde_json::{Value, json};

/// Three user rows with consistent types.
#[allow(dead_code)]
pub fn user_records() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "John", "active": true}),
        json!({"id": 2, "name": "Jane", "active": false}),
        json!({"id": 3, "name": "Joe", "active": true}),
    ]
}

/// Builds a schema from `(name, type, nullable)` triples.
#[allow(dead_code)]
pub fn schema_of(fields: &[(&str, FieldType, bool)]) -> DataSchema {
    DataSchema::new(
        fields
            .iter()
            .map(|(name, field_type, nullable)| SchemaField::new(*name, *field_type, *nullable))
            .collect(),
    )
}

/// A small but complete pipeline: api-fetch -> filter -> math-transform -> export.
///
/// The math node holds non-finite numbers in both its position and its config.
#[allow(dead_code)]
pub fn create_sample_pipeline() -> Pipeline {
    let mut pipeline = Pipeline::new("Customer cleanup", "alice@example.com");
    pipeline.description = Some("Fetch, filter and export customers".to_string());

    let mut fetch = create_node(NodeType::ApiFetch, Position::new(0.0, 0.0));
    if let NodeConfig::ApiFetch(config) = &mut fetch.config {
        config.url = Some("https://api.example.com/customers".to_string());
    }
    fetch.set_preview(DataPreview::from_records(&user_records()));

    let mut filter = create_node(NodeType::Filter, Position::new(250.5, 10.25));
    filter.config = FilterConfig {
        field: Some("active".to_string()),
        value: Some(json!(true)),
        ..FilterConfig::default()
    }
    .into();
    filter.status = NodeStatus::Success;

    let mut math = create_node(NodeType::MathTransform, Position::new(500.0, 0.0));
    math.position = Position::new(f64::NAN, f64::INFINITY);
    math.config = MathTransformConfig {
        field: "id".to_string(),
        operation: MathOperation::Multiply.into(),
        operand: Some(f64::NEG_INFINITY),
        ..MathTransformConfig::default()
    }
    .into();

    let mut export = create_node(NodeType::Export, Position::new(750.0, -120.0));
    export.config = ExportConfig {
        format: Some("json".to_string()),
        ..ExportConfig::default()
    }
    .into();

    let fetch_id = pipeline.add_node(fetch);
    let filter_id = pipeline.add_node(filter);
    let math_id = pipeline.add_node(math);
    let export_id = pipeline.add_node(export);

    pipeline.connect(fetch_id, filter_id);
    pipeline
        .edges
        .push(PipelineEdge::new(filter_id, math_id).with_handles("output-0", "input-0"));
    pipeline.connect(math_id, export_id);
    pipeline
}

/// A limit config holding `count` and `offset` exactly as an editor wrote them.
#[allow(dead_code)]
pub fn limit_config(count: Option<Value>, offset: Option<Value>) -> NodeConfig {
    LimitConfig {
        raw_count: count,
        raw_offset: offset,
        ..LimitConfig::default()
    }
    .into()
}
