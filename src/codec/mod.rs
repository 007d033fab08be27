//! Lossless text encoding of pipelines.
//!
//! Pipelines are written as JSON. Timestamps use RFC 3339 and non-finite floats are
//! wrapped in tagged objects (see [`sentinel`]), so a decoded pipeline is
//! [`pipelines_equal`] to the one that was encoded.

pub mod equality;
pub mod sentinel;

pub use equality::*;

use crate::error::SerializationError;
use crate::node::PipelineNode;
use crate::pipeline::Pipeline;
use serde_json::Value;
use tracing::{debug, warn};

pub fn serialize_pipeline(pipeline: &Pipeline) -> Result<String, SerializationError> {
    let text = serde_json::to_string(pipeline)?;
    debug!(
        id = %pipeline.id,
        nodes = pipeline.nodes.len(),
        edges = pipeline.edges.len(),
        bytes = text.len(),
        "serialized pipeline"
    );
    Ok(text)
}

/// Indented variant of [`serialize_pipeline`], for files meant to be read by people.
pub fn serialize_pipeline_pretty(pipeline: &Pipeline) -> Result<String, SerializationError> {
    Ok(serde_json::to_string_pretty(pipeline)?)
}

/// Decodes a pipeline. Any malformed part fails the whole decode.
pub fn deserialize_pipeline(text: &str) -> Result<Pipeline, SerializationError> {
    let result = decode(text);
    if let Err(err) = &result {
        warn!(error = %err, "failed to deserialize pipeline");
    }
    result
}

fn decode(text: &str) -> Result<Pipeline, SerializationError> {
    let mut document: Value = serde_json::from_str(text)?;

    // Nodes are decoded one by one so a failure can name the offending node.
    let raw_nodes = match document.get_mut("nodes") {
        Some(Value::Array(items)) => std::mem::take(items),
        _ => Vec::new(),
    };
    let nodes = raw_nodes
        .into_iter()
        .map(decode_node)
        .collect::<Result<Vec<_>, _>>()?;

    let mut pipeline: Pipeline = serde_json::from_value(document)?;
    pipeline.nodes = nodes;
    debug!(
        id = %pipeline.id,
        nodes = pipeline.nodes.len(),
        edges = pipeline.edges.len(),
        "deserialized pipeline"
    );
    Ok(pipeline)
}

fn decode_node(raw: Value) -> Result<PipelineNode, SerializationError> {
    let node_id = raw
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();
    serde_json::from_value(raw).map_err(|err| {
        let message = err.to_string();
        // Only numeric slots carry sentinels; record data and `extra` values are opaque.
        if let Some(tag) = sentinel::unknown_tag_in(&message) {
            return SerializationError::InvalidSentinel(tag.to_string());
        }
        SerializationError::InvalidNode { node_id, message }
    })
}
