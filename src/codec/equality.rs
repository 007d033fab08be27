use crate::node::PipelineNode;
use crate::pipeline::{Pipeline, PipelineEdge};
use chrono::{DateTime, Utc};

const TIMESTAMP_TOLERANCE_MS: i64 = 1000;

/// Semantic equality of two pipelines, as expected to hold across a save/load cycle.
///
/// Timestamps may differ by up to a second, positions treat `NaN` as equal to itself,
/// and edges are compared by identity and endpoints only.
pub fn pipelines_equal(a: &Pipeline, b: &Pipeline) -> bool {
    a.id == b.id
        && a.name == b.name
        && a.version == b.version
        && close_in_time(a.created_at, b.created_at)
        && close_in_time(a.updated_at, b.updated_at)
        && a.nodes.len() == b.nodes.len()
        && a.edges.len() == b.edges.len()
        && a.nodes.iter().zip(&b.nodes).all(|(x, y)| nodes_equal(x, y))
        && a.edges.iter().zip(&b.edges).all(|(x, y)| edges_equal(x, y))
}

fn close_in_time(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    (a - b).num_milliseconds().abs() <= TIMESTAMP_TOLERANCE_MS
}

fn nodes_equal(a: &PipelineNode, b: &PipelineNode) -> bool {
    // Configs are compared in their encoded form so tagged NaN values match.
    a.id == b.id
        && a.node_type == b.node_type
        && a.status == b.status
        && a.position.same_as(&b.position)
        && a.data == b.data
        && a.config.to_value() == b.config.to_value()
}

fn edges_equal(a: &PipelineEdge, b: &PipelineEdge) -> bool {
    a.id == b.id
        && a.source == b.source
        && a.target == b.target
        && a.source_handle == b.source_handle
        && a.target_handle == b.target_handle
}
