use crate::node::{NodeId, PipelineNode};
use crate::schema::{CompatibilityResult, schemas_compatible};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A directed connection from one node's output to another node's input.
///
/// Endpoints are not checked against the pipeline's nodes here; the editor owns that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineEdge {
    pub id: Uuid,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Map<String, Value>>,
}

impl PipelineEdge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            target,
            source_handle: None,
            target_handle: None,
            animated: None,
            style: None,
        }
    }

    pub fn with_handles(mut self, source_handle: &str, target_handle: &str) -> Self {
        self.source_handle = Some(source_handle.to_string());
        self.target_handle = Some(target_handle.to_string());
        self
    }
}

/// A complete pipeline graph with its metadata. Node and edge order is significant
/// for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<PipelineNode>,
    #[serde(default)]
    pub edges: Vec<PipelineEdge>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u32,
}

impl Pipeline {
    pub fn new(name: &str, created_by: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&PipelineNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut PipelineNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Appends `node` and returns its id.
    pub fn add_node(&mut self, node: PipelineNode) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Appends a new edge between two nodes and returns a reference to it.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> &PipelineEdge {
        self.edges.push(PipelineEdge::new(source, target));
        &self.edges[self.edges.len() - 1]
    }

    /// Removes a node together with every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<PipelineNode> {
        let position = self.nodes.iter().position(|n| n.id == id)?;
        self.edges.retain(|e| e.source != id && e.target != id);
        Some(self.nodes.remove(position))
    }

    /// Records a structural edit: bumps the version and the modification time.
    pub fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Compares the preview schemas of two nodes as if an edge were drawn from
    /// `source` to `target`. `None` when either node has no preview yet.
    pub fn connection_compatibility(
        &self,
        source: NodeId,
        target: NodeId,
    ) -> Option<CompatibilityResult> {
        let offered = &self.node(source)?.preview.as_ref()?.schema;
        let wanted = &self.node(target)?.preview.as_ref()?.schema;
        Some(schemas_compatible(offered, wanted))
    }
}
