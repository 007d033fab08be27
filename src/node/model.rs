use super::config::NodeConfig;
use super::kind::{NodeCategory, NodeType};
use crate::error::ConfigError;
use crate::schema::DataPreview;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub type NodeId = Uuid;

/// A point on the editor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(with = "crate::codec::sentinel")]
    pub x: f64,
    #[serde(with = "crate::codec::sentinel")]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Replaces every non-finite component with `0`. Finite components are kept as-is.
    pub fn normalized(self) -> Self {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
        }
    }

    /// Component-wise equality where `NaN` matches `NaN`.
    pub fn same_as(&self, other: &Position) -> bool {
        let eq = |a: f64, b: f64| a == b || (a.is_nan() && b.is_nan());
        eq(self.x, other.x) && eq(self.y, other.y)
    }
}

/// Presentation data shown on a node. The category always mirrors the node's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    category: NodeCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NodeData {
    /// The registry presentation for `kind`.
    pub fn for_type(kind: NodeType) -> Self {
        Self {
            label: kind.label().to_string(),
            description: None,
            category: kind.category(),
            icon: Some(kind.icon().to_string()),
            color: Some(kind.color().to_string()),
        }
    }

    pub fn category(&self) -> NodeCategory {
        self.category
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Idle,
    Processing,
    Success,
    Error,
}

/// A single typed node inside a pipeline graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NodeRepr")]
pub struct PipelineNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub position: Position,
    pub data: NodeData,
    pub config: NodeConfig,
    pub status: NodeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<DataPreview>,
}

impl PipelineNode {
    pub fn category(&self) -> NodeCategory {
        self.node_type.category()
    }

    /// Replaces the configuration, refusing one that belongs to another node type.
    pub fn set_config(&mut self, config: NodeConfig) -> Result<(), ConfigError> {
        if config.node_type() != self.node_type {
            return Err(ConfigError::TypeMismatch {
                expected: self.node_type.to_string(),
                found: config.node_type().to_string(),
            });
        }
        self.config = config;
        Ok(())
    }

    /// Replaces the preview wholesale, as happens whenever upstream data changes.
    pub fn set_preview(&mut self, preview: DataPreview) {
        self.preview = Some(preview);
    }
}

// Wire form of a node. The config is decoded against the node's declared type and the
// category is re-derived from the type rather than trusted from the input.
#[derive(Deserialize)]
struct NodeRepr {
    id: NodeId,
    #[serde(rename = "type")]
    node_type: NodeType,
    #[serde(default)]
    position: Position,
    data: NodeDataRepr,
    #[serde(default = "empty_object")]
    config: Value,
    #[serde(default)]
    status: NodeStatus,
    #[serde(default)]
    preview: Option<DataPreview>,
}

#[derive(Deserialize)]
struct NodeDataRepr {
    label: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl TryFrom<NodeRepr> for PipelineNode {
    type Error = ConfigError;

    fn try_from(repr: NodeRepr) -> Result<Self, Self::Error> {
        let config = NodeConfig::from_value(repr.node_type, repr.config)?;
        Ok(PipelineNode {
            id: repr.id,
            node_type: repr.node_type,
            position: repr.position,
            data: NodeData {
                label: repr.data.label,
                description: repr.data.description,
                category: repr.node_type.category(),
                icon: repr.data.icon,
                color: repr.data.color,
            },
            config,
            status: repr.status,
            preview: repr.preview,
        })
    }
}
