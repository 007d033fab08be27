use super::config::NodeConfig;
use super::kind::NodeType;
use super::model::{NodeData, NodeStatus, PipelineNode, Position};
use crate::error::{ConfigError, NodeError};
use ahash::AHashMap;
use std::str::FromStr;
use tracing::{debug, warn};
use uuid::Uuid;

/// Creates nodes from the type registry.
///
/// The default factory knows the 15 built-in type names. Editors that persisted
/// nodes under other names can register aliases, and deployments can replace the
/// starting configuration for a type.
pub struct NodeFactory {
    aliases: AHashMap<String, NodeType>,
    default_configs: AHashMap<NodeType, NodeConfig>,
}

pub struct NodeFactoryBuilder {
    aliases: AHashMap<String, NodeType>,
    default_configs: AHashMap<NodeType, NodeConfig>,
    rejected: Option<ConfigError>,
}

impl NodeFactoryBuilder {
    pub fn new() -> Self {
        Self {
            aliases: AHashMap::new(),
            default_configs: AHashMap::new(),
            rejected: None,
        }
    }

    pub fn with_type_alias(mut self, alias: &str, node_type: NodeType) -> Self {
        self.aliases.insert(alias.to_string(), node_type);
        self
    }

    /// Overrides the starting configuration for a type. A config belonging to a
    /// different type makes [`build`](Self::build) fail.
    pub fn with_default_config(mut self, node_type: NodeType, config: NodeConfig) -> Self {
        if config.node_type() != node_type {
            warn!(
                expected = %node_type,
                found = %config.node_type(),
                "default config does not match its node type"
            );
            if self.rejected.is_none() {
                self.rejected = Some(ConfigError::TypeMismatch {
                    expected: node_type.to_string(),
                    found: config.node_type().to_string(),
                });
            }
            return self;
        }
        self.default_configs.insert(node_type, config);
        self
    }

    /// Finishes the factory, reporting the first mismatched default config.
    pub fn build(self) -> Result<NodeFactory, ConfigError> {
        if let Some(err) = self.rejected {
            return Err(err);
        }
        Ok(NodeFactory {
            aliases: self.aliases,
            default_configs: self.default_configs,
        })
    }
}

impl Default for NodeFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeFactory {
    pub fn builder() -> NodeFactoryBuilder {
        NodeFactoryBuilder::new()
    }

    /// Resolves a type name, checking registered aliases before the built-in names.
    pub fn resolve(&self, name: &str) -> Result<NodeType, NodeError> {
        match self.aliases.get(name) {
            Some(node_type) => Ok(*node_type),
            None => NodeType::from_str(name),
        }
    }

    /// Creates an idle node of `node_type` with a fresh id and the type's default configuration.
    pub fn create(&self, node_type: NodeType, position: Position) -> PipelineNode {
        let config = self
            .default_configs
            .get(&node_type)
            .cloned()
            .unwrap_or_else(|| NodeConfig::default_for(node_type));

        let node = PipelineNode {
            id: Uuid::new_v4(),
            node_type,
            position: position.normalized(),
            data: NodeData::for_type(node_type),
            config,
            status: NodeStatus::Idle,
            preview: None,
        };
        debug!(id = %node.id, node_type = %node_type, "created node");
        node
    }

    /// Creates a node from a type name. Fails with `UnknownNodeType` for unregistered names.
    pub fn create_named(&self, name: &str, position: Position) -> Result<PipelineNode, NodeError> {
        let node_type = self.resolve(name)?;
        Ok(self.create(node_type, position))
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self {
            aliases: AHashMap::new(),
            default_configs: AHashMap::new(),
        }
    }
}

/// Creates a node of `node_type` at `position` using the built-in registry.
pub fn create_node(node_type: NodeType, position: Position) -> PipelineNode {
    NodeFactory::default().create(node_type, position)
}

/// Name-based variant of [`create_node`], as called by editors holding a type string.
pub fn create_node_by_name(name: &str, position: Position) -> Result<PipelineNode, NodeError> {
    NodeFactory::default().create_named(name, position)
}
