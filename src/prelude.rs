//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the kumiki
//! crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kumiki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let text = std::fs::read_to_string("path/to/pipeline.json")?;
//! let pipeline = deserialize_pipeline(&text)?;
//!
//! for node in &pipeline.nodes {
//!     let result = validate_node_config(node.node_type, &node.config);
//!     println!("{} -> valid: {}", node.data.label, result.is_valid);
//! }
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::node::{
    NodeCategory, NodeConfig, NodeData, NodeFactory, NodeId, NodeStatus, NodeType,
    PipelineNode, Position, create_node, create_node_by_name,
};
pub use crate::pipeline::{Pipeline, PipelineEdge};

// Validation
pub use crate::validate::{ValidationResult, validate_config_value, validate_node_config};

// Schemas
pub use crate::schema::{
    CompatibilityResult, DEFAULT_SAMPLE_SIZE, DataPreview, DataSchema, FieldType, SchemaField,
    create_data_preview, detect_field_type, generate_schema, merge_schemas, schemas_compatible,
    validate_data_against_schema,
};

// Serialization
pub use crate::codec::{
    deserialize_pipeline, pipelines_equal, serialize_pipeline, serialize_pipeline_pretty,
};

// Error types
pub use crate::error::{ConfigError, NodeError, SerializationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
