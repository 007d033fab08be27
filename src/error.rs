use thiserror::Error;

/// Errors raised while resolving or instantiating node types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("Unknown node type: '{0}'")]
    UnknownNodeType(String),
}

/// Errors raised when a raw configuration object cannot be turned into a typed `NodeConfig`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration for node type '{node_type}' has an invalid shape: {message}")]
    InvalidShape { node_type: String, message: String },

    #[error("Configuration for node type '{found}' was supplied to a '{expected}' node")]
    TypeMismatch { expected: String, found: String },
}

/// Errors that can occur while decoding a serialized pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("Failed to parse pipeline JSON: {0}")]
    Json(String),

    #[error("Unknown non-finite number tag '{0}'")]
    InvalidSentinel(String),

    #[error("Node '{node_id}' could not be reconstructed: {message}")]
    InvalidNode { node_id: String, message: String },
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::Json(err.to_string())
    }
}
