//! Typed per-node-type configuration.
//!
//! Each node type owns one configuration struct. Fields that an editor may leave
//! blank while a node is being set up are `Option`s or may be empty; the shape is
//! only enforced by [`crate::validate`]. Closed choices are wrapped in [`Lenient`]
//! and free-form numbers are kept as raw JSON, so a value typed halfway still loads.
//! Keys the struct does not know about are kept in `extra` so that configuration
//! written by newer editors survives a load/save cycle.

use super::kind::NodeType;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A closed choice as found in a stored config: either a value this crate knows, or
/// the raw JSON an editor wrote, kept verbatim so it is written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Known(T),
    Unknown(Value),
}

impl<T> Lenient<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Lenient::Known(value) => Some(value),
            Lenient::Unknown(_) => None,
        }
    }

    pub fn unknown(&self) -> Option<&Value> {
        match self {
            Lenient::Known(_) => None,
            Lenient::Unknown(raw) => Some(raw),
        }
    }
}

impl<T: Default> Default for Lenient<T> {
    fn default() -> Self {
        Lenient::Known(T::default())
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Known(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Authentication {
    #[default]
    None,
    Bearer {
        #[serde(default)]
        token: String,
    },
    Basic {
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
    #[serde(rename_all = "camelCase")]
    ApiKey {
        #[serde(default)]
        key: String,
        #[serde(default)]
        header_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFetchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: Map<String, Value>,
    #[serde(default)]
    pub authentication: Lenient<Authentication>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ApiFetchConfig {
    fn default() -> Self {
        Self {
            url: Some(String::new()),
            method: Some("GET".to_string()),
            headers: Map::new(),
            authentication: Lenient::Known(Authentication::None),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvUploadConfig {
    #[serde(default)]
    pub delimiter: String,
    #[serde(default)]
    pub has_header: bool,
    #[serde(default)]
    pub encoding: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CsvUploadConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            has_header: true,
            encoding: "utf-8".to_string(),
            file_name: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JsonParserConfig {
    #[serde(default)]
    pub json_path: String,
    #[serde(default)]
    pub flatten: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FilterOperator {
    #[default]
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default)]
    pub operator: Lenient<FilterOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            condition: Some(String::new()),
            field: Some(String::new()),
            operator: Lenient::Known(FilterOperator::Equals),
            value: Some(Value::String(String::new())),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    #[serde(default)]
    pub expression: String,
    #[serde(default)]
    pub output_field: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOperation {
    #[default]
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReduceConfig {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub operation: Lenient<AggregateOperation>,
    #[serde(
        default,
        with = "crate::codec::sentinel::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_value: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            field: String::new(),
            operation: Lenient::Known(AggregateOperation::Sum),
            initial_value: Some(0.0),
            extra: Map::new(),
        }
    }
}

/// One output column of an aggregate or group-by node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub field: String,
    #[serde(default)]
    pub operation: Lenient<AggregateOperation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AggregateConfig {
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub aggregations: Vec<Aggregation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinConfig {
    #[serde(default)]
    pub join_type: Lenient<JoinType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            join_type: Lenient::Known(JoinType::Inner),
            left_key: Some(String::new()),
            right_key: Some(String::new()),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default)]
    pub direction: Lenient<SortDirection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: Some(String::new()),
            direction: Lenient::Known(SortDirection::Asc),
            extra: Map::new(),
        }
    }
}

/// Row window of a limit node. `count` and `offset` hold whatever the editor wrote;
/// [`LimitConfig::count`] and [`LimitConfig::offset`] read them as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitConfig {
    #[serde(default, rename = "count", skip_serializing_if = "Option::is_none")]
    pub raw_count: Option<Value>,
    #[serde(default, rename = "offset", skip_serializing_if = "Option::is_none")]
    pub raw_offset: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LimitConfig {
    pub fn new(count: impl Into<Value>, offset: impl Into<Value>) -> Self {
        Self {
            raw_count: Some(count.into()),
            raw_offset: Some(offset.into()),
            extra: Map::new(),
        }
    }

    /// The row count, if one was written as a JSON number.
    pub fn count(&self) -> Option<f64> {
        self.raw_count.as_ref().and_then(Value::as_f64)
    }

    pub fn offset(&self) -> Option<f64> {
        self.raw_offset.as_ref().and_then(Value::as_f64)
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self::new(10, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRename {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RenameFieldsConfig {
    #[serde(default)]
    pub mappings: Vec<FieldRename>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MathOperation {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathTransformConfig {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub operation: Lenient<MathOperation>,
    #[serde(
        default,
        with = "crate::codec::sentinel::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub operand: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_field: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for MathTransformConfig {
    fn default() -> Self {
        Self {
            field: String::new(),
            operation: Lenient::Known(MathOperation::Add),
            operand: Some(0.0),
            output_field: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroupByConfig {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub aggregations: Vec<Aggregation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewConfig {
    #[serde(default)]
    pub max_rows: Lenient<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_rows: Lenient::Known(100),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: Some("csv".to_string()),
            filename: Some("export".to_string()),
            extra: Map::new(),
        }
    }
}

/// Defines `NodeConfig` with one variant per node type, plus the dispatch between them.
macro_rules! define_node_configs {
    ( $( ($variant:ident, $config:ty) ),* $(,)? ) => {
        /// Configuration of a single node, tagged by the node type it belongs to.
        #[derive(Debug, Clone, PartialEq)]
        pub enum NodeConfig {
            $( $variant($config), )*
        }

        impl NodeConfig {
            /// The default configuration an editor starts from for `kind`.
            pub fn default_for(kind: NodeType) -> Self {
                match kind {
                    $( NodeType::$variant => NodeConfig::$variant(<$config>::default()), )*
                }
            }

            /// The node type this configuration belongs to.
            pub fn node_type(&self) -> NodeType {
                match self {
                    $( NodeConfig::$variant(_) => NodeType::$variant, )*
                }
            }

            /// Decodes a raw key-value object as the configuration of `kind`.
            pub fn from_value(kind: NodeType, value: Value) -> Result<Self, ConfigError> {
                let invalid = |err: serde_json::Error| ConfigError::InvalidShape {
                    node_type: kind.to_string(),
                    message: err.to_string(),
                };
                match kind {
                    $( NodeType::$variant => serde_json::from_value::<$config>(value)
                        .map(NodeConfig::$variant)
                        .map_err(invalid), )*
                }
            }
        }

        impl Serialize for NodeConfig {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $( NodeConfig::$variant(config) => config.serialize(serializer), )*
                }
            }
        }

        $(
            impl From<$config> for NodeConfig {
                fn from(config: $config) -> Self {
                    NodeConfig::$variant(config)
                }
            }
        )*
    };
}

define_node_configs! {
    (ApiFetch, ApiFetchConfig),
    (CsvUpload, CsvUploadConfig),
    (JsonParser, JsonParserConfig),
    (Filter, FilterConfig),
    (Map, MapConfig),
    (Reduce, ReduceConfig),
    (Aggregate, AggregateConfig),
    (Join, JoinConfig),
    (Sort, SortConfig),
    (Limit, LimitConfig),
    (RenameFields, RenameFieldsConfig),
    (MathTransform, MathTransformConfig),
    (GroupBy, GroupByConfig),
    (Preview, PreviewConfig),
    (Export, ExportConfig),
}

impl NodeConfig {
    /// The flat key-value form of this configuration, with non-finite numbers tagged.
    pub fn to_value(&self) -> Value {
        // Every config struct serializes to a JSON object, so this cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
