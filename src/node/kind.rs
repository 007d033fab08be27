use crate::error::NodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role a node type plays in a pipeline. Derived from the type, never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Source,
    Transform,
    Output,
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeCategory::Source => write!(f, "source"),
            NodeCategory::Transform => write!(f, "transform"),
            NodeCategory::Output => write!(f, "output"),
        }
    }
}

/// Master macro to define the node type catalog: the enum, its wire names and its metadata.
macro_rules! define_node_types {
    ( $( ($variant:ident, $name:literal, $label:literal, $category:ident, $icon:literal, $color:literal) ),* $(,)? ) => {
        /// The closed set of node types a pipeline can contain.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum NodeType {
            $( #[serde(rename = $name)] $variant, )*
        }

        impl NodeType {
            /// Every registered node type, in catalog order.
            pub const ALL: &'static [NodeType] = &[ $( NodeType::$variant, )* ];

            /// The kebab-case name used on the wire, e.g. `api-fetch`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( NodeType::$variant => $name, )*
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $( NodeType::$variant => $label, )*
                }
            }

            pub fn category(&self) -> NodeCategory {
                match self {
                    $( NodeType::$variant => NodeCategory::$category, )*
                }
            }

            pub fn icon(&self) -> &'static str {
                match self {
                    $( NodeType::$variant => $icon, )*
                }
            }

            pub fn color(&self) -> &'static str {
                match self {
                    $( NodeType::$variant => $color, )*
                }
            }
        }

        impl FromStr for NodeType {
            type Err = NodeError;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                match name {
                    $( $name => Ok(NodeType::$variant), )*
                    _ => Err(NodeError::UnknownNodeType(name.to_string())),
                }
            }
        }
    };
}

define_node_types! {
    // Sources
    (ApiFetch, "api-fetch", "API Fetch", Source, "globe", "#3b82f6"),
    (CsvUpload, "csv-upload", "CSV Upload", Source, "file-spreadsheet", "#3b82f6"),
    (JsonParser, "json-parser", "JSON Parser", Source, "braces", "#3b82f6"),

    // Transforms
    (Filter, "filter", "Filter", Transform, "filter", "#8b5cf6"),
    (Map, "map", "Map", Transform, "shuffle", "#8b5cf6"),
    (Reduce, "reduce", "Reduce", Transform, "minimize", "#8b5cf6"),
    (Aggregate, "aggregate", "Aggregate", Transform, "layers", "#8b5cf6"),
    (Join, "join", "Join", Transform, "merge", "#8b5cf6"),
    (Sort, "sort", "Sort", Transform, "arrow-up-down", "#8b5cf6"),
    (Limit, "limit", "Limit", Transform, "scissors", "#8b5cf6"),
    (RenameFields, "rename-fields", "Rename Fields", Transform, "pencil", "#8b5cf6"),
    (MathTransform, "math-transform", "Math Transform", Transform, "calculator", "#8b5cf6"),
    (GroupBy, "group-by", "Group By", Transform, "group", "#8b5cf6"),

    // Outputs
    (Preview, "preview", "Preview", Output, "eye", "#10b981"),
    (Export, "export", "Export", Output, "download", "#10b981"),
}

impl NodeType {
    /// All node types belonging to `category`, in catalog order.
    pub fn by_category(category: NodeCategory) -> impl Iterator<Item = NodeType> {
        NodeType::ALL
            .iter()
            .copied()
            .filter(move |kind| kind.category() == category)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
