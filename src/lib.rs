//! # Kumiki - Pipeline Data Model & Schema Engine
//!
//! **Kumiki** is the typed core behind a visual data-pipeline editor. It owns the
//! node/edge/pipeline model, the per-node-type configuration contract, schema
//! inference over untyped records, schema compatibility checks for new edges and a
//! lossless text encoding of whole pipelines.
//!
//! Everything here is synchronous and pure: no I/O, no global state. Editors,
//! persistence layers and execution engines call into it.
//!
//! ## Core Workflow
//!
//! 1.  **Create Nodes**: Use [`node::create_node`] (or a configured [`node::NodeFactory`])
//!     to place typed nodes on the canvas with their default configuration.
//! 2.  **Validate Configuration**: Run [`validate::validate_node_config`] whenever the user
//!     edits a node. All problems are returned at once.
//! 3.  **Infer Schemas**: When data reaches a node, build a [`schema::DataPreview`] and
//!     check new edges with [`schema::schemas_compatible`].
//! 4.  **Save & Load**: [`codec::serialize_pipeline`] and [`codec::deserialize_pipeline`]
//!     round-trip the graph, including `NaN` and infinite numbers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kumiki::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let mut pipeline = Pipeline::new("Orders", "alice");
//!
//!     let source = pipeline.add_node(create_node(NodeType::ApiFetch, Position::new(0.0, 0.0)));
//!     let limit = pipeline.add_node(create_node(NodeType::Limit, Position::new(240.0, 0.0)));
//!     pipeline.connect(source, limit);
//!
//!     let check = validate_node_config(NodeType::ApiFetch, &pipeline.nodes[0].config);
//!     for error in &check.errors {
//!         println!("api-fetch: {}", error);
//!     }
//!
//!     let rows = vec![json!({"id": 1, "name": "John"}), json!({"id": 2, "name": null})];
//!     let schema = generate_schema(&rows);
//!     println!("{:?}", schema.fields);
//!
//!     let text = serialize_pipeline(&pipeline)?;
//!     let restored = deserialize_pipeline(&text)?;
//!     assert!(pipelines_equal(&pipeline, &restored));
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod node;
pub mod pipeline;
pub mod prelude;
pub mod schema;
pub mod validate;
