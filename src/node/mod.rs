pub mod config;
pub mod factory;
pub mod kind;
pub mod model;

pub use config::*;
pub use factory::*;
pub use kind::*;
pub use model::*;
