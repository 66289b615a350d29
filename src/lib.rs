pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod hooks;
pub mod models;
pub mod relations;
pub mod store;
pub mod telemetry;

pub use db::Database;
pub use error::{Error, Result};
pub use relations::{DeletePolicy, RelationshipCoordinator};
