//! Serde model of the flow editor's JSON export.

mod types;

pub use types::*;
