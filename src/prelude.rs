//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the botflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use botflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/workflow.json")?;
//! let graph = UiGraph::from_json(&json)?.into_graph()?;
//! let source = Compiler::builder(graph).build().compile();
//! println!("{}", source);
//! # Ok(())
//! # }
//! ```

// Core compilation
pub use crate::compiler::{
    AssemblyReport, BlockGenerator, CallStyle, CompilationArtifacts, Compiler, CompilerBuilder,
    TemplateAssembler, ValueResolver, VisitedSet,
};

// Graph model
pub use crate::graph::{Edge, Graph, GraphIndex, IntoGraph, Node, NodeKind, port};
pub use crate::ui::{UiEdge, UiGraph, UiNode};

// Error types
pub use crate::error::{CompileError, GraphConversionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
