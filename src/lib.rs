//! # botflow - Workflow Graph to Bot Source Compiler
//!
//! **botflow** compiles node-based bot workflows, as drawn in a flow editor, into the
//! source of a Python Telegram bot served through a Flask webhook. Every compile pass is a
//! pure function of a graph snapshot and a boilerplate text: no I/O, no retained state,
//! byte-identical output for identical input.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Graph**: Parse the editor's JSON export into a [`ui::UiGraph`], or build
//!     a [`graph::Graph`] directly.
//! 2.  **Convert**: Implement (or use the bundled) [`graph::IntoGraph`] to obtain the
//!     canonical snapshot.
//! 3.  **Compile**: `Compiler::builder(graph).build().compile()` walks the flow edges from
//!     every async method and router node, resolves the values wired into each port, and
//!     splices the generated definitions into the start node's boilerplate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use botflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("workflow.json")?;
//!     let graph = UiGraph::from_json(&json)?.into_graph()?;
//!
//!     let compiler = Compiler::builder(graph)
//!         .with_type_mapping("myLogger", "logger")
//!         .build();
//!
//!     println!("{}", compiler.compile());
//!     Ok(())
//! }
//! ```
//!
//! ## Graph Shape
//!
//! Nodes carry a [`graph::NodeKind`] and a free-form data map. Edges connect named ports:
//! flow ports (`output`, `true`, `false`, `try`) sequence statements, data ports (`value`,
//! `message`, `condition`, `url`, `params`, ...) feed expressions. Malformed graphs never
//! fail to compile; missing values fall back to literal defaults and unknown node kinds
//! become comment stubs. The only failure is a graph without a start node.

pub mod boilerplate;
pub mod compiler;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod ui;
