use thiserror::Error;

/// Errors reported by a checked compile pass.
///
/// The lenient `Compiler::compile` never returns these; it degrades to placeholder text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("The graph has no start node, so there is no boilerplate to splice into")]
    MissingStartNode,

    #[error(
        "Port '{port}' of node '{node_id}' is wired to {} edges ({}); only one is allowed in strict mode",
        .edges.len(),
        .edges.join(", ")
    )]
    AmbiguousPort {
        node_id: String,
        port: String,
        edges: Vec<String>,
    },
}

/// Errors that can occur when converting an editor export into a botflow `Graph`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphConversionError {
    #[error("Failed to parse graph JSON: {0}")]
    JsonParseError(String),

    #[error("Node id '{0}' appears more than once in the graph")]
    DuplicateNodeId(String),

    #[error("Node '{node_id}' has invalid data: {message}")]
    InvalidNodeData { node_id: String, message: String },
}
