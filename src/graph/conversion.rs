use super::definition::Graph;
use crate::error::GraphConversionError;

/// A trait for editor data models that can be converted into a botflow `Graph`.
///
/// This is the extension point for supporting editors other than the bundled React Flow
/// export. Implement it on your own deserialized structs to hand the compiler a snapshot.
///
/// # Example
///
/// ```rust,no_run
/// use botflow::prelude::*;
/// use botflow::error::GraphConversionError;
///
/// struct MyStep { id: String, kind: String }
/// struct MyWorkflow { steps: Vec<MyStep> }
///
/// impl IntoGraph for MyWorkflow {
///     fn into_graph(self) -> std::result::Result<Graph, GraphConversionError> {
///         let nodes = self
///             .steps
///             .into_iter()
///             .map(|s| Node::new(s.id, NodeKind::from_type_name(&s.kind)))
///             .collect();
///         Ok(Graph::new(nodes, vec![]))
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a compiler-ready graph snapshot.
    fn into_graph(self) -> Result<Graph, GraphConversionError>;
}

impl IntoGraph for Graph {
    fn into_graph(self) -> Result<Graph, GraphConversionError> {
        Ok(self)
    }
}
