use super::kind::NodeKind;
use crate::boilerplate::DEFAULT_BOILERPLATE;
use serde_json::{Map, Value};

/// The complete, canonical snapshot of a bot workflow, ready for compilation.
/// This is the target structure for any editor format conversion.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// A single typed unit of behavior in the workflow.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub data: Map<String, Value>,
}

/// A directed connection from a source node's port to a target node's port.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            data: Map::new(),
        }
    }

    /// Builder-style setter for a data field.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.data.insert(field.to_string(), value.into());
        self
    }

    /// Reads a data field as text.
    ///
    /// Strings are returned as-is, numbers and booleans in their JSON spelling. Missing
    /// fields, `null`, empty strings and structured values are all treated as absent.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.data.get(field)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Reads a data field as text, falling back to `default` when it is absent.
    pub fn text_or(&self, field: &str, default: &str) -> String {
        self.text(field).unwrap_or_else(|| default.to_string())
    }
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        source_handle: Option<&str>,
        target: impl Into<String>,
        target_handle: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: source_handle.map(str::to_string),
            target_handle: target_handle.map(str::to_string),
        }
    }

    /// A control-flow edge leaving `source` through `port`.
    pub fn flow(
        id: impl Into<String>,
        source: impl Into<String>,
        port: &str,
        target: impl Into<String>,
    ) -> Self {
        Self::new(id, source, Some(port), target, None)
    }

    /// A data edge feeding `port` of `target`.
    pub fn data(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        port: &str,
    ) -> Self {
        Self::new(id, source, None, target, Some(port))
    }
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// The graph a fresh editor session starts with: a single start node carrying the
    /// bundled boilerplate and a placeholder token.
    pub fn starter() -> Self {
        let start = Node::new("1", NodeKind::Start)
            .with("label", "Start Bot")
            .with("description", "Initializes a Telegram bot using Flask.")
            .with("token", "YOUR_TOKEN_HERE")
            .with("botName", "MyAwesomeBot")
            .with("code", DEFAULT_BOILERPLATE);
        Self {
            nodes: vec![start],
            edges: Vec::new(),
        }
    }

    /// The first start node, in node order.
    pub fn start_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Start)
    }

    /// All nodes of one kind, in node order.
    pub fn nodes_of<'a>(&'a self, kind: &'a NodeKind) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| &n.kind == kind)
    }
}
