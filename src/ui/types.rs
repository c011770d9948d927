use crate::error::GraphConversionError;
use crate::graph::{Edge, Graph, IntoGraph, Node, NodeKind};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// UI node as exported by the flow editor. Canvas-only fields such as `position` are ignored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// UI edge connecting two node handles
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiEdge {
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(
        default,
        rename = "sourceHandle",
        alias = "source_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_handle: Option<String>,
    #[serde(
        default,
        rename = "targetHandle",
        alias = "target_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_handle: Option<String>,
}

/// Complete UI graph structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UiGraph {
    pub nodes: Vec<UiNode>,
    #[serde(default)]
    pub edges: Vec<UiEdge>,
}

impl UiGraph {
    pub fn from_json(json: &str) -> Result<Self, GraphConversionError> {
        serde_json::from_str(json).map_err(|e| GraphConversionError::JsonParseError(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, GraphConversionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GraphConversionError::JsonParseError(e.to_string()))
    }
}

impl From<&Graph> for UiGraph {
    fn from(graph: &Graph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| UiNode {
                id: node.id.clone(),
                node_type: node.kind.type_name().to_string(),
                data: serde_json::Value::Object(node.data.clone()),
            })
            .collect();
        let edges = graph
            .edges
            .iter()
            .map(|edge| UiEdge {
                id: Some(edge.id.clone()),
                source: edge.source.clone(),
                target: edge.target.clone(),
                source_handle: edge.source_handle.clone(),
                target_handle: edge.target_handle.clone(),
            })
            .collect();
        Self { nodes, edges }
    }
}

impl IntoGraph for UiGraph {
    fn into_graph(self) -> Result<Graph, GraphConversionError> {
        let mut seen = AHashSet::new();
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for ui_node in self.nodes {
            if !seen.insert(ui_node.id.clone()) {
                return Err(GraphConversionError::DuplicateNodeId(ui_node.id));
            }
            let data = match ui_node.data {
                serde_json::Value::Object(map) => map,
                serde_json::Value::Null => serde_json::Map::new(),
                other => {
                    return Err(GraphConversionError::InvalidNodeData {
                        node_id: ui_node.id,
                        message: format!("expected an object, found `{}`", other),
                    });
                }
            };
            nodes.push(Node {
                id: ui_node.id,
                kind: NodeKind::from_type_name(&ui_node.node_type),
                data,
            });
        }

        // Exports without edge ids get positional ones.
        let edges = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(i, ui_edge)| Edge {
                id: ui_edge.id.unwrap_or_else(|| format!("edge-{}", i)),
                source: ui_edge.source,
                target: ui_edge.target,
                source_handle: ui_edge.source_handle,
                target_handle: ui_edge.target_handle,
            })
            .collect();

        Ok(Graph { nodes, edges })
    }
}
