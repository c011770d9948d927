use super::definition::{Edge, Graph, Node};
use super::kind::port;
use ahash::AHashMap;
use itertools::Itertools;

/// A port that more than one edge is wired to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousPort {
    pub node_id: String,
    pub port: String,
    /// Edge ids in edge order. The first one is the edge the compiler follows.
    pub edges: Vec<String>,
}

/// Lookup tables over one graph snapshot.
///
/// Built once per compile pass. Every table keeps the first match in sequence order, so
/// lookups agree with a linear scan of `nodes`/`edges`.
pub struct GraphIndex<'a> {
    graph: &'a Graph,
    nodes: AHashMap<&'a str, &'a Node>,
    // Key: target node id, Value: target handle -> edges entering it
    inbound: AHashMap<&'a str, AHashMap<&'a str, Vec<&'a Edge>>>,
    // Key: source node id, Value: source handle -> edges leaving it
    outbound: AHashMap<&'a str, AHashMap<&'a str, Vec<&'a Edge>>>,
}

impl<'a> GraphIndex<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let mut nodes = AHashMap::new();
        for node in &graph.nodes {
            nodes.entry(node.id.as_str()).or_insert(node);
        }

        let mut inbound: AHashMap<&str, AHashMap<&str, Vec<&Edge>>> = AHashMap::new();
        let mut outbound: AHashMap<&str, AHashMap<&str, Vec<&Edge>>> = AHashMap::new();
        for edge in &graph.edges {
            if let Some(handle) = edge.target_handle.as_deref() {
                inbound
                    .entry(edge.target.as_str())
                    .or_default()
                    .entry(handle)
                    .or_default()
                    .push(edge);
            }
            if let Some(handle) = edge.source_handle.as_deref() {
                outbound
                    .entry(edge.source.as_str())
                    .or_default()
                    .entry(handle)
                    .or_default()
                    .push(edge);
            }
        }

        Self {
            graph,
            nodes,
            inbound,
            outbound,
        }
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn node(&self, id: &str) -> Option<&'a Node> {
        self.nodes.get(id).copied()
    }

    /// The first edge entering `port` of `node_id`.
    pub fn inbound(&self, node_id: &str, port: &str) -> Option<&'a Edge> {
        self.inbound
            .get(node_id)
            .and_then(|ports| ports.get(port))
            .and_then(|edges| edges.first().copied())
    }

    /// The first edge leaving `node_id` through `port`.
    pub fn outbound(&self, node_id: &str, port: &str) -> Option<&'a Edge> {
        self.outbound
            .get(node_id)
            .and_then(|ports| ports.get(port))
            .and_then(|edges| edges.first().copied())
    }

    /// The node a flow port leads to, if both the edge and its target exist.
    pub fn successor(&self, node_id: &str, port: &str) -> Option<&'a Node> {
        self.outbound(node_id, port)
            .and_then(|edge| self.node(&edge.target))
    }

    /// Every port wired to more than one edge, sorted by node id then port name.
    ///
    /// Inbound ports and outbound flow ports are reported. A value handle feeding several
    /// consumers is ordinary fan-out and is not.
    pub fn ambiguous_ports(&self) -> Vec<AmbiguousPort> {
        let inbound = self.inbound.iter().map(|(node_id, ports)| (node_id, ports, false));
        let outbound = self.outbound.iter().map(|(node_id, ports)| (node_id, ports, true));
        inbound
            .chain(outbound)
            .flat_map(|(node_id, ports, flow_only)| {
                ports
                    .iter()
                    .filter(move |(handle, edges)| {
                        edges.len() > 1 && (!flow_only || port::is_flow(handle))
                    })
                    .map(move |(port, edges)| AmbiguousPort {
                        node_id: node_id.to_string(),
                        port: port.to_string(),
                        edges: edges.iter().map(|e| e.id.clone()).collect(),
                    })
            })
            .sorted_by(|a, b| {
                (a.node_id.as_str(), a.port.as_str(), &a.edges)
                    .cmp(&(b.node_id.as_str(), b.port.as_str(), &b.edges))
            })
            .collect()
    }
}
