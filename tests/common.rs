//! Common test utilities for building workflow graphs.
use botflow::boilerplate::DEFAULT_BOILERPLATE;
use botflow::prelude::*;

/// A start node carrying the bundled boilerplate and a test token.
#[allow(dead_code)]
pub fn start_node() -> Node {
    Node::new("start", NodeKind::Start)
        .with("token", "TEST_TOKEN")
        .with("code", DEFAULT_BOILERPLATE)
}

#[allow(dead_code)]
pub fn async_method(id: &str, name: &str) -> Node {
    Node::new(id, NodeKind::AsyncMethod).with("method_name", name)
}

#[allow(dead_code)]
pub fn register_command(id: &str, trigger: &str, function_name: &str) -> Node {
    Node::new(id, NodeKind::RegisterHandler)
        .with("handler_type", "command")
        .with("trigger", trigger)
        .with("function_name", function_name)
}

#[allow(dead_code)]
pub fn text(id: &str, content: &str) -> Node {
    Node::new(id, NodeKind::Text).with("text", content)
}

#[allow(dead_code)]
pub fn variable(id: &str, name: &str) -> Node {
    Node::new(id, NodeKind::Variable).with("name", name)
}

#[allow(dead_code)]
pub fn function_call(id: &str, name: &str) -> Node {
    Node::new(id, NodeKind::FunctionCall).with("function_name", name)
}

#[allow(dead_code)]
pub fn logger(id: &str) -> Node {
    Node::new(id, NodeKind::Logger)
}

#[allow(dead_code)]
pub fn send_message(id: &str) -> Node {
    Node::new(id, NodeKind::SendMessage)
}

/// Control-flow edge `source --port--> target`.
#[allow(dead_code)]
pub fn flow(source: &str, port: &str, target: &str) -> Edge {
    Edge::flow(format!("{}-{}-{}", source, port, target), source, port, target)
}

/// Data edge feeding `port` of `target` from `source`.
#[allow(dead_code)]
pub fn data(source: &str, target: &str, port: &str) -> Edge {
    Edge::data(format!("{}-{}-{}", source, target, port), source, target, port)
}

/// Generates the block starting at `node_id` with a fresh visited set.
#[allow(dead_code)]
pub fn generate(graph: &Graph, node_id: &str, level: usize, style: CallStyle) -> String {
    let index = GraphIndex::new(graph);
    BlockGenerator::new(&index, style).generate(node_id, level, &mut VisitedSet::new())
}

/// Resolves one data port with a fresh resolver.
#[allow(dead_code)]
pub fn resolve(graph: &Graph, node_id: &str, port: &str) -> Option<String> {
    let index = GraphIndex::new(graph);
    ValueResolver::new(&index).resolve(node_id, port)
}

#[allow(dead_code)]
pub fn compile(graph: Graph) -> String {
    Compiler::builder(graph).build().compile()
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
#[allow(dead_code)]
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// A React Flow export with a `/greet` command that branches on a variable.
#[allow(dead_code)]
pub const GREETING_GRAPH_JSON: &str = r#"{
  "nodes": [
    {
      "id": "1",
      "type": "startNode",
      "position": { "x": 250, "y": 50 },
      "data": {
        "label": "Start Bot",
        "token": "123:ABC",
        "webhook_url": "https://bot.example.com/webhook"
      }
    },
    {
      "id": "dndnode_0",
      "type": "asyncMethodNode",
      "position": { "x": 0, "y": 200 },
      "data": { "method_name": "greet", "message": "Hello there!" }
    },
    {
      "id": "dndnode_1",
      "type": "ifCondition",
      "data": { "label": "If Condition" }
    },
    {
      "id": "dndnode_2",
      "type": "variableNode",
      "data": { "name": "is_admin" }
    },
    {
      "id": "dndnode_3",
      "type": "sendMessage",
      "data": {}
    },
    {
      "id": "dndnode_4",
      "type": "textNode",
      "data": { "text": "Welcome back, admin" }
    },
    {
      "id": "dndnode_5",
      "type": "delay",
      "data": { "seconds": 2 }
    },
    {
      "id": "dndnode_6",
      "type": "registerHandlerNode",
      "data": { "handler_type": "command", "trigger": "greet", "function_name": "greet" }
    },
    {
      "id": "dndnode_7",
      "type": "routerNode",
      "data": { "routeName": "/health", "method": "GET", "code": "return \"healthy\", 200" }
    }
  ],
  "edges": [
    { "id": "e1", "source": "dndnode_0", "sourceHandle": "output", "target": "dndnode_1", "targetHandle": null },
    { "id": "e2", "source": "dndnode_2", "sourceHandle": null, "target": "dndnode_1", "targetHandle": "condition" },
    { "id": "e3", "source": "dndnode_1", "sourceHandle": "true", "target": "dndnode_3" },
    { "id": "e4", "source": "dndnode_4", "target": "dndnode_3", "targetHandle": "message" },
    { "id": "e5", "source": "dndnode_1", "sourceHandle": "output", "target": "dndnode_5" }
  ]
}"#;
