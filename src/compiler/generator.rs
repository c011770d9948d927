use super::resolver::{ValueResolver, function_name, variable_name};
use crate::graph::{GraphIndex, Node, NodeKind, port};
use ahash::AHashSet;
use tracing::trace;

/// One indentation level of generated source.
pub const INDENT: &str = "    ";

pub fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

/// Node ids already emitted along the current chain.
///
/// A chain shares one set; each branch body starts from its own clone, so sibling branches
/// never suppress each other's nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet(AHashSet<String>);

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.0.contains(node_id)
    }

    /// Marks `node_id` visited. Returns `false` if it already was.
    pub fn insert(&mut self, node_id: &str) -> bool {
        // Looked up by `&str` first so a hit does not allocate.
        if self.0.contains(node_id) {
            return false;
        }
        self.0.insert(node_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How suspending calls are spelled in the generated block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallStyle {
    /// Inside `async def` handlers: `await reply(...)`.
    #[default]
    Suspending,
    /// Inside synchronous Flask routes: `reply(...)`.
    Synchronous,
}

impl CallStyle {
    fn prefix(self) -> &'static str {
        match self {
            CallStyle::Suspending => "await ",
            CallStyle::Synchronous => "",
        }
    }
}

/// Compiles control-flow chains into statements.
pub struct BlockGenerator<'g, 'a> {
    index: &'g GraphIndex<'a>,
    resolver: ValueResolver<'g, 'a>,
    style: CallStyle,
}

impl<'g, 'a> BlockGenerator<'g, 'a> {
    pub fn new(index: &'g GraphIndex<'a>, style: CallStyle) -> Self {
        Self {
            index,
            resolver: ValueResolver::new(index),
            style,
        }
    }

    /// Emits `node_id` and everything reachable from it through `output` edges, one
    /// fragment per node, at `level`.
    ///
    /// Unknown or already visited ids end the chain, which is what makes generation
    /// terminate on cyclic graphs.
    pub fn generate(&self, node_id: &str, level: usize, visited: &mut VisitedSet) -> String {
        let mut code = String::new();
        let mut next = self.index.node(node_id);
        while let Some(node) = next {
            if !visited.insert(&node.id) {
                trace!(node = %node.id, "already visited, chain ends");
                break;
            }
            self.emit(node, level, visited, &mut code);
            next = self.index.successor(&node.id, port::OUTPUT);
        }
        code
    }

    fn emit(&self, node: &Node, level: usize, visited: &VisitedSet, code: &mut String) {
        let await_ = self.style.prefix();
        let id = node.id.as_str();
        match &node.kind {
            NodeKind::Variable => {
                let value = self.resolver.resolve_or(id, port::VALUE, "''");
                push_line(code, level, &format!("{} = {}", variable_name(node), value));
            }
            NodeKind::SendMessage => {
                let message = self.resolver.resolve_or(id, port::MESSAGE, "''");
                push_line(
                    code,
                    level,
                    &format!("{}update.message.reply_text({})", await_, message),
                );
            }
            NodeKind::FunctionCall => {
                let params = self.resolver.resolve_or(id, port::PARAMS, "");
                push_line(
                    code,
                    level,
                    &format!("{}{}({})", await_, function_name(node), params),
                );
            }
            NodeKind::IfCondition => {
                let condition = self.resolver.resolve_or(id, port::CONDITION, "True");
                push_line(code, level, &format!("if {}:", condition));
                self.branch(
                    node,
                    port::TRUE,
                    level,
                    visited,
                    code,
                    "# No logic for true branch",
                );
                if self.index.outbound(id, port::FALSE).is_some() {
                    push_line(code, level, "else:");
                    self.branch(
                        node,
                        port::FALSE,
                        level,
                        visited,
                        code,
                        "# No logic for false branch",
                    );
                }
            }
            NodeKind::Delay => {
                let seconds = self
                    .resolver
                    .resolve(id, port::SECONDS)
                    .or_else(|| node.text("seconds"))
                    .unwrap_or_else(|| "1".to_string());
                push_line(code, level, &format!("{}asyncio.sleep({})", await_, seconds));
            }
            NodeKind::Logger => {
                let message = self.resolver.resolve_or(id, port::MESSAGE, "''");
                push_line(
                    code,
                    level,
                    &format!("logger.info(f\"Generated Log: {{{}}}\")", message),
                );
            }
            NodeKind::ApiCall => {
                let url = self.resolver.resolve_or(id, port::URL, "''");
                let method = node.text_or("method", "GET");
                let headers = node
                    .text("headers")
                    .map(|h| format!(", headers={}", h))
                    .unwrap_or_default();
                let body = node
                    .text("body")
                    .map(|b| format!(", json={}", b))
                    .unwrap_or_default();
                let store_as = node.text_or("store_response_as", "api_response");

                push_line(code, level, "try:");
                push_line(
                    code,
                    level + 1,
                    &format!(
                        "response = {}requests.request(method='{}', url={}{}{})",
                        await_, method, url, headers, body
                    ),
                );
                push_line(code, level + 1, "response.raise_for_status()");
                push_line(code, level + 1, &format!("{} = response.json()", store_as));
                push_line(code, level, "except Exception as e:");
                push_line(code, level + 1, "logger.error(f\"API call failed: {e}\")");
            }
            NodeKind::ErrorHandler => {
                let fallback = self
                    .resolver
                    .resolve_or(id, port::FALLBACK_MESSAGE, "\"An error occurred.\"");
                push_line(code, level, "try:");
                self.branch(node, port::TRY, level, visited, code, "# No logic in try block");
                push_line(code, level, "except Exception as e:");
                push_line(code, level + 1, "logger.error(f\"Error in a block: {e}\")");
                push_line(
                    code,
                    level + 1,
                    &format!("{}update.message.reply_text({})", await_, fallback),
                );
            }
            NodeKind::PhotoUploadHandler => {
                let success = self
                    .resolver
                    .resolve(id, port::SUCCESS_MESSAGE)
                    .unwrap_or_else(|| quote_double(&node.text_or("success_message", "")));
                push_line(code, level, "if update.message.photo:");
                push_line(code, level + 1, "file_id = update.message.photo[-1].file_id");
                push_line(
                    code,
                    level + 1,
                    "logger.info(f\"Received photo with file_id: {file_id}\")",
                );
                push_line(
                    code,
                    level + 1,
                    &format!("{}update.message.reply_text({})", await_, success),
                );
                if let Some(variable) = node.text("variable_to_set") {
                    push_line(code, level + 1, &format!("{} = True", variable));
                }
            }
            // Value-only: consumed through the resolver.
            NodeKind::Text => {}
            NodeKind::Start
            | NodeKind::Router
            | NodeKind::Function
            | NodeKind::RateLimiter
            | NodeKind::MessageHandler
            | NodeKind::RegisterHandler
            | NodeKind::AsyncMethod
            | NodeKind::Unrecognized(_) => {
                push_line(
                    code,
                    level,
                    &format!(
                        "# Node type '{}' at ID {} not explicitly handled in code generation block.",
                        node.kind, node.id
                    ),
                );
            }
        }
    }

    /// Emits the body behind a branching flow port at `level + 1`, starting from a copy of
    /// `visited`. An unconnected port, or one whose chain emits nothing, gets a `pass` line.
    fn branch(
        &self,
        node: &Node,
        flow_port: &str,
        level: usize,
        visited: &VisitedSet,
        code: &mut String,
        empty_note: &str,
    ) {
        let body = self
            .index
            .outbound(&node.id, flow_port)
            .map(|edge| {
                let mut branch_visited = visited.clone();
                self.generate(&edge.target, level + 1, &mut branch_visited)
            })
            .unwrap_or_default();

        if body.is_empty() {
            push_line(code, level + 1, &format!("pass {}", empty_note));
        } else {
            code.push_str(&body);
        }
    }
}

fn push_line(code: &mut String, level: usize, text: &str) {
    code.push_str(&indent(level));
    code.push_str(text);
    code.push('\n');
}

/// Renders text as a double-quoted Python string literal.
pub fn quote_double(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
