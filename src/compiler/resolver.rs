use crate::graph::{GraphIndex, Node, NodeKind, port};
use ahash::AHashSet;
use tracing::trace;

/// Resolves the expression text feeding a node's data port.
///
/// Resolution only reads the graph. A function-call source recurses into its own `params`
/// port, so a visited guard travels with the recursion and a function call reached again
/// resolves to `None`.
pub struct ValueResolver<'g, 'a> {
    index: &'g GraphIndex<'a>,
}

impl<'g, 'a> ValueResolver<'g, 'a> {
    pub fn new(index: &'g GraphIndex<'a>) -> Self {
        Self { index }
    }

    /// The expression wired into `port` of `target_id`, or `None` when the port is
    /// unconnected, its source is missing, or its source is a function call already being
    /// resolved (including `target_id` itself).
    pub fn resolve(&self, target_id: &str, port: &str) -> Option<String> {
        let mut guard = AHashSet::new();
        guard.insert(target_id.to_string());
        self.resolve_guarded(target_id, port, &mut guard)
    }

    /// Like `resolve`, with a literal fallback.
    pub fn resolve_or(&self, target_id: &str, port: &str, default: &str) -> String {
        self.resolve(target_id, port)
            .unwrap_or_else(|| default.to_string())
    }

    fn resolve_guarded(
        &self,
        target_id: &str,
        port: &str,
        guard: &mut AHashSet<String>,
    ) -> Option<String> {
        let edge = self.index.inbound(target_id, port)?;
        let source = self.index.node(&edge.source)?;

        let value = match &source.kind {
            NodeKind::Variable => variable_name(source),
            NodeKind::Text => quote_single(&source.text_or("text", "")),
            NodeKind::FunctionCall => {
                // Only function calls recurse, so only they can re-enter.
                if !guard.insert(source.id.clone()) {
                    trace!(node = target_id, port = port, source = %source.id, "value cycle, resolving to none");
                    return None;
                }
                let params = self
                    .resolve_guarded(&source.id, port::PARAMS, guard)
                    .unwrap_or_default();
                format!("{}({})", function_name(source), params)
            }
            _ => "''".to_string(),
        };
        Some(value)
    }
}

pub(super) fn variable_name(node: &Node) -> String {
    node.text_or("name", "my_variable")
}

pub(super) fn function_name(node: &Node) -> String {
    node.text_or("function_name", "handle_user_data")
}

/// Renders text as a single-quoted Python string literal.
pub fn quote_single(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}
