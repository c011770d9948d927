//! Synthesizes the top-level definitions a graph contributes to the boilerplate: async
//! handler methods, handler registrations and Flask routes.

use super::generator::{BlockGenerator, CallStyle, INDENT, VisitedSet, indent, quote_double};
use crate::graph::{GraphIndex, Node, NodeKind, port};
use tracing::{debug, warn};

/// Indent level of async method bodies.
pub const METHOD_BODY_LEVEL: usize = 2;
/// Indent level of Flask route bodies.
pub const ROUTE_BODY_LEVEL: usize = 1;

const DEFAULT_ROUTE_BODY: &str = r#"return "OK", 200"#;

/// The kind of Telegram update a registered handler reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerKind {
    Command { trigger: String },
    Text,
    Photo,
}

impl HandlerKind {
    /// Reads `handler_type` and `trigger` from a register-handler node.
    pub fn from_node(node: &Node) -> Option<Self> {
        let trigger = node.text_or("trigger", "");
        match node.text("handler_type").as_deref() {
            Some("command") => Some(HandlerKind::Command { trigger }),
            Some("message") if trigger == "photo" => Some(HandlerKind::Photo),
            Some("message") => Some(HandlerKind::Text),
            Some("photo") => Some(HandlerKind::Photo),
            _ => None,
        }
    }

    /// The registration line wiring this kind of update to `function_name`.
    pub fn registration(&self, function_name: &str) -> String {
        match self {
            HandlerKind::Command { trigger } => format!(
                "telegram_app.add_handler(CommandHandler(\"{}\", {}))",
                trigger, function_name
            ),
            HandlerKind::Text => format!(
                "telegram_app.add_handler(MessageHandler(filters.TEXT & ~filters.COMMAND, {}))",
                function_name
            ),
            HandlerKind::Photo => format!(
                "telegram_app.add_handler(MessageHandler(filters.PHOTO, {}))",
                function_name
            ),
        }
    }
}

/// Builds `async def` handlers, registrations and routes from one graph snapshot.
pub struct EntryPoints<'g, 'a> {
    index: &'g GraphIndex<'a>,
}

impl<'g, 'a> EntryPoints<'g, 'a> {
    pub fn new(index: &'g GraphIndex<'a>) -> Self {
        Self { index }
    }

    /// One `async def` per async-method node, in node order.
    pub fn async_methods(&self) -> Vec<String> {
        let generator = BlockGenerator::new(self.index, CallStyle::Suspending);
        self.index
            .graph()
            .nodes_of(&NodeKind::AsyncMethod)
            .map(|node| self.async_method(node, &generator))
            .collect()
    }

    fn async_method(&self, node: &Node, generator: &BlockGenerator<'_, '_>) -> String {
        let name = node.text_or("method_name", "my_async_method");
        let body_indent = indent(METHOD_BODY_LEVEL);
        debug!(node = %node.id, method = %name, "synthesizing async method");

        let mut def = format!(
            "\nasync def {}(update: Update, context: CallbackContext):\n",
            name
        );
        def.push_str(&format!(
            "{}chat_id = update.effective_chat.id\n",
            body_indent
        ));
        def.push_str(&format!(
            "{}logger.info(f\"Handling method: {} for chat: {{chat_id}}\")\n",
            body_indent, name
        ));
        if let Some(greeting) = node.text("message") {
            def.push_str(&format!(
                "{}await update.message.reply_text({})\n",
                body_indent,
                quote_double(&greeting)
            ));
        }

        let body = self
            .index
            .outbound(&node.id, port::OUTPUT)
            .map(|edge| generator.generate(&edge.target, METHOD_BODY_LEVEL, &mut VisitedSet::new()))
            .unwrap_or_default();
        if body.is_empty() {
            def.push_str(&format!("{}pass\n", body_indent));
        } else {
            def.push_str(&body);
        }
        def
    }

    /// One registration line per register-handler node, in node order.
    ///
    /// Nodes with an unknown handler type register nothing.
    pub fn registrations(&self) -> Vec<String> {
        self.index
            .graph()
            .nodes_of(&NodeKind::RegisterHandler)
            .filter_map(|node| match HandlerKind::from_node(node) {
                Some(kind) => {
                    let function_name = node.text_or("function_name", "my_async_method");
                    Some(kind.registration(&function_name))
                }
                None => {
                    warn!(
                        node = %node.id,
                        handler_type = ?node.text("handler_type"),
                        "unknown handler type, nothing registered"
                    );
                    None
                }
            })
            .collect()
    }

    /// One Flask route definition per router node, in node order.
    pub fn routes(&self) -> Vec<String> {
        let generator = BlockGenerator::new(self.index, CallStyle::Synchronous);
        self.index
            .graph()
            .nodes_of(&NodeKind::Router)
            .map(|node| self.route(node, &generator))
            .collect()
    }

    fn route(&self, node: &Node, generator: &BlockGenerator<'_, '_>) -> String {
        let route_name = node.text_or("routeName", "/custom");
        let method = node.text_or("method", "GET");
        debug!(node = %node.id, route = %route_name, "synthesizing flask route");

        let mut body = match self.index.outbound(&node.id, port::OUTPUT) {
            Some(edge) => generator.generate(&edge.target, ROUTE_BODY_LEVEL, &mut VisitedSet::new()),
            None => node
                .text_or("code", DEFAULT_ROUTE_BODY)
                .lines()
                .map(|line| format!("{}{}\n", INDENT, line))
                .collect(),
        };
        if !has_return(&body) {
            body.push_str(&format!("{}{}\n", INDENT, DEFAULT_ROUTE_BODY));
        }

        format!(
            "\n@app.route(\"{}\", methods=[\"{}\"])\ndef custom_route_{}():\n{}",
            route_name,
            method,
            identifier(&node.id),
            body
        )
    }
}

fn has_return(body: &str) -> bool {
    body.lines().any(|line| {
        let line = line.trim_start();
        line == "return" || line.starts_with("return ") || line.starts_with("return(")
    })
}

/// Maps a node id onto a Python identifier suffix.
fn identifier(node_id: &str) -> String {
    node_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_return_ignores_words_containing_return() {
        assert!(has_return("    return \"done\", 201\n"));
        assert!(has_return("    if x:\n        return\n"));
        assert!(!has_return("    returned = 1\n"));
        assert!(!has_return("    logger.info('no return here')\n"));
    }

    #[test]
    fn test_identifier_replaces_every_separator() {
        assert_eq!(identifier("dndnode_3"), "dndnode_3");
        assert_eq!(identifier("a-b-c"), "a_b_c");
        assert_eq!(identifier("route.1 x"), "route_1_x");
    }
}
