use std::fmt;

/// Master macro to define every node kind the editor can place, its editor type name,
/// and the lookup tables between the two.
macro_rules! define_node_kinds {
    ( $( ($variant:ident, $type_name:literal) ),* $(,)? ) => {
        /// The closed set of node kinds a graph can contain.
        ///
        /// Type names the compiler does not know are kept verbatim in `Unrecognized`, so a
        /// node with an unexpected type still compiles to a comment stub instead of vanishing.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $( $variant, )*
            Unrecognized(String),
        }

        impl NodeKind {
            /// Every known kind, in palette order.
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$variant, )* ];

            /// Parses an editor type name. Unknown names become `Unrecognized`.
            pub fn from_type_name(name: &str) -> Self {
                match name {
                    $( $type_name => NodeKind::$variant, )*
                    other => NodeKind::Unrecognized(other.to_string()),
                }
            }

            /// Parses an editor type name, returning `None` for unknown names.
            pub fn known(name: &str) -> Option<Self> {
                match name {
                    $( $type_name => Some(NodeKind::$variant), )*
                    _ => None,
                }
            }

            /// The editor type name of this kind.
            pub fn type_name(&self) -> &str {
                match self {
                    $( NodeKind::$variant => $type_name, )*
                    NodeKind::Unrecognized(name) => name,
                }
            }
        }
    };
}

define_node_kinds! {
    (Start, "startNode"),
    (Router, "routerNode"),
    (Variable, "variableNode"),
    (Function, "functionNode"),
    (Text, "textNode"),
    (IfCondition, "ifCondition"),
    (SendMessage, "sendMessage"),
    (Logger, "logger"),
    (ApiCall, "apiCall"),
    (RateLimiter, "rateLimiter"),
    (Delay, "delay"),
    (ErrorHandler, "errorHandler"),
    (FunctionCall, "functionCall"),
    (MessageHandler, "messageHandler"),
    (RegisterHandler, "registerHandlerNode"),
    (AsyncMethod, "asyncMethodNode"),
    (PhotoUploadHandler, "photoUploadHandler"),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Port names shared by the resolver, the generator and the entry-point synthesizers.
pub mod port {
    // Flow ports
    pub const OUTPUT: &str = "output";
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
    pub const TRY: &str = "try";

    /// Ports that sequence statements. Every other port carries a value.
    pub const FLOW: [&str; 4] = [OUTPUT, TRUE, FALSE, TRY];

    pub fn is_flow(name: &str) -> bool {
        FLOW.contains(&name)
    }

    // Data ports
    pub const VALUE: &str = "value";
    pub const MESSAGE: &str = "message";
    pub const CONDITION: &str = "condition";
    pub const URL: &str = "url";
    pub const PARAMS: &str = "params";
    pub const SECONDS: &str = "seconds";
    pub const FALLBACK_MESSAGE: &str = "fallback_message";
    pub const SUCCESS_MESSAGE: &str = "success_message";
}
