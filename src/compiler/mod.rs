use crate::boilerplate::{DEFAULT_BOILERPLATE, MISSING_START_PLACEHOLDER};
use crate::error::CompileError;
use crate::graph::{Graph, GraphIndex, NodeKind};
use ahash::AHashMap;
use tracing::{info, warn};

pub mod assembler;
pub mod entry;
pub mod generator;
pub mod resolver;

pub use assembler::{Anchor, AssemblyReport, Fragments, TemplateAssembler};
pub use entry::{EntryPoints, HandlerKind};
pub use generator::{BlockGenerator, CallStyle, VisitedSet};
pub use resolver::ValueResolver;

/// The result of a checked compile pass.
#[derive(Debug, Clone)]
pub struct CompilationArtifacts {
    pub source: String,
    pub report: AssemblyReport,
}

/// Compiles one graph snapshot into bot source.
///
/// A compiler owns its snapshot and keeps no state between calls; compiling the same graph
/// twice yields byte-identical output.
pub struct Compiler {
    graph: Graph,
    boilerplate: Option<String>,
    strict: bool,
}

pub struct CompilerBuilder {
    graph: Graph,
    type_mappings: AHashMap<String, NodeKind>,
    boilerplate: Option<String>,
    strict: bool,
}

impl CompilerBuilder {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            type_mappings: AHashMap::new(),
            boilerplate: None,
            strict: false,
        }
    }

    /// Treats nodes of the editor type `user_type_name` as `botflow_type_name` nodes.
    /// Unknown target names are ignored.
    pub fn with_type_mapping(mut self, user_type_name: &str, botflow_type_name: &str) -> Self {
        if let Some(kind) = NodeKind::known(botflow_type_name) {
            self.type_mappings.insert(user_type_name.to_string(), kind);
        }
        self
    }

    /// Boilerplate used when the start node carries none of its own.
    pub fn with_boilerplate(mut self, boilerplate: impl Into<String>) -> Self {
        self.boilerplate = Some(boilerplate.into());
        self
    }

    /// Rejects ports wired to more than one edge in `try_compile`.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(self) -> Compiler {
        let mut graph = self.graph;
        if !self.type_mappings.is_empty() {
            for node in &mut graph.nodes {
                if let NodeKind::Unrecognized(name) = &node.kind {
                    if let Some(kind) = self.type_mappings.get(name) {
                        node.kind = kind.clone();
                    }
                }
            }
        }
        Compiler {
            graph,
            boilerplate: self.boilerplate,
            strict: self.strict,
        }
    }
}

impl Compiler {
    pub fn builder(graph: Graph) -> CompilerBuilder {
        CompilerBuilder::new(graph)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Compiles the graph, degrading every failure to placeholder text.
    pub fn compile(&self) -> String {
        match self.try_compile() {
            Ok(artifacts) => artifacts.source,
            Err(CompileError::MissingStartNode) => MISSING_START_PLACEHOLDER.to_string(),
            Err(e) => format!("# {}", e),
        }
    }

    /// Compiles the graph, reporting a missing start node (and, in strict mode, ambiguous
    /// port wiring) as errors.
    pub fn try_compile(&self) -> Result<CompilationArtifacts, CompileError> {
        let start = self.graph.start_node().ok_or(CompileError::MissingStartNode)?;
        let index = GraphIndex::new(&self.graph);

        let ambiguous = index.ambiguous_ports();
        if let Some(first) = ambiguous.first() {
            if self.strict {
                return Err(CompileError::AmbiguousPort {
                    node_id: first.node_id.clone(),
                    port: first.port.clone(),
                    edges: first.edges.clone(),
                });
            }
            for port in &ambiguous {
                warn!(
                    node = %port.node_id,
                    port = %port.port,
                    edges = ?port.edges,
                    "port wired to several edges, following the first"
                );
            }
        }

        let entries = EntryPoints::new(&index);
        let fragments = Fragments {
            methods: entries.async_methods(),
            registrations: entries.registrations(),
            routes: entries.routes(),
        };
        info!(
            nodes = self.graph.nodes.len(),
            edges = self.graph.edges.len(),
            methods = fragments.methods.len(),
            registrations = fragments.registrations.len(),
            routes = fragments.routes.len(),
            "compiling graph"
        );

        let boilerplate = start
            .text("code")
            .or_else(|| self.boilerplate.clone())
            .unwrap_or_else(|| DEFAULT_BOILERPLATE.to_string());

        let (source, report) = TemplateAssembler::new(fragments)
            .with_token(start.text("token"))
            .with_webhook_url(start.text("webhook_url"))
            .assemble(&boilerplate);

        Ok(CompilationArtifacts { source, report })
    }
}
