use botflow::prelude::*;
use clap::{Parser, Subcommand};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Compiles flow-editor workflow graphs into Telegram bot source
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a graph JSON export into bot source
    Compile {
        /// Path to the graph JSON file
        graph_path: String,
        /// Write the source here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Boilerplate file used when the start node carries none
        #[arg(short, long)]
        boilerplate: Option<String>,
        /// Treat a custom node type as a known one, e.g. `myLogger=logger`
        #[arg(short = 'm', long = "type-map", value_parser = parse_type_mapping)]
        type_mappings: Vec<(String, String)>,
        /// Reject ports wired to more than one edge
        #[arg(long)]
        strict: bool,
    },
    /// Write a starter graph containing only the start node
    Init {
        /// Write the graph here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compile {
            graph_path,
            output,
            boilerplate,
            type_mappings,
            strict,
        } => run_compile(graph_path, output, boilerplate, type_mappings, strict),
        Command::Init { output } => run_init(output),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("botflow={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_compile(
    graph_path: String,
    output: Option<String>,
    boilerplate_path: Option<String>,
    type_mappings: Vec<(String, String)>,
    strict: bool,
) {
    let start = Instant::now();

    // --- 1. Loading ---
    let graph_json = fs::read_to_string(&graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read graph file '{}': {}", graph_path, e))
    });
    let graph = UiGraph::from_json(&graph_json)
        .and_then(|ui| ui.into_graph())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load graph: {}", e)));

    // --- 2. Configuration ---
    let mut builder = Compiler::builder(graph).strict(strict);
    for (user_type, botflow_type) in &type_mappings {
        if NodeKind::known(botflow_type).is_none() {
            exit_with_error(&format!(
                "Unknown node type '{}' in mapping for '{}'",
                botflow_type, user_type
            ));
        }
        builder = builder.with_type_mapping(user_type, botflow_type);
    }
    if let Some(path) = boilerplate_path {
        let text = fs::read_to_string(&path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read boilerplate '{}': {}", path, e))
        });
        builder = builder.with_boilerplate(text);
    }

    // --- 3. Compilation ---
    let artifacts = builder
        .build()
        .try_compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let report = &artifacts.report;
    tracing::info!(
        methods = report.methods_inserted,
        registrations = report.registrations_inserted,
        duplicate_registrations = report.registrations_skipped,
        routes = report.routes_inserted,
        elapsed = ?start.elapsed(),
        "compilation finished"
    );
    for anchor in &report.missing_anchors {
        tracing::warn!(anchor = %anchor, "boilerplate anchor missing, fragments not inserted");
    }

    // --- 4. Output ---
    write_output(output.as_deref(), &artifacts.source);
}

fn run_init(output: Option<String>) {
    let json = UiGraph::from(&Graph::starter())
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to render starter graph: {}", e)));
    write_output(output.as_deref(), &json);
}

fn write_output(path: Option<&str>, content: &str) {
    match path {
        Some(path) => {
            fs::write(path, content).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path, e))
            });
            tracing::info!(path, "wrote output");
        }
        None => print!("{}", content),
    }
}

fn parse_type_mapping(arg: &str) -> std::result::Result<(String, String), String> {
    arg.split_once('=')
        .map(|(user, kind)| (user.trim().to_string(), kind.trim().to_string()))
        .filter(|(user, kind)| !user.is_empty() && !kind.is_empty())
        .ok_or_else(|| format!("expected USER_TYPE=NODE_TYPE, got '{}'", arg))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
