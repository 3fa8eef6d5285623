//! CLI command implementations.

use navgraph_core::{
    encoding, BackStackEntry, ConfigError, NavConfig, NavError, Navigator, RouteParams,
    RouteRegistry,
};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::script::{self, Step};

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("navigation error: {0}")]
    Nav(#[from] NavError),

    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("invalid parameter {0}: expected name=value")]
    InvalidParam(String),

    #[error("no screen renders {destination}")]
    NoScreen { destination: String },
}

pub type Result<T> = std::result::Result<T, CliError>;

fn load_navigator(config: &Path) -> Result<Navigator> {
    Ok(NavConfig::load(config)?.to_navigator()?)
}

fn format_stack(entries: &[BackStackEntry]) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" > ")
}

fn write_graph(
    out: &mut impl Write,
    registry: &RouteRegistry,
    id: &str,
    depth: usize,
) -> Result<()> {
    let indent = "  ".repeat(depth);
    if let Some(graph) = registry.graph(id) {
        writeln!(out, "{indent}{id} (graph, start: {})", graph.start)?;
        for member in &graph.members {
            write_graph(out, registry, member, depth + 1)?;
        }
    } else if let Some(template) = registry.template(id) {
        writeln!(out, "{indent}{id} -> {}", template.route)?;
    }
    Ok(())
}

/// Validates a config and prints its graph tree and initial stack.
pub fn check(config: &Path, out: &mut impl Write) -> Result<()> {
    tracing::info!(config = %config.display(), "Checking navigation config");

    let nav_config = NavConfig::load(config)?;
    let nav = nav_config.to_navigator()?;
    let registry = nav.registry();

    for graph in registry.graphs() {
        if registry.parent_graph(&graph.id).is_none() {
            write_graph(out, registry, &graph.id, 0)?;
        }
    }
    for template in registry.templates() {
        if registry.parent_graph(&template.id).is_none() {
            writeln!(out, "{} -> {}", template.id, template.route)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Initial stack: {}", format_stack(nav.back_stack()))?;
    Ok(())
}

/// Resolves a concrete route and prints its destination and parameters.
pub fn resolve(config: &Path, route: &str, out: &mut impl Write) -> Result<()> {
    let nav = load_navigator(config)?;
    let resolved = nav.registry().resolve(route)?;

    writeln!(out, "{}", resolved.id)?;
    for (name, value) in resolved.params.iter() {
        writeln!(out, "  {name} = {value}")?;
    }
    Ok(())
}

/// Parses `name=value` pairs; values are taken literally.
pub fn parse_params(pairs: &[String]) -> Result<RouteParams> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| CliError::InvalidParam(pair.clone()))
        })
        .collect()
}

/// Builds and prints the concrete route of a destination.
pub fn build(config: &Path, id: &str, pairs: &[String], out: &mut impl Write) -> Result<()> {
    let nav = load_navigator(config)?;
    let params = parse_params(pairs)?;

    let template = nav.registry().resolve_to_leaf(id)?;
    template.check_params(&params)?;
    writeln!(out, "{}", template.build(&params)?)?;
    Ok(())
}

/// Replays a navigation script, printing the stack after every step.
pub fn replay(config: &Path, script_path: &Path, out: &mut impl Write) -> Result<()> {
    let mut nav = load_navigator(config)?;
    let source = std::fs::read_to_string(script_path)?;
    let steps = script::parse(&source).map_err(|e| CliError::Script {
        line: e.line,
        message: e.message,
    })?;

    tracing::info!(steps = steps.len(), script = %script_path.display(), "Replaying script");
    writeln!(out, "start: {}", format_stack(nav.back_stack()))?;

    for (line, step) in steps {
        let fail = |e: NavError| CliError::Script {
            line,
            message: e.to_string(),
        };

        let label = match &step {
            Step::Navigate(request) => {
                nav.navigate_request(request).map_err(fail)?;
                format!("navigate {}", request.target)
            }
            Step::Route { route, options } => {
                nav.navigate_to_route(route, options.clone()).map_err(fail)?;
                format!("route {route}")
            }
            Step::Back => {
                if nav.go_back() {
                    "back".to_string()
                } else {
                    "back (at root)".to_string()
                }
            }
            Step::Pop { target, inclusive } => {
                let popped = nav.pop_up_to(target, *inclusive);
                format!("pop {target}{}", if popped { "" } else { " (no-op)" })
            }
        };

        writeln!(out, "{line:>4}: {label:<24} {}", format_stack(nav.back_stack()))?;
    }
    Ok(())
}

/// Encodes a raw value the way route parameters are encoded.
pub fn encode(value: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", encoding::encode(value))?;
    Ok(())
}
