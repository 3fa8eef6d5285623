//! Navgraph CLI - inspect navigation configs and replay navigation sessions.

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod demo;
mod script;

/// Navgraph - back-stack navigation toolkit
#[derive(Parser, Debug)]
#[command(name = "navgraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a config and print its graph tree
    Check {
        /// Config file (.yaml, .yml or .json)
        config: PathBuf,
    },

    /// Resolve a concrete route to its destination
    Resolve {
        /// Config file
        config: PathBuf,
        /// Route such as profile/John%20Doe/95
        route: String,
    },

    /// Build the concrete route of a destination or graph
    Build {
        /// Config file
        config: PathBuf,
        /// Destination or graph identifier
        id: String,
        /// Parameters as name=value
        params: Vec<String>,
    },

    /// Replay a navigation script and print the stack after each step
    Replay {
        /// Config file
        config: PathBuf,
        /// Script file
        script: PathBuf,
    },

    /// Percent-encode a parameter value
    Encode {
        /// Raw value
        value: String,
    },

    /// Run the interactive login/home demo
    Demo,

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("navgraph={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut stdout = io::stdout().lock();
    let result = match cli.command {
        Commands::Check { config } => commands::check(&config, &mut stdout),
        Commands::Resolve { config, route } => commands::resolve(&config, &route, &mut stdout),
        Commands::Build { config, id, params } => {
            commands::build(&config, &id, &params, &mut stdout)
        }
        Commands::Replay { config, script } => commands::replay(&config, &script, &mut stdout),
        Commands::Encode { value } => commands::encode(&value, &mut stdout),
        Commands::Demo => demo::run(io::stdin().lock(), &mut stdout),
        Commands::Version => {
            println!("navgraph {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
