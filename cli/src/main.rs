//! # ImgRS Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the ImgRS CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and creating the runtime handle
//! - Routing execution to appropriate command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Which containers run this digest?
//! imgrs container running sha256:c9cf959fd837...
//!
//! # Move the host to a new digest, removing the old image once verified
//! imgrs -v reconcile --repository ubuntu --to sha256:c9cf95... --from sha256:218bb5...
//! ```
//!
use anyhow::Context;
use clap::Parser;
use imgrs::common::docker;
use imgrs::core::config;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Handles specific command logic (image, container, reconcile)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "imgrs",
    about = "ImgRS: track which image digest runs where, and move hosts between image versions",
    long_about = "Drives the container runtime CLI to list images and containers, resolve\n\
                  the content digest each container runs, and reconcile a host to a new digest.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Container runtime binary to drive (overrides `runtime.binary` from config).
    #[arg(long, env = "IMGRS_RUNTIME", global = true)]
    runtime: Option<String>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "i")]
    Image(commands::image::ImageArgs),
    #[command(alias = "c")]
    Container(commands::container::ContainerArgs),
    #[command(alias = "r")]
    Reconcile(commands::reconcile::ReconcileArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = run(cli).await;

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = config::load_config().context("Failed to load ImgRS configuration")?;
    if let Some(binary) = cli.runtime {
        cfg.runtime.binary = binary;
        config::validate_config(&cfg).context("Invalid --runtime override")?;
    }
    let runtime = docker::connect_runtime(&cfg.runtime.binary);

    match cli.command {
        Commands::Image(args) => commands::image::handle_image(args, &cfg, &runtime).await,
        Commands::Container(args) => commands::container::handle_container(args, &runtime).await,
        Commands::Reconcile(args) => commands::reconcile::handle_reconcile(args, &cfg, &runtime).await,
    }
}
