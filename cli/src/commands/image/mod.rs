//! # ImgRS Image Command Group
//!
//! File: cli/src/commands/image/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module serves as the entry point and router for the `imgrs image`
//! command group. It defines the subcommands that read and change the host's
//! image registry and delegates execution to the submodule handlers.
//!
//! ## Examples
//!
//! ```bash
//! # List every image with its content digest
//! imgrs image ls
//!
//! # Pull a specific build of a repository
//! imgrs image pull ubuntu sha256:c9cf959fd837...
//!
//! # Log in and pull from a private registry (secret read from IMGRS_REGISTRY_TOKEN)
//! imgrs image pull-private ghcr.io/acme/api:1.4 --username deploy
//!
//! # Remove whatever image carries a digest
//! imgrs image rmi --digest sha256:218bb51abbd1...
//! ```
//!
use clap::{Parser, Subcommand};
use imgrs::common::docker::Runtime;
use imgrs::core::{config::Config, error::Result};

/// Implements `imgrs image ls` and `imgrs image show`.
mod ls;
/// Implements `imgrs image pull` and `imgrs image pull-private`.
mod pull;
/// Implements `imgrs image rmi`.
mod rmi;

/// Arguments for the `imgrs image` command group.
#[derive(Parser, Debug)]
pub struct ImageArgs {
    #[command(subcommand)]
    command: ImageCommand,
}

#[derive(Subcommand, Debug)]
enum ImageCommand {
    /// List all images with their content digests.
    Ls(ls::LsArgs),
    /// Show one image, looked up by its exact local id.
    Show(ls::ShowArgs),
    /// Pull `<repository>@<digest>`.
    Pull(pull::PullArgs),
    /// Log in to a registry, then pull a reference.
    PullPrivate(pull::PullPrivateArgs),
    /// Remove images by local id, or by content digest with `--digest`.
    Rmi(rmi::RmiArgs),
}

/// Dispatches `imgrs image <subcommand>`.
pub async fn handle_image(args: ImageArgs, config: &Config, runtime: &Runtime) -> Result<()> {
    match args.command {
        ImageCommand::Ls(args) => ls::handle_ls(args, runtime).await,
        ImageCommand::Show(args) => ls::handle_show(args, runtime).await,
        ImageCommand::Pull(args) => pull::handle_pull(args, runtime).await,
        ImageCommand::PullPrivate(args) => pull::handle_pull_private(args, config, runtime).await,
        ImageCommand::Rmi(args) => rmi::handle_rmi(args, runtime).await,
    }
}
