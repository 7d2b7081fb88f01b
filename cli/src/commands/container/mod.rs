//! # ImgRS Container Command Group
//!
//! File: cli/src/commands/container/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module serves as the entry point and router for the `imgrs container`
//! command group. Its subcommands are read-only: they list containers, show
//! their inspection documents, and resolve which image content they run.
//!
//! ## Examples
//!
//! ```bash
//! # Every container, running or stopped
//! imgrs container ls
//!
//! # One inspection field
//! imgrs container inspect 4c01db0b339c --field Image
//!
//! # The registry digest a container runs
//! imgrs container digest 4c01db0b339c
//!
//! # All containers on a digest
//! imgrs container running sha256:c9cf959fd837...
//! ```
//!
use clap::{Parser, Subcommand};
use imgrs::common::docker::Runtime;
use imgrs::core::error::Result;

/// Implements `imgrs container inspect` and `imgrs container digest`.
mod inspect;
/// Implements `imgrs container ls`.
mod ls;
/// Implements `imgrs container running`.
mod running;

/// Arguments for the `imgrs container` command group.
#[derive(Parser, Debug)]
pub struct ContainerArgs {
    #[command(subcommand)]
    command: ContainerCommand,
}

#[derive(Subcommand, Debug)]
enum ContainerCommand {
    /// List all containers, including stopped ones.
    Ls(ls::LsArgs),
    /// Print a container's inspection document, or one field of it.
    Inspect(inspect::InspectArgs),
    /// Print the registry content digest of a container's image.
    Digest(inspect::DigestArgs),
    /// List the containers whose image has the given content digest.
    Running(running::RunningArgs),
}

/// Dispatches `imgrs container <subcommand>`.
pub async fn handle_container(args: ContainerArgs, runtime: &Runtime) -> Result<()> {
    match args.command {
        ContainerCommand::Ls(args) => ls::handle_ls(args, runtime).await,
        ContainerCommand::Inspect(args) => inspect::handle_inspect(args, runtime).await,
        ContainerCommand::Digest(args) => inspect::handle_digest(args, runtime).await,
        ContainerCommand::Running(args) => running::handle_running(args, runtime).await,
    }
}
