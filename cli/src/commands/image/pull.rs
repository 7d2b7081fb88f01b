//! # ImgRS Pull Handlers
//!
//! File: cli/src/commands/image/pull.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `imgrs image pull` (anonymous pull of `<repository>@<digest>`) and
//! `imgrs image pull-private` (registry login, then pull).
//!
//! The registry secret is never accepted as a command-line argument, where it
//! would show up in the process table and shell history. It is read from
//! `IMGRS_REGISTRY_TOKEN`, or from stdin with `--password-stdin`, and handed
//! straight to the runtime's `login --password-stdin`.
//!
//! ## Usage
//!
//! ```bash
//! imgrs image pull ubuntu sha256:c9cf959fd837...
//! echo "$TOKEN" | imgrs image pull-private ghcr.io/acme/api:1.4 -u deploy --password-stdin
//! ```
//!
use crate::commands::{parse_digest, read_registry_secret, require_setting};
use clap::Parser;
use imgrs::common::docker::{self, RegistryLogin, Runtime};
use imgrs::core::{config::Config, error::Result};
use tracing::info;

/// Arguments for `imgrs image pull`.
#[derive(Parser, Debug)]
pub struct PullArgs {
    /// Repository to pull from (e.g. `ubuntu`, `ghcr.io/acme/api`).
    repository: String,
    /// Content digest to pull (e.g. `sha256:c9cf95...`).
    #[arg(value_parser = parse_digest)]
    digest: String,
}

/// Arguments for `imgrs image pull-private`.
#[derive(Parser, Debug)]
pub struct PullPrivateArgs {
    /// Full image reference to pull after logging in.
    reference: String,
    /// Registry host to log in to. Defaults to `registry.host` from config.
    #[arg(long)]
    registry: Option<String>,
    /// Registry user. Defaults to `registry.username` from config.
    #[arg(long, short)]
    username: Option<String>,
    /// Read the secret from the first line of stdin instead of IMGRS_REGISTRY_TOKEN.
    #[arg(long)]
    password_stdin: bool,
}

pub async fn handle_pull(args: PullArgs, runtime: &Runtime) -> Result<()> {
    info!("Handling image pull ({}@{})", args.repository, args.digest);
    docker::pull_image(runtime, &args.repository, &args.digest).await?;
    println!("Pulled {}@{}", args.repository, args.digest);
    Ok(())
}

pub async fn handle_pull_private(args: PullPrivateArgs, config: &Config, runtime: &Runtime) -> Result<()> {
    let login = RegistryLogin {
        registry: args.registry.unwrap_or_else(|| config.registry.host.clone()),
        username: require_setting(args.username, config.registry.username.as_ref(), "registry.username")?,
        secret: read_registry_secret(args.password_stdin)?,
    };
    info!("Handling image pull-private ({} via {})", args.reference, login.registry);

    docker::pull_private_image(runtime, &login, &args.reference).await?;
    println!("Pulled {} (authenticated with {})", args.reference, login.registry);
    Ok(())
}
