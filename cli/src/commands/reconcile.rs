//! # ImgRS Reconcile Command
//!
//! File: cli/src/commands/reconcile.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `imgrs reconcile`, which moves the host from one digest of a
//! repository to another:
//!
//! 1. Pull `<repository>@<target digest>`, logging in first with `--private`.
//! 2. Verify at least one container runs the target digest.
//! 3. Remove the image carrying the previous digest (unless `--keep-previous`
//!    or `reconcile.remove_previous = false`).
//!
//! If step 2 finds nothing, the command fails and the previous image is left
//! in place. Restarting containers on the new image is the job of whatever
//! orchestrates the host; `reconcile` only checks that it has happened.
//!
//! ## Usage
//!
//! ```bash
//! imgrs reconcile --repository ghcr.io/acme/api \
//!     --to sha256:c9cf959fd837... --from sha256:218bb51abbd1... --private -u deploy
//! ```
//!
use crate::commands::{parse_digest, read_registry_secret, require_setting};
use clap::Parser;
use imgrs::common::docker::{self, lifecycle::PreviousImage, ReconcilePlan, RegistryLogin, Runtime};
use imgrs::core::{config::Config, error::Result};
use tracing::info;

/// Arguments for `imgrs reconcile`.
#[derive(Parser, Debug)]
pub struct ReconcileArgs {
    /// Digest the host should end up running.
    #[arg(long, value_parser = parse_digest)]
    to: String,
    /// Digest the host ran before; its image is removed once `--to` is verified.
    #[arg(long, value_parser = parse_digest)]
    from: Option<String>,
    /// Repository both digests belong to. Defaults to `reconcile.repository` from config.
    #[arg(long)]
    repository: Option<String>,
    /// Keep the previous image even after the target is verified.
    #[arg(long)]
    keep_previous: bool,
    /// Log in to the registry before pulling.
    #[arg(long)]
    private: bool,
    /// Registry host for `--private`. Defaults to `registry.host` from config.
    #[arg(long, requires = "private")]
    registry: Option<String>,
    /// Registry user for `--private`. Defaults to `registry.username` from config.
    #[arg(long, short, requires = "private")]
    username: Option<String>,
    /// Read the secret from stdin instead of IMGRS_REGISTRY_TOKEN.
    #[arg(long, requires = "private")]
    password_stdin: bool,
}

pub async fn handle_reconcile(args: ReconcileArgs, config: &Config, runtime: &Runtime) -> Result<()> {
    let plan = build_plan(args, config, read_registry_secret)?;
    info!(
        "Handling reconcile of {} to {} (previous: {:?}, private: {})",
        plan.repository,
        plan.target_digest,
        plan.previous_digest,
        plan.login.is_some()
    );

    let outcome = docker::reconcile(runtime, &plan).await?;

    println!("Reconciled {} to {}", plan.repository, plan.target_digest);
    for container in &outcome.containers {
        println!("  {}  {}  {}", container.short_id(), container.names, container.status);
    }
    match &outcome.previous {
        PreviousImage::Removed(digest) => println!("Removed previous image {}", digest),
        PreviousImage::AlreadyGone(digest) => println!("Previous image {} was already gone", digest),
        PreviousImage::Kept => {}
    }
    Ok(())
}

/// Resolves flags against config. The secret is only read when `--private` is set.
fn build_plan(
    args: ReconcileArgs,
    config: &Config,
    read_secret: impl FnOnce(bool) -> Result<String>,
) -> Result<ReconcilePlan> {
    let repository = require_setting(args.repository, config.reconcile.repository.as_ref(), "reconcile.repository")?;
    let login = if args.private {
        Some(RegistryLogin {
            registry: args.registry.unwrap_or_else(|| config.registry.host.clone()),
            username: require_setting(args.username, config.registry.username.as_ref(), "registry.username")?,
            secret: read_secret(args.password_stdin)?,
        })
    } else {
        None
    };
    Ok(ReconcilePlan {
        repository,
        target_digest: args.to,
        previous_digest: args.from,
        login,
        remove_previous: config.reconcile.remove_previous && !args.keep_previous,
    })
}
