//! # ImgRS Image Removal Handler
//!
//! File: cli/src/commands/image/rmi.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `imgrs image rmi`, which removes one or more images either by
//! local id (the default) or by registry content digest (`--digest`).
//!
//! Removal is sequential. Every target is attempted; failures are collected
//! and reported together, and the command fails if any target failed. A digest
//! that matches no image is a failure, not a silent success.
//!
//! ## Usage
//!
//! ```bash
//! imgrs image rmi sha256:a8780b506fa4...
//! imgrs image rmi --digest sha256:218bb51abbd1... sha256:c9cf959fd837...
//! ```
//!
use anyhow::Context;
use clap::Parser;
use imgrs::common::docker::{images, Runtime};
use imgrs::core::error::Result;
use tracing::{error, info};

/// Arguments for `imgrs image rmi`.
#[derive(Parser, Debug)]
pub struct RmiArgs {
    /// Local image ids, or content digests with `--digest`.
    #[arg(required = true, num_args = 1..)]
    targets: Vec<String>,
    /// Treat targets as registry content digests and remove the matching image.
    #[arg(long)]
    digest: bool,
}

pub async fn handle_rmi(args: RmiArgs, runtime: &Runtime) -> Result<()> {
    info!("Handling image rmi (targets: {:?}, by digest: {})", args.targets, args.digest);

    let mut failed_removals = Vec::new();
    for target in &args.targets {
        let result = if args.digest {
            images::remove_image_by_content_digest(runtime, target).await
        } else {
            images::remove_image_by_local_id(runtime, target).await
        };
        match result {
            Ok(()) => println!("Removed image '{}'", target),
            Err(e) => {
                error!("Failed to remove image '{}': {:?}", target, e);
                failed_removals.push((target.as_str(), e));
            }
        }
    }

    if failed_removals.is_empty() {
        return Ok(());
    }
    eprintln!("\nErrors occurred during image removal:");
    for (target, err) in &failed_removals {
        eprintln!("- {}: {:#}", target, err);
    }
    let total = failed_removals.len();
    let (_, first_error) = failed_removals.remove(0);
    Err(first_error).context(format!("Failed to remove {} image(s)", total))
}
