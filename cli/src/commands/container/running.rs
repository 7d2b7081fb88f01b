//! # ImgRS Running-Image Query Handler
//!
//! File: cli/src/commands/container/running.rs
//! Author: Christi Mahu
//!
//! Implements `imgrs container running <DIGEST>`. Containers whose digest
//! cannot be resolved are left out of the answer rather than failing it; run
//! with `-vv` to see which ones were skipped and why.
//!
use super::ls::print_containers;
use crate::commands::{parse_digest, print_json};
use clap::Parser;
use imgrs::common::docker::{self, Runtime};
use imgrs::core::error::Result;
use tracing::info;

/// Arguments for `imgrs container running`.
#[derive(Parser, Debug)]
pub struct RunningArgs {
    /// Content digest to look for (e.g. `sha256:c9cf95...`).
    #[arg(value_parser = parse_digest)]
    digest: String,
    #[arg(long)]
    json: bool,
}

pub async fn handle_running(args: RunningArgs, runtime: &Runtime) -> Result<()> {
    info!("Handling container running for '{}'", args.digest);
    let containers = docker::get_containers_running_image(runtime, &args.digest).await?;
    if args.json {
        return print_json(&containers);
    }
    print_containers(&containers);
    Ok(())
}
