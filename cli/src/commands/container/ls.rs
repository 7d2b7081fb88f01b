//! # ImgRS Container Listing Handler
//!
//! File: cli/src/commands/container/ls.rs
//! Author: Christi Mahu
//!
//! Implements `imgrs container ls`: every container the runtime knows, in listing order.
//!
use crate::commands::print_json;
use clap::Parser;
use imgrs::common::docker::{self, ContainerRecord, Runtime};
use imgrs::core::error::Result;
use tracing::info;

/// Arguments for `imgrs container ls`.
#[derive(Parser, Debug)]
pub struct LsArgs {
    /// Print the listing as a JSON array.
    #[arg(long)]
    json: bool,
}

pub async fn handle_ls(args: LsArgs, runtime: &Runtime) -> Result<()> {
    info!("Handling container ls (json: {})", args.json);
    let containers = docker::list_containers(runtime).await?;
    if args.json {
        return print_json(&containers);
    }
    print_containers(&containers);
    Ok(())
}

/// Prints containers as labelled blocks followed by a count.
pub(super) fn print_containers(containers: &[ContainerRecord]) {
    if containers.is_empty() {
        println!("No containers found.");
        return;
    }
    for container in containers {
        println!("ID:      {}", container.short_id());
        println!("Image:   {}", container.image);
        println!("Command: {}", container.command);
        println!("Created: {}", container.created);
        println!("Status:  {}", container.status);
        if !container.ports.is_empty() {
            println!("Ports:   {}", container.ports);
        }
        println!("Names:   {}", container.names);
        println!("--------------------");
    }
    println!("Found {} container(s).", containers.len());
}
