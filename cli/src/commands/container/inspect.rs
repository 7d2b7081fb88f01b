//! # ImgRS Container Inspection Handlers
//!
//! File: cli/src/commands/container/inspect.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `imgrs container inspect` (the inspection document, or a single
//! top-level field of it) and `imgrs container digest` (the content digest of
//! the image the container was created from).
//!
use crate::commands::print_json;
use anyhow::Context;
use clap::Parser;
use imgrs::common::docker::{self, Runtime};
use imgrs::core::error::{ImgrsError, Result};
use tracing::info;

/// Arguments for `imgrs container inspect`.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Container id or name.
    id: String,
    /// Print only this top-level field (e.g. `Image`, `State`).
    #[arg(long)]
    field: Option<String>,
}

/// Arguments for `imgrs container digest`.
#[derive(Parser, Debug)]
pub struct DigestArgs {
    /// Container id or name.
    id: String,
}

pub async fn handle_inspect(args: InspectArgs, runtime: &Runtime) -> Result<()> {
    info!("Handling container inspect for '{}'", args.id);
    let record = docker::inspect_container(runtime, &args.id).await?;

    let Some(field) = args.field else {
        return print_json(&record);
    };
    let value = record.get(&field).ok_or_else(|| ImgrsError::InspectField {
        reason: format!(
            "is missing (available: {})",
            record.fields().collect::<Vec<_>>().join(", ")
        ),
        field,
    })?;
    match value.as_str() {
        Some(text) => println!("{}", text),
        None => print_json(value)?,
    }
    Ok(())
}

pub async fn handle_digest(args: DigestArgs, runtime: &Runtime) -> Result<()> {
    info!("Handling container digest for '{}'", args.id);
    let digest = docker::get_container_image_digest(runtime, &args.id)
        .await
        .with_context(|| format!("Could not determine the image digest of '{}'", args.id))?;
    println!("{}", digest);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_args_parsing() {
        let args = InspectArgs::try_parse_from(["inspect", "web-1"]).unwrap();
        assert_eq!(args.id, "web-1");
        assert!(args.field.is_none());
        assert!(DigestArgs::try_parse_from(["digest"]).is_err());
    }
}
