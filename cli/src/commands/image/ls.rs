//! # ImgRS Image Listing Handlers
//!
//! File: cli/src/commands/image/ls.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `imgrs image ls` (every image on the host) and `imgrs image show`
//! (one image by exact local id). Both print labelled blocks
//! by default and the serialized `ImageRecord`s with `--json`.
//!
use crate::commands::print_json;
use clap::Parser;
use imgrs::common::docker::{self, ImageRecord, Runtime};
use imgrs::core::error::Result;
use tracing::info;

/// Arguments for `imgrs image ls`.
#[derive(Parser, Debug)]
pub struct LsArgs {
    /// Print the listing as a JSON array.
    #[arg(long)]
    json: bool,
}

/// Arguments for `imgrs image show`.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Full local image id as the listing prints it (e.g. `sha256:a8780b...`).
    local_id: String,
    #[arg(long)]
    json: bool,
}

pub async fn handle_ls(args: LsArgs, runtime: &Runtime) -> Result<()> {
    info!("Handling image ls (json: {})", args.json);
    let images = docker::list_images(runtime).await?;

    if args.json {
        return print_json(&images);
    }
    if images.is_empty() {
        println!("No images found.");
        return Ok(());
    }
    println!("--- Images ---");
    for image in &images {
        print_image(image);
        println!("--------------------");
    }
    println!("Found {} image(s).", images.len());
    Ok(())
}

pub async fn handle_show(args: ShowArgs, runtime: &Runtime) -> Result<()> {
    info!("Handling image show for '{}'", args.local_id);
    let image = docker::get_image_details(runtime, &args.local_id).await?;
    if args.json {
        return print_json(&image);
    }
    print_image(&image);
    Ok(())
}

fn print_image(image: &ImageRecord) {
    println!("Image:    {}", image.reference());
    println!("ID:       {}", image.local_id);
    println!("Digest:   {}", image.content_digest.as_deref().unwrap_or("<none>"));
    println!("Created:  {}", image.created);
    println!("Size:     {}", image.size);
}
