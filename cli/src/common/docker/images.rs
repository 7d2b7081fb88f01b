//! # ImgRS Image Registry
//!
//! File: cli/src/common/docker/images.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! This module is the queryable view of the images stored on the host. It
//! builds `ImageRecord`s from a fresh `images --digests --no-trunc` listing on
//! every call; nothing is cached, so two calls may see different snapshots.
//!
//! ## Architecture
//!
//! Key functions implemented:
//! - **`list_images`**: Runs the listing and parses it with the lenient `CollapsedColumns` layout.
//! - **`get_image_details`**: Exact lookup of one image by its local id.
//! - **`remove_image_by_local_id`**: Runs `rmi <id>` and propagates the runtime's refusal verbatim.
//! - **`remove_image_by_content_digest`**: Resolves a registry digest to a local id, then removes it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imgrs::common::docker::images;
//!
//! for image in images::list_images(&runtime).await? {
//!     println!("{} {} {:?}", image.repository, image.tag, image.content_digest);
//! }
//! images::remove_image_by_content_digest(&runtime, "sha256:218bb5...").await?;
//! ```
//!
use super::connect::Runtime;
use super::parse::{CollapsedColumns, ColumnLayout, Row};
use crate::core::error::{ImgrsError, Result};
use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Column headers of `images --digests`, in display order.
pub const IMAGE_HEADERS: [&str; 6] = ["REPOSITORY", "TAG", "DIGEST", "IMAGE ID", "CREATED", "SIZE"];

/// Placeholder the runtime prints for an absent value.
const NONE_MARKER: &str = "<none>";

/// One image from a listing snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub repository: String,
    pub tag: String,
    /// Registry content digest (`sha256:...`); `None` for dangling images.
    pub content_digest: Option<String>,
    /// Runtime-assigned id, unique within one snapshot.
    pub local_id: String,
    /// Free text, e.g. "4 weeks ago".
    pub created: String,
    /// Free text, e.g. "77.8MB".
    pub size: String,
}

impl ImageRecord {
    fn from_row(row: Row) -> Self {
        let mut fields = row.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        let repository = next();
        let tag = next();
        let digest = next();
        Self {
            repository,
            tag,
            content_digest: (digest != NONE_MARKER).then_some(digest),
            local_id: next(),
            created: next(),
            size: next(),
        }
    }

    /// `repository:tag` as the runtime would print it.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.repository, self.tag)
    }
}

/// Lists all images on the host.
///
/// Lines the parser cannot split into six fields are dropped rather than
/// failing the whole listing.
///
/// # Errors
///
/// Only if the listing command itself fails (`ImgrsError::Spawn` / `ImgrsError::ExternalCommand`).
#[instrument(skip(runtime))]
pub async fn list_images(runtime: &Runtime) -> Result<Vec<ImageRecord>> {
    let stdout = runtime
        .exec(&["images", "--digests", "--no-trunc"])
        .await
        .context("Failed to list images")?;
    let images: Vec<ImageRecord> = CollapsedColumns
        .parse_rows(&stdout, &IMAGE_HEADERS)?
        .into_iter()
        .map(ImageRecord::from_row)
        .collect();
    debug!("Listed {} image(s)", images.len());
    Ok(images)
}

/// Looks up one image by its exact local id.
///
/// # Errors
///
/// * `ImgrsError::ImageNotFound` - No image in the current listing has this id.
/// * Any error from `list_images`.
#[instrument(skip(runtime))]
pub async fn get_image_details(runtime: &Runtime, local_id: &str) -> Result<ImageRecord> {
    list_images(runtime)
        .await?
        .into_iter()
        .find(|image| image.local_id == local_id)
        .ok_or_else(|| {
            debug!("No image with local id '{}'", local_id);
            ImgrsError::ImageNotFound {
                name: local_id.to_string(),
            }
            .into()
        })
}

/// Removes an image by its local id.
///
/// # Errors
///
/// `ImgrsError::ExternalCommand` with the runtime's own message, e.g. when the
/// image is still used by a container.
#[instrument(skip(runtime))]
pub async fn remove_image_by_local_id(runtime: &Runtime, local_id: &str) -> Result<()> {
    info!("Removing image '{}'...", local_id);
    let stdout = runtime
        .exec(&["rmi", local_id])
        .await
        .with_context(|| format!("Failed to remove image '{}'", local_id))?;
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        debug!("{}", line);
    }
    info!("Image '{}' removed successfully.", local_id);
    Ok(())
}

/// Removes the image whose registry content digest is `digest`.
///
/// The digest is resolved to a local id through a fresh listing; if several
/// images share the digest the first listed one is removed.
///
/// # Errors
///
/// * `ImgrsError::ImageNotFound` - No listed image has this digest. Nothing is removed.
/// * Any error from `list_images` or `remove_image_by_local_id`.
#[instrument(skip(runtime))]
pub async fn remove_image_by_content_digest(runtime: &Runtime, digest: &str) -> Result<()> {
    let images = list_images(runtime).await?;
    let Some(image) = images
        .iter()
        .find(|image| image.content_digest.as_deref() == Some(digest))
    else {
        warn!("No image with digest '{}', nothing to remove.", digest);
        return Err(ImgrsError::ImageNotFound {
            name: digest.to_string(),
        }
        .into());
    };
    debug!("Digest '{}' resolved to local id '{}'", digest, image.local_id);
    remove_image_by_local_id(runtime, &image.local_id)
        .await
        .with_context(|| format!("Failed to remove image with digest '{}'", digest))
}
