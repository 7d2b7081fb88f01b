//! # ImgRS Digest Resolution
//!
//! File: cli/src/common/docker/resolve.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! The container listing shows the image reference a container was started
//! with, which may be a mutable tag rather than a digest. To learn which image
//! *content* a container actually runs, this module chains two lookups:
//!
//! 1. inspect the container and read its `Image` field (the local image id);
//! 2. find that local id in the image listing and read its content digest.
//!
//! `get_containers_running_image` builds on this to answer "which containers
//! run digest X". It is the one query that tolerates per-item failures: a
//! container whose digest cannot be resolved (its image was removed, it
//! vanished between listing and inspection, its image is dangling) is simply
//! left out of the answer.
//!
use super::connect::Runtime;
use super::images::get_image_details;
use super::state::{inspect_container, list_containers, ContainerRecord};
use crate::core::error::{ImgrsError, Result};
use anyhow::Context;
use tracing::{debug, info, instrument};

/// Inspection field holding the container's local image id.
pub const IMAGE_ID_FIELD: &str = "Image";

/// Returns the local image id of the image the container was created from.
///
/// # Errors
///
/// * `ImgrsError::InspectField` - The inspection has no string `Image` field.
/// * Any error from `inspect_container`.
#[instrument(skip(runtime))]
pub async fn get_container_image_local_id(runtime: &Runtime, container_id: &str) -> Result<String> {
    let record = inspect_container(runtime, container_id).await?;
    let local_id = record
        .str_field(IMAGE_ID_FIELD)
        .with_context(|| format!("Container '{}' has no usable image id", container_id))?;
    Ok(local_id.to_string())
}

/// Returns the registry content digest of the image a container runs.
///
/// # Errors
///
/// * `ImgrsError::ImageNotFound` - The container's image is no longer listed.
/// * `ImgrsError::MissingDigest` - The image is dangling and has no content digest.
/// * Any error from `get_container_image_local_id`.
#[instrument(skip(runtime))]
pub async fn get_container_image_digest(runtime: &Runtime, container_id: &str) -> Result<String> {
    let local_id = get_container_image_local_id(runtime, container_id).await?;
    let image = get_image_details(runtime, &local_id)
        .await
        .with_context(|| format!("Failed to resolve image of container '{}'", container_id))?;
    image.content_digest.ok_or_else(|| {
        ImgrsError::MissingDigest {
            image: image.local_id.clone(),
        }
        .into()
    })
}

/// Returns the containers (running or stopped) whose image has content digest `digest`.
///
/// Listing order is preserved. Containers whose digest cannot be resolved are
/// excluded instead of failing the query.
///
/// # Errors
///
/// Only if the container listing itself fails.
#[instrument(skip(runtime))]
pub async fn get_containers_running_image(runtime: &Runtime, digest: &str) -> Result<Vec<ContainerRecord>> {
    let containers = list_containers(runtime).await?;
    let mut matching = Vec::new();
    for container in containers {
        match get_container_image_digest(runtime, &container.id).await {
            Ok(found) if found == digest => matching.push(container),
            Ok(found) => debug!("Container '{}' runs '{}', skipping", container.short_id(), found),
            Err(e) => debug!("Skipping container '{}': {:#}", container.short_id(), e),
        }
    }
    info!("{} container(s) on digest '{}'", matching.len(), digest);
    Ok(matching)
}
