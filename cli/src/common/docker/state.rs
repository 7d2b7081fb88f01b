//! # ImgRS Container State Querying
//!
//! File: cli/src/common/docker/state.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! This module provides read-only queries over the containers on the host:
//! a listing of all containers (running and stopped) and the detailed
//! inspection of a single one. Like the image registry, every call re-runs
//! the runtime and builds its answer from scratch.
//!
//! ## Architecture
//!
//! - **`list_containers`**: Runs `container ls --all --no-trunc` and parses it with the
//!   strict `FixedColumns` layout, because commands, statuses and names routinely
//!   contain spaces that would break delimiter splitting.
//! - **`inspect_container`**: Runs `container inspect <id>` and returns the first JSON object.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imgrs::common::docker::state;
//!
//! for container in state::list_containers(&runtime).await? {
//!     println!("{} {} {}", container.id, container.image, container.status);
//! }
//! let details = state::inspect_container(&runtime, "a6269652d8c3").await?;
//! ```
//!
use super::connect::Runtime;
use super::inspect::{parse_inspection, InspectionRecord};
use super::parse::{ColumnLayout, FixedColumns, Row};
use crate::core::error::Result;
use anyhow::Context;
use serde::Serialize;
use tracing::{debug, instrument};

/// Column headers of `container ls`, in display order.
pub const CONTAINER_HEADERS: [&str; 7] = [
    "CONTAINER ID",
    "IMAGE",
    "COMMAND",
    "CREATED",
    "STATUS",
    "PORTS",
    "NAMES",
];

/// One container from a listing snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerRecord {
    pub id: String,
    /// Image reference exactly as printed (tag or digest form).
    pub image: String,
    pub command: String,
    pub created: String,
    pub status: String,
    pub ports: String,
    pub names: String,
}

impl ContainerRecord {
    fn from_row(row: Row) -> Self {
        let mut fields = row.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Self {
            id: next(),
            image: next(),
            command: next(),
            created: next(),
            status: next(),
            ports: next(),
            names: next(),
        }
    }

    /// First 12 characters of the id, as the runtime shows by default.
    pub fn short_id(&self) -> &str {
        self.id.get(..12).unwrap_or(&self.id)
    }
}

/// Lists all containers, including stopped ones.
///
/// # Errors
///
/// * `ImgrsError::Parse` - A required column header is missing from the output.
/// * `ImgrsError::Spawn` / `ImgrsError::ExternalCommand` - The listing command failed.
#[instrument(skip(runtime))]
pub async fn list_containers(runtime: &Runtime) -> Result<Vec<ContainerRecord>> {
    let stdout = runtime
        .exec(&["container", "ls", "--all", "--no-trunc"])
        .await
        .context("Failed to list containers")?;
    let containers: Vec<ContainerRecord> = FixedColumns
        .parse_rows(&stdout, &CONTAINER_HEADERS)
        .context("Failed to parse container listing")?
        .into_iter()
        .map(ContainerRecord::from_row)
        .collect();
    debug!("Listed {} container(s)", containers.len());
    Ok(containers)
}

/// Inspects one container.
///
/// # Errors
///
/// * `ImgrsError::ExternalCommand` - The runtime rejected the id (e.g. no such container).
/// * `ImgrsError::Parse` - The output is not a non-empty JSON array of objects.
#[instrument(skip(runtime))]
pub async fn inspect_container(runtime: &Runtime, id: &str) -> Result<InspectionRecord> {
    let stdout = runtime
        .exec(&["container", "inspect", id])
        .await
        .with_context(|| format!("Failed to inspect container '{}'", id))?;
    parse_inspection(&stdout).with_context(|| format!("Failed to parse inspection of container '{}'", id))
}
