//! # ImgRS Container Runtime Module Interface
//!
//! File: cli/src/common/docker/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! This module is the central public interface for everything ImgRS knows
//! about the container runtime. The runtime is driven through its command-line
//! tool (`docker` by default); its tabular and JSON output is parsed into typed
//! records, and those records answer "which image digest runs where" and drive
//! the pull / verify / remove sequence that moves a host to a new image.
//!
//! ## Architecture
//!
//! The `common::docker` module delegates tasks to the following specialized submodules,
//! listed from the bottom up:
//!
//! - **`connect`**: The `Runtime` handle (binary + process runner) and error mapping for failed exits.
//! - **`parse`**: Column-aligned listing parser with its two layouts (`CollapsedColumns`, `FixedColumns`).
//! - **`inspect`**: JSON inspection parser and the `InspectionRecord` accessors.
//! - **`images`**: Image listing, lookup and removal by local id or content digest.
//! - **`state`**: Container listing and inspection.
//! - **`resolve`**: Container → local image id → content digest resolution.
//! - **`lifecycle`**: Pulling (anonymous and authenticated) and `reconcile`.
//!
//! There is no state between calls: every function re-queries the runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imgrs::common::docker;
//!
//! let runtime = docker::connect_runtime("docker");
//! let running = docker::get_containers_running_image(&runtime, "sha256:c9cf95...").await?;
//! println!("{} container(s) on the new image", running.len());
//! ```
//!

/// The runtime handle every operation takes.
pub mod connect;
/// Image registry: listing, lookup, removal.
pub mod images;
/// JSON inspection parsing.
pub mod inspect;
/// Pulls, authenticated pulls and reconciliation.
pub mod lifecycle;
/// Column-aligned listing parsing.
pub mod parse;
/// Container → image digest resolution.
pub mod resolve;
/// Container registry: listing and inspection.
pub mod state;

#[cfg(test)]
mod fixtures;

// --- Re-exports for easier access from other parts of the application ---
pub use connect::{connect_runtime, Runtime};
pub use images::{get_image_details, list_images, ImageRecord};
pub use inspect::InspectionRecord;
pub use lifecycle::{pull_image, pull_private_image, reconcile, ReconcileOutcome, ReconcilePlan, RegistryLogin};
pub use resolve::{get_container_image_digest, get_container_image_local_id, get_containers_running_image};
pub use state::{inspect_container, list_containers, ContainerRecord};
