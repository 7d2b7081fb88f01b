//! # ImgRS Library
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! ImgRS tracks which container image digest runs where on a single host and
//! moves the host from one image version to another. It drives the container
//! runtime's command-line tool, parses the tool's column-aligned and JSON
//! output into typed records, and builds the reconciliation sequence
//! (pull new, verify running, remove stale) on top of those records.
//!
//! The `imgrs` binary is a thin command-line front end over this library;
//! a higher-level resource layer can depend on the library directly.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use imgrs::common::docker;
//!
//! # async fn run() -> imgrs::core::error::Result<()> {
//! let runtime = docker::connect_runtime("docker");
//! let digest = docker::get_container_image_digest(&runtime, "a6269652d8c3").await?;
//! let peers = docker::get_containers_running_image(&runtime, &digest).await?;
//! println!("{} container(s) run {}", peers.len(), digest);
//! # Ok(())
//! # }
//! ```
//!
pub mod common; // Process execution and the container runtime engine
pub mod core; // Core infrastructure (errors, config)
