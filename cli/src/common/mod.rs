//! # ImgRS Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! This module is the root of the shared, non-command code: process execution
//! and everything built on top of the container runtime CLI. Command handlers
//! (`commands::`) stay thin and call into these modules.
//!
//! - **`docker`**: Parsers, image/container registries, digest resolution and reconciliation.
//! - **`process`**: The `CommandRunner` seam used to spawn the runtime CLI.
//!

/// Container runtime engine: parsing, registries, resolution, reconciliation.
pub mod docker;
/// Executing external processes and capturing their output.
pub mod process;
