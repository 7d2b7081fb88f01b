//! # ImgRS Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout ImgRS. Every operation
//! that talks to the container runtime returns `Result<T>` (an `anyhow::Result`),
//! and the root cause of a failure is always one of the `ImgrsError` variants
//! below, so callers can branch on the kind of failure with `downcast_ref`.
//!
//! ## Architecture
//!
//! The variants follow the failure taxonomy of the engine:
//! - **Process invocation**: the runtime binary could not be spawned, exited
//!   non-zero, or refused a registry login (`Spawn`, `ExternalCommand`, `Authentication`).
//! - **Parse / format**: the runtime printed something we do not understand
//!   (`Parse`, `InspectField`). Always fatal to the call.
//! - **Not found**: a well-formed lookup matched nothing (`ImageNotFound`,
//!   `MissingDigest`), or the verification step of a reconcile found no
//!   container on the target digest (`NotConverged`).
//! - **Configuration**: invalid config values (`Config`).
//!
//! ## Examples
//!
//! ```rust,ignore
//! match images::remove_image_by_content_digest(&runtime, digest).await {
//!     Ok(()) => println!("removed"),
//!     Err(e) if e.downcast_ref::<ImgrsError>().is_some_and(|ie| matches!(ie, ImgrsError::ImageNotFound { .. })) => {
//!         println!("nothing to remove");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for ImgRS.
// No PartialEq: `Spawn` carries an io::Error.
#[derive(Error, Debug)]
pub enum ImgrsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to run '{cmd}': {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    #[error("Registry login to '{registry}' failed:\n{output}")]
    Authentication { registry: String, output: String },

    #[error("Unparseable runtime output: {0}")]
    Parse(String),

    #[error("Inspection field '{field}' {reason}")]
    InspectField { field: String, reason: String },

    #[error("Image '{name}' not found.")]
    ImageNotFound { name: String },

    #[error("Image '{image}' has no content digest.")]
    MissingDigest { image: String },

    #[error("No container is running an image with digest '{digest}'.")]
    NotConverged { digest: String },
}

impl ImgrsError {
    /// Returns `true` if `err`'s root cause is `ImgrsError::ImageNotFound`.
    pub fn is_image_not_found(err: &anyhow::Error) -> bool {
        err.downcast_ref::<ImgrsError>()
            .is_some_and(|ie| matches!(ie, ImgrsError::ImageNotFound { .. }))
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
