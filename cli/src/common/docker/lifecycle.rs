//! # ImgRS Image Lifecycle Management
//!
//! File: cli/src/common/docker/lifecycle.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! This module moves a host from one image version to another. It provides
//! the two ways of fetching an image (anonymous pull by digest, and pull after
//! a registry login) and the `reconcile` sequence that strings fetching,
//! verification and clean-up together.
//!
//! ## Architecture
//!
//! - **`pull_image`**: `pull <repository>@<digest>`. Output is logged at debug level,
//!   stderr travels with the error on failure.
//! - **`pull_private_image`**: `login <registry> -u <user> --password-stdin`, then
//!   `pull <reference>`. The secret is written to the login process's stdin and
//!   the stream is closed before waiting; it is never an argument, never logged
//!   and never part of an error. A failed login stops before the pull.
//! - **`reconcile`**: pull the target digest, confirm at least one container runs
//!   it, then remove the previous digest's image. The old image is never removed
//!   before the new one is confirmed, so the host briefly stores both.
//!
//! No step is retried. Whoever calls `reconcile` decides whether and when to try again.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imgrs::common::docker::lifecycle::{self, ReconcilePlan};
//!
//! let plan = ReconcilePlan {
//!     repository: "ubuntu".into(),
//!     target_digest: "sha256:c9cf95...".into(),
//!     previous_digest: Some("sha256:218bb5...".into()),
//!     login: None,
//!     remove_previous: true,
//! };
//! let outcome = lifecycle::reconcile(&runtime, &plan).await?;
//! println!("{} container(s) on the new image", outcome.containers.len());
//! ```
//!
use super::connect::Runtime;
use super::images::remove_image_by_content_digest;
use super::resolve::get_containers_running_image;
use super::state::ContainerRecord;
use crate::core::error::{ImgrsError, Result};
use anyhow::Context;
use std::fmt;
use tracing::{debug, error, info, instrument, warn};

/// Marker the runtime prints on a successful login.
const LOGIN_SUCCEEDED: &str = "Login Succeeded";

/// Credentials for an authenticated pull.
#[derive(Clone)]
pub struct RegistryLogin {
    pub registry: String,
    pub username: String,
    pub secret: String,
}

impl fmt::Debug for RegistryLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryLogin")
            .field("registry", &self.registry)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Pulls `repository@digest`.
///
/// # Errors
///
/// `ImgrsError::ExternalCommand` (with the runtime's stderr) if the pull fails.
#[instrument(skip(runtime))]
pub async fn pull_image(runtime: &Runtime, repository: &str, digest: &str) -> Result<()> {
    let reference = format!("{}@{}", repository, digest);
    info!("Pulling image {}...", reference);
    let stdout = runtime.exec(&["pull", reference.as_str()]).await.map_err(|e| {
        error!("Pull of '{}' failed: {:#}", reference, e);
        e.context(format!("Failed to pull image '{}'", reference))
    })?;
    debug!("Output: {}", stdout.trim_end());
    Ok(())
}

/// Logs in to `login.registry` and pulls `reference`.
///
/// # Errors
///
/// * `ImgrsError::Authentication` - The login exited non-zero. No pull is attempted.
/// * `ImgrsError::ExternalCommand` - The pull failed.
#[instrument(skip_all, fields(registry = %login.registry, username = %login.username, reference = %reference))]
pub async fn pull_private_image(runtime: &Runtime, login: &RegistryLogin, reference: &str) -> Result<()> {
    authenticate(runtime, login).await?;

    info!("Pulling image {}...", reference);
    let stdout = runtime
        .exec(&["pull", reference])
        .await
        .with_context(|| format!("Failed to pull image '{}'", reference))?;
    debug!("Output: {}", stdout.trim_end());
    Ok(())
}

async fn authenticate(runtime: &Runtime, login: &RegistryLogin) -> Result<()> {
    info!("Authenticating with registry {}...", login.registry);
    let mut input = login.secret.clone().into_bytes();
    input.push(b'\n');

    let output = runtime
        .exec_with_input(
            &[
                "login",
                login.registry.as_str(),
                "-u",
                login.username.as_str(),
                "--password-stdin",
            ],
            Some(input.as_slice()),
        )
        .await
        .map_err(|e| match e.downcast::<ImgrsError>() {
            Ok(ImgrsError::ExternalCommand { output, .. }) => {
                error!("Login to '{}' failed", login.registry);
                anyhow::Error::from(ImgrsError::Authentication {
                    registry: login.registry.clone(),
                    output,
                })
            }
            Ok(other) => anyhow::Error::from(other),
            Err(e) => e,
        })?;

    if output.stdout_lossy().contains(LOGIN_SUCCEEDED) {
        info!("Successfully authenticated with {}", login.registry);
    } else {
        warn!(
            "Login to {} exited cleanly but did not report success: {}",
            login.registry,
            output.stdout_lossy().trim_end()
        );
    }
    Ok(())
}

/// Desired transition for one repository.
#[derive(Debug, Clone)]
pub struct ReconcilePlan {
    pub repository: String,
    /// Digest the host should end up running.
    pub target_digest: String,
    /// Digest the host ran before, if any.
    pub previous_digest: Option<String>,
    /// Log in before pulling when set.
    pub login: Option<RegistryLogin>,
    /// Remove the previous digest's image once the target is verified.
    pub remove_previous: bool,
}

/// What happened to the previous image during `reconcile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousImage {
    /// No previous digest, it equals the target, or removal was disabled.
    Kept,
    Removed(String),
    /// The previous image was not on the host any more.
    AlreadyGone(String),
}

/// Result of a successful `reconcile`.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// Containers verified to run the target digest.
    pub containers: Vec<ContainerRecord>,
    pub previous: PreviousImage,
}

/// Pulls the target digest, verifies a container runs it, then removes the previous image.
///
/// # Errors
///
/// * Any pull or authentication error. Nothing is removed.
/// * `ImgrsError::NotConverged` - No container runs the target digest. Nothing is removed.
/// * Any error removing the previous image other than it being absent.
#[instrument(skip_all, fields(repository = %plan.repository, target = %plan.target_digest))]
pub async fn reconcile(runtime: &Runtime, plan: &ReconcilePlan) -> Result<ReconcileOutcome> {
    match &plan.login {
        Some(login) => {
            let reference = format!("{}@{}", plan.repository, plan.target_digest);
            pull_private_image(runtime, login, &reference).await?
        }
        None => pull_image(runtime, &plan.repository, &plan.target_digest).await?,
    }

    let containers = get_containers_running_image(runtime, &plan.target_digest)
        .await
        .context("Failed to verify running containers")?;
    if containers.is_empty() {
        warn!("Target digest {} is not running; keeping previous image.", plan.target_digest);
        return Err(ImgrsError::NotConverged {
            digest: plan.target_digest.clone(),
        }
        .into());
    }

    let previous = match plan.previous_digest.as_deref() {
        Some(old) if plan.remove_previous && old != plan.target_digest => {
            match remove_image_by_content_digest(runtime, old).await {
                Ok(()) => PreviousImage::Removed(old.to_string()),
                Err(e) if ImgrsError::is_image_not_found(&e) => {
                    warn!("Previous image {} already gone.", old);
                    PreviousImage::AlreadyGone(old.to_string())
                }
                Err(e) => {
                    return Err(e.context(format!("Failed to remove previous image '{}'", old)))
                }
            }
        }
        _ => PreviousImage::Kept,
    };

    info!(
        "Reconciled {} to {} ({} container(s), previous: {:?})",
        plan.repository,
        plan.target_digest,
        containers.len(),
        previous
    );
    Ok(ReconcileOutcome { containers, previous })
}
