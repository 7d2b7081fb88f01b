//! # ImgRS Runtime Handle
//!
//! File: cli/src/common/docker/connect.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! Every registry, resolver and reconciler function takes a `&Runtime`: the
//! name (or path) of the container runtime CLI plus the `CommandRunner` used to
//! execute it. The handle holds no state about containers or images; each call
//! re-queries the runtime.
//!
//! `Runtime::exec` is the one place where a non-zero exit becomes an error. The
//! error is an `ImgrsError::ExternalCommand` carrying the full command line and
//! whatever the runtime wrote to stderr, so callers can log a single
//! actionable line.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imgrs::common::docker::connect::connect_runtime;
//!
//! let runtime = connect_runtime(&cfg.runtime.binary);
//! let stdout = runtime.exec(&["images", "--digests", "--no-trunc"]).await?;
//! ```
//!
use crate::common::process::{display_command, CommandOutput, CommandRunner, SystemRunner};
use crate::core::error::{ImgrsError, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Handle to the container runtime CLI.
#[derive(Clone)]
pub struct Runtime {
    binary: String,
    runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("binary", &self.binary)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(binary: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            binary: binary.into(),
            runner,
        }
    }

    /// The runtime binary this handle invokes.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Runs the runtime with `args` and returns its stdout.
    ///
    /// # Errors
    ///
    /// * `ImgrsError::Spawn` - The binary could not be started or its output read.
    /// * `ImgrsError::ExternalCommand` - The runtime exited non-zero; stderr is attached.
    pub async fn exec(&self, args: &[&str]) -> Result<String> {
        let output = self.exec_with_input(args, None).await?;
        Ok(output.stdout_lossy())
    }

    /// Runs the runtime with `args`, optionally feeding `input` on stdin.
    ///
    /// On success the full `CommandOutput` is returned so callers can inspect
    /// stdout and stderr. `input` is never logged.
    #[instrument(skip_all, fields(binary = %self.binary))]
    pub async fn exec_with_input(&self, args: &[&str], input: Option<&[u8]>) -> Result<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let cmd_line = display_command(&self.binary, &args);
        debug!("Running runtime command: {}", cmd_line);

        let output = self.runner.run(&self.binary, &args, input).await?;
        if !output.success() {
            return Err(ImgrsError::ExternalCommand {
                cmd: cmd_line,
                status: output.status_display(),
                output: output.stderr_lossy().trim_end().to_string(),
            }
            .into());
        }
        Ok(output)
    }
}

/// Creates a `Runtime` that drives `binary` through real child processes.
///
/// Nothing is spawned here; a missing binary surfaces as `ImgrsError::Spawn`
/// on the first operation.
pub fn connect_runtime(binary: &str) -> Runtime {
    debug!("Using container runtime binary '{}'", binary);
    Runtime::new(binary, Arc::new(SystemRunner))
}
