//! # ImgRS Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! This module is the single place where ImgRS spawns external processes. All
//! knowledge of the container runtime is expressed as "run this program with
//! these arguments, maybe feed it some input, give me back what it printed".
//!
//! ## Architecture
//!
//! - **`CommandRunner`**: an object-safe async trait describing that capability.
//!   Everything above this module depends on the trait, never on `tokio::process`
//!   directly, so tests can substitute a scripted runner.
//! - **`CommandOutput`**: the captured exit status, stdout and stderr of one run.
//! - **`SystemRunner`**: the real implementation on top of `tokio::process::Command`.
//!   Each call spawns one child and collects its full output. When input is
//!   given it is written to the child's stdin, and the stream closed, while the
//!   output is being collected.
//!
//! Spawn and stream I/O failures become `ImgrsError::Spawn`. A non-zero exit is
//! *not* an error at this level: deciding what a failed exit means is left to
//! `docker::connect::Runtime`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imgrs::common::process::{CommandRunner, SystemRunner};
//!
//! let output = SystemRunner.run("docker", &["version".to_string()], None).await?;
//! println!("{}", output.stdout_lossy());
//! ```
//!
use crate::core::error::{ImgrsError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument, trace};

/// Captured result of one external process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Returns `true` if the process exited with status 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Stdout decoded as UTF-8, invalid sequences replaced.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Stderr decoded as UTF-8, invalid sequences replaced.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Human-readable exit status for error messages.
    pub fn status_display(&self) -> String {
        match self.status {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Capability to run an external program and capture its output.
///
/// Implementations must run the program to completion before returning.
/// When `stdin` is `Some`, the bytes are written to the child's standard input
/// and the stream is then closed, so the child sees end-of-input. Input of any
/// size is accepted; it is fed while the child's output is being read.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String], stdin: Option<&[u8]>)
        -> Result<CommandOutput>;
}

/// Formats a program and its arguments as a single command line for logs and errors.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `CommandRunner` backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    // `stdin` may carry a secret: never record it in the span.
    #[instrument(skip_all, fields(program = %program))]
    async fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&[u8]>,
    ) -> Result<CommandOutput> {
        let cmd_line = display_command(program, args);
        debug!("Spawning: {}", cmd_line);

        let mut child = Command::new(program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ImgrsError::Spawn {
                cmd: cmd_line.clone(),
                source,
            })?;

        // Feed stdin while stdout/stderr are drained, so a child that writes
        // before it reads cannot fill its output pipe and stall on us.
        let stdin_pipe = child.stdin.take();
        let feed_stdin = async {
            let (Some(input), Some(mut pipe)) = (stdin, stdin_pipe) else {
                return Ok(());
            };
            let written = pipe.write_all(input).await;
            // Closing stdin is what lets `--password-stdin` style readers finish.
            drop(pipe);
            trace!("Closed stdin for: {}", cmd_line);
            match written {
                // The child exited without reading all of its input.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    debug!("'{}' closed its stdin early", cmd_line);
                    Ok(())
                }
                other => other,
            }
        };
        let (written, output) = tokio::join!(feed_stdin, child.wait_with_output());

        let output = output.map_err(|source| ImgrsError::Spawn {
            cmd: cmd_line.clone(),
            source,
        })?;
        written.map_err(|source| ImgrsError::Spawn {
            cmd: cmd_line.clone(),
            source,
        })?;

        let captured = CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        };
        debug!("'{}' finished with {}", cmd_line, captured.status_display());
        Ok(captured)
    }
}
