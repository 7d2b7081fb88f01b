//! # ImgRS Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates all top-level command groups that comprise the ImgRS CLI
//! and the few helpers they share (digest validation, JSON output, and reading the
//! registry secret).
//!
//! ## Command Groups
//!
//! - `image`: Image listing, lookup, pulls and removal
//! - `container`: Container listing, inspection and digest resolution
//! - `reconcile`: Pull, verify and clean up in one step
//!
//! Each command group defines its own arguments structure and handler function
//! to process those arguments and implement the command's functionality.
//!
use anyhow::{bail, Context};
use imgrs::core::error::{ImgrsError, Result};
use serde::Serialize;
use std::io::BufRead;

/// Command group for container queries. Includes `ls`, `inspect`, `digest`, `running`.
pub mod container;
/// Command group for images. Includes `ls`, `show`, `pull`, `pull-private`, `rmi`.
pub mod image;
/// The `reconcile` command.
pub mod reconcile;

/// Environment variable holding the registry secret for authenticated pulls.
pub const REGISTRY_TOKEN_ENV: &str = "IMGRS_REGISTRY_TOKEN";

/// Clap value parser for content digests (`<algorithm>:<hex>`).
pub fn parse_digest(value: &str) -> std::result::Result<String, String> {
    let Some((algorithm, hex)) = value.split_once(':') else {
        return Err(format!("'{}' is not a content digest (expected e.g. sha256:<hex>)", value));
    };
    if algorithm.is_empty() || !algorithm.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("invalid digest algorithm '{}'", algorithm));
    }
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid digest value '{}'", hex));
    }
    Ok(value.to_string())
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")?;
    println!("{}", rendered);
    Ok(())
}

/// Reads the registry secret, from the first line of stdin when `from_stdin`
/// is set, otherwise from `IMGRS_REGISTRY_TOKEN`.
pub fn read_registry_secret(from_stdin: bool) -> Result<String> {
    if from_stdin {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read registry secret from stdin")?;
        return non_empty_secret(Some(line), "stdin");
    }
    non_empty_secret(std::env::var(REGISTRY_TOKEN_ENV).ok(), REGISTRY_TOKEN_ENV)
}

fn non_empty_secret(raw: Option<String>, source: &str) -> Result<String> {
    let secret = raw
        .map(|s| s.trim_end_matches(['\r', '\n']).to_string())
        .unwrap_or_default();
    if secret.is_empty() {
        bail!(ImgrsError::Config(format!(
            "No registry secret provided (set {} or use --password-stdin); checked {}",
            REGISTRY_TOKEN_ENV, source
        )));
    }
    Ok(secret)
}

/// Picks the flag value, then the configured one, or fails naming the setting.
pub fn require_setting(flag: Option<String>, configured: Option<&String>, name: &str) -> Result<String> {
    flag.or_else(|| configured.cloned()).ok_or_else(|| {
        ImgrsError::Config(format!(
            "'{}' is not set; pass it as a flag or set it in .imgrs.toml",
            name
        ))
        .into()
    })
}
