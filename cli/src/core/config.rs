//! # ImgRS Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system for ImgRS, handling loading,
//! merging, validation, and access to configuration data. It combines defaults,
//! user settings, and project-specific overrides.
//!
//! ## Architecture
//!
//! The configuration system follows these principles:
//! - Configuration is loaded from multiple sources in order of precedence
//! - The runtime binary path is expanded (`~` to home directory)
//! - Configuration is validated for correctness before use
//! - Registry secrets are never part of the configuration; they come from
//!   the `IMGRS_REGISTRY_TOKEN` environment variable at the command line
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.imgrs.toml` in current directory or ancestors
//! 2. User-specific `<config dir>/imgrs/config.toml`
//! 3. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [runtime]
//! binary = "docker"
//!
//! [registry]
//! host = "ghcr.io"
//! username = "octocat"
//!
//! [reconcile]
//! repository = "ghcr.io/octocat/app"
//! remove_previous = true
//! ```
//!
//! ```rust,ignore
//! let cfg = config::load_config()?;
//! let runtime = docker::connect_runtime(&cfg.runtime.binary);
//! ```
//!
use crate::core::error::{ImgrsError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Effective configuration after layering project over user over defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub runtime: RuntimeConfig,
    pub registry: RegistryConfig,
    pub reconcile: ReconcileConfig,
}

/// Which container runtime CLI to drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Name or path of the runtime binary (can use ~). Will be expanded.
    pub binary: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            binary: default_runtime_binary(),
        }
    }
}

/// Registry used for authenticated pulls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Registry host passed to `login`.
    pub host: String,
    /// Account name for `login -u`.
    pub username: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: default_registry_host(),
            username: None,
        }
    }
}

/// Defaults for `imgrs reconcile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Repository to reconcile when `--repository` is not given.
    pub repository: Option<String>,
    /// Remove the previous digest's image after verification.
    pub remove_previous: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            repository: None,
            remove_previous: default_remove_previous(),
        }
    }
}

/// One configuration file as written: every setting is optional, and a
/// setting that is present wins over lower layers even if it equals the default.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct ConfigLayer {
    #[serde(default)]
    pub runtime: RuntimeLayer,
    #[serde(default)]
    pub registry: RegistryLayer,
    #[serde(default)]
    pub reconcile: ReconcileLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuntimeLayer {
    pub binary: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RegistryLayer {
    pub host: Option<String>,
    pub username: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReconcileLayer {
    pub repository: Option<String>,
    pub remove_previous: Option<bool>,
}

fn default_runtime_binary() -> String {
    "docker".to_string()
}
fn default_registry_host() -> String {
    "ghcr.io".to_string()
}
fn default_remove_previous() -> bool {
    true
}

const PROJECT_CONFIG_FILENAME: &str = ".imgrs.toml";

/// Loads, merges, expands and validates the configuration.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ImgRS", "imgrs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigLayer>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.imgrs.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks up from `start` looking for `.imgrs.toml`, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Layers `project` over `user` over the defaults, setting by setting.
fn merge_configs(user: ConfigLayer, project: Option<ConfigLayer>) -> Config {
    let project = project.unwrap_or_default();
    Config {
        runtime: RuntimeConfig {
            binary: project
                .runtime
                .binary
                .or(user.runtime.binary)
                .unwrap_or_else(default_runtime_binary),
        },
        registry: RegistryConfig {
            host: project
                .registry
                .host
                .or(user.registry.host)
                .unwrap_or_else(default_registry_host),
            username: project.registry.username.or(user.registry.username),
        },
        reconcile: ReconcileConfig {
            repository: project.reconcile.repository.or(user.reconcile.repository),
            remove_previous: project
                .reconcile
                .remove_previous
                .or(user.reconcile.remove_previous)
                .unwrap_or_else(default_remove_previous),
        },
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    config.runtime.binary = shellexpand::tilde(&config.runtime.binary).into_owned();
    debug!("Expanded runtime binary: {}", config.runtime.binary);
    Ok(())
}

/// Checks the merged configuration for values that cannot work.
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if config.runtime.binary.trim().is_empty() {
        return Err(anyhow!(ImgrsError::Config(
            "runtime.binary cannot be empty.".to_string()
        )));
    }
    let host = &config.registry.host;
    if host.is_empty() || host.contains(char::is_whitespace) || host.contains("://") {
        return Err(anyhow!(ImgrsError::Config(format!(
            "Invalid registry host: '{}'. Expected a bare host such as 'ghcr.io'.",
            host
        ))));
    }
    if config
        .registry
        .username
        .as_deref()
        .is_some_and(|u| u.trim().is_empty())
    {
        return Err(anyhow!(ImgrsError::Config(
            "registry.username cannot be empty when set.".to_string()
        )));
    }
    if config
        .reconcile
        .repository
        .as_deref()
        .is_some_and(|r| r.trim().is_empty() || r.contains('@'))
    {
        return Err(anyhow!(ImgrsError::Config(
            "reconcile.repository must be a repository name without a digest.".to_string()
        )));
    }
    debug!("Configuration validation successful.");
    Ok(())
}
