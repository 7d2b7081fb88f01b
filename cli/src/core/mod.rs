//! # ImgRS Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure shared by the engine and the
//! command handlers:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: The `ImgrsError` taxonomy and the `Result` alias
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imgrs::core::config; // For loading configuration
//! use imgrs::core::error::{ImgrsError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
