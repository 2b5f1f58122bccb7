//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `liborder` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic, calling into the `liborder` library.

pub mod completions;
pub mod order;
pub mod tree;
pub mod validate;

use anyhow::Result;
use std::path::Path;

use liborder::config::{self, Manifest, ModuleEntry};
use liborder::error::Error;
use liborder::suggestions;

/// Load the manifest at `path`, with a friendly error when it is missing.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        return Err(suggestions::manifest_not_found(path));
    }
    config::from_file(path).map_err(|e| {
        anyhow::anyhow!("Failed to load manifest from {}: {}", path.display(), e)
    })
}

/// Select the module entries to work on: all of them, or every entry named `module`.
pub fn select_modules<'a>(
    manifest: &'a Manifest,
    module: Option<&str>,
) -> Result<Vec<&'a ModuleEntry>> {
    match module {
        None => Ok(manifest.modules.iter().collect()),
        Some(name) => {
            let selected = manifest.modules_named(name);
            if selected.is_empty() {
                Err(suggestions::unknown_module(name, &manifest.module_names()))
            } else {
                Ok(selected)
            }
        }
    }
}

/// Turn a resolution error into the message shown to the user.
pub fn describe_error(error: &Error) -> String {
    match error {
        Error::CircularDependency { cycle } => suggestions::cycle_detected(cycle).to_string(),
        other => other.to_string(),
    }
}
