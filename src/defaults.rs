//! Default values for liborder configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Manifest file looked up in the current directory when none is given.
pub const DEFAULT_MANIFEST: &str = "liborder.yaml";

/// Environment variable overriding the manifest path.
pub const MANIFEST_ENV: &str = "LIBORDER_MANIFEST";

/// Architecture assumed for modules that do not name one.
pub const DEFAULT_ARCH: &str = "COMMON";

/// Returns the default manifest path.
///
/// This can be overridden by the `--manifest` CLI flag or the
/// `LIBORDER_MANIFEST` environment variable.
pub fn default_manifest_path() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST)
}
