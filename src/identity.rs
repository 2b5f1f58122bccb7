//! Identities used throughout a resolution.
//!
//! A library instance is identified by its name, version and owning package.
//! `InstanceId` bundles the three into one comparable, hashable key so that
//! registries, maps and graph nodes can all share a single notion of
//! equality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque comparable key for a library instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub package: String,
}

impl InstanceId {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            package: package.into(),
        }
    }

    /// An identity with no version or package, handy for tests and small manifests.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "", "")
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.version.is_empty() {
            write!(f, "@{}", self.version)?;
        }
        if !self.package.is_empty() {
            write!(f, " ({})", self.package)?;
        }
        Ok(())
    }
}

/// The build context a resolution runs in: one module for one architecture.
///
/// Passed explicitly through the pipeline; nothing about the module being
/// resolved lives in global state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionContext {
    pub module: String,
    pub arch: String,
}

impl ResolutionContext {
    pub fn new(module: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            arch: arch.into(),
        }
    }
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::new("<anonymous>", crate::defaults::DEFAULT_ARCH)
    }
}

impl fmt::Display for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.module, self.arch)
    }
}
