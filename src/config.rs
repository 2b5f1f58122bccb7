//! # Manifest Schema and Parsing
//!
//! This module defines the data structures for the `liborder.yaml` manifest
//! and the logic for parsing it. The manifest is how the command-line tool
//! feeds declarative library data into the resolver.
//!
//! ## Key Components
//!
//! - **`Manifest`**: The whole file: a catalog of library instances and a
//!   list of modules.
//!
//! - **`LibraryEntry`**: One library instance: its identity, the library
//!   classes it produces and consumes, and its optional constructor and
//!   destructor.
//!
//! - **`ModuleEntry`**: One module built for one architecture, listing the
//!   catalog entries that make up its library closure.
//!
//! ## Example
//!
//! ```yaml
//! libraries:
//!   - name: BaseLib
//!     version: "1.0"
//!     package: MdePkg
//!     produces: [BaseLib]
//!   - name: UefiLib
//!     produces: [UefiLib]
//!     consumes: [BaseLib]
//!     constructor: UefiLibConstructor
//! modules:
//!   - name: HelloWorld
//!     arch: IA32
//!     libraries: [BaseLib, UefiLib]
//! ```
//!
//! The same module name may appear once per architecture.

use crate::defaults::DEFAULT_ARCH;
use crate::error::{Error, Result};
use crate::identity::{InstanceId, ResolutionContext};
use crate::instance::LibraryInstance;
use crate::suggestions;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A library instance definition in the manifest catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Instance name, unique within the catalog
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Owning package
    #[serde(default)]
    pub package: String,
    /// Library classes this instance produces
    #[serde(default)]
    pub produces: Vec<String>,
    /// Library classes this instance consumes, in order
    #[serde(default)]
    pub consumes: Vec<String>,
    #[serde(default)]
    pub constructor: Option<String>,
    #[serde(default)]
    pub destructor: Option<String>,
}

impl LibraryEntry {
    pub fn id(&self) -> InstanceId {
        InstanceId::new(&self.name, &self.version, &self.package)
    }

    pub fn to_instance(&self) -> LibraryInstance {
        LibraryInstance {
            id: self.id(),
            constructor: self.constructor.clone(),
            destructor: self.destructor.clone(),
            produces: self.produces.iter().cloned().collect(),
            consumes: self.consumes.clone(),
        }
    }
}

fn default_arch() -> String {
    DEFAULT_ARCH.to_string()
}

/// A module built for one architecture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub name: String,
    #[serde(default = "default_arch")]
    pub arch: String,
    /// Catalog entries making up the module's library closure, in declaration order
    #[serde(default)]
    pub libraries: Vec<String>,
}

impl ModuleEntry {
    pub fn context(&self) -> ResolutionContext {
        ResolutionContext::new(&self.name, &self.arch)
    }
}

/// The parsed `liborder.yaml` manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub libraries: Vec<LibraryEntry>,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

impl Manifest {
    /// Look up a catalog entry by name.
    pub fn library(&self, name: &str) -> Option<&LibraryEntry> {
        self.libraries.iter().find(|lib| lib.name == name)
    }

    /// All entries for a module name (one per architecture), in manifest order.
    pub fn modules_named(&self, name: &str) -> Vec<&ModuleEntry> {
        self.modules.iter().filter(|m| m.name == name).collect()
    }

    /// Distinct module names, in manifest order.
    pub fn module_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.modules
            .iter()
            .map(|m| m.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Build the library instances for `module` from the catalog.
    ///
    /// Unknown references fail with [`Error::UnknownLibrary`]. Listing the
    /// same library twice is passed through unchanged so that the resolver
    /// reports it as a duplicate instance.
    pub fn instances_for(&self, module: &ModuleEntry) -> Result<Vec<LibraryInstance>> {
        let catalog: HashMap<&str, &LibraryEntry> = self
            .libraries
            .iter()
            .map(|lib| (lib.name.as_str(), lib))
            .collect();

        module
            .libraries
            .iter()
            .map(|name| {
                catalog
                    .get(name.as_str())
                    .map(|lib| lib.to_instance())
                    .ok_or_else(|| Error::UnknownLibrary {
                        module: module.context().to_string(),
                        library: name.clone(),
                        hint: suggestions::did_you_mean(name, catalog.keys().copied()),
                    })
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for lib in &self.libraries {
            if lib.name.trim().is_empty() {
                return Err(Error::ManifestParse {
                    message: "library entry has an empty name".to_string(),
                    hint: Some("Give every entry under 'libraries:' a name".to_string()),
                });
            }
            if !names.insert(lib.name.as_str()) {
                return Err(Error::ManifestParse {
                    message: format!("library '{}' is defined more than once", lib.name),
                    hint: Some(
                        "Catalog names must be unique; rename one of the entries".to_string(),
                    ),
                });
            }
        }

        let mut contexts = HashSet::new();
        for module in &self.modules {
            if module.name.trim().is_empty() {
                return Err(Error::ManifestParse {
                    message: "module entry has an empty name".to_string(),
                    hint: Some("Give every entry under 'modules:' a name".to_string()),
                });
            }
            if !contexts.insert((module.name.as_str(), module.arch.as_str())) {
                return Err(Error::ManifestParse {
                    message: format!(
                        "module '{}' is listed more than once for arch {}",
                        module.name, module.arch
                    ),
                    hint: Some("Merge the entries or give them different 'arch:' values".to_string()),
                });
            }
        }

        Ok(())
    }
}

/// Parse a manifest from YAML.
pub fn parse(yaml_content: &str) -> Result<Manifest> {
    if yaml_content.trim().is_empty() {
        return Ok(Manifest::default());
    }
    let manifest: Manifest = serde_yaml::from_str(yaml_content)?;
    manifest.validate()?;
    Ok(manifest)
}

/// Read and parse a manifest file.
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
