//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for
//! `liborder`. It uses the `thiserror` library to create a single `Error`
//! enum covering every way a resolution can fail, with messages that name
//! the library instances and classes involved.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors. Each
//!   variant carries the identities needed to diagnose the problem without
//!   re-running the resolution.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! Every resolution error is fatal to the module being resolved. There is no
//! partial-success mode: a caller either receives a complete order or one of
//! these errors.

use thiserror::Error;

fn render_hint(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

/// Main error type for liborder operations
#[derive(Error, Debug)]
pub enum Error {
    /// Two library instances declare that they produce the same library class.
    #[error("Duplicate producer for library class '{class}': {existing} and {duplicate}")]
    DuplicateProducer {
        class: String,
        /// The instance that registered the class first
        existing: String,
        /// The instance that tried to register it again
        duplicate: String,
    },

    /// The same library instance identity was supplied twice in one resolution.
    #[error("Duplicate library instance: {instance}")]
    DuplicateInstance { instance: String },

    /// A consumed library class has no producer among the supplied instances.
    #[error("Unmet dependency: {consumer} consumes library class '{class}' but no instance produces it (in {context}){}", render_hint(hint))]
    UnmetDependency {
        class: String,
        consumer: String,
        /// Module and architecture being resolved
        context: String,
        /// Optional "did you mean" hint
        hint: Option<String>,
    },

    /// Adding a consumer -> producer edge would close a cycle.
    #[error("Circular dependency between library instances: {cycle}")]
    CircularDependency { cycle: String },

    /// The orderer stopped before every instance was placed.
    #[error("Ordering incomplete: placed {placed} of {total} library instances; unplaced: {unplaced}")]
    OrderingIncomplete {
        placed: usize,
        total: usize,
        unplaced: String,
    },

    /// The module manifest could not be parsed or is structurally invalid.
    #[error("Manifest parsing error: {message}{}", render_hint(hint))]
    ManifestParse {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// A module references a library that is not in the manifest catalog.
    #[error("Module '{module}' references unknown library '{library}'{}", render_hint(hint))]
    UnknownLibrary {
        module: String,
        library: String,
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
