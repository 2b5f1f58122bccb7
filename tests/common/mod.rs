//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common manifests and a fixture to reduce duplication
//! across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(manifests::CHAIN);
//!     fixture.command().arg("order").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Manifest snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// A consumes nothing, B consumes A, C consumes B and A.
    pub const CHAIN: &str = r#"
libraries:
  - name: A
    produces: [A]
    constructor: AInit
    destructor: AFini
  - name: B
    produces: [B]
    consumes: [A]
    constructor: BInit
  - name: C
    consumes: [B, A]
modules:
  - name: Chain
    arch: IA32
    libraries: [A, B, C]
"#;

    /// Network stack: Disk consumes Net, the driver consumes both.
    pub const NETWORK: &str = r#"
libraries:
  - name: L1
    package: NetPkg
    produces: [Net]
  - name: L2
    package: NetPkg
    produces: [Disk]
    consumes: [Net]
  - name: L3
    package: NetPkg
    consumes: [Disk, Net]
modules:
  - name: Driver
    arch: X64
    libraries: [L1, L2, L3]
"#;

    /// Two instances producing the same class.
    pub const DUPLICATE_PRODUCER: &str = r#"
libraries:
  - name: X1
    produces: [X]
  - name: X2
    produces: [X]
modules:
  - name: Dup
    libraries: [X1, X2]
"#;

    /// An instance consuming a class nobody produces.
    pub const UNMET: &str = r#"
libraries:
  - name: App
    consumes: [Y]
modules:
  - name: Unmet
    libraries: [App]
"#;

    /// A and B consume each other.
    pub const CYCLE: &str = r#"
libraries:
  - name: A
    produces: [A]
    consumes: [B]
  - name: B
    produces: [B]
    consumes: [A]
modules:
  - name: Loop
    libraries: [A, B]
"#;

    /// One healthy module and one broken one.
    pub const MIXED: &str = r#"
libraries:
  - name: Base
    produces: [Base]
  - name: Print
    produces: [Print]
    consumes: [Base]
modules:
  - name: Good
    libraries: [Base, Print]
  - name: Bad
    libraries: [Print]
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "libraries: [unclosed";
}

/// A test fixture that provides a temporary directory with an optional manifest.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_manifest(manifests::CHAIN);
///
/// fixture.command()
///     .arg("order")
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `liborder.yaml` manifest with the given content.
    pub fn with_manifest(self, content: &str) -> Self {
        self.temp_dir
            .child("liborder.yaml")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the manifest file.
    #[allow(dead_code)]
    pub fn manifest_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("liborder.yaml")
    }

    /// Create a command configured to run in this fixture's directory.
    ///
    /// `LIBORDER_MANIFEST` is cleared so the default `liborder.yaml` lookup
    /// applies.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("liborder");
        cmd.current_dir(self.path())
            .env_remove("LIBORDER_MANIFEST")
            .env_remove("RUST_LOG")
            .arg("--color=never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
