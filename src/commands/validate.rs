//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks that every
//! module in a manifest resolves without printing the orders themselves.
//!
//! ## Functionality
//!
//! - **Manifest Validation**: Parses the manifest and reports its size.
//! - **Resolution Checks**: Resolves every module (in parallel) and reports
//!   duplicate producers, duplicate instances, unmet dependencies, unknown
//!   library references and cycles per module.
//! - **Lenient Mode**: With `--lenient-cycles`, cycle edges are dropped and
//!   reported as warnings; `--strict` turns those warnings into failures.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use liborder::output::{emoji, OutputConfig};
use liborder::phases::{resolve_all, ResolveOptions};

use super::{describe_error, load_manifest};

/// Check every module in a manifest for resolution errors
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the manifest to validate.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "LIBORDER_MANIFEST",
        default_value = liborder::defaults::DEFAULT_MANIFEST
    )]
    pub manifest: PathBuf,

    /// Drop edges that close a dependency cycle and report them as warnings.
    #[arg(long)]
    pub lenient_cycles: bool,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    println!(
        "{} Validating manifest: {}",
        emoji(&out, "🔍", "[SCAN]"),
        args.manifest.display()
    );

    let manifest = load_manifest(&args.manifest)?;
    println!(
        "{} Manifest parsed: {} libraries, {} module entries",
        emoji(&out, "✅", "[OK]"),
        manifest.libraries.len(),
        manifest.modules.len()
    );

    let options = if args.lenient_cycles {
        ResolveOptions::lenient()
    } else {
        ResolveOptions::default()
    };

    let mut errors = 0usize;
    let mut warnings = 0usize;

    for (context, result) in resolve_all(&manifest, &options) {
        match result {
            Ok(resolution) if resolution.dropped_cycles.is_empty() => {
                println!(
                    "{} {}: {} library instances ordered",
                    emoji(&out, "✅", "[OK]"),
                    context,
                    resolution.len()
                );
            }
            Ok(resolution) => {
                warnings += 1;
                for cycle in &resolution.dropped_cycles {
                    println!(
                        "{} {}: dropped cycle edge: {}",
                        emoji(&out, "⚠️", "[WARN]"),
                        context,
                        cycle
                    );
                }
            }
            Err(e) => {
                errors += 1;
                println!(
                    "{} {}: {}",
                    emoji(&out, "❌", "[ERR]"),
                    context,
                    describe_error(&e)
                );
            }
        }
    }

    if errors > 0 {
        anyhow::bail!("Validation failed: {} module(s) with errors", errors);
    }
    if warnings > 0 && args.strict {
        anyhow::bail!(
            "Validation failed: {} module(s) with warnings (strict mode)",
            warnings
        );
    }

    println!("{} Manifest is valid", emoji(&out, "✅", "[OK]"));
    Ok(())
}
