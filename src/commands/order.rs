//! # Order Command Implementation
//!
//! This module implements the `order` subcommand, which resolves the library
//! instances of each module in a manifest and prints the constructor and
//! destructor order together with the hook functions to call.
//!
//! Modules are resolved independently. Successful resolutions are printed to
//! stdout; failures are reported on stderr and make the command exit with an
//! error once every module has been attempted.

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use liborder::output::{emoji, render, OutputConfig, OutputFormat};
use liborder::phases::{resolve_module, ResolveOptions};

use super::{describe_error, load_manifest, select_modules};

/// Output format for the order listing
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum FormatArg {
    /// Human-readable listing
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Print constructor and destructor order for each module
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Path to the manifest describing libraries and modules.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "LIBORDER_MANIFEST",
        default_value = liborder::defaults::DEFAULT_MANIFEST
    )]
    pub manifest: PathBuf,

    /// Only resolve the module with this name (every architecture it is listed for).
    #[arg(long, value_name = "NAME")]
    pub module: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Drop edges that close a dependency cycle (with a warning) instead of failing.
    #[arg(long)]
    pub lenient_cycles: bool,
}

/// Execute the `order` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: OrderArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let manifest = load_manifest(&args.manifest)?;
    let modules = select_modules(&manifest, args.module.as_deref())?;

    let options = if args.lenient_cycles {
        ResolveOptions::lenient()
    } else {
        ResolveOptions::default()
    };

    let mut resolutions = Vec::new();
    let mut failures = 0usize;
    for module in modules {
        match resolve_module(&manifest, module, &options) {
            Ok(resolution) => resolutions.push(resolution),
            Err(e) => {
                failures += 1;
                eprintln!(
                    "{} {}: {}",
                    emoji(&out, "❌", "[ERR]"),
                    module.context(),
                    describe_error(&e)
                );
            }
        }
    }

    print!("{}", render(&resolutions, args.format.into())?);

    if failures > 0 {
        anyhow::bail!("{} module(s) could not be resolved", failures);
    }
    Ok(())
}
