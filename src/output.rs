//! # Output Configuration and Rendering
//!
//! This module provides utilities for controlling CLI output appearance,
//! including color and emoji support based on terminal capabilities and
//! user preferences, and renders resolutions as text, JSON or YAML.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use liborder::output::{OutputConfig, emoji};
//!
//! let config = OutputConfig::from_env_and_flag("auto");
//!
//! // Use emoji helper that respects config
//! println!("{} Resolving...", emoji(&config, "🔍", "[SCAN]"));
//! ```

use std::env;
use std::fmt::Write as _;

use crate::error::Result;
use crate::identity::InstanceId;
use crate::phases::{LifecycleCall, Resolution};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// # Behavior
    /// - `--color=always`: Force colors on (overrides NO_COLOR)
    /// - `--color=never`: Force colors off
    /// - `--color=auto`: Detect based on environment
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the appropriate string based on color configuration.
///
/// When colors are enabled, returns the emoji. When disabled, returns
/// the plain text alternative.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Format used to print resolutions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    Json,
    Yaml,
}

/// Render resolutions in the requested format.
pub fn render(resolutions: &[Resolution], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(resolutions)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(resolutions)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(resolutions)?),
    }
}

fn render_text(resolutions: &[Resolution]) -> String {
    let mut out = String::new();
    for (idx, resolution) in resolutions.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", resolution.context);
        write_order(&mut out, "constructor order", &resolution.constructor_order);
        write_order(&mut out, "destructor order", &resolution.destructor_order);
        write_calls(&mut out, "constructors", &resolution.constructors);
        write_calls(&mut out, "destructors", &resolution.destructors);
        if !resolution.dropped_cycles.is_empty() {
            let _ = writeln!(out, "  dropped cycle edges:");
            for cycle in &resolution.dropped_cycles {
                let _ = writeln!(out, "    {}", cycle);
            }
        }
    }
    out
}

fn write_order(out: &mut String, title: &str, order: &[InstanceId]) {
    let _ = writeln!(out, "  {}:", title);
    if order.is_empty() {
        let _ = writeln!(out, "    (none)");
    }
    for (pos, id) in order.iter().enumerate() {
        let _ = writeln!(out, "    {}. {}", pos + 1, id);
    }
}

fn write_calls(out: &mut String, title: &str, calls: &[LifecycleCall]) {
    let _ = writeln!(out, "  {}:", title);
    if calls.is_empty() {
        let _ = writeln!(out, "    (none)");
    }
    for call in calls {
        let _ = writeln!(out, "    {} ({})", call.function, call.instance);
    }
}
