//! # Error Suggestions
//!
//! Helpers for generating error hints. Errors should tell users what went
//! wrong and how to fix it; most mistakes in a manifest are typos in a
//! library class or library name, so the main tool here is a "did you mean"
//! lookup over the names that do exist.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::suggestions;
//!
//! let hint = suggestions::did_you_mean("PrntLib", registry.classes());
//! ```

use std::path::Path;

/// Build a "Did you mean 'x'?" hint if a candidate is close to `input`.
pub fn did_you_mean<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    find_similar(input, candidates).map(|s| format!("Did you mean '{s}'?"))
}

/// Generate an error for when the manifest file is not found.
///
/// Includes hints about:
/// - Creating a manifest
/// - Using the -m/--manifest flag
/// - Using the LIBORDER_MANIFEST environment variable
pub fn manifest_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Manifest file not found: {path}\n\n\
         hint: Create a {default} file describing 'libraries:' and 'modules:'\n\
         hint: Use -m/--manifest to specify a different path\n\
         hint: Set {env} environment variable",
        path = path.display(),
        default = crate::defaults::DEFAULT_MANIFEST,
        env = crate::defaults::MANIFEST_ENV,
    )
}

/// Generate an error for a module name that is not in the manifest.
///
/// Lists the modules that do exist and suggests a close match.
pub fn unknown_module(module: &str, available: &[&str]) -> anyhow::Error {
    let did_you_mean = did_you_mean(module, available.iter().copied())
        .map(|s| format!("\nhint: {s}"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown module: {module}{did_you_mean}\n\n\
         Modules in this manifest: {mods}",
        mods = if available.is_empty() {
            "(none)".to_string()
        } else {
            available.join(", ")
        }
    )
}

/// Generate an error for a circular dependency between library instances.
///
/// Includes hints about how to resolve the cycle.
pub fn cycle_detected(cycle: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Circular dependency between library instances: {cycle}\n\n\
         hint: Remove one of the 'consumes:' entries along the cycle\n\
         hint: Use --lenient-cycles to drop the offending edge and continue"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
