//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays a module's
//! library dependency graph as a tree: consumers at the top, the producers
//! they depend on as their children.
//!
//! ## Functionality
//!
//! - **Dependency Visualization**: One tree per architecture the module is
//!   listed for, rooted at the module itself.
//! - **Depth Control**: Supports `--depth` to limit how far the tree expands.
//!
//! Instances reachable through several consumers are shown under each of
//! them. This command is a safe, read-only operation.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::path::PathBuf;

use liborder::dag::Dag;
use liborder::identity::InstanceId;
use liborder::phases::{phase1, phase2, ResolveOptions};

use super::{describe_error, load_manifest, select_modules};

/// Display a module's library dependency tree
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Path to the manifest describing libraries and modules.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "LIBORDER_MANIFEST",
        default_value = liborder::defaults::DEFAULT_MANIFEST
    )]
    pub manifest: PathBuf,

    /// The module to display.
    #[arg(long, value_name = "NAME")]
    pub module: String,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the module, 1 to show its top-level libraries, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let manifest = load_manifest(&args.manifest)?;
    let modules = select_modules(&manifest, Some(&args.module))?;
    let max_depth = args.depth.unwrap_or(usize::MAX);

    for module in modules {
        let context = module.context();
        let instances = manifest
            .instances_for(module)
            .map_err(|e| anyhow::anyhow!("{}: {}", context, describe_error(&e)))?;

        // Cycles are shown, not fatal, so the tree can help find them
        let graph = phase1::execute(&context, &instances)
            .and_then(|registration| phase2::execute(&registration, &ResolveOptions::lenient()))
            .map_err(|e| anyhow::anyhow!("{}: {}", context, describe_error(&e)))?;

        let root = TreeNode {
            label: format!("🌳 {}", context),
            children: if max_depth == 0 {
                vec![]
            } else {
                graph
                    .dag
                    .roots()
                    .iter()
                    .map(|id| build_tree_node(&graph.dag, id, max_depth, 1))
                    .collect()
            },
        };
        print_tree(&root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;

        for cycle in &graph.dropped_cycles {
            println!("(cycle edge not shown: {})", cycle);
        }
    }

    Ok(())
}

/// Build a tree node for `id` and, depth permitting, its producers.
fn build_tree_node(
    dag: &Dag<InstanceId>,
    id: &InstanceId,
    max_depth: usize,
    current_depth: usize,
) -> TreeNode {
    let label = id.to_string();
    let children = dag.children(id);

    if current_depth >= max_depth || children.is_empty() {
        TreeNode {
            label,
            children: vec![],
        }
    } else {
        let children = children
            .iter()
            .map(|child| build_tree_node(dag, child, max_depth, current_depth + 1))
            .collect();
        TreeNode { label, children }
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
