//! Orchestrator for a complete resolution
//!
//! This module coordinates all phases to provide a clean API for resolving
//! the constructor and destructor order of a module's library instances.

use std::collections::HashMap;

use rayon::prelude::*;

use super::{phase1, phase2, phase3, LifecycleCall, Resolution, ResolveOptions};
use crate::config::{Manifest, ModuleEntry};
use crate::error::Result;
use crate::identity::{InstanceId, ResolutionContext};
use crate::instance::LibraryInstance;

/// Resolve the order of `instances` (Phases 1-3)
///
/// This runs the complete pipeline:
/// 1. Register producers and consumers
/// 2. Build the consumer -> producer dependency graph
/// 3. Peel leaves to get the destructor order
///
/// The constructor order is the reverse of the destructor order. Either a
/// complete order is returned or the first error encountered.
pub fn resolve(
    context: &ResolutionContext,
    instances: &[LibraryInstance],
    options: &ResolveOptions,
) -> Result<Resolution> {
    // Phase 1: Registration
    let registration = phase1::execute(context, instances)?;

    // Phase 2: Graph Construction
    let graph = phase2::execute(&registration, options)?;

    // Phase 3: Ordering
    let destructor_order = phase3::execute(&graph)?;

    let constructor_order: Vec<InstanceId> = destructor_order.iter().rev().cloned().collect();

    let by_id: HashMap<&InstanceId, &LibraryInstance> =
        instances.iter().map(|inst| (&inst.id, inst)).collect();
    let constructors = lifecycle_calls(&constructor_order, &by_id, |inst| {
        inst.constructor.as_deref()
    });
    let destructors = lifecycle_calls(&destructor_order, &by_id, |inst| {
        inst.destructor.as_deref()
    });

    Ok(Resolution {
        context: context.clone(),
        constructor_order,
        destructor_order,
        constructors,
        destructors,
        dropped_cycles: graph.dropped_cycles,
    })
}

/// Resolve one module entry of a manifest.
pub fn resolve_module(
    manifest: &Manifest,
    module: &ModuleEntry,
    options: &ResolveOptions,
) -> Result<Resolution> {
    let instances = manifest.instances_for(module)?;
    resolve(&module.context(), &instances, options)
}

/// Resolve every module in the manifest.
///
/// Modules are independent resolutions with no shared state and run in
/// parallel. Results come back in manifest order, keyed by the module's
/// context.
pub fn resolve_all(
    manifest: &Manifest,
    options: &ResolveOptions,
) -> Vec<(ResolutionContext, Result<Resolution>)> {
    manifest
        .modules
        .par_iter()
        .map(|module| (module.context(), resolve_module(manifest, module, options)))
        .collect()
}

fn lifecycle_calls<F>(
    order: &[InstanceId],
    by_id: &HashMap<&InstanceId, &LibraryInstance>,
    hook: F,
) -> Vec<LifecycleCall>
where
    F: Fn(&LibraryInstance) -> Option<&str>,
{
    order
        .iter()
        .filter_map(|id| {
            let instance = by_id.get(id)?;
            hook(instance).map(|function| LifecycleCall {
                instance: id.clone(),
                function: function.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn lib(name: &str) -> LibraryInstance {
        LibraryInstance::new(InstanceId::named(name))
    }

    fn names(order: &[InstanceId]) -> Vec<&str> {
        order.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_resolve_chain_scenario() {
        let instances = vec![
            lib("A").producing(["A"]),
            lib("B").producing(["B"]).consuming(["A"]),
            lib("C").consuming(["B", "A"]),
        ];
        let resolution =
            resolve(&ResolutionContext::default(), &instances, &ResolveOptions::default()).unwrap();

        assert_eq!(names(&resolution.destructor_order), vec!["A", "B", "C"]);
        assert_eq!(names(&resolution.constructor_order), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_resolve_lifecycle_calls_follow_orders() {
        let instances = vec![
            lib("Net").producing(["Net"]).with_constructor("NetInit").with_destructor("NetFini"),
            lib("Disk")
                .producing(["Disk"])
                .consuming(["Net"])
                .with_constructor("DiskInit"),
            lib("App").consuming(["Disk", "Net"]).with_destructor("AppFini"),
        ];
        let resolution =
            resolve(&ResolutionContext::default(), &instances, &ResolveOptions::default()).unwrap();

        let ctors: Vec<&str> = resolution.constructors.iter().map(|c| c.function.as_str()).collect();
        let dtors: Vec<&str> = resolution.destructors.iter().map(|c| c.function.as_str()).collect();
        assert_eq!(ctors, vec!["DiskInit", "NetInit"]);
        assert_eq!(dtors, vec!["NetFini", "AppFini"]);
    }

    #[test]
    fn test_resolve_propagates_phase_errors() {
        let instances = vec![lib("App").consuming(["Missing"])];
        let err = resolve(&ResolutionContext::default(), &instances, &ResolveOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnmetDependency { .. }));
    }

    #[test]
    fn test_resolve_lenient_records_dropped_cycles() {
        let instances = vec![
            lib("A").producing(["A"]).consuming(["B"]),
            lib("B").producing(["B"]).consuming(["A"]),
        ];
        let resolution =
            resolve(&ResolutionContext::default(), &instances, &ResolveOptions::lenient()).unwrap();

        assert_eq!(resolution.len(), 2);
        assert_eq!(resolution.dropped_cycles.len(), 1);
        // A -> B survived, so B is placed first
        assert_eq!(names(&resolution.destructor_order), vec!["B", "A"]);
    }

    #[test]
    fn test_resolve_all_keeps_manifest_order() {
        let manifest = crate::config::parse(
            r#"
libraries:
  - name: Base
    produces: [Base]
  - name: Print
    produces: [Print]
    consumes: [Base]
modules:
  - name: First
    libraries: [Base, Print]
  - name: Second
    arch: X64
    libraries: [Print]
  - name: Third
    libraries: [Base]
"#,
        )
        .unwrap();

        let results = resolve_all(&manifest, &ResolveOptions::default());
        let contexts: Vec<String> = results.iter().map(|(ctx, _)| ctx.to_string()).collect();
        assert_eq!(contexts, vec!["First [COMMON]", "Second [X64]", "Third [COMMON]"]);
        assert!(results[0].1.is_ok());
        assert!(matches!(results[1].1, Err(Error::UnmetDependency { .. })));
        assert!(results[2].1.is_ok());
    }

    #[test]
    fn test_resolve_long_chain() {
        // Lib{i} consumes the class of Lib{i-1}, declared in chain order
        let len = 20_000;
        let instances: Vec<LibraryInstance> = (0..len)
            .map(|i| {
                let inst = lib(&format!("Lib{i}")).producing([format!("Class{i}")]);
                if i == 0 {
                    inst
                } else {
                    inst.consuming([format!("Class{}", i - 1)])
                }
            })
            .collect();

        let ctx = ResolutionContext::new("Chain", "X64");
        let resolution = resolve(&ctx, &instances, &ResolveOptions::default()).unwrap();
        assert_eq!(resolution.len(), len);
        assert_eq!(resolution.destructor_order[0].name, "Lib0");
        assert_eq!(resolution.constructor_order[0].name, format!("Lib{}", len - 1));
    }

    #[test]
    fn test_resolve_long_chain_declared_backwards() {
        let len = 5_000;
        let instances: Vec<LibraryInstance> = (0..len)
            .rev()
            .map(|i| {
                let inst = lib(&format!("Lib{i}")).producing([format!("Class{i}")]);
                if i == 0 {
                    inst
                } else {
                    inst.consuming([format!("Class{}", i - 1)])
                }
            })
            .collect();

        let ctx = ResolutionContext::new("Chain", "X64");
        let resolution = resolve(&ctx, &instances, &ResolveOptions::default()).unwrap();
        assert_eq!(resolution.destructor_order[0].name, "Lib0");
        assert_eq!(resolution.destructor_order[len - 1].name, format!("Lib{}", len - 1));
    }
}
