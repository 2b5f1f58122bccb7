//! Phase 2: Graph Construction
//!
//! Builds the dependency graph from the registration phase. Every instance
//! becomes a node (in declaration order) and every consumed library class
//! becomes an edge from the consumer to the class's unique producer.
//!
//! ## Failure Modes
//!
//! - A consumed class with no producer fails with `UnmetDependency`, naming
//!   the class, the consumer and the module context. A "did you mean" hint is
//!   attached when a registered class name is close.
//! - An edge that would close a cycle fails with `CircularDependency` under
//!   `CyclePolicy::Fatal`. Under `CyclePolicy::Warn` the cycle path is logged
//!   and recorded, the edge is dropped, and construction continues.

use log::{debug, warn};

use super::{CyclePolicy, DependencyGraph, Registration, ResolveOptions};
use crate::dag::Dag;
use crate::error::{Error, Result};
use crate::suggestions;

/// Execute Phase 2: build the consumer -> producer graph.
pub fn execute(registration: &Registration, options: &ResolveOptions) -> Result<DependencyGraph> {
    let context = &registration.context;
    let mut dag = Dag::new();
    let mut dropped_cycles = Vec::new();

    for instance in registration.instances() {
        dag.add_node(instance.clone());
    }

    for (consumer, classes) in registration.consumption.iter() {
        for class in classes {
            let producer = registration.registry.producer_of(class).ok_or_else(|| {
                Error::UnmetDependency {
                    class: class.clone(),
                    consumer: consumer.to_string(),
                    context: context.to_string(),
                    hint: suggestions::did_you_mean(class, registration.registry.classes()),
                }
            })?;

            match dag.add_edge(consumer, producer) {
                Ok(()) => debug!("{}: {} -> {} via '{}'", context, consumer, producer, class),
                Err(Error::CircularDependency { cycle })
                    if options.cycle_policy == CyclePolicy::Warn =>
                {
                    warn!(
                        "{}: dropping edge {} -> {} for library class '{}', it closes a cycle: {}",
                        context, consumer, producer, class, cycle
                    );
                    dropped_cycles.push(cycle);
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(DependencyGraph {
        context: context.clone(),
        dag,
        dropped_cycles,
    })
}
