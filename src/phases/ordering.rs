//! Phase 3: Determining Instance Order
//!
//! This is the third phase of a resolution. It turns the dependency graph
//! into the destructor order: a total order in which every producer comes
//! before every consumer that needs it.
//!
//! ## Process
//!
//! 1.  **Leaf Peeling**: The first batch holds the instances that consume
//!     nothing. Each following batch holds the instances whose last
//!     unplaced producer was placed in the batch before it. Batches are
//!     appended to the order. Remaining-producer counters make this linear
//!     in the size of the graph.
//!
//! 2.  **Tie-break**: Within one batch, instances keep their declaration
//!     order, so identical input always yields an identical order.
//!
//! 3.  **Completeness**: If peeling stops while instances remain unplaced,
//!     the graph still holds a cycle. That fails with `OrderingIncomplete`
//!     rather than returning a partial order.
//!
//! The constructor order is the exact reverse of the destructor order and is
//! derived by the orchestrator.

use std::collections::HashSet;

use log::debug;

use super::DependencyGraph;
use crate::error::{Error, Result};
use crate::identity::InstanceId;

/// Execute Phase 3: compute the destructor order for the graph.
pub fn execute(graph: &DependencyGraph) -> Result<Vec<InstanceId>> {
    let dag = &graph.dag;
    let mut order: Vec<InstanceId> = Vec::with_capacity(dag.len());

    for batch in dag.leaf_batches() {
        debug!(
            "{}: placing batch of {} instance(s): {}",
            graph.context,
            batch.len(),
            batch
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        order.extend(batch);
    }

    if order.len() < dag.len() {
        let placed: HashSet<&InstanceId> = order.iter().collect();
        let unplaced = dag
            .nodes()
            .iter()
            .filter(|n| !placed.contains(n))
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::OrderingIncomplete {
            placed: order.len(),
            total: dag.len(),
            unplaced,
        });
    }

    Ok(order)
}
