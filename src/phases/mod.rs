//! Implementation of the phases of a library-order resolution.
//!
//! ## Overview
//!
//! A resolution follows 3 phases:
//! 1. Registration - Populate the library class registry and the consumption map
//! 2. Graph Construction - Turn every consumed class into a consumer -> producer edge
//! 3. Ordering - Peel leaves off the graph to get the destructor order
//!
//! The orchestrator runs the phases in sequence and derives the constructor
//! order and lifecycle hook lists from the result.
//!
//! Each phase depends only on the previous phases and the foundation layers
//! (`identity`, `instance`, `registry`, `consumption`, `dag`). Every
//! resolution owns its own registry, map and graph, so independent modules
//! can be resolved concurrently.

use serde::{Deserialize, Serialize};

use crate::consumption::ConsumptionMap;
use crate::dag::Dag;
use crate::identity::{InstanceId, ResolutionContext};
use crate::registry::ClassRegistry;

// Phase modules
pub mod graph;
pub mod orchestrator;
pub mod ordering;
pub mod registration;

// Re-export phase modules under their pipeline position
pub use graph as phase2;
pub use ordering as phase3;
pub use registration as phase1;

pub use orchestrator::{resolve, resolve_all, resolve_module};

/// What to do when a consumer -> producer edge would close a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Abort the resolution with `Error::CircularDependency`.
    #[default]
    Fatal,
    /// Log the cycle, drop the edge, and keep going.
    Warn,
}

/// Options controlling a resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub cycle_policy: CyclePolicy,
}

impl ResolveOptions {
    pub fn lenient() -> Self {
        Self {
            cycle_policy: CyclePolicy::Warn,
        }
    }
}

/// Output of phase 1.
#[derive(Debug, Clone)]
pub struct Registration {
    pub context: ResolutionContext,
    pub registry: ClassRegistry,
    pub consumption: ConsumptionMap,
}

impl Registration {
    /// Instance identities in declaration order.
    pub fn instances(&self) -> impl Iterator<Item = &InstanceId> {
        self.consumption.iter().map(|(id, _)| id)
    }
}

/// Output of phase 2.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    pub context: ResolutionContext,
    pub dag: Dag<InstanceId>,
    /// Cycle paths whose closing edge was dropped under `CyclePolicy::Warn`
    pub dropped_cycles: Vec<String>,
}

/// A constructor or destructor call for one library instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleCall {
    pub instance: InstanceId,
    pub function: String,
}

/// The result of resolving one module's library instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub context: ResolutionContext,
    /// Initialization sequence: the exact reverse of `destructor_order`
    pub constructor_order: Vec<InstanceId>,
    /// Finalization sequence: every producer precedes its consumers
    pub destructor_order: Vec<InstanceId>,
    /// Constructor calls, in constructor order
    pub constructors: Vec<LifecycleCall>,
    /// Destructor calls, in destructor order
    pub destructors: Vec<LifecycleCall>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped_cycles: Vec<String>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.destructor_order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.destructor_order.len()
    }
}

#[cfg(test)]
mod phase_tests {
    use super::*;

    #[test]
    fn test_default_policy_is_fatal() {
        assert_eq!(ResolveOptions::default().cycle_policy, CyclePolicy::Fatal);
        assert_eq!(ResolveOptions::lenient().cycle_policy, CyclePolicy::Warn);
    }

    #[test]
    fn test_cycle_policy_serde_names() {
        let policy: CyclePolicy = serde_yaml::from_str("warn").unwrap();
        assert_eq!(policy, CyclePolicy::Warn);
        assert_eq!(serde_json::to_string(&CyclePolicy::Fatal).unwrap(), "\"fatal\"");
    }

    #[test]
    fn test_resolution_skips_empty_dropped_cycles() {
        let resolution = Resolution {
            context: ResolutionContext::new("M", "X64"),
            constructor_order: vec![],
            destructor_order: vec![],
            constructors: vec![],
            destructors: vec![],
            dropped_cycles: vec![],
        };
        let json = serde_json::to_string(&resolution).unwrap();
        assert!(!json.contains("dropped_cycles"));
        assert!(resolution.is_empty());
    }
}
