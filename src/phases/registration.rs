//! Phase 1: Registration
//!
//! This is the first phase of a resolution. It records every library
//! instance in the consumption map and every produced library class in the
//! class registry.
//!
//! ## Process
//!
//! 1.  **Instance Registration**: Each instance is recorded in the
//!     consumption map in declaration order. Supplying the same identity
//!     twice fails with `DuplicateInstance`.
//!
//! 2.  **Class Registration**: Each produced class is registered against its
//!     instance. A class produced by two different instances fails with
//!     `DuplicateProducer`.
//!
//! Both failures abort the resolution; nothing is retried.

use log::debug;

use super::Registration;
use crate::consumption::ConsumptionMap;
use crate::error::Result;
use crate::identity::ResolutionContext;
use crate::instance::LibraryInstance;
use crate::registry::ClassRegistry;

/// Execute Phase 1: build the class registry and consumption map.
pub fn execute(context: &ResolutionContext, instances: &[LibraryInstance]) -> Result<Registration> {
    let mut registry = ClassRegistry::new();
    let mut consumption = ConsumptionMap::new();

    for instance in instances {
        consumption.record_consumption(&instance.id, instance.consumes.clone())?;
        for class in &instance.produces {
            registry.register(class, &instance.id)?;
        }
    }

    debug!(
        "{}: registered {} instances producing {} library classes",
        context,
        consumption.len(),
        registry.len()
    );

    Ok(Registration {
        context: context.clone(),
        registry,
        consumption,
    })
}
