//! # Consumption Map
//!
//! Records, for each library instance, the library classes it consumes. The
//! map remembers the order instances were recorded in so that graph
//! construction and diagnostics are deterministic.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::identity::InstanceId;

/// Library instance -> consumed class names, in declaration order.
#[derive(Debug, Default, Clone)]
pub struct ConsumptionMap {
    entries: Vec<(InstanceId, Vec<String>)>,
    index: HashMap<InstanceId, usize>,
}

impl ConsumptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the classes consumed by `instance`.
    ///
    /// Each instance may be recorded once; a second entry for the same
    /// identity fails with [`Error::DuplicateInstance`].
    pub fn record_consumption(&mut self, instance: &InstanceId, classes: Vec<String>) -> Result<()> {
        if self.index.contains_key(instance) {
            return Err(Error::DuplicateInstance {
                instance: instance.to_string(),
            });
        }
        self.index.insert(instance.clone(), self.entries.len());
        self.entries.push((instance.clone(), classes));
        Ok(())
    }

    /// Classes consumed by `instance`, or `None` if it was never recorded.
    pub fn consumed_classes(&self, instance: &InstanceId) -> Option<&[String]> {
        self.index
            .get(instance)
            .map(|&idx| self.entries[idx].1.as_slice())
    }

    pub fn contains(&self, instance: &InstanceId) -> bool {
        self.index.contains_key(instance)
    }

    /// Iterate over `(instance, consumed classes)` in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&InstanceId, &[String])> {
        self.entries
            .iter()
            .map(|(id, classes)| (id, classes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
