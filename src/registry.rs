//! # Library Class Registry
//!
//! Maps each library class name to the single library instance that produces
//! it. One registry is built per resolution context; a class may have at most
//! one producer within it.

use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result};
use crate::identity::InstanceId;

/// Library class name -> producing instance.
#[derive(Debug, Default, Clone)]
pub struct ClassRegistry {
    producers: HashMap<String, InstanceId>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `instance` as the producer of `class`.
    ///
    /// Registering the same instance twice for a class is a no-op. A second,
    /// different producer fails with [`Error::DuplicateProducer`] and leaves
    /// the original registration in place.
    pub fn register(&mut self, class: &str, instance: &InstanceId) -> Result<()> {
        match self.producers.get(class) {
            Some(existing) if existing == instance => Ok(()),
            Some(existing) => Err(Error::DuplicateProducer {
                class: class.to_string(),
                existing: existing.to_string(),
                duplicate: instance.to_string(),
            }),
            None => {
                debug!("library class '{}' produced by {}", class, instance);
                self.producers.insert(class.to_string(), instance.clone());
                Ok(())
            }
        }
    }

    pub fn producer_of(&self, class: &str) -> Option<&InstanceId> {
        self.producers.get(class)
    }

    /// All registered class names, sorted.
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.producers.keys().map(String::as_str).collect();
        classes.sort_unstable();
        classes
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }
}
