//! Library instance data model.
//!
//! A `LibraryInstance` is a concrete implementation unit. It produces zero or
//! more library classes and consumes zero or more library classes. Instances
//! are assembled by whatever resolves a module's library closure (the
//! manifest loader in this crate) and are treated as immutable while an
//! order is computed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::identity::InstanceId;

/// A library instance taking part in one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryInstance {
    pub id: InstanceId,
    /// Name of the constructor function, if the instance has one
    pub constructor: Option<String>,
    /// Name of the destructor function, if the instance has one
    pub destructor: Option<String>,
    /// Library classes this instance always produces
    pub produces: BTreeSet<String>,
    /// Library classes this instance always consumes, in declaration order
    pub consumes: Vec<String>,
}

impl LibraryInstance {
    pub fn new(id: InstanceId) -> Self {
        Self {
            id,
            constructor: None,
            destructor: None,
            produces: BTreeSet::new(),
            consumes: Vec::new(),
        }
    }

    pub fn producing<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.produces.extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn consuming<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumes.extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn with_constructor(mut self, function: impl Into<String>) -> Self {
        self.constructor = Some(function.into());
        self
    }

    pub fn with_destructor(mut self, function: impl Into<String>) -> Self {
        self.destructor = Some(function.into());
        self
    }
}
