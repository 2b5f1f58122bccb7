//! # Library Instance Ordering
//!
//! This library resolves the dependencies between a module's library
//! instances and computes the order in which their constructors and
//! destructors must run. It is designed to be used by the `liborder`
//! command-line tool but is a pure, in-memory library that any build
//! generator can call.
//!
//! ## Quick Example
//!
//! ```
//! use liborder::identity::{InstanceId, ResolutionContext};
//! use liborder::instance::LibraryInstance;
//! use liborder::phases::{resolve, ResolveOptions};
//!
//! let instances = vec![
//!     LibraryInstance::new(InstanceId::named("A")).producing(["A"]),
//!     LibraryInstance::new(InstanceId::named("B")).producing(["B"]).consuming(["A"]),
//!     LibraryInstance::new(InstanceId::named("C")).consuming(["B", "A"]),
//! ];
//!
//! let context = ResolutionContext::new("HelloWorld", "IA32");
//! let resolution = resolve(&context, &instances, &ResolveOptions::default()).unwrap();
//!
//! let names: Vec<&str> = resolution.destructor_order.iter().map(|i| i.name.as_str()).collect();
//! assert_eq!(names, ["A", "B", "C"]);
//! let names: Vec<&str> = resolution.constructor_order.iter().map(|i| i.name.as_str()).collect();
//! assert_eq!(names, ["C", "B", "A"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Library class**: a named abstract interface. Instances produce and
//!   consume classes by name.
//! - **Library instance (`instance`)**: a concrete implementation, identified
//!   by an [`identity::InstanceId`].
//! - **Registry (`registry`)**: maps each class to its single producer.
//! - **Consumption map (`consumption`)**: what each instance consumes.
//! - **Dependency graph (`dag`)**: consumer -> producer edges, kept acyclic.
//! - **Phases (`phases`)**: the pipeline that ties them together.
//!
//! ## Execution Flow
//!
//! The main entry point is [`phases::resolve`], which executes:
//!
//! 1.  **Registration**: Record producers and consumers, rejecting duplicate
//!     producers and duplicate instances.
//! 2.  **Graph Construction**: Add an edge for every consumed class, rejecting
//!     unmet dependencies and cycles.
//! 3.  **Ordering**: Peel leaves to get the destructor order; the constructor
//!     order is its reverse.
//!
//! [`phases::resolve_all`] runs the pipeline for every module of a
//! [`config::Manifest`], in parallel.

pub mod config;
pub mod consumption;
pub mod dag;
pub mod defaults;
pub mod error;
pub mod identity;
pub mod instance;
pub mod output;
pub mod phases;
pub mod registry;
pub mod suggestions;

#[cfg(test)]
mod order_proptest;
