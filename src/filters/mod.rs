//! Node module.
//!
//! Contains the node registry and the built-in node implementations.

pub mod registry;
pub mod builtin;

pub use registry::{FilterFactory, FilterRegistry, RegistryEntry};
