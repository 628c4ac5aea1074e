//! Core types and traits for bm_nodes.
//!
//! This module contains the foundational types a node is built from:
//! - Value types and the tensors handed to the host
//! - Port and parameter definitions with constraints
//! - Node trait and metadata
//! - Error types
//! - Execution and validation contexts

pub mod types;
pub mod tensor;
pub mod port;
pub mod error;
pub mod context;
pub mod node;

// Re-export commonly used types
pub use types::{Value, PortType};
pub use tensor::{ImageTensor, MaskTensor};
pub use port::{PortDefinition, PortDirection, ParameterDefinition, Constraint, UiHint};
pub use error::{BmError, ConfigError, ExecutionError, ParseSortModeError, SelectError, ValidationError};
pub use context::{ValidationContext, ExecutionContext};
pub use node::{FilterNode, NodeMetadata, Category};
