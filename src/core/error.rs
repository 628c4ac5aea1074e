//! Error types for bm_nodes.
//!
//! Uses thiserror for structured errors with context. Errors are designed to:
//! - Carry actionable information (which node, which file, what to fix)
//! - Support error chaining for context

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a node instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a node ID from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum BmError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures of the directory-selection operation.
///
/// Bad directory entries, out-of-range indices and missing alpha are
/// absorbed; only these conditions escape.
#[derive(Error, Debug)]
pub enum SelectError {
    #[error("No valid image files found in the given directory/directories.")]
    NoCandidateFiles { directories: String },

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Unknown sort mode label.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort mode '{0}'. Use: Filename, Date (Newest First), Date (Oldest First), or FileSize")]
pub struct ParseSortModeError(pub String);

/// Failures while loading a [`LoaderConfig`](crate::config::LoaderConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Errors from the validation phase.
///
/// Validation errors are caught before execution begins.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Missing required input '{port}' on node {node_id}")]
    MissingRequiredInput { node_id: NodeId, port: String },

    #[error("Constraint violation on node {node_id}, parameter '{parameter}': {error}")]
    ConstraintViolation {
        node_id: NodeId,
        parameter: String,
        error: String,
    },

    #[error("Custom validation failed on node {node_id}: {error}")]
    CustomValidation { node_id: NodeId, error: String },

    #[error("{0}")]
    Other(String),
}

/// Errors during node execution.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Node {node_id} execution failed: {source}")]
    Selection {
        node_id: NodeId,
        #[source]
        source: SelectError,
    },

    #[error("Node {node_id} execution failed: {error}")]
    NodeExecution { node_id: NodeId, error: String },

    #[error("Missing parameter '{parameter}' for node {node_id}")]
    MissingParameter { node_id: NodeId, parameter: String },

    #[error("Output '{port}' was not set by node {node_id}")]
    OutputNotSet { node_id: NodeId, port: String },

    #[error("{0}")]
    Other(String),
}

// ============================================================================
// Error Utilities
// ============================================================================

impl SelectError {
    /// Whether the failure comes from an empty candidate list.
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, SelectError::NoCandidateFiles { .. })
    }
}

impl ValidationError {
    /// Get suggestion for fixing this error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            ValidationError::MissingRequiredInput { port, .. } => {
                Some(format!("Set a value for '{}'", port))
            }
            ValidationError::ConstraintViolation { parameter, error, .. } => {
                Some(format!("Adjust '{}': {}", parameter, error))
            }
            _ => None,
        }
    }

    /// Get list of affected node IDs.
    pub fn affected_nodes(&self) -> Vec<NodeId> {
        match self {
            ValidationError::MissingRequiredInput { node_id, .. }
            | ValidationError::ConstraintViolation { node_id, .. }
            | ValidationError::CustomValidation { node_id, .. } => vec![*node_id],
            ValidationError::Other(_) => vec![],
        }
    }
}

impl ExecutionError {
    /// Get the node ID that caused this error, if applicable.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            ExecutionError::Selection { node_id, .. }
            | ExecutionError::NodeExecution { node_id, .. }
            | ExecutionError::MissingParameter { node_id, .. }
            | ExecutionError::OutputNotSet { node_id, .. } => Some(*node_id),
            ExecutionError::Other(_) => None,
        }
    }
}

/// Result type alias for crate operations.
pub type BmResult<T> = Result<T, BmError>;

/// Result type alias for selection operations.
pub type SelectResult<T> = Result<T, SelectError>;
