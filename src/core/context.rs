//! Execution and validation contexts.
//!
//! Contexts carry the parameter values the host hands a node and collect
//! the outputs it produces.

use crate::core::error::{ExecutionError, NodeId, ValidationError};
use crate::core::tensor::{ImageTensor, MaskTensor};
use crate::core::types::{PortType, Value};
use std::collections::HashMap;

/// Context provided during node validation.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// ID of the node being validated.
    pub node_id: NodeId,
    /// Parameter values.
    parameters: HashMap<String, Value>,
}

impl ValidationContext {
    /// Create a new validation context.
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            parameters: HashMap::new(),
        }
    }

    /// Add a parameter value to the context.
    pub fn add_parameter(&mut self, name: impl Into<String>, value: Value) {
        self.parameters.insert(name.into(), value);
    }

    /// Get all parameters.
    pub fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }

    /// Get a parameter value by name.
    pub fn get_parameter(&self, name: &str) -> Result<&Value, ValidationError> {
        self.parameters
            .get(name)
            .ok_or_else(|| ValidationError::MissingRequiredInput {
                node_id: self.node_id,
                port: name.to_string(),
            })
    }

    /// Get a parameter as an integer.
    pub fn get_integer(&self, name: &str) -> Result<i64, ValidationError> {
        let value = self.get_parameter(name)?;
        value.as_integer().ok_or_else(|| self.type_mismatch(name, PortType::Integer, value))
    }

    /// Get a parameter as a string.
    pub fn get_string(&self, name: &str) -> Result<&str, ValidationError> {
        let value = self.get_parameter(name)?;
        value.as_string().ok_or_else(|| self.type_mismatch(name, PortType::String, value))
    }

    /// Check if a parameter exists.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    fn type_mismatch(&self, name: &str, expected: PortType, got: &Value) -> ValidationError {
        ValidationError::ConstraintViolation {
            node_id: self.node_id,
            parameter: name.to_string(),
            error: format!("expected {}, got {}", expected, got.get_type()),
        }
    }
}

/// Context provided during node execution.
///
/// ExecutionContext contains the parameter values and allows nodes to
/// set their output values.
#[derive(Debug)]
pub struct ExecutionContext {
    /// ID of the node being executed.
    pub node_id: NodeId,
    /// Parameter values.
    parameters: HashMap<String, Value>,
    /// Output values set by the node.
    outputs: HashMap<String, Value>,
}

impl ExecutionContext {
    /// Create a new execution context.
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            parameters: HashMap::new(),
            outputs: HashMap::new(),
        }
    }

    /// Add a parameter value to the context.
    pub fn add_parameter(&mut self, name: impl Into<String>, value: Value) {
        self.parameters.insert(name.into(), value);
    }

    /// Get all parameters.
    pub fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }

    /// Get all outputs.
    pub fn outputs(&self) -> &HashMap<String, Value> {
        &self.outputs
    }

    /// Take ownership of all outputs.
    pub fn take_outputs(self) -> HashMap<String, Value> {
        self.outputs
    }

    // ========================================================================
    // Parameter Getters
    // ========================================================================

    /// Get a parameter value by name.
    pub fn get_parameter(&self, name: &str) -> Result<&Value, ExecutionError> {
        self.parameters
            .get(name)
            .ok_or_else(|| ExecutionError::MissingParameter {
                node_id: self.node_id,
                parameter: name.to_string(),
            })
    }

    /// Get a parameter as an integer.
    pub fn get_integer(&self, name: &str) -> Result<i64, ExecutionError> {
        self.get_parameter(name)?
            .as_integer()
            .ok_or_else(|| ExecutionError::NodeExecution {
                node_id: self.node_id,
                error: format!("Parameter '{}' is not an integer", name),
            })
    }

    /// Get a parameter as a string.
    pub fn get_string(&self, name: &str) -> Result<&str, ExecutionError> {
        self.get_parameter(name)?
            .as_string()
            .ok_or_else(|| ExecutionError::NodeExecution {
                node_id: self.node_id,
                error: format!("Parameter '{}' is not a string", name),
            })
    }

    /// Check if a parameter exists.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    // ========================================================================
    // Output Setters
    // ========================================================================

    /// Set an output value.
    pub fn set_output(&mut self, name: impl Into<String>, value: Value) -> Result<(), ExecutionError> {
        self.outputs.insert(name.into(), value);
        Ok(())
    }

    /// Set an output image tensor.
    pub fn set_output_image(&mut self, name: impl Into<String>, image: ImageTensor) -> Result<(), ExecutionError> {
        self.set_output(name, Value::Image(image))
    }

    /// Set an output mask tensor.
    pub fn set_output_mask(&mut self, name: impl Into<String>, mask: MaskTensor) -> Result<(), ExecutionError> {
        self.set_output(name, Value::Mask(mask))
    }

    /// Check if an output has been set.
    pub fn has_output(&self, name: &str) -> bool {
        self.outputs.contains_key(name)
    }
}

/// Convert ValidationContext to ExecutionContext.
impl From<ValidationContext> for ExecutionContext {
    fn from(val_ctx: ValidationContext) -> Self {
        let mut exec_ctx = ExecutionContext::new(val_ctx.node_id);
        for (name, value) in val_ctx.parameters {
            exec_ctx.add_parameter(name, value);
        }
        exec_ctx
    }
}
