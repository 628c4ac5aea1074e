//! Port and parameter definitions for node inputs/outputs.
//!
//! Ports define the interface of a node - what data it accepts and produces.
//! Parameters are the widgets the host renders on the node itself. Both carry
//! constraints that are checked before execution.

use crate::core::types::{PortType, Value};
use serde::{Deserialize, Serialize};

/// Direction of a port (input or output).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
}

/// Definition of a node port (input or output).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortDefinition {
    /// Unique name within the node (used in code)
    pub name: String,
    /// Human-readable name (used in UI)
    pub display_name: String,
    /// Type of data this port accepts/produces
    pub port_type: PortType,
    /// Direction (input or output)
    pub direction: PortDirection,
    /// Whether this port is optional
    pub optional: bool,
    /// Description for documentation and tooltips
    pub description: String,
}

/// UI hints for parameter display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "widget", content = "options")]
pub enum UiHint {
    /// Default input widget based on type
    #[default]
    Default,
    /// Dropdown for selecting from options
    Dropdown {
        /// Available options
        options: Vec<String>,
    },
    /// Text input field
    TextInput {
        /// Allow multiple lines
        multiline: bool,
        /// Placeholder text
        placeholder: Option<String>,
    },
    /// Spin box for integers
    SpinBox {
        /// Increment per click
        step: i64,
    },
}

/// Definition of a node parameter (configuration widget).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Unique name within the node
    pub name: String,
    /// Human-readable name
    pub display_name: String,
    /// Type of the parameter
    pub param_type: PortType,
    /// Default value (required for parameters)
    pub default_value: Value,
    /// Tooltip text
    pub description: String,
    /// Constraints for validation
    pub constraints: Vec<Constraint>,
    /// UI widget hint
    pub ui_hint: UiHint,
}

/// Constraints that can be applied to parameter values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum Constraint {
    /// Numeric value must be within range [min, max]
    Range { min: f64, max: f64 },
    /// Numeric value must be >= min
    MinValue(f64),
    /// Numeric value must be a multiple of step
    Step(f64),
    /// String must not be empty
    NotEmpty,
    /// Value must equal one of the specified options
    OneOf(Vec<Value>),
    /// Number must be non-negative (>= 0)
    NonNegative,
}

// ============================================================================
// PortDefinition Builder Pattern
// ============================================================================

impl PortDefinition {
    /// Create a new input port definition.
    pub fn input(name: impl Into<String>, port_type: PortType) -> Self {
        Self::new(name.into(), port_type, PortDirection::Input)
    }

    /// Create a new output port definition.
    pub fn output(name: impl Into<String>, port_type: PortType) -> Self {
        Self::new(name.into(), port_type, PortDirection::Output)
    }

    fn new(name: String, port_type: PortType, direction: PortDirection) -> Self {
        Self {
            display_name: Self::name_to_display(&name),
            name,
            port_type,
            direction,
            optional: false,
            description: String::new(),
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark this port as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Convert snake_case name to Title Case display name.
    fn name_to_display(name: &str) -> String {
        name.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check that a value has this port's type.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        if !self.port_type.matches(value) {
            return Err(format!(
                "Type mismatch for port '{}': expected {}, got {}",
                self.name,
                self.port_type,
                value.get_type()
            ));
        }
        Ok(())
    }
}

// ============================================================================
// ParameterDefinition Builder Pattern
// ============================================================================

impl ParameterDefinition {
    /// Create a new parameter definition.
    pub fn new(name: impl Into<String>, param_type: PortType, default_value: Value) -> Self {
        let name = name.into();
        Self {
            display_name: PortDefinition::name_to_display(&name),
            name,
            param_type,
            default_value,
            description: String::new(),
            constraints: Vec::new(),
            ui_hint: UiHint::Default,
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Set the UI hint.
    pub fn with_ui_hint(mut self, ui_hint: UiHint) -> Self {
        self.ui_hint = ui_hint;
        self
    }

    /// Validate a value against this parameter's type and constraints.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        if !self.param_type.matches(value) {
            return Err(format!(
                "Type mismatch for parameter '{}': expected {}, got {}",
                self.name,
                self.param_type,
                value.get_type()
            ));
        }

        for constraint in &self.constraints {
            constraint.validate(value)?;
        }

        Ok(())
    }
}

// ============================================================================
// Constraint Validation
// ============================================================================

impl Constraint {
    /// Validate a value against this constraint.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match self {
            Constraint::Range { min, max } => {
                if let Some(num) = value.as_float() {
                    if num < *min || num > *max {
                        return Err(format!("Value {} is out of range [{}, {}]", num, min, max));
                    }
                }
            }

            Constraint::MinValue(min) => {
                if let Some(num) = value.as_float() {
                    if num < *min {
                        return Err(format!("Value {} is below minimum {}", num, min));
                    }
                }
            }

            Constraint::Step(step) => {
                if let Some(num) = value.as_float() {
                    let remainder = num % step;
                    if remainder.abs() > f64::EPSILON {
                        return Err(format!("Value {} must be a multiple of {}", num, step));
                    }
                }
            }

            Constraint::NotEmpty => {
                let is_empty = match value {
                    Value::String(s) => s.is_empty(),
                    Value::Array(arr) => arr.is_empty(),
                    _ => false,
                };
                if is_empty {
                    return Err("Value cannot be empty".to_string());
                }
            }

            Constraint::OneOf(options) => {
                if !options.contains(value) {
                    return Err(format!("{} is not one of the allowed options", value));
                }
            }

            Constraint::NonNegative => {
                if let Some(num) = value.as_float() {
                    if num < 0.0 {
                        return Err(format!("Value {} must be non-negative", num));
                    }
                }
            }
        }

        Ok(())
    }

    /// Get a human-readable description of this constraint.
    pub fn description(&self) -> String {
        match self {
            Constraint::Range { min, max } => format!("Must be between {} and {}", min, max),
            Constraint::MinValue(min) => format!("Must be at least {}", min),
            Constraint::Step(step) => format!("Must be a multiple of {}", step),
            Constraint::NotEmpty => "Cannot be empty".to_string(),
            Constraint::OneOf(options) => format!("One of {} options", options.len()),
            Constraint::NonNegative => "Must be non-negative".to_string(),
        }
    }
}
