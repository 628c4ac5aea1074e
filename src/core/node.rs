//! FilterNode trait and node metadata.
//!
//! The FilterNode trait is the contract between a node and its host. It uses
//! a two-phase design: validation (before execution) and execution.

use crate::core::context::{ExecutionContext, ValidationContext};
use crate::core::error::{ExecutionError, ValidationError};
use crate::core::port::{ParameterDefinition, PortDefinition};
use serde::{Deserialize, Serialize};

/// Category for organizing nodes in the host's menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Image sources and image handling
    Image,
    /// Mask producers
    Mask,
    /// Utility nodes
    Utility,
    /// Custom/user-defined
    #[default]
    Custom,
}

impl Category {
    /// Get the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Mask => "mask",
            Category::Utility => "utils",
            Category::Custom => "custom",
        }
    }

    /// Get all categories in display order.
    pub fn all() -> &'static [Category] {
        &[Category::Image, Category::Mask, Category::Utility, Category::Custom]
    }
}

/// Metadata describing a node type.
///
/// This struct contains all information needed to:
/// - Register the node with the host
/// - Render its widgets
/// - Document the node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Unique identifier the host registers this node under
    pub id: String,
    /// Human-readable name shown in the host
    pub name: String,
    /// Category for menu organization
    pub category: Category,
    /// Name of the entry point the host dispatches to
    pub function: String,
    /// Detailed description
    pub description: String,
    /// Version string
    pub version: String,
    /// Author or source
    pub author: String,

    /// Output port definitions, in host order
    pub outputs: Vec<PortDefinition>,
    /// Parameter (widget) definitions, in host order
    pub parameters: Vec<ParameterDefinition>,

    /// Searchable tags
    pub tags: Vec<String>,
    /// Whether this node is deterministic (same inputs always give same outputs)
    pub deterministic: bool,
}

impl NodeMetadata {
    /// Create a new metadata builder.
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> NodeMetadataBuilder {
        NodeMetadataBuilder::new(id, name)
    }

    /// Get all output port names.
    pub fn output_names(&self) -> Vec<&str> {
        self.outputs.iter().map(|p| p.name.as_str()).collect()
    }

    /// Get all parameter names.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    /// Host type names of the outputs, in order.
    pub fn return_types(&self) -> Vec<&'static str> {
        self.outputs.iter().map(|p| p.port_type.host_name()).collect()
    }

    /// Find an output port by name.
    pub fn get_output(&self, name: &str) -> Option<&PortDefinition> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Find a parameter by name.
    pub fn get_parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Builder for NodeMetadata.
pub struct NodeMetadataBuilder {
    id: String,
    name: String,
    category: Category,
    function: String,
    description: String,
    version: String,
    author: String,
    outputs: Vec<PortDefinition>,
    parameters: Vec<ParameterDefinition>,
    tags: Vec<String>,
    deterministic: bool,
}

impl NodeMetadataBuilder {
    /// Create a new builder with required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: Category::Custom,
            function: "execute".to_string(),
            description: String::new(),
            version: "1.0.0".to_string(),
            author: String::new(),
            outputs: Vec::new(),
            parameters: Vec::new(),
            tags: Vec::new(),
            deterministic: true,
        }
    }

    /// Set the category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the entry point name.
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.function = function.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Add an output port.
    pub fn output(mut self, port: PortDefinition) -> Self {
        self.outputs.push(port);
        self
    }

    /// Add a parameter.
    pub fn parameter(mut self, param: ParameterDefinition) -> Self {
        self.parameters.push(param);
        self
    }

    /// Add multiple tags.
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(|t| t.into()));
        self
    }

    /// Mark as non-deterministic.
    pub fn non_deterministic(mut self) -> Self {
        self.deterministic = false;
        self
    }

    /// Build the metadata.
    pub fn build(self) -> NodeMetadata {
        NodeMetadata {
            id: self.id,
            name: self.name,
            category: self.category,
            function: self.function,
            description: self.description,
            version: self.version,
            author: self.author,
            outputs: self.outputs,
            parameters: self.parameters,
            tags: self.tags,
            deterministic: self.deterministic,
        }
    }
}

/// The core trait for nodes.
///
/// 1. **Validation Phase** (`validate`): called once before execution, checks
///    parameter values against their definitions.
/// 2. **Execution Phase** (`execute`): reads parameters, does the work and
///    sets outputs in the context.
pub trait FilterNode: Send + Sync {
    /// Get the metadata for this node.
    fn metadata(&self) -> NodeMetadata;

    /// Validate the node configuration.
    fn validate(&self, ctx: &ValidationContext) -> Result<(), ValidationError>;

    /// Execute the node.
    fn execute(&self, ctx: &mut ExecutionContext) -> Result<(), ExecutionError>;

    /// Clone this node into a boxed trait object.
    fn clone_box(&self) -> Box<dyn FilterNode>;
}

// Allow cloning Box<dyn FilterNode>
impl Clone for Box<dyn FilterNode> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Run every parameter definition against the value present in `ctx`.
///
/// Missing parameters fall back to their declared default.
pub fn validate_parameters(
    metadata: &NodeMetadata,
    ctx: &ValidationContext,
) -> Result<(), ValidationError> {
    for param in &metadata.parameters {
        let value = ctx.parameters().get(&param.name).unwrap_or(&param.default_value);
        param
            .validate(value)
            .map_err(|error| ValidationError::ConstraintViolation {
                node_id: ctx.node_id,
                parameter: param.name.clone(),
                error,
            })?;
    }
    Ok(())
}
