//! Image input nodes: LoadImageFromDir

use crate::config::LoaderConfig;
use crate::core::context::{ExecutionContext, ValidationContext};
use crate::core::error::{ExecutionError, ValidationError};
use crate::core::node::{validate_parameters, Category, FilterNode, NodeMetadata};
use crate::core::port::{Constraint, ParameterDefinition, PortDefinition, UiHint};
use crate::core::types::{PortType, Value};
use crate::filters::registry::FilterRegistry;
use crate::selection::{ImageSelector, SortMode};

/// Id the host registers the directory loader under.
pub const LOAD_IMAGE_FROM_DIR_ID: &str = "Load Image from Dir (bm)";

/// Register I/O nodes.
pub fn register(registry: &mut FilterRegistry) {
    registry.register(|| Box::new(LoadImageFromDir::default()));
}

/// Loads one image out of one or more directories by index and sort order.
#[derive(Debug, Clone, Default)]
pub struct LoadImageFromDir {
    selector: ImageSelector,
}

impl LoadImageFromDir {
    /// Create the node with custom loader settings.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            selector: ImageSelector::new(config),
        }
    }
}

impl FilterNode for LoadImageFromDir {
    fn metadata(&self) -> NodeMetadata {
        let extensions = self.selector.config().extensions.join(", ");
        let sort_labels = SortMode::labels();

        NodeMetadata::builder(LOAD_IMAGE_FROM_DIR_ID, LOAD_IMAGE_FROM_DIR_ID)
            .description(format!(
                "Load a single image from one or more directories by index and sort order. \
                 Compatible formats: {}",
                extensions
            ))
            .category(Category::Image)
            .function("load_image")
            .author("Sebastian")
            .version("1.0.0")
            .parameter(
                ParameterDefinition::new("directory", PortType::String, Value::String(String::new()))
                    .with_description("Separate multiple directories with semicolon (;)")
                    .with_ui_hint(UiHint::TextInput {
                        multiline: false,
                        placeholder: None,
                    }),
            )
            .parameter(
                ParameterDefinition::new("file_number", PortType::Integer, Value::Integer(0))
                    .with_description("Index of the image to load")
                    .with_ui_hint(UiHint::SpinBox { step: 1 })
                    .with_constraint(Constraint::NonNegative)
                    .with_constraint(Constraint::Step(1.0)),
            )
            .parameter(
                ParameterDefinition::new(
                    "sort_by",
                    PortType::String,
                    Value::String(SortMode::default().label().to_string()),
                )
                .with_description("Sorting method for files")
                .with_ui_hint(UiHint::Dropdown {
                    options: sort_labels.clone(),
                })
                .with_constraint(Constraint::OneOf(
                    sort_labels.into_iter().map(Value::String).collect(),
                )),
            )
            .output(
                PortDefinition::output("image", PortType::Image)
                    .with_description("The loaded image as a [1, H, W, 3] tensor"),
            )
            .output(
                PortDefinition::output("mask", PortType::Mask)
                    .with_description("Inverted alpha if present, otherwise an empty mask"),
            )
            .output(
                PortDefinition::output("filepath", PortType::String)
                    .with_description("Full path to the loaded image file"),
            )
            .output(
                PortDefinition::output("filename", PortType::String)
                    .with_description("The name of the image file"),
            )
            .output(
                PortDefinition::output("filename_no_ext", PortType::String)
                    .with_description("Filename without extension"),
            )
            .output(
                PortDefinition::output("file_count", PortType::Integer)
                    .with_description("The number of matching image files found"),
            )
            .tags(["load", "directory", "folder", "batch", "index", "mask"])
            .non_deterministic()
            .build()
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<(), ValidationError> {
        validate_parameters(&self.metadata(), ctx)
    }

    fn execute(&self, ctx: &mut ExecutionContext) -> Result<(), ExecutionError> {
        // Unset parameters take the declared defaults; mistyped ones are errors.
        let directory = if ctx.has_parameter("directory") {
            ctx.get_string("directory")?.to_string()
        } else {
            String::new()
        };
        let file_number = if ctx.has_parameter("file_number") {
            ctx.get_integer("file_number")?
        } else {
            0
        };
        let sort_by = if ctx.has_parameter("sort_by") {
            ctx.get_string("sort_by")?
                .parse::<SortMode>()
                .map_err(|e| ExecutionError::NodeExecution {
                    node_id: ctx.node_id,
                    error: e.to_string(),
                })?
        } else {
            SortMode::default()
        };

        let selection = self
            .selector
            .select(&directory, file_number, sort_by)
            .map_err(|source| ExecutionError::Selection {
                node_id: ctx.node_id,
                source,
            })?;

        ctx.set_output_image("image", selection.image)?;
        ctx.set_output_mask("mask", selection.mask)?;
        ctx.set_output(
            "filepath",
            Value::String(selection.filepath.to_string_lossy().into_owned()),
        )?;
        ctx.set_output("filename", Value::String(selection.filename))?;
        ctx.set_output("filename_no_ext", Value::String(selection.filename_no_ext))?;
        ctx.set_output("file_count", Value::Integer(selection.file_count as i64))?;
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn FilterNode> {
        Box::new(self.clone())
    }
}
