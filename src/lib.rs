//! # bm_nodes - Directory image loader node
//!
//! Loads one image out of one or more directories, chosen by index under a
//! sort order, and hands it to a node-graph host as tensors plus file
//! metadata.
//!
//! ## Features
//!
//! - **Multiple directories**: `"a;b;c"`, invalid entries silently skipped
//! - **Four sort orders**: natural filename, newest/oldest modification time, file size
//! - **Forgiving index**: out-of-range requests clamp to the first or last file
//! - **Alpha as mask**: transparency becomes an inverted mask, otherwise a blank one
//! - **EXIF orientation**: rotated camera files come out upright
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bm_nodes::prelude::*;
//!
//! let registry = FilterRegistry::with_builtins();
//! let node = registry.create("Load Image from Dir (bm)").unwrap();
//!
//! let mut ctx = ExecutionContext::new(NodeId::new());
//! ctx.add_parameter("directory", Value::String("/renders;/renders/old".to_string()));
//! ctx.add_parameter("file_number", Value::Integer(4));
//! ctx.add_parameter("sort_by", Value::String("Date (Newest First)".to_string()));
//! node.execute(&mut ctx)?;
//!
//! let outputs = ctx.take_outputs();
//! println!("{}", outputs["filename"]);
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: value types, tensors, node trait, errors and contexts
//! - [`selection`]: directory parsing, scanning, sorting and decoding
//! - [`config`]: loader settings read from TOML
//! - [`filters`]: node registry and the built-in loader node

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod filters;
pub mod selection;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use bm_nodes::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::tensor::{ImageTensor, MaskTensor};
    pub use crate::core::types::{PortType, Value};

    // Node traits and types
    pub use crate::core::node::{validate_parameters, Category, FilterNode, NodeMetadata};

    // Port definitions
    pub use crate::core::port::{Constraint, ParameterDefinition, PortDefinition, UiHint};

    // Contexts
    pub use crate::core::context::{ExecutionContext, ValidationContext};

    // Errors
    pub use crate::core::error::{
        BmError, BmResult, ConfigError, ExecutionError, NodeId, SelectError, ValidationError,
    };

    // Selection
    pub use crate::config::LoaderConfig;
    pub use crate::selection::{clamp_index, ImageSelector, Selection, SortMode};

    // Nodes
    pub use crate::filters::builtin::{LoadImageFromDir, LOAD_IMAGE_FROM_DIR_ID};
    pub use crate::filters::registry::{FilterFactory, FilterRegistry, RegistryEntry};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "bm_nodes");
    }

    #[test]
    fn test_registry_with_builtins() {
        let registry = FilterRegistry::with_builtins();
        assert!(registry.contains(LOAD_IMAGE_FROM_DIR_ID));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_validate_then_execute_through_registry() {
        let dir = tempdir().unwrap();
        RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 0]))
            .save(dir.path().join("frame_001.png"))
            .unwrap();

        let registry = FilterRegistry::default();
        let node = registry.create(LOAD_IMAGE_FROM_DIR_ID).unwrap();

        let mut validation = ValidationContext::new(NodeId::new());
        validation.add_parameter("directory", Value::String(dir.path().display().to_string()));
        validation.add_parameter("file_number", Value::Integer(3));
        node.validate(&validation).unwrap();

        let mut ctx = ExecutionContext::from(validation);
        node.execute(&mut ctx).unwrap();
        let outputs = ctx.take_outputs();

        assert_eq!(outputs["filename_no_ext"], Value::String("frame_001".to_string()));
        assert_eq!(outputs["file_count"], Value::Integer(1));
        let mask = outputs["mask"].as_mask().unwrap();
        assert_eq!(mask.shape(), &[1, 2, 3]);
        assert!(mask.as_array().iter().all(|&v| v == 1.0));
    }
}
