//! Built-in node implementations.

mod io;

use crate::filters::registry::FilterRegistry;

/// Register all built-in nodes.
pub fn register_all(registry: &mut FilterRegistry) {
    io::register(registry);
}

// Re-export for direct access
pub use io::{LoadImageFromDir, LOAD_IMAGE_FROM_DIR_ID};
