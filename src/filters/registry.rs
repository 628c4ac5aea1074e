//! Node registry: id → factory + cached metadata.

use crate::core::node::{Category, FilterNode, NodeMetadata};
use indexmap::IndexMap;
use std::sync::Arc;

/// Factory function for creating node instances.
pub type FilterFactory = Arc<dyn Fn() -> Box<dyn FilterNode> + Send + Sync>;

/// Registry entry containing metadata and factory.
#[derive(Clone)]
pub struct RegistryEntry {
    /// Factory function to create instances.
    pub factory: FilterFactory,
    /// Cached metadata (avoids creating instance just to get metadata).
    pub metadata: NodeMetadata,
}

/// Registry for all available node types.
///
/// Keeps registration order, which is also the order the host sees the
/// id → display name mapping in.
pub struct FilterRegistry {
    filters: IndexMap<String, RegistryEntry>,
    categories: IndexMap<Category, Vec<String>>,
}

impl FilterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            filters: IndexMap::new(),
            categories: IndexMap::new(),
        }
    }

    /// Create a registry pre-populated with built-in nodes.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::filters::builtin::register_all(&mut registry);
        registry
    }

    /// Register a node type. Re-registering an id replaces the earlier entry.
    pub fn register<F>(&mut self, factory: F)
    where
        F: Fn() -> Box<dyn FilterNode> + Send + Sync + 'static,
    {
        // Create a temporary instance to get metadata
        let metadata = factory().metadata();
        let id = metadata.id.clone();
        let category = metadata.category;

        let entry = RegistryEntry {
            factory: Arc::new(factory),
            metadata,
        };

        if let Some(previous) = self.filters.insert(id.clone(), entry) {
            if let Some(ids) = self.categories.get_mut(&previous.metadata.category) {
                ids.retain(|i| i != &id);
            }
        }

        self.categories.entry(category).or_default().push(id);
    }

    /// Create a new instance of a node by ID.
    pub fn create(&self, id: &str) -> Option<Box<dyn FilterNode>> {
        self.filters.get(id).map(|e| (e.factory)())
    }

    /// Get metadata for a node without creating an instance.
    pub fn get_metadata(&self, id: &str) -> Option<&NodeMetadata> {
        self.filters.get(id).map(|e| &e.metadata)
    }

    /// Check if a node is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    /// Get all registered node IDs.
    pub fn filter_ids(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(|s| s.as_str())
    }

    /// Get all registered nodes.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get node ids by category.
    pub fn filters_by_category(&self, category: &Category) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|ids| ids.iter().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }

    /// Id → display name, as the host expects it.
    pub fn display_names(&self) -> IndexMap<&str, &str> {
        self.filters
            .iter()
            .map(|(id, entry)| (id.as_str(), entry.metadata.name.as_str()))
            .collect()
    }

    /// Get the total number of registered nodes.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Get nodes grouped by category for UI display.
    pub fn grouped_by_category(&self) -> IndexMap<Category, Vec<&NodeMetadata>> {
        let mut grouped: IndexMap<Category, Vec<&NodeMetadata>> = IndexMap::new();

        for entry in self.filters.values() {
            grouped
                .entry(entry.metadata.category)
                .or_default()
                .push(&entry.metadata);
        }

        for nodes in grouped.values_mut() {
            nodes.sort_by(|a, b| a.name.cmp(&b.name));
        }

        grouped
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoaderConfig;
    use crate::filters::builtin::LoadImageFromDir;

    const ID: &str = "Load Image from Dir (bm)";

    #[test]
    fn test_register_and_create() {
        let mut registry = FilterRegistry::new();
        assert!(registry.is_empty());
        registry.register(|| Box::new(LoadImageFromDir::default()));

        assert!(registry.contains(ID));
        assert_eq!(registry.len(), 1);
        assert!(registry.create(ID).is_some());
        assert!(registry.create("load_image").is_none());
    }

    #[test]
    fn test_builtins_display_mapping() {
        let registry = FilterRegistry::with_builtins();
        let names = registry.display_names();

        assert_eq!(names.get(ID), Some(&ID));
        assert_eq!(registry.filter_ids().collect::<Vec<_>>(), vec![ID]);
    }

    #[test]
    fn test_metadata_lookup() {
        let registry = FilterRegistry::default();
        let metadata = registry.get_metadata(ID).unwrap();

        assert_eq!(metadata.function, "load_image");
        assert_eq!(metadata.category, Category::Image);
    }

    #[test]
    fn test_category_grouping() {
        let registry = FilterRegistry::with_builtins();

        assert_eq!(registry.filters_by_category(&Category::Image), vec![ID]);
        assert!(registry.filters_by_category(&Category::Mask).is_empty());

        let grouped = registry.grouped_by_category();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[&Category::Image][0].id, ID);
    }

    #[test]
    fn test_reregister_replaces_entry() {
        let mut registry = FilterRegistry::with_builtins();
        registry.register(|| {
            Box::new(LoadImageFromDir::with_config(LoaderConfig {
                blank_mask_size: 16,
                ..LoaderConfig::default()
            }))
        });

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.filters_by_category(&Category::Image).len(), 1);
        let (id, entry) = registry.filters().next().unwrap();
        assert_eq!(id, ID);
        assert!(entry.metadata.description.contains("png"));
    }
}
