// Keytest Layout Catalog
// Ordered registry of layouts by unique name

use indexmap::IndexMap;

use super::{builtin, Layout};

/// Registry of named layouts, in registration order.
///
/// Built once at startup (built-ins plus any layout files) and passed
/// explicitly to whoever needs to look a layout up.
#[derive(Debug, Clone, Default)]
pub struct LayoutCatalog {
    layouts: IndexMap<String, Layout>,
}

impl LayoutCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in layout
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for layout in builtin::layouts() {
            catalog.insert(layout);
        }
        catalog
    }

    /// Register a layout, returning the one it replaced (same name) if any.
    /// A replaced layout keeps its original position.
    pub fn insert(&mut self, layout: Layout) -> Option<Layout> {
        self.layouts.insert(layout.name().to_string(), layout)
    }

    pub fn get(&self, name: &str) -> Option<&Layout> {
        self.layouts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layouts.contains_key(name)
    }

    /// Layout names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layout> {
        self.layouts.values()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn first(&self) -> Option<&Layout> {
        self.layouts.first().map(|(_, layout)| layout)
    }

    /// Layout following `name`, wrapping around
    pub fn next_after(&self, name: &str) -> Option<&Layout> {
        let index = self.layouts.get_index_of(name)?;
        let next = (index + 1) % self.layouts.len();
        self.layouts.get_index(next).map(|(_, layout)| layout)
    }

    /// Layout preceding `name`, wrapping around
    pub fn previous_before(&self, name: &str) -> Option<&Layout> {
        let index = self.layouts.get_index_of(name)?;
        let previous = (index + self.layouts.len() - 1) % self.layouts.len();
        self.layouts.get_index(previous).map(|(_, layout)| layout)
    }
}
