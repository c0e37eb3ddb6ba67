//! Menu model for breadcrumb blocks
//!
//! A breadcrumb is a tree of menu items built per render. The tree is plain
//! data; turning it into markup is the host's concern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single entry in a menu tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display label
    pub label: String,
    /// Route name the entry links to, if any
    pub route: Option<String>,
    /// Route parameters
    pub route_params: BTreeMap<String, String>,
    /// Child entries, in insertion order
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Create an entry with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            route: None,
            route_params: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Link the entry to a route
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Add a route parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.route_params.insert(key.into(), value.into());
        self
    }

    /// Append a child entry
    pub fn add_child(&mut self, child: MenuItem) {
        self.children.push(child);
    }

    /// Depth-first count of entries, including this one
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(MenuItem::len).sum::<usize>()
    }

    /// Whether the entry has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The last (deepest-right) descendant, the "current" breadcrumb entry
    pub fn current(&self) -> &MenuItem {
        self.children.last().map(MenuItem::current).unwrap_or(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tree() {
        let mut root = MenuItem::new("root");
        root.add_child(MenuItem::new("Home").with_route("homepage"));
        let mut section = MenuItem::new("Media Gallery").with_route("media_gallery_index");
        section.add_child(
            MenuItem::new("Summer")
                .with_route("media_gallery_view")
                .with_param("id", "42"),
        );
        root.add_child(section);

        assert_eq!(root.len(), 4);
        assert_eq!(root.current().label, "Summer");
        assert_eq!(root.current().route_params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_current_of_leaf_is_itself() {
        let item = MenuItem::new("only");
        assert_eq!(item.current().label, "only");
        assert!(item.is_empty());
    }
}
