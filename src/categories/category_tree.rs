use super::CategoryPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the top-level category holding every key no rule claimed
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

pub const DEFAULT_CATEGORY_DESCRIPTION: &str = "Statistics that have not been assigned a category.";

/// One category with its child categories and the keys filed directly under it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub categories: BTreeMap<String, Self>,
    pub keys: Vec<String>,
    pub description: String,
}

impl CategoryNode {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            categories: BTreeMap::new(),
            keys: Vec::new(),
            description: description.into(),
        }
    }

    /// Number of keys in this node and all of its descendants
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.keys.len() + self.categories.values().map(Self::key_count).sum::<usize>()
    }
}

/// The top level of the category hierarchy, keyed by super category name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTree {
    roots: BTreeMap<String, CategoryNode>,
}

impl CategoryTree {
    /// A tree holding only the default category
    #[must_use]
    pub fn new() -> Self {
        let mut roots = BTreeMap::new();
        let _ = roots.insert(DEFAULT_CATEGORY.to_string(), CategoryNode::new(DEFAULT_CATEGORY_DESCRIPTION));
        Self { roots }
    }

    /// Create the node at `path` and any missing ancestors
    ///
    /// Nodes that already exist keep their description; new ones get `description`.
    pub fn ensure_path(&mut self, path: &CategoryPath, description: &str) {
        let node = self
            .roots
            .entry(path.super_category.clone())
            .or_insert_with(|| CategoryNode::new(description));

        if let Some(sub) = &path.sub {
            let node = node.categories.entry(sub.clone()).or_insert_with(|| CategoryNode::new(description));
            if let Some(subsub) = &path.subsub {
                let _ = node.categories.entry(subsub.clone()).or_insert_with(|| CategoryNode::new(description));
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CategoryNode> {
        self.roots.get(name)
    }

    /// The deepest node named by `path`
    #[must_use]
    pub fn node(&self, path: &CategoryPath) -> Option<&CategoryNode> {
        let mut node = self.roots.get(&path.super_category)?;
        if let Some(sub) = &path.sub {
            node = node.categories.get(sub)?;
            if let Some(subsub) = &path.subsub {
                node = node.categories.get(subsub)?;
            }
        }
        Some(node)
    }

    fn node_mut(&mut self, path: &CategoryPath) -> Option<&mut CategoryNode> {
        let mut node = self.roots.get_mut(&path.super_category)?;
        if let Some(sub) = &path.sub {
            node = node.categories.get_mut(sub)?;
            if let Some(subsub) = &path.subsub {
                node = node.categories.get_mut(subsub)?;
            }
        }
        Some(node)
    }

    /// File a key under the deepest node of `path`
    ///
    /// Returns `false` and leaves the tree alone if no such node exists.
    pub fn add_key(&mut self, path: &CategoryPath, key_name: &str) -> bool {
        match self.node_mut(path) {
            Some(node) => {
                node.keys.push(key_name.to_string());
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryNode)> {
        self.roots.iter().map(|(name, node)| (name.as_str(), node))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Never true in practice since the default category is always present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl Default for CategoryTree {
    fn default() -> Self {
        Self::new()
    }
}
