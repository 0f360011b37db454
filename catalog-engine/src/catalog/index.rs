//! Hierarchy Index
//!
//! O(1) lookup of a node's parent reference and active flag for all four
//! levels of the Brand → Category → Series → Product hierarchy. One hash
//! table per level, keyed by record id.
//!
//! Lookups fail closed: an unknown id is [`IndexError::NotFound`], never
//! "inactive".

use super::issue::RecordIssue;
use crate::utils::validation::validate_id;
use shared::models::{Brand, Category, Level, Product, Series};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A (level, id) pair addressing one catalog node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub level: Level,
    pub id: String,
}

impl NodeRef {
    pub fn new(level: Level, id: impl Into<String>) -> Self {
        Self {
            level,
            id: id.into(),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.level, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("{level} {id} not found")]
    NotFound { level: Level, id: String },
}

#[derive(Debug, Clone)]
struct NodeEntry {
    /// `None` only for brands
    parent_id: Option<String>,
    is_active: bool,
}

/// Ancestor chain of a node, self first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Resolvable nodes from the start node up toward the brand root
    pub nodes: Vec<NodeRef>,
    /// First parent reference that did not resolve, if the walk stopped early
    pub broken: Option<NodeRef>,
}

impl Chain {
    /// Whether the chain reaches a brand without a broken link
    pub fn is_complete(&self) -> bool {
        self.broken.is_none()
    }

    pub fn id_at(&self, level: Level) -> Option<&str> {
        self.nodes
            .iter()
            .find(|n| n.level == level)
            .map(|n| n.id.as_str())
    }
}

/// Parent/active lookup over one catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    tables: [HashMap<String, NodeEntry>; 4],
    issues: Vec<RecordIssue>,
}

impl HierarchyIndex {
    /// Build the index from the four collections
    ///
    /// Records with a blank id or blank parent reference are skipped and
    /// reported. For duplicate ids the first record wins.
    pub fn build(
        brands: &[Brand],
        categories: &[Category],
        series: &[Series],
        products: &[Product],
    ) -> Self {
        let mut index = Self::default();
        for b in brands {
            index.insert(Level::Brand, &b.id, None, b.is_active);
        }
        for c in categories {
            index.insert(Level::Category, &c.id, Some(c.brand_id.as_str()), c.is_active);
        }
        for s in series {
            index.insert(Level::Series, &s.id, Some(s.category_id.as_str()), s.is_active);
        }
        for p in products {
            index.insert(Level::Product, &p.id, Some(p.series_id.as_str()), p.is_active);
        }
        index
    }

    fn insert(&mut self, level: Level, id: &str, parent_id: Option<&str>, is_active: bool) {
        let collection = collection_name(level);
        if let Err(e) = validate_id(id, "id") {
            self.issues.push(RecordIssue::malformed(collection, id, &e));
            return;
        }
        if let (Some(parent_level), Some(parent_id)) = (level.parent(), parent_id)
            && let Err(e) = validate_id(parent_id, &format!("{}_id", parent_level))
        {
            self.issues.push(RecordIssue::malformed(collection, id, &e));
            return;
        }

        let table = &mut self.tables[level as usize];
        if table.contains_key(id) {
            self.issues.push(RecordIssue::duplicate(
                collection,
                id,
                format!("Duplicate {} id {}; first record kept", level, id),
            ));
            return;
        }
        table.insert(
            id.to_string(),
            NodeEntry {
                parent_id: parent_id.map(str::to_string),
                is_active,
            },
        );
    }

    fn entry(&self, level: Level, id: &str) -> Result<&NodeEntry, IndexError> {
        self.tables[level as usize]
            .get(id)
            .ok_or_else(|| IndexError::NotFound {
                level,
                id: id.to_string(),
            })
    }

    pub fn contains(&self, level: Level, id: &str) -> bool {
        self.tables[level as usize].contains_key(id)
    }

    /// Immediate parent reference of a node
    ///
    /// `Ok(None)` for brands. The returned parent is what the record
    /// references; it may itself be missing from the index.
    pub fn parent_of(&self, level: Level, id: &str) -> Result<Option<NodeRef>, IndexError> {
        let entry = self.entry(level, id)?;
        Ok(match (level.parent(), &entry.parent_id) {
            (Some(parent_level), Some(parent_id)) => Some(NodeRef::new(parent_level, parent_id)),
            _ => None,
        })
    }

    pub fn is_active(&self, level: Level, id: &str) -> Result<bool, IndexError> {
        self.entry(level, id).map(|e| e.is_active)
    }

    /// Walk from a node up to its brand, stopping at the first broken link
    pub fn chain(&self, level: Level, id: &str) -> Result<Chain, IndexError> {
        self.entry(level, id)?;

        let mut nodes = vec![NodeRef::new(level, id)];
        let mut broken = None;
        while let Some(current) = nodes.last() {
            match self.parent_of(current.level, &current.id)? {
                None => break,
                Some(parent) if self.contains(parent.level, &parent.id) => nodes.push(parent),
                Some(parent) => {
                    broken = Some(parent);
                    break;
                }
            }
        }
        Ok(Chain { nodes, broken })
    }

    /// Every node whose parent reference does not resolve, with the missing parent
    pub fn broken_references(&self) -> Vec<(NodeRef, NodeRef)> {
        let mut broken = Vec::new();
        for level in [Level::Category, Level::Series, Level::Product] {
            for id in self.ids(level) {
                if let Ok(Some(parent)) = self.parent_of(level, id)
                    && !self.contains(parent.level, &parent.id)
                {
                    broken.push((NodeRef::new(level, id), parent));
                }
            }
        }
        broken.sort_by(|a, b| (a.0.level, &a.0.id).cmp(&(b.0.level, &b.0.id)));
        broken
    }

    /// Ids indexed at one level, in no particular order
    pub fn ids(&self, level: Level) -> impl Iterator<Item = &str> {
        self.tables[level as usize].keys().map(String::as_str)
    }

    pub fn len(&self, level: Level) -> usize {
        self.tables[level as usize].len()
    }

    /// Records skipped while building
    pub fn issues(&self) -> &[RecordIssue] {
        &self.issues
    }
}

pub(crate) fn collection_name(level: Level) -> &'static str {
    match level {
        Level::Brand => "brands",
        Level::Category => "categories",
        Level::Series => "series",
        Level::Product => "products",
    }
}
