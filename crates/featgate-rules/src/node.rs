//! Graph vertices: one named option with its direct requirements and
//! exclusions.

use std::fmt;

/// Index of a node within the [`RuleSet`](crate::RuleSet) that created it.
///
/// Ids are assigned in first-reference order and are unique per name, so
/// comparing ids is the same as comparing names within one rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its rule set's insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named option and its adjacency lists.
///
/// `deps` and `conflicts` keep insertion order and never hold duplicates.
/// A node never lists itself as a dependency: turning a node on together
/// with its requirements is done explicitly by the toggle logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    name: String,
    deps: Vec<NodeId>,
    conflicts: Vec<NodeId>,
}

impl Node {
    /// Create a node with empty dependency and conflict lists.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            deps: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct dependencies, in the order they were added.
    pub fn deps(&self) -> &[NodeId] {
        &self.deps
    }

    /// Direct conflicts, in the order they were added.
    pub fn conflicts(&self) -> &[NodeId] {
        &self.conflicts
    }

    pub fn depends_on(&self, other: NodeId) -> bool {
        self.deps.contains(&other)
    }

    pub fn conflicts_with(&self, other: NodeId) -> bool {
        self.conflicts.contains(&other)
    }

    /// Add `other` as a direct dependency. Returns `false` if it was
    /// already present.
    pub fn add_dep(&mut self, other: NodeId) -> bool {
        if self.deps.contains(&other) {
            return false;
        }
        self.deps.push(other);
        true
    }

    /// Add `other` as a direct conflict. Returns `false` if it was
    /// already present.
    pub fn add_conflict(&mut self, other: NodeId) -> bool {
        if self.conflicts.contains(&other) {
            return false;
        }
        self.conflicts.push(other);
        true
    }

    /// A node is coherent unless some option is both required and excluded
    /// by it.
    pub fn is_coherent(&self) -> bool {
        !self.deps.iter().any(|d| self.conflicts.contains(d))
    }
}
