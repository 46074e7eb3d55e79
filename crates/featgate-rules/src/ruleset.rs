//! The rule set: registry of option nodes and the edge-insertion rules.
//!
//! Relations are propagated by a single hop over the graph as it exists
//! when the relation is declared:
//!
//! ```text
//! add_dep(a, b)        a -> b
//!                      b ->
//! add_dep(b, c)        a -> b, c
//!                      b -> c
//!                      c ->
//! add_conflict(b, a)   a -> b, c, ~b
//!                      b -> c, ~a
//!                      c ->
//! ```
//!
//! Declaring `add_dep(b, c)` *before* `add_dep(a, b)` does not give `a` the
//! dependency on `c`: nothing depended on `b` when `c` was added, and adding
//! `b` to `a` later does not look at `b`'s existing dependencies. To get full
//! transitive coverage a relation on `b` must be declared after every
//! relation that makes something depend on `b`. This order sensitivity is
//! deliberate and observable.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::coherence::{Coherence, CoherenceCache};
use crate::error::RulesError;
use crate::node::{Node, NodeId};

/// All option nodes of a domain and the relations between them.
///
/// A rule set is built through `&mut self` and then shared read-only with
/// any number of `featgate_opts::Opts` views.
#[derive(Debug, Clone)]
pub struct RuleSet {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    coherence: CoherenceCache,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            coherence: CoherenceCache::new(),
        }
    }

    // --- Graph construction ---

    /// Return the id of the node called `name`, creating it if needed.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, name));
        self.index.insert(name.to_string(), id);
        debug!(option = name, %id, "registered option");
        id
    }

    /// Declare that `a` requires `b`.
    ///
    /// Every other node that currently depends on `a` also gains `b` as a
    /// direct dependency. A self-dependency only registers the node.
    pub fn add_dep(&mut self, a: &str, b: &str) {
        let a_id = self.add_node(a);
        if a == b {
            return;
        }
        let b_id = self.add_node(b);

        self.nodes[a_id.0].add_dep(b_id);
        debug!(option = a, requires = b, "added dependency");

        for node in &mut self.nodes {
            if node.id() != a_id
                && node.id() != b_id
                && node.depends_on(a_id)
                && node.add_dep(b_id)
            {
                debug!(option = node.name(), requires = b, via = a, "propagated dependency");
            }
        }
    }

    /// Declare that `a` and `b` are mutually exclusive.
    pub fn add_conflict(&mut self, a: &str, b: &str) {
        self.add_directed_conflict(a, b);
        self.add_directed_conflict(b, a);
    }

    /// `a` excludes `b`; anything currently depending on `a` inherits the
    /// exclusion.
    fn add_directed_conflict(&mut self, a: &str, b: &str) {
        let a_id = self.add_node(a);
        let b_id = self.add_node(b);
        if a_id == b_id {
            return;
        }

        self.nodes[a_id.0].add_conflict(b_id);
        debug!(option = a, excludes = b, "added conflict");

        for node in &mut self.nodes {
            if node.id() != a_id
                && node.id() != b_id
                && node.depends_on(a_id)
                && node.add_conflict(b_id)
            {
                debug!(option = node.name(), excludes = b, via = a, "propagated conflict");
            }
        }
    }

    // --- Coherence ---

    /// Whether no option requires and excludes the same option.
    ///
    /// Re-scans every node while the rule set is still believed coherent.
    /// Once a scan fails, the result is cached and returned from then on
    /// without scanning.
    pub fn is_coherent(&self) -> bool {
        if self.coherence.get() == Coherence::Incoherent {
            return false;
        }

        match self.first_incoherent() {
            Some(node) => {
                warn!(option = node.name(), "rule set is incoherent");
                self.coherence.record(Coherence::Incoherent);
                false
            }
            None => {
                self.coherence.record(Coherence::Coherent);
                true
            }
        }
    }

    /// Cached result of the last [`is_coherent`](Self::is_coherent) call.
    pub fn coherence(&self) -> Coherence {
        self.coherence.get()
    }

    /// First node, in insertion order, that requires and excludes the same
    /// option.
    pub fn first_incoherent(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| !n.is_coherent())
    }

    // --- Queries ---

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Result<&Node, RulesError> {
        self.index
            .get(name)
            .map(|id| &self.nodes[id.0])
            .ok_or_else(|| RulesError::UnknownNode(name.to_string()))
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All nodes in first-reference order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every other node that lists `id` as a direct dependency.
    pub fn dependents(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(move |n| n.id() != id && n.depends_on(id))
    }

    /// Names of the given ids, skipping any that do not belong here.
    pub fn names<'a>(&'a self, ids: &'a [NodeId]) -> impl Iterator<Item = &'a str> {
        ids.iter().filter_map(|id| self.get(*id)).map(Node::name)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            writeln!(f, "{}", self.display_node(node))?;
        }
        Ok(())
    }
}

impl RuleSet {
    /// Render one node as `name-> deps:'x','y' conflicts:'z'`.
    pub fn display_node(&self, node: &Node) -> String {
        let quoted = |ids: &[NodeId]| {
            self.names(ids)
                .map(|n| format!("'{n}'"))
                .collect::<Vec<_>>()
                .join(",")
        };
        format!(
            "{}-> deps:{} conflicts:{}",
            node.name(),
            quoted(node.deps()),
            quoted(node.conflicts())
        )
    }
}
