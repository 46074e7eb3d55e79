//! Rule graph for featgate.
//!
//! A [`RuleSet`] holds named option [`Node`]s connected by two relations:
//! "requires" and "mutually excludes". Relations are declared with
//! [`RuleSet::add_dep`] and [`RuleSet::add_conflict`], which propagate each
//! new edge one hop over the graph as it stands at declaration time.
//! [`RuleSet::is_coherent`] reports whether any option ends up both
//! requiring and excluding the same option.

pub mod coherence;
pub mod error;
pub mod node;
pub mod ruleset;

pub use coherence::Coherence;
pub use error::RulesError;
pub use node::{Node, NodeId};
pub use ruleset::RuleSet;
