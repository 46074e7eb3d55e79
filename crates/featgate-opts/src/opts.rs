//! Per-session option state and the toggle propagation algorithm.

use std::collections::{HashMap, HashSet};

use featgate_rules::{NodeId, RuleSet};
use tracing::{debug, trace};

use crate::error::OptsError;
use crate::snapshot::OptsSnapshot;

/// On/off state of every option of one [`RuleSet`], for one session.
///
/// Many `Opts` can borrow the same rule set and evolve independently. The
/// state map holds an entry for every option the rule set knew about at the
/// last refresh; names it has never seen read as off.
#[derive(Debug, Clone)]
pub struct Opts<'a> {
    rules: &'a RuleSet,
    options: HashMap<String, bool>,
    all_off: bool,
}

impl<'a> Opts<'a> {
    /// Bind a new view to `rules` with every option off.
    pub fn new(rules: &'a RuleSet) -> Self {
        let mut opts = Self {
            rules,
            options: HashMap::new(),
            all_off: true,
        };
        opts.refresh();
        opts
    }

    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    /// Flip `name`, propagating the consequences.
    ///
    /// Turning an option off also turns off everything that directly or
    /// transitively requires it. Turning an option on also turns on its
    /// direct dependencies, then turns off each of its conflicts together
    /// with their dependents.
    ///
    /// Nothing happens if the rule set is incoherent or `name` is unknown.
    pub fn toggle(&mut self, name: &str) {
        if let Err(err) = self.try_toggle(name) {
            debug!(option = name, %err, "toggle ignored");
        }
    }

    fn try_toggle(&mut self, name: &str) -> Result<(), OptsError> {
        if !self.rules.is_coherent() {
            return Err(OptsError::Incoherent);
        }

        self.refresh();
        let was_on = self.is_on(name);
        let rules = self.rules;
        let node = rules.node(name)?;

        if was_on {
            self.turn_off_recursively(node.id());
        } else {
            // Dependencies were propagated when the rules were declared, so
            // one level is all that needs turning on.
            self.turn_on(node.name())?;
            for dep in rules.names(node.deps()) {
                self.turn_on(dep)?;
            }
            for conflict in node.conflicts() {
                self.turn_off_recursively(*conflict);
            }
        }

        self.update_all_off();
        Ok(())
    }

    /// Names of the options currently on. Unordered.
    pub fn enabled(&self) -> HashSet<&str> {
        self.options
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Whether `name` is on. Unknown names are off.
    pub fn is_on(&self, name: &str) -> bool {
        self.options.get(name).copied().unwrap_or(false)
    }

    /// Whether every option is off.
    pub fn all_off(&self) -> bool {
        self.all_off
    }

    /// Serializable copy of the current state.
    pub fn snapshot(&self) -> OptsSnapshot {
        OptsSnapshot {
            enabled: self.enabled().into_iter().map(str::to_string).collect(),
            all_off: self.all_off,
            coherent: self.rules.is_coherent(),
        }
    }

    /// Pick up options added to the rule set since the last refresh.
    fn refresh(&mut self) {
        let rules = self.rules;
        for node in rules.nodes() {
            self.options.entry(node.name().to_string()).or_insert(false);
        }
        self.update_all_off();
    }

    fn update_all_off(&mut self) {
        self.all_off = !self.options.values().any(|on| *on);
    }

    fn turn_on(&mut self, name: &str) -> Result<(), OptsError> {
        let state = self
            .options
            .get_mut(name)
            .ok_or_else(|| OptsError::UnknownOption(name.to_string()))?;
        if !*state {
            trace!(option = name, "on");
            *state = true;
        }
        Ok(())
    }

    fn turn_off(&mut self, name: &str) -> Result<(), OptsError> {
        let state = self
            .options
            .get_mut(name)
            .ok_or_else(|| OptsError::UnknownOption(name.to_string()))?;
        if *state {
            trace!(option = name, "off");
            *state = false;
        }
        Ok(())
    }

    /// Depth-first walk over reverse dependency edges, turning off `id` and
    /// every option that requires it.
    fn turn_off_recursively(&mut self, id: NodeId) {
        let rules = self.rules;
        let Some(node) = rules.get(id) else {
            return;
        };
        if !self.is_on(node.name()) {
            return;
        }
        if self.turn_off(node.name()).is_err() {
            return;
        }

        for dependent in rules.dependents(id) {
            if self.is_on(dependent.name()) {
                self.turn_off_recursively(dependent.id());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(opts: &Opts<'_>) -> Vec<String> {
        let mut names: Vec<_> = opts.enabled().into_iter().map(String::from).collect();
        names.sort();
        names
    }

    #[test]
    fn new_opts_are_all_off() {
        let mut rules = RuleSet::new();
        rules.add_dep("a", "b");
        let opts = Opts::new(&rules);
        assert!(opts.all_off());
        assert!(opts.enabled().is_empty());
        assert_eq!(opts.options.len(), 2);
    }

    #[test]
    fn toggle_on_then_off() {
        let mut rules = RuleSet::new();
        rules.add_dep("a", "b");
        let mut opts = Opts::new(&rules);

        opts.toggle("a");
        assert_eq!(sorted(&opts), vec!["a", "b"]);
        assert!(!opts.all_off());

        opts.toggle("a");
        assert_eq!(sorted(&opts), vec!["b"]);
    }

    #[test]
    fn toggling_a_dependency_off_cascades() {
        let mut rules = RuleSet::new();
        rules.add_dep("c", "b");
        rules.add_dep("b", "a");
        let mut opts = Opts::new(&rules);

        opts.toggle("c");
        assert_eq!(sorted(&opts), vec!["a", "b", "c"]);

        opts.toggle("a");
        assert!(opts.enabled().is_empty());
        assert!(opts.all_off());
    }

    #[test]
    fn turning_off_leaves_unrelated_options() {
        let mut rules = RuleSet::new();
        rules.add_dep("b", "a");
        rules.add_dep("d", "c");
        let mut opts = Opts::new(&rules);

        opts.toggle("b");
        opts.toggle("d");
        opts.toggle("a");
        assert_eq!(sorted(&opts), vec!["c", "d"]);
    }

    #[test]
    fn cyclic_dependencies_terminate() {
        let mut rules = RuleSet::new();
        rules.add_dep("a", "b");
        rules.add_dep("b", "a");
        let mut opts = Opts::new(&rules);

        opts.toggle("a");
        assert_eq!(sorted(&opts), vec!["a", "b"]);
        opts.toggle("b");
        assert!(opts.enabled().is_empty());
    }

    #[test]
    fn unknown_option_is_ignored() {
        let mut rules = RuleSet::new();
        rules.add_dep("a", "b");
        let mut opts = Opts::new(&rules);
        opts.toggle("a");

        assert_eq!(
            opts.try_toggle("zzz"),
            Err(OptsError::Rules(featgate_rules::RulesError::UnknownNode(
                "zzz".into()
            )))
        );
        opts.toggle("zzz");
        assert_eq!(sorted(&opts), vec!["a", "b"]);
        assert!(!opts.is_on("zzz"));
    }

    #[test]
    fn incoherent_rules_ignore_toggles() {
        let mut rules = RuleSet::new();
        rules.add_dep("a", "b");
        rules.add_conflict("a", "b");
        let mut opts = Opts::new(&rules);

        assert_eq!(opts.try_toggle("a"), Err(OptsError::Incoherent));
        opts.toggle("b");
        assert!(opts.all_off());
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut rules = RuleSet::new();
        rules.add_conflict("x", "y");
        let mut opts = Opts::new(&rules);
        opts.toggle("x");

        let snap = opts.snapshot();
        assert!(snap.coherent);
        assert!(!snap.all_off);
        assert_eq!(snap.enabled.len(), 1);
        assert!(snap.enabled.contains("x"));
    }
}
