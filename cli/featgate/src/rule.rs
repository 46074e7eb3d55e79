//! `--rule` arguments: one relation per argument, applied in order.

use std::fmt;
use std::str::FromStr;

use featgate_rules::RuleSet;

/// A single relation given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// `<a> requires <b>`
    Requires(String, String),
    /// `<a> excludes <b>`
    Excludes(String, String),
}

impl Rule {
    pub fn apply(&self, rules: &mut RuleSet) {
        match self {
            Rule::Requires(a, b) => rules.add_dep(a, b),
            Rule::Excludes(a, b) => rules.add_conflict(a, b),
        }
    }
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            [a, "requires", b] => Ok(Rule::Requires(a.to_string(), b.to_string())),
            [a, "excludes", b] => Ok(Rule::Excludes(a.to_string(), b.to_string())),
            _ => Err(format!(
                "expected '<a> requires <b>' or '<a> excludes <b>', got '{s}'"
            )),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Requires(a, b) => write!(f, "{a} requires {b}"),
            Rule::Excludes(a, b) => write!(f, "{a} excludes {b}"),
        }
    }
}

/// Build a rule set by applying `rules` in the order given.
pub fn build(rules: &[Rule]) -> RuleSet {
    let mut set = RuleSet::new();
    for rule in rules {
        tracing::debug!(%rule, "applying rule");
        rule.apply(&mut set);
    }
    set
}
