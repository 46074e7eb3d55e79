//! `featgate check` - report whether the rule set is coherent.

use featgate_rules::{Node, RuleSet};

/// Print the coherence verdict. Returns `false` when incoherent.
pub fn run(rules: &RuleSet) -> bool {
    if rules.is_coherent() {
        println!("coherent ({} options)", rules.len());
        return true;
    }

    match rules.first_incoherent() {
        Some(node) => println!(
            "incoherent: '{}' both requires and excludes {}",
            node.name(),
            contradictions(rules, node).join(", ")
        ),
        None => println!("incoherent"),
    }
    false
}

/// Quoted names that `node` both requires and excludes.
fn contradictions(rules: &RuleSet, node: &Node) -> Vec<String> {
    node.deps()
        .iter()
        .filter(|d| node.conflicts_with(**d))
        .filter_map(|d| rules.get(*d))
        .map(|n| format!("'{}'", n.name()))
        .collect()
}
