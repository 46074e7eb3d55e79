//! `featgate show` - print every option with its requirements and
//! exclusions.

use featgate_rules::RuleSet;

pub fn run(rules: &RuleSet) {
    if rules.is_empty() {
        println!("No options declared.");
        return;
    }
    print!("{rules}");
}
