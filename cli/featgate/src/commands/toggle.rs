//! `featgate toggle` - flip options in order and print the enabled set.

use anyhow::Result;
use featgate_opts::{Opts, OptsSnapshot};
use featgate_rules::RuleSet;
use serde::Serialize;
use tracing::warn;

use crate::config::{OutputConfig, OutputFormat};

/// JSON report. `enabled` is sorted only when the config asks for it.
#[derive(Debug, Serialize)]
struct Report<'a> {
    coherent: bool,
    all_off: bool,
    enabled: Vec<&'a str>,
}

pub fn run(rules: &RuleSet, names: &[String], output: &OutputConfig) -> Result<()> {
    let mut opts = Opts::new(rules);
    for name in names {
        if !rules.contains(name) {
            warn!(option = %name, "unknown option, toggle ignored");
        }
        opts.toggle(name);
    }

    println!("{}", render(&opts.snapshot(), output)?);
    Ok(())
}

fn enabled_names<'a>(snapshot: &'a OptsSnapshot, sorted: bool) -> Vec<&'a str> {
    if sorted {
        snapshot.sorted()
    } else {
        snapshot.enabled.iter().map(String::as_str).collect()
    }
}

fn render(snapshot: &OptsSnapshot, output: &OutputConfig) -> Result<String> {
    let enabled = enabled_names(snapshot, output.sorted);
    match output.format {
        OutputFormat::Json => {
            let report = Report {
                coherent: snapshot.coherent,
                all_off: snapshot.all_off,
                enabled,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text => {
            let mut lines = Vec::new();
            if !snapshot.coherent {
                lines.push("rule set is incoherent; no option was toggled".to_string());
            }
            if enabled.is_empty() {
                lines.push("(all options off)".to_string());
            } else {
                lines.extend(enabled.iter().map(|n| n.to_string()));
            }
            Ok(lines.join("\n"))
        }
    }
}
