//! featgate CLI - build a rule set from `--rule` arguments and inspect or
//! toggle options against it.

mod commands;
mod config;
mod rule;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use config::{FeatgateConfig, OutputFormat};
use rule::Rule;

#[derive(Parser)]
#[command(
    name = "featgate",
    version,
    about = "Toggle feature options under requires/excludes rules"
)]
struct Cli {
    /// Config file (default: nearest featgate.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RuleArgs {
    /// A relation, "<a> requires <b>" or "<a> excludes <b>". Repeatable;
    /// applied in the order given.
    #[arg(short, long = "rule", value_name = "RULE")]
    rules: Vec<Rule>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether the rules contradict themselves
    Check {
        #[command(flatten)]
        rules: RuleArgs,
    },
    /// Print every option with its requirements and exclusions
    Show {
        #[command(flatten)]
        rules: RuleArgs,
    },
    /// Toggle options in order, starting from all off, and print the result
    Toggle {
        #[command(flatten)]
        rules: RuleArgs,
        /// Output format (overrides the config file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Options to toggle
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = FeatgateConfig::resolve(cli.config.as_deref(), &cwd)?;
    init_tracing(&config, cli.verbose);

    match cli.command {
        Commands::Check { rules } => {
            let rules = rule::build(&rules.rules);
            if !commands::check::run(&rules) {
                process::exit(2);
            }
            Ok(())
        }

        Commands::Show { rules } => {
            let rules = rule::build(&rules.rules);
            commands::show::run(&rules);
            Ok(())
        }

        Commands::Toggle {
            rules,
            format,
            names,
        } => {
            let rules = rule::build(&rules.rules);
            let mut output = config.output.clone();
            if let Some(format) = format {
                output.format = format;
            }
            commands::toggle::run(&rules, &names, &output)
        }
    }
}

/// Logs go to stderr. `RUST_LOG` overrides `--verbose` and the config file.
fn init_tracing(config: &FeatgateConfig, verbose: bool) {
    let filter = if verbose {
        "debug"
    } else {
        config.log.level.as_str()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}
