//! `featgate.toml` parsing.
//!
//! The config file only controls presentation and logging. Rules are
//! always given on the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name searched for when `--config` is not given.
pub const CONFIG_FILE: &str = "featgate.toml";

/// The top-level config structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatgateConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Output section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format for `featgate toggle`.
    #[serde(default)]
    pub format: OutputFormat,
    /// Sort option names before printing. The library itself never sorts.
    #[serde(default = "default_sorted")]
    pub sorted: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            sorted: default_sorted(),
        }
    }
}

fn default_sorted() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Log section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

impl FeatgateConfig {
    /// Search upward from `start_dir` for a `featgate.toml` file, parse and
    /// return it along with the path it was found at.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Config from `--config`, else the nearest `featgate.toml`, else
    /// defaults.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Ok(Self::find_and_load(cwd)?
                .map(|(config, _)| config)
                .unwrap_or_default()),
        }
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing featgate.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = FeatgateConfig::from_str(
            r#"
[output]
format = "json"
sorted = false

[log]
level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.sorted);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = FeatgateConfig::from_str("").unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.sorted);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn reject_unknown_format() {
        assert!(FeatgateConfig::from_str("[output]\nformat = \"yaml\"\n").is_err());
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(FeatgateConfig::from_str("this is not valid toml [[[").is_err());
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, found) = FeatgateConfig::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(found, dir.path().join(CONFIG_FILE));
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(FeatgateConfig::resolve(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[log]\nlevel = \"info\"\n").unwrap();
        let other = dir.path().join("other.toml");
        std::fs::write(&other, "[log]\nlevel = \"trace\"\n").unwrap();

        let config = FeatgateConfig::resolve(Some(&other), dir.path()).unwrap();
        assert_eq!(config.log.level, "trace");
    }
}
