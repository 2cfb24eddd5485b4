use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use smartcomp_protocol::Keywords;
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "smartcomp.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub keywords: Keywords,
}

impl Config {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("invalid configuration")
    }

    /// Loads `path`, or the default file if it exists, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    debug!("no {DEFAULT_CONFIG_FILE}, using default keywords");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let source = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&source)
            .with_context(|| format!("failed to load config {}", path.display()))?;

        debug!(path = %path.display(), keywords = ?config.keywords, "loaded config");
        Ok(config)
    }
}
