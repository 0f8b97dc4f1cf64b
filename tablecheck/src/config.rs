use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "tablecheck.yaml";

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub db: Option<PathBuf>,
    pub format: Option<String>,
    pub busy_timeout_ms: Option<u64>,
    #[serde(default)]
    pub attach: BTreeMap<String, PathBuf>,
}

/// Load an explicit config file, or `./tablecheck.yaml` when present.
///
/// A missing default file yields `None`; an explicit path must exist and parse.
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG);
            if p.exists() { p.to_path_buf() } else { return Ok(None); }
        }
    };
    let s = fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&s)
        .with_context(|| format!("parsing config {}", path.display()))
        .map(Some)
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(s)?)
}
