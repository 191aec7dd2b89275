use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use wrroc_merge::MergeOptions;
use wrroc_pack::Layout;
use wrroc_store::RdfFormat;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "wrroc.toml";

/// Settings read from `wrroc.toml`. Every key is optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Recorded as the workflow's `creator`.
    pub user: String,
    /// Aggregate graph written by `batch`.
    pub output: PathBuf,
    pub format: RdfFormat,
    pub merge: MergeOptions,
    pub layout: Layout,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            user: "anonymous".into(),
            output: PathBuf::from("wrroc.ttl"),
            format: RdfFormat::Turtle,
            merge: MergeOptions::default(),
            layout: Layout::default(),
        }
    }
}

impl CliConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// `explicit` must exist; otherwise `wrroc.toml` in `dir` is used if
    /// present, falling back to defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::from_file(&fallback);
        }
        Ok(Self::default())
    }
}
