use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling report detail and chart output
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// How many leading responses the plain report lists per experiment
    #[serde(default = "default_top_responses")]
    pub top_responses: usize,
    /// Directory to render charts into; chart rendering is skipped when unset
    #[serde(default)]
    pub plots_dir: Option<String>,
    /// Restrict the analysis to these experiment names; all when unset
    #[serde(default)]
    pub experiments: Option<Vec<String>>,
}

fn default_top_responses() -> usize {
    5
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_responses: default_top_responses(),
            plots_dir: None,
            experiments: None,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}
