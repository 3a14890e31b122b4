use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".gitch.toml";

const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Commit records buffered between traversal and aggregation
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub order: String,
    pub format: String,
    pub progress: bool,
    pub color: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            order: "count".to_string(),
            format: "text".to_string(),
            progress: true,
            color: true,
        }
    }
}

impl Config {
    /// Load `.gitch.toml` from the repository root, falling back to defaults
    /// when the file does not exist.
    pub fn load(repo_root: &Path) -> Result<Self> {
        let path = repo_root.join(CONFIG_FILE_NAME);

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_path()).required(false))
            .build()
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut loaded: Config = settings
            .try_deserialize()
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if loaded.pipeline.channel_capacity == 0 {
            debug!("channel_capacity of 0 is not usable, raising to 1");
            loaded.pipeline.channel_capacity = 1;
        }

        Ok(loaded)
    }
}
