use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BenchConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_url() -> String {
    "http://127.0.0.1:8081/http".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Step {
    pub name: String,

    /// Record timings for this step. Unrecorded steps are still sent.
    #[serde(default = "default_bench")]
    pub bench: bool,

    #[serde(default = "default_one")]
    pub tasks: usize,

    /// Upper bound on requests in flight at once.
    #[serde(default = "default_one")]
    pub concurrency: usize,

    /// Sent verbatim as the JSON request body.
    pub payload: Value,
}

fn default_bench() -> bool {
    true
}

fn default_one() -> usize {
    1
}

impl BenchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: BenchConfig = toml::from_str(content)
            .context("Failed to parse TOML config")?;

        if let Some(step) = config.steps.iter().find(|s| s.tasks == 0 || s.concurrency == 0) {
            anyhow::bail!("Step '{}' must have tasks and concurrency of at least 1", step.name);
        }

        Ok(config)
    }
}
