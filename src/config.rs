//! Configuration loading for the engine.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{MargaError, Result};
use crate::tasks::{default_worker_count, OrchestratorConfig};

/// Main configuration structure
#[derive(Clone, Debug, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub drain: DrainConfig,
}

/// Worker pool settings
#[derive(Clone, Debug, Deserialize)]
pub struct WorkerConfig {
    /// Fixed worker count; when absent the hardware-derived policy applies
    /// (max(2, 2 * (parallelism - 1)))
    #[serde(default)]
    pub count: Option<usize>,

    /// Grace period for pool shutdown on context reset, in milliseconds
    /// (default: 2000)
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

/// Drain cadence settings
#[derive(Clone, Debug, Deserialize)]
pub struct DrainConfig {
    /// Simulated seconds between periodic drain passes (default: 1.0)
    #[serde(default = "default_drain_interval")]
    pub interval_secs: f32,
}

// Default value functions
fn default_shutdown_grace_ms() -> u64 {
    2000
}
fn default_drain_interval() -> f32 {
    1.0
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: None,
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_drain_interval(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MargaError::Config(format!("failed to read config file: {e}")))?;
        let config: EngineConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Effective worker pool size
    pub fn worker_count(&self) -> usize {
        self.workers.count.unwrap_or_else(default_worker_count)
    }

    /// Orchestrator settings derived from this configuration
    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            worker_count: self.worker_count(),
            drain_interval: self.drain.interval_secs,
            shutdown_grace: Duration::from_millis(self.workers.shutdown_grace_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.workers.shutdown_grace_ms, 2000);
        assert_eq!(config.drain.interval_secs, 1.0);
        assert!(config.worker_count() >= 2);
    }

    #[test]
    fn test_parse_toml_overrides() {
        let config: EngineConfig = toml::from_str(
            r#"
            [workers]
            count = 4
            shutdown_grace_ms = 500

            [drain]
            interval_secs = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.worker_count(), 4);
        assert_eq!(config.workers.shutdown_grace_ms, 500);
        assert_eq!(config.drain.interval_secs, 0.25);

        let orch = config.orchestrator();
        assert_eq!(orch.worker_count, 4);
        assert_eq!(orch.shutdown_grace, Duration::from_millis(500));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: EngineConfig = toml::from_str("[workers]\ncount = 3\n").unwrap();
        assert_eq!(config.worker_count(), 3);
        assert_eq!(config.workers.shutdown_grace_ms, 2000);
        assert_eq!(config.drain.interval_secs, 1.0);
    }
}
