//! Configuration persistence
//!
//! Stores user preferences in `~/.config/recordpad/config.yaml`

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::grid::DEFAULT_ROWS_PER_PAGE;
use crate::ingest::WindowingPolicy;

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rows per grid page
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
    /// Size thresholds for columnar reads
    #[serde(default)]
    pub windowing: WindowingPolicy,
}

fn default_rows_per_page() -> usize {
    DEFAULT_ROWS_PER_PAGE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rows_per_page: default_rows_per_page(),
            windowing: WindowingPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load config from disk, or return defaults if not found or unreadable
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Apply command-line overrides
    pub fn with_rows_per_page(mut self, rows_per_page: Option<usize>) -> Self {
        if let Some(rows) = rows_per_page {
            self.rows_per_page = rows;
        }
        self.sanitized()
    }

    fn sanitized(mut self) -> Self {
        if self.rows_per_page == 0 {
            tracing::warn!("rows_per_page must be at least 1, using 1");
            self.rows_per_page = 1;
        }
        self
    }
}
