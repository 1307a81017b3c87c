use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::ChartStyle;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const API_BASE_ENV: &str = "RISKVIEW_API_BASE";
pub const CONFIG_PATH_ENV: &str = "RISKVIEW_CONFIG";

/// Dashboard bootstrap configuration.
///
/// Serializable so hosts can keep it next to their own settings; every field
/// falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub chart: ChartStyle,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            chart: ChartStyle::default(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> ChartResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to read `{}`: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Loads `RISKVIEW_CONFIG` (if set), then applies `RISKVIEW_API_BASE`.
    pub fn from_env() -> ChartResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DashboardConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ChartResult<Self> {
        let mut config = match lookup(CONFIG_PATH_ENV).filter(|path| !path.trim().is_empty()) {
            Some(path) => Self::from_json_file(Path::new(path.trim()))?,
            None => Self::default(),
        };
        if let Some(base) = lookup(API_BASE_ENV).filter(|base| !base.trim().is_empty()) {
            config.api_base_url = base.trim().to_owned();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ChartError::InvalidConfig(
                "`api_base_url` must not be empty".to_owned(),
            ));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ChartError::InvalidConfig(format!(
                "`api_base_url` must be an http(s) url: {base}"
            )));
        }
        self.chart.validate()
    }
}
