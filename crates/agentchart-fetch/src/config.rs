// File: crates/agentchart-fetch/src/config.rs
// Summary: YAML config loader (strict parsing, validated ranges, defaults for every field).

use std::path::Path;
use std::time::Duration;

use agentchart_core::{Color, Overflow, HEIGHT, WIDTH};
use reqwest::Url;
use serde::Deserialize;

use crate::error::{ChartError, Result};

/// Environment variable naming the config file to load by default.
pub const CONFIG_ENV: &str = "AGENTCHART_CONFIG";

/// Raster themes `charts.theme` may name.
pub const THEMES: [&str; 2] = ["light", "dark"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentChartConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub charts: ChartSection,
}

impl Default for AgentChartConfig {
    fn default() -> Self {
        Self { version: default_version(), server: ServerSection::default(), charts: ChartSection::default() }
    }
}

impl AgentChartConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ChartError::Config(format!("unsupported config version {}", self.version)));
        }
        self.server.validate()?;
        self.charts.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_ms: default_timeout_ms() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        let url = self.url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ChartError::Config(format!("server.base_url must be http(s), got {}", url.scheme())));
        }
        if !(100..=120_000).contains(&self.timeout_ms) {
            return Err(ChartError::Config("server.timeout_ms must be between 100 and 120000".into()));
        }
        Ok(())
    }

    pub fn url(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|e| ChartError::Config(format!("server.base_url '{}': {e}", self.base_url)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSection {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_fill")]
    pub fill: String,

    #[serde(default)]
    pub palette_overflow: Overflow,

    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fill: default_fill(),
            palette_overflow: Overflow::default(),
            theme: default_theme(),
        }
    }
}

impl ChartSection {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::Config("charts.width and charts.height must be positive".into()));
        }
        self.fill_color()?;
        if !THEMES.iter().any(|t| t.eq_ignore_ascii_case(&self.theme)) {
            return Err(ChartError::Config(format!(
                "charts.theme '{}' is not one of {}",
                self.theme,
                THEMES.join(", ")
            )));
        }
        Ok(())
    }

    pub fn fill_color(&self) -> Result<Color> {
        Color::parse_hex(&self.fill).map_err(|e| ChartError::Config(format!("charts.fill: {e}")))
    }
}

fn default_version() -> u32 { 1 }
fn default_base_url() -> String { "http://127.0.0.1:5000".into() }
fn default_timeout_ms() -> u64 { 10_000 }
fn default_width() -> u32 { WIDTH }
fn default_height() -> u32 { HEIGHT }
fn default_fill() -> String { "#3182bd".into() }
fn default_theme() -> String { "light".into() }

pub fn load_from_file(path: impl AsRef<Path>) -> Result<AgentChartConfig> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path)
        .map_err(|e| ChartError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AgentChartConfig> {
    let cfg: AgentChartConfig =
        serde_yaml::from_str(s).map_err(|e| ChartError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// The file named by `AGENTCHART_CONFIG`, or built-in defaults when unset.
pub fn load_default() -> Result<AgentChartConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => load_from_file(path),
        None => Ok(AgentChartConfig::default()),
    }
}
