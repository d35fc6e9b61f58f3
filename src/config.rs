use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::model::report::AnalysisParams;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const SYMBOL_ENV_VAR: &str = "STOCK_MONITOR_SYMBOL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub analysis: AnalysisConfig,
    pub monitor: MonitorConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub symbol: String,
    pub display_name: String,
    pub lookback_days: u32,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            symbol: "TSLA".to_string(),
            display_name: "TESLA".to_string(),
            lookback_days: 30,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub change_window: usize,
    pub min_history: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fast_period: 5,
            slow_period: 10,
            change_window: 5,
            min_history: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub refresh_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { refresh_secs: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub color: bool,
    pub clear_screen: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            clear_screen: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "stock-monitor.log".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            fast_period: self.fast_period,
            slow_period: self.slow_period,
            change_window: self.change_window,
            min_history: self.min_history,
        }
    }
}

impl MonitorConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

impl Config {
    /// Load `config/default.toml` (all defaults when absent) and apply env overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::from_path(Path::new(DEFAULT_CONFIG_PATH))?;
        if let Ok(symbol) = std::env::var(SYMBOL_ENV_VAR) {
            config.apply_symbol_override(&symbol);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&config_str).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn apply_symbol_override(&mut self, symbol: &str) {
        let symbol = symbol.trim().to_ascii_uppercase();
        if !symbol.is_empty() {
            self.provider.display_name = symbol.clone();
            self.provider.symbol = symbol;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.provider;
        if p.symbol.trim().is_empty() {
            bail!("provider.symbol must not be empty");
        }
        if p.lookback_days == 0 {
            bail!("provider.lookback_days must be > 0");
        }

        let a = &self.analysis;
        if a.fast_period == 0 || a.slow_period == 0 || a.change_window == 0 {
            bail!("analysis periods must be > 0");
        }
        if a.fast_period > a.slow_period {
            bail!(
                "analysis.fast_period ({}) must not exceed slow_period ({})",
                a.fast_period,
                a.slow_period
            );
        }
        if a.min_history < a.slow_period || a.min_history < a.change_window {
            bail!(
                "analysis.min_history ({}) must cover slow_period ({}) and change_window ({})",
                a.min_history,
                a.slow_period,
                a.change_window
            );
        }

        if self.monitor.refresh_secs == 0 {
            bail!("monitor.refresh_secs must be > 0");
        }
        Ok(())
    }
}
