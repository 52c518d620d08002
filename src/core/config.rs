//! Configuration management for Dwell
//!
//! Supports environment variables, config files, and runtime overrides.
//! All timers the run depends on are configurable with documented defaults.
//!
//! Config file location: ~/.config/dwell/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{DwellError, Result};

/// Main configuration for Dwell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search engine configuration
    pub search: SearchConfig,
    /// Browser configuration
    pub browser: BrowserConfig,
    /// Timers for the per-tab reading simulation and teardown
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Search engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search results endpoint
    pub engine_url: String,
    /// Query used when no term is given on the command line
    pub default_term: String,
    /// CSS selector matching result anchors on the results page
    pub result_selector: String,
    /// Maximum number of result links to open
    pub max_results: usize,
}

/// Browser behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// How long to wait for the results selector before failing, in seconds
    pub selector_timeout_secs: u64,
    /// How long to wait for a page to reach readyState "complete", in seconds
    pub nav_timeout_secs: u64,
    /// Whether to show debug output
    pub debug: bool,
}

/// Timer configuration for the reading simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long each tab stays open after loading, in seconds
    /// Default: 780 (13 minutes)
    pub dwell_secs: u64,
    /// How long to wait after all tabs finish before closing everything,
    /// in seconds. Default: 1800 (30 minutes)
    pub teardown_secs: u64,
    /// Pixels scrolled per step
    pub scroll_step_px: u32,
    /// Pause between scroll steps, in milliseconds
    pub scroll_pause_ms: u64,
    /// Upper bound on scroll steps, so an infinitely-growing page
    /// cannot spin forever
    pub max_scroll_steps: u32,
    /// Pause between synthetic mouse edges during focus, in milliseconds
    pub focus_pause_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            browser: BrowserConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine_url: "https://www.google.com/search".to_string(),
            default_term: env::var("DWELL_DEFAULT_TERM")
                .unwrap_or_else(|_| "example search".to_string()),
            result_selector: ".yuRUbf a".to_string(),
            max_results: 10,
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            selector_timeout_secs: 30,
            nav_timeout_secs: 30,
            debug: env::var("DWELL_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dwell_secs: env::var("DWELL_DWELL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(780),
            teardown_secs: env::var("DWELL_TEARDOWN_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
            scroll_step_px: 70,
            scroll_pause_ms: 2000,
            max_scroll_steps: 2000,
            focus_pause_ms: 100,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dwell")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(DwellError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| DwellError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| DwellError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| DwellError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| DwellError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| DwellError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.engine_url, "https://www.google.com/search");
        assert_eq!(config.search.result_selector, ".yuRUbf a");
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.timing.dwell_secs, 780);
        assert_eq!(config.timing.teardown_secs, 1800);
        assert_eq!(config.timing.scroll_step_px, 70);
        assert_eq!(config.timing.scroll_pause_ms, 2000);
        assert_eq!(config.timing.focus_pause_ms, 100);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("engine_url"));
        assert!(toml_str.contains("dwell_secs"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.search.max_results, config.search.max_results);
        assert_eq!(parsed.timing.teardown_secs, config.timing.teardown_secs);
    }

    #[test]
    fn test_timing_defaults_when_section_missing() {
        let toml_str = r#"
            [search]
            engine_url = "https://www.google.com/search"
            default_term = "weather"
            result_selector = ".yuRUbf a"
            max_results = 5

            [browser]
            selector_timeout_secs = 10
            nav_timeout_secs = 10
            debug = false
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.timing.dwell_secs, 780);
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("dwell"));
    }
}
