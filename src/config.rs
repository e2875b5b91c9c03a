use crate::llm_providers::{LLMProviderConfig, gemini_metadata};
use crate::log_debug;

use anyhow::{Context, Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration structure for the Twin-Track application
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Remote provider connection settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Generation settings sent with each comparison
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Performance and execution settings
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Provider-specific configuration structure
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ProviderConfig {
    /// API key for the provider
    #[serde(default)]
    pub api_key: String,
    /// Model to be used with the provider
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL, empty for the public endpoint
    #[serde(default)]
    pub base_url: String,
    /// Additional generation parameters for the provider
    #[serde(default)]
    pub additional_params: HashMap<String, String>,
}

/// Generation settings
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Sampling temperature; low keeps answers close to the label format
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Ground answers with web search and collect citations
    #[serde(default = "default_search_grounding")]
    pub search_grounding: bool,
}

/// Performance and execution configuration
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PerformanceConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Whether to enable verbose logging (includes HTTP client logs)
    #[serde(default)]
    pub verbose_logging: bool,
}

fn default_model() -> String {
    gemini_metadata().default_model.to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_search_grounding() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: String::new(),
            additional_params: HashMap::new(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            search_grounding: default_search_grounding(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// Load the configuration from the personal config file
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let config = Self::load_from_path(&config_path)?;
        log_debug!("Configuration loaded from {}", config_path.display());
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults when it does not exist
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&config_str).map_err(|e| {
            anyhow!(
                "Invalid configuration file format: {}. Please check {} for syntax errors.",
                e,
                path.display()
            )
        })
    }

    /// Save the configuration to the personal config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to_path(&config_path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let config_content = toml::to_string_pretty(self)?;
        fs::write(path, config_content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        log_debug!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("twin-track");
        std::fs::create_dir_all(&path)?;
        path.push("config.toml");
        Ok(path)
    }

    /// API key from the config file, else from the provider's environment variables
    pub fn effective_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.provider.api_key.is_empty() {
            return Some(self.provider.api_key.clone());
        }

        gemini_metadata()
            .api_key_env
            .iter()
            .find_map(|name| lookup(name).filter(|key| !key.trim().is_empty()))
    }

    /// Connection settings for the provider; fails when no API key is available
    pub fn provider_settings(&self) -> Result<LLMProviderConfig> {
        let api_key = self.effective_api_key().ok_or_else(|| {
            anyhow!(
                "API key required for {}. Set {} or run 'twin-track config --api-key <KEY>'.",
                gemini_metadata().name,
                gemini_metadata().api_key_env.join(" or ")
            )
        })?;

        Ok(LLMProviderConfig {
            api_key,
            model: self.provider.model.clone(),
            base_url: self.provider.base_url.clone(),
            timeout: Duration::from_secs(self.performance.timeout_seconds),
            additional_params: self.provider.additional_params.clone(),
        })
    }

    /// Update the configuration with new values
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        api_key: Option<String>,
        model: Option<String>,
        temperature: Option<f32>,
        search_grounding: Option<bool>,
        timeout_seconds: Option<u64>,
        additional_params: Option<HashMap<String, String>>,
    ) -> bool {
        let before = self.clone();

        if let Some(key) = api_key {
            self.provider.api_key = key;
        }
        if let Some(model) = model {
            self.provider.model = model;
        }
        if let Some(temperature) = temperature {
            self.generation.temperature = temperature;
        }
        if let Some(search) = search_grounding {
            self.generation.search_grounding = search;
        }
        if let Some(timeout) = timeout_seconds {
            self.performance.timeout_seconds = timeout;
        }
        if let Some(params) = additional_params {
            self.provider.additional_params.extend(params);
        }

        let changed = *self != before;
        log_debug!("Configuration updated (changed: {})", changed);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.provider.model, "gemini-3-pro-preview");
        assert!((config.generation.temperature - 0.1).abs() < f32::EPSILON);
        assert!(config.generation.search_grounding);
        assert_eq!(config.performance.timeout_seconds, 120);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[generation]\ntemperature = 0.4\n").expect("parses");
        assert!((config.generation.temperature - 0.4).abs() < f32::EPSILON);
        assert!(config.generation.search_grounding);
        assert_eq!(config.provider.model, "gemini-3-pro-preview");
    }

    #[test]
    fn test_api_key_resolution_order() {
        let mut config = Config::default();
        let env = |name: &str| (name == "GEMINI_API_KEY").then(|| "from-env".to_string());

        assert_eq!(config.resolve_api_key_with(env), Some("from-env".into()));

        config.provider.api_key = "from-file".into();
        assert_eq!(config.resolve_api_key_with(env), Some("from-file".into()));

        config.provider.api_key.clear();
        assert_eq!(config.resolve_api_key_with(|_| Some("  ".into())), None);
    }

    #[test]
    fn test_update_reports_changes() {
        let mut config = Config::default();
        assert!(!config.update(None, None, None, None, None, None));
        assert!(config.update(None, Some("gemini-2.5-flash".into()), None, Some(false), None, None));
        assert_eq!(config.provider.model, "gemini-2.5-flash");
        assert!(!config.generation.search_grounding);
    }
}
