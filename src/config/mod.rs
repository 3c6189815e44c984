// Configuration management module
// Handles TOML configuration for the Ollama connection and pipeline tuning

pub mod settings;

pub use settings::{Config, ConfigError, OllamaConfig, PipelineConfig};

/// Get the configuration directory path
#[inline]
pub fn get_config_dir() -> Result<std::path::PathBuf, ConfigError> {
    Config::config_dir()
}
