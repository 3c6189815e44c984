use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OllamaConfig {
    pub host: String,
    pub port: u16,
    pub embedding_model: String,
    pub generation_model: String,
    pub batch_size: u32,
}

/// Tuning knobs for chunking, retrieval, and answer synthesis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    /// Maximum chunk length in characters
    pub chunk_size: usize,
    /// Characters shared between adjacent chunks
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question
    pub top_k: usize,
    /// Minimum question/chunk similarity for a chunk to count as relevant
    pub relevance_threshold: f32,
    /// Generation output cap in tokens
    pub max_answer_tokens: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found or could not be created")]
    DirectoryError,
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Invalid port: {0} (must be between 1 and 65535)")]
    InvalidPort(u16),
    #[error("Invalid batch size: {0} (must be between 1 and 1000)")]
    InvalidBatchSize(u32),
    #[error("Invalid model name: {0} (cannot be empty)")]
    InvalidModel(String),
    #[error("Invalid chunking: overlap {overlap} must be smaller than chunk size {chunk_size}")]
    InvalidChunking { chunk_size: usize, overlap: usize },
    #[error("Invalid top_k: must be at least 1")]
    InvalidTopK,
    #[error("Invalid relevance threshold: {0} (must be in (0, 1))")]
    InvalidThreshold(f32),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Default for OllamaConfig {
    #[inline]
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 11434,
            embedding_model: "nomic-embed-text:latest".to_string(),
            generation_model: "llama3.2:latest".to_string(),
            batch_size: 64,
        }
    }
}

impl Default for PipelineConfig {
    #[inline]
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 10,
            relevance_threshold: crate::pipeline::gate::DEFAULT_RELEVANCE_THRESHOLD,
            max_answer_tokens: 512,
        }
    }
}

impl Config {
    #[inline]
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(".docqa"))
            .or({
                #[cfg(windows)]
                {
                    dirs::data_dir().map(|data| data.join("docqa"))
                }
                #[cfg(not(windows))]
                {
                    None
                }
            })
            .ok_or(ConfigError::DirectoryError)
    }

    #[inline]
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    #[inline]
    pub fn load() -> Result<Self> {
        let config_path =
            Self::config_file_path().context("Failed to determine config file path")?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config
            .validate()
            .with_context(|| "Configuration validation failed")?;

        Ok(config)
    }

    #[inline]
    pub fn save(&self) -> Result<()> {
        self.validate()
            .context("Configuration validation failed before saving")?;

        let config_dir = Self::config_dir().context("Failed to determine config directory")?;

        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ollama.validate()?;
        self.pipeline.validate()
    }

    #[inline]
    pub fn ollama_url(&self) -> Result<Url, ConfigError> {
        let url_str = format!("http://{}:{}", self.ollama.host, self.ollama.port);
        Url::parse(&url_str).map_err(|_| ConfigError::InvalidUrl(url_str))
    }
}

impl OllamaConfig {
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }

        if self.embedding_model.trim().is_empty() {
            return Err(ConfigError::InvalidModel(self.embedding_model.clone()));
        }

        if self.generation_model.trim().is_empty() {
            return Err(ConfigError::InvalidModel(self.generation_model.clone()));
        }

        if self.batch_size == 0 || self.batch_size > 1000 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }

        let url_str = format!("http://{}:{}", self.host, self.port);
        Url::parse(&url_str).map_err(|_| ConfigError::InvalidUrl(url_str))?;

        Ok(())
    }
}

impl PipelineConfig {
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 || self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::InvalidChunking {
                chunk_size: self.chunk_size,
                overlap: self.chunk_overlap,
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK);
        }

        if self.relevance_threshold <= 0.0 || self.relevance_threshold >= 1.0 {
            return Err(ConfigError::InvalidThreshold(self.relevance_threshold));
        }

        Ok(())
    }
}
