// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{QaError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIDENCE_RATIO: f64 = 2.0;
pub const DEFAULT_MAX_CONTEXT_PASSAGES: usize = 3;
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Missing keys and sections fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Top score must exceed this multiple of the runner-up for a `high` answer.
    pub confidence_ratio: f64,
    /// Passages returned for a `low` answer, clamped to 2..=3.
    pub max_context_passages: usize,
    pub min_token_len: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestConfig {
    pub max_upload_mb: usize,
    /// 0 disables truncation.
    pub max_document_chars: usize,
    pub timeout_secs: u64,
    pub staging_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_ratio: DEFAULT_CONFIDENCE_RATIO,
            max_context_passages: DEFAULT_MAX_CONTEXT_PASSAGES,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_upload_mb: 20,
            max_document_chars: 1_000_000,
            timeout_secs: 30,
            staging_dir: None,
        }
    }
}

impl IngestConfig {
    pub fn max_upload_bytes(&self) -> u64 {
        (self.max_upload_mb as u64) * 1_048_576
    }
}

impl Config {
    /// An explicit `path` must exist. Without one, `config/default.toml` is
    /// read if present. `DOCQA__*` variables override either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_layered(path, true),
            None => Self::load_layered(Path::new(DEFAULT_CONFIG_PATH), false),
        }
    }

    fn load_layered(path: &Path, required: bool) -> Result<Self> {
        dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(required))
            .add_source(
                config::Environment::with_prefix("DOCQA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| QaError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| QaError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        let ratio = self.engine.confidence_ratio;
        if ratio.is_nan() || ratio < 1.0 {
            return Err(QaError::Config(
                "confidence_ratio must be at least 1.0".to_string(),
            ));
        }

        if self.engine.min_token_len == 0 {
            return Err(QaError::Config(
                "min_token_len must be greater than 0".to_string(),
            ));
        }

        if self.ingest.max_upload_mb == 0 {
            return Err(QaError::Config(
                "max_upload_mb must be greater than 0".to_string(),
            ));
        }

        if self.ingest.timeout_secs == 0 {
            return Err(QaError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
