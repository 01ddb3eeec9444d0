//! Configuration structures for the quotation service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{QuotrError, Result};
use crate::filter::DEFAULT_PAGE_SIZE;

/// Main configuration for quotr.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotrConfig {
    /// HTTP server configuration.
    pub server: ServerConfig,

    /// Document model gateway configuration.
    pub gateway: GatewayConfig,

    /// Working set configuration.
    pub dataset: DatasetConfig,

    /// Extraction parsing configuration.
    pub extraction: ExtractionConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,

    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Chat-completion gateway used for document extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,

    /// Model identifier sent with every request.
    pub model: String,

    /// Environment variable holding the bearer credential.
    pub api_key_env: String,

    /// Upper bound for a single extraction, in seconds.
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://ai.gateway.lovable.dev/v1/chat/completions".to_string(),
            model: "google/gemini-2.5-flash".to_string(),
            api_key_env: "LOVABLE_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Working set configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// JSON file to load instead of the bundled dataset.
    pub path: Option<PathBuf>,

    /// Default page size for listings.
    pub page_size: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// How extracted STATUS / NEW/OLD values outside the permitted set are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumPolicy {
    /// Replace with the schema default and record a warning.
    #[default]
    Coerce,
    /// Fail the extraction.
    Reject,
}

/// Extraction parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub enum_policy: EnumPolicy,

    /// Rewrite numeric and long-form dates into `DD-Mon-YY`.
    pub normalize_dates: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            enum_policy: EnumPolicy::Coerce,
            normalize_dates: true,
        }
    }
}

impl QuotrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| QuotrError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
