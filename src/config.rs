// src/config.rs
//! Unified configuration management - environment variables with an
//! optional config.toml override file

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub services: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub data_path: PathBuf,
    pub database_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub ai_gateway_url: String,
    pub ai_gateway_key: String,
    pub ai_model: String,
    pub scrape_api_url: String,
    pub scrape_api_token: String,
    pub timeout_seconds: u64,
}

/// Optional file-based overrides, loaded from config.toml when present.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    ai_gateway_url: Option<String>,
    ai_model: Option<String>,
    scrape_api_url: Option<String>,
    timeout_seconds: Option<u64>,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let environment = Self::load_environment()?;
        let file_config = Self::load_file_overrides()?;
        let services = Self::load_services(file_config);

        Ok(Self {
            environment,
            services,
        })
    }

    fn load_environment() -> Result<EnvironmentConfig> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        info!("Loading environment configuration for: {}", env);

        let base_dir = if env == "production" {
            PathBuf::from("/app")
        } else {
            std::env::current_dir().context("Failed to get current directory")?
        };

        Ok(EnvironmentConfig {
            data_path: base_dir.join("data"),
            database_path: base_dir.join("careerpilot.db"),
        })
    }

    fn load_file_overrides() -> Result<FileConfig> {
        let path = PathBuf::from("config.toml");
        if !path.exists() {
            return Ok(FileConfig::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: FileConfig =
            toml::from_str(&content).context("Failed to parse config.toml")?;

        info!("Loaded overrides from config.toml");
        Ok(config)
    }

    fn load_services(overrides: FileConfig) -> ServiceConfig {
        let ai_gateway_url = std::env::var("AI_GATEWAY_URL")
            .ok()
            .or(overrides.ai_gateway_url)
            .unwrap_or_else(|| "http://127.0.0.1:8787".to_string());

        let scrape_api_url = std::env::var("SCRAPE_API_URL")
            .ok()
            .or(overrides.scrape_api_url)
            .unwrap_or_else(|| "https://api.apify.com/v2".to_string());

        ServiceConfig {
            ai_gateway_url,
            ai_gateway_key: std::env::var("AI_GATEWAY_KEY").unwrap_or_default(),
            ai_model: std::env::var("AI_MODEL")
                .ok()
                .or(overrides.ai_model)
                .unwrap_or_else(|| "gpt-4o-mini".to_string()),
            scrape_api_url,
            scrape_api_token: std::env::var("SCRAPE_API_TOKEN").unwrap_or_default(),
            timeout_seconds: overrides.timeout_seconds.unwrap_or(60),
        }
    }

    /// Ensure all required directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        crate::utils::ensure_dir_exists(&self.environment.data_path).await?;

        if let Some(db_parent) = self.environment.database_path.parent() {
            crate::utils::ensure_dir_exists(db_parent).await?;
        }

        Ok(())
    }
}
