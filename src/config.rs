use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::auth::SPREADSHEET_SCOPES;
use crate::error::{Result, SheetsError};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Where credentials live and which scopes consent is requested for
///
/// The token cache path is explicit configuration rather than a hardcoded
/// relative path; defaults are `credentials.json` and `token.json` in the
/// working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            token_path: default_token_path(),
            scopes: default_scopes(),
        }
    }
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_token_path() -> PathBuf {
    PathBuf::from("token.json")
}

fn default_scopes() -> Vec<String> {
    SPREADSHEET_SCOPES.iter().map(|s| s.to_string()).collect()
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        // If file doesn't exist, return default config with warning
        if !path.exists() {
            tracing::warn!("config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SheetsError::ConfigError(format!("failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| SheetsError::ConfigError(format!("failed to parse config file: {}", e)))?;

        config.validate()?;

        tracing::info!("loaded configuration from {:?}", path);
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                SheetsError::ConfigError(format!("failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SheetsError::ConfigError(format!("failed to serialize config: {}", e)))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| SheetsError::ConfigError(format!("failed to write config file: {}", e)))?;

        tracing::info!("saved configuration to {:?}", path);
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.auth.credentials_path.as_os_str().is_empty() {
            return Err(SheetsError::ConfigError(
                "auth.credentials_path cannot be empty".to_string(),
            ));
        }
        if self.auth.token_path.as_os_str().is_empty() {
            return Err(SheetsError::ConfigError(
                "auth.token_path cannot be empty".to_string(),
            ));
        }

        if self.auth.scopes.is_empty() {
            return Err(SheetsError::ConfigError(
                "auth.scopes must list at least one scope".to_string(),
            ));
        }
        for scope in &self.auth.scopes {
            if scope.is_empty() {
                return Err(SheetsError::ConfigError(
                    "auth.scopes cannot contain empty strings".to_string(),
                ));
            }
        }

        Ok(())
    }
}
