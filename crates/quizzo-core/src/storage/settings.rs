//! Player settings storage
//!
//! API key, model and optional Azure deployment, plus the interests used to
//! seed topic generation. Stored as JSON under the config directory.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ai::client::Credentials;
use crate::constants;
use crate::paths;

/// Environment variables that take precedence over the settings file
pub const ENV_API_KEY: &str = "QUIZZO_API_KEY";
pub const ENV_MODEL: &str = "QUIZZO_MODEL";
pub const ENV_AZURE_ENDPOINT: &str = "QUIZZO_AZURE_ENDPOINT";
pub const ENV_AZURE_DEPLOYMENT: &str = "QUIZZO_AZURE_DEPLOYMENT";

/// Shown when generation is attempted without a key and model
pub const NOT_CONFIGURED_MESSAGE: &str = "Please configure your API settings first";

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_deployment_name: Option<String>,
    /// Free-text interests for topic generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("model_name", &self.model_name)
            .field("azure_endpoint", &self.azure_endpoint)
            .field("azure_deployment_name", &self.azure_deployment_name)
            .field("interests", &self.interests)
            .finish()
    }
}

impl Settings {
    /// Get the settings file path
    pub fn path() -> PathBuf {
        paths::config_dir().join(constants::ui::SETTINGS_FILE_NAME)
    }

    /// Load settings from disk
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load settings from a specific path, defaulting when absent
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::path())
    }

    /// Save settings to a specific path
    ///
    /// Writes a temp file and renames it over the original. On Unix the file
    /// is restricted to 0600 since it holds the API key.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&temp_path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600))
                .map_err(|e| anyhow::anyhow!("Failed to set secure file permissions: {}", e))?;
        }

        fs::rename(&temp_path, path)?;

        #[cfg(windows)]
        {
            tracing::warn!(
                "Windows: File permissions not set - API key may be accessible to other users"
            );
        }

        tracing::debug!("Settings saved atomically to {:?}", path);
        Ok(())
    }

    /// Overlay values from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`; empty values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(model) = get(ENV_MODEL) {
            self.model_name = model;
        }
        if let Some(endpoint) = get(ENV_AZURE_ENDPOINT) {
            self.azure_endpoint = Some(endpoint);
        }
        if let Some(deployment) = get(ENV_AZURE_DEPLOYMENT) {
            self.azure_deployment_name = Some(deployment);
        }
        self
    }

    /// Both an API key and a model are set
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.model_name.trim().is_empty()
    }

    /// Request-scoped credentials for the current settings
    pub fn credentials(&self) -> Credentials {
        Credentials {
            api_key: self.api_key.trim().to_string(),
            model_name: self.model_name.trim().to_string(),
            azure_endpoint: non_blank(&self.azure_endpoint),
            azure_deployment_name: non_blank(&self.azure_deployment_name),
        }
    }

    /// Interests, if any non-blank text was saved
    pub fn interests(&self) -> Option<&str> {
        self.interests
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
