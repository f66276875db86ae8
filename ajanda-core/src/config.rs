//! Global ajanda configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AjandaError, AjandaResult};

static DEFAULT_API_URL: &str = "http://localhost:3000";

/// Name under which the session token is stored.
pub const TOKEN_KEY: &str = "jwt-token";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Configuration at ~/.config/ajanda/config.toml, overlaid with `AJANDA_*`
/// environment variables.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AjandaConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Where the session token lives. Defaults to the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
}

impl Default for AjandaConfig {
    fn default() -> Self {
        AjandaConfig {
            api_url: default_api_url(),
            token_file: None,
        }
    }
}

impl AjandaConfig {
    pub fn config_dir() -> AjandaResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| AjandaError::Config("Could not determine config directory".into()))?
            .join("ajanda"))
    }

    pub fn config_path() -> AjandaResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if none exists.
    pub fn load() -> AjandaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> AjandaResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("AJANDA"))
            .build()
            .map_err(|e| AjandaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AjandaError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AjandaResult<()> {
        let contents = format!(
            "\
# ajanda configuration

# Backend the client talks to:
# api_url = \"{}\"

# Where the session token is kept:
# token_file = \"~/.config/ajanda/session/{}\"
",
            DEFAULT_API_URL, TOKEN_KEY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AjandaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AjandaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Resolved token path, with `~` expanded.
    pub fn token_path(&self) -> AjandaResult<PathBuf> {
        match &self.token_file {
            Some(path) => Ok(PathBuf::from(
                shellexpand::tilde(&path.to_string_lossy()).into_owned(),
            )),
            None => Ok(Self::config_dir()?.join("session").join(TOKEN_KEY)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        AjandaConfig::create_default_config(&path).unwrap();
        let config = AjandaConfig::load_from(&path).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.token_file, None);
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"https://events.example.org\"\ntoken_file = \"/tmp/ajanda-token\"\n",
        )
        .unwrap();

        let config = AjandaConfig::load_from(&path).unwrap();

        assert_eq!(config.api_url, "https://events.example.org");
        assert_eq!(
            config.token_path().unwrap(),
            PathBuf::from("/tmp/ajanda-token")
        );
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = AjandaConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
