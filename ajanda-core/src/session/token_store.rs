//! Durable storage for the session token.

use std::path::{Path, PathBuf};

use crate::config::AjandaConfig;
use crate::error::AjandaResult;

/// Where the session token survives restarts.
pub trait TokenStore {
    fn load(&self) -> AjandaResult<Option<String>>;
    fn save(&mut self, token: &str) -> AjandaResult<()>;
    fn clear(&mut self) -> AjandaResult<()>;
}

/// Token kept in a single owner-only file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        FileTokenStore { path: path.into() }
    }

    pub fn from_config(config: &AjandaConfig) -> AjandaResult<Self> {
        Ok(Self::at(config.token_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> AjandaResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let token = std::fs::read_to_string(&self.path)?;
        let token = token.trim();

        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    fn save(&mut self, token: &str) -> AjandaResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, token)?;

        // Owner-only, the file holds a bearer credential
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn clear(&mut self) -> AjandaResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Token kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        MemoryTokenStore {
            token: Some(token.to_string()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> AjandaResult<Option<String>> {
        Ok(self.token.clone())
    }

    fn save(&mut self, token: &str) -> AjandaResult<()> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> AjandaResult<()> {
        self.token = None;
        Ok(())
    }
}
