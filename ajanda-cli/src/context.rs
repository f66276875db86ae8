use anyhow::{Context, Result};

use ajanda_core::api::{ApiClient, FetchUser};
use ajanda_core::config::AjandaConfig;
use ajanda_core::session::{FileTokenStore, Session, SessionStore};
use ajanda_core::User;

use crate::utils::tui::{create_spinner, prompt_text};

/// Everything a command needs: the API client and the session it acts as.
pub struct App {
    pub api: ApiClient,
    pub sessions: SessionStore<FileTokenStore>,
}

impl App {
    pub fn load(api_url: Option<String>) -> Result<Self> {
        let mut config = AjandaConfig::load().context("Failed to load ajanda config")?;
        if let Some(url) = api_url {
            config.api_url = url;
        }

        let store = FileTokenStore::from_config(&config)?;
        let sessions = SessionStore::restore(store).context("Failed to read stored session")?;

        Ok(App {
            api: ApiClient::from_config(&config),
            sessions,
        })
    }

    pub fn session(&self) -> &Session {
        self.sessions.current()
    }

    pub fn require_login(&self) -> Result<&Session> {
        let session = self.sessions.current();
        if !session.is_authenticated() {
            anyhow::bail!(
                "Not logged in.\n\n\
                Log in with:\n  \
                ajanda login"
            );
        }
        Ok(session)
    }

    /// Look the profile up by email and attach it to the session. The
    /// profile is not stored between runs, so the email is asked for when
    /// not given.
    pub async fn fetch_user(&mut self, email: Option<String>) -> Result<User> {
        self.require_login()?;

        let email = match email {
            Some(email) => email,
            None => prompt_text("Email")?,
        };

        let spinner = create_spinner("Fetching profile".into());
        let result = self
            .api
            .call(self.sessions.current(), FetchUser { email: email.trim().to_string() })
            .await;
        spinner.finish_and_clear();

        let mut user = result?;
        if user.email.is_none() {
            user.email = Some(email.trim().to_string());
        }
        self.sessions.set_user(user.clone());

        Ok(user)
    }
}
