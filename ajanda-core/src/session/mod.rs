//! The authenticated-user context.
//!
//! There is exactly one `SessionStore` per process. It is never reached
//! through a global: callers hold it and pass `&Session` to every API call,
//! which is what decides whether a request carries credentials.

mod token_store;

pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

use crate::api::{ApiClient, Login, Register};
use crate::error::{AjandaResult, ValidationError};
use crate::model::{AuthSession, NewUser, User};

/// Who the client is currently acting as.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(AuthSession),
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated(auth) => Some(auth.token.as_str()),
            Session::Unauthenticated => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated(auth) => auth.user.as_ref(),
            Session::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

/// Owns the in-memory session and mirrors its token into a `TokenStore`.
#[derive(Debug)]
pub struct SessionStore<S: TokenStore> {
    store: S,
    session: Session,
}

impl<S: TokenStore> SessionStore<S> {
    /// Start unauthenticated, ignoring whatever the store holds.
    pub fn new(store: S) -> Self {
        SessionStore {
            store,
            session: Session::Unauthenticated,
        }
    }

    /// Pick up a token persisted by an earlier run. The profile is not
    /// persisted and has to be fetched again.
    pub fn restore(store: S) -> AjandaResult<Self> {
        let session = match store.load()? {
            Some(token) => {
                tracing::debug!("restored session token");
                Session::Authenticated(AuthSession { token, user: None })
            }
            None => Session::Unauthenticated,
        };

        Ok(SessionStore { store, session })
    }

    pub fn current(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Log in, persist the token, then mark the session authenticated.
    ///
    /// Network failures and rejected credentials both come back as errors;
    /// nothing is retried and the previous session is left untouched.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> AjandaResult<AuthSession> {
        if email.trim().is_empty() {
            return Err(ValidationError::MissingEmail.into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingPassword.into());
        }

        let response = api
            .call(
                &Session::Unauthenticated,
                Login {
                    email: email.trim().to_string(),
                    password: password.to_string(),
                },
            )
            .await?;

        self.store.save(&response.token)?;

        let auth = AuthSession {
            token: response.token.clone(),
            user: Some(response.user(email.trim())),
        };
        self.session = Session::Authenticated(auth.clone());
        tracing::info!("logged in");

        Ok(auth)
    }

    /// Create an account. Registration does not log the user in.
    pub async fn register(&self, api: &ApiClient, new_user: NewUser) -> AjandaResult<User> {
        if new_user.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail.into());
        }
        if new_user.password.is_empty() {
            return Err(ValidationError::MissingPassword.into());
        }

        let reply = api
            .call(&Session::Unauthenticated, Register(new_user.clone()))
            .await?;

        Ok(User {
            user_id: reply
                .get("user_id")
                .or_else(|| reply.get("userId"))
                .and_then(serde_json::Value::as_i64),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: Some(new_user.email),
        })
    }

    /// Forget the token both on disk and in memory.
    pub fn logout(&mut self) -> AjandaResult<()> {
        self.store.clear()?;
        self.session = Session::Unauthenticated;
        tracing::info!("logged out");
        Ok(())
    }

    /// Attach a freshly fetched or edited profile to the current session.
    /// Does nothing when unauthenticated.
    pub fn set_user(&mut self, user: User) {
        if let Session::Authenticated(auth) = &mut self.session {
            auth.user = Some(user);
        }
    }
}
