//! Users and the authenticated session.

use serde::{Deserialize, Serialize};

/// User profile as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, alias = "userId")]
    pub user_id: Option<i64>,
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[serde(alias = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Token plus whatever profile is known for it.
///
/// A session restored from the token store has no profile until it is
/// fetched again.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: Option<User>,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Body of a profile edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for ProfileUpdate {
    fn from(user: &User) -> Self {
        ProfileUpdate {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone().unwrap_or_default(),
        }
    }
}
