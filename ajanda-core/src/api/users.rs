//! User profile and account endpoints.

use reqwest::Method;
use serde::Serialize;

use super::endpoint::{Ack, Endpoint};
use crate::model::{ProfileUpdate, User};

/// `GET /users/{email}`
///
/// The email is percent-encoded as a single path segment.
#[derive(Debug, Serialize)]
pub struct FetchUser {
    #[serde(skip)]
    pub email: String,
}

impl Endpoint for FetchUser {
    type Response = User;

    fn method() -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/users/{}", urlencoding::encode(&self.email))
    }
}

/// `PUT /users/{id}`
#[derive(Debug, Serialize)]
pub struct EditUser {
    #[serde(skip)]
    pub user_id: i64,
    #[serde(flatten)]
    pub update: ProfileUpdate,
}

impl Endpoint for EditUser {
    type Response = Ack;

    fn method() -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/users/{}", self.user_id)
    }
}

/// `PUT /users/{id}/password`
#[derive(Debug, Serialize)]
pub struct ChangePassword {
    #[serde(skip)]
    pub user_id: i64,
    pub current_password: String,
    pub new_password: String,
}

impl Endpoint for ChangePassword {
    type Response = Ack;

    fn method() -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/users/{}/password", self.user_id)
    }
}

/// `DELETE /users/{id}`
#[derive(Debug, Serialize)]
pub struct DeleteAccount {
    #[serde(skip)]
    pub user_id: i64,
}

impl Endpoint for DeleteAccount {
    type Response = Ack;

    fn method() -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("/users/{}", self.user_id)
    }
}
