//! Authentication and password reset endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::endpoint::{Ack, Endpoint};
use crate::model::{NewUser, User};

/// `POST /register`
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Register(pub NewUser);

impl Endpoint for Register {
    // The backend's register reply is not part of the contract; only an
    // optional `user_id` is picked out of it.
    type Response = serde_json::Value;

    fn method() -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/register".into()
    }
}

/// `POST /auth/login`
#[derive(Debug, Serialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "firstName", alias = "first_name")]
    pub first_name: String,
    #[serde(rename = "lastName", alias = "last_name")]
    pub last_name: String,
    #[serde(default, alias = "userId")]
    pub user_id: Option<i64>,
}

impl LoginResponse {
    pub fn user(&self, email: &str) -> User {
        User {
            user_id: self.user_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: Some(email.to_string()),
        }
    }
}

impl Endpoint for Login {
    type Response = LoginResponse;

    fn method() -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/auth/login".into()
    }
}

/// `POST /forgot-password`: mail a reset code to the address.
#[derive(Debug, Serialize)]
pub struct ForgotPassword {
    pub email: String,
}

impl Endpoint for ForgotPassword {
    type Response = Ack;

    fn method() -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/forgot-password".into()
    }
}

/// `POST /verify-reset-code`
#[derive(Debug, Serialize)]
pub struct VerifyResetCode {
    pub email: String,
    pub reset_code: String,
}

impl Endpoint for VerifyResetCode {
    type Response = Ack;

    fn method() -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/verify-reset-code".into()
    }
}

/// `POST /reset-password`
#[derive(Debug, Serialize)]
pub struct ResetPassword {
    pub email: String,
    pub new_password: String,
}

impl Endpoint for ResetPassword {
    type Response = Ack;

    fn method() -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/reset-password".into()
    }
}
