//! Three-step password reset.

use crate::api::{ApiClient, ForgotPassword, ResetPassword, VerifyResetCode};
use crate::error::{AjandaResult, ValidationError};
use crate::session::Session;

/// Longest code the reset field accepts.
const RESET_CODE_MAX_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetStep {
    /// Waiting for the email address to send a code to.
    RequestCode,
    /// Code sent to `email`; waiting for the user to type it in.
    VerifyCode { email: String },
    /// Code accepted; waiting for the new password.
    NewPassword { email: String },
    Done,
}

/// Drives `RequestCode -> VerifyCode -> NewPassword -> Done`.
///
/// Input is checked before anything goes over the wire. A step only
/// advances when the backend accepts it; on any error the flow stays put.
#[derive(Debug, Clone)]
pub struct ResetFlow {
    step: ResetStep,
}

impl Default for ResetFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetFlow {
    pub fn new() -> Self {
        ResetFlow {
            step: ResetStep::RequestCode,
        }
    }

    pub fn step(&self) -> &ResetStep {
        &self.step
    }

    pub fn is_done(&self) -> bool {
        self.step == ResetStep::Done
    }

    /// Submit the input for the current step: the email, the code, or the
    /// new password. Does nothing once done.
    pub async fn advance(&mut self, api: &ApiClient, input: &str) -> AjandaResult<&ResetStep> {
        // Reset requests never carry credentials
        let anonymous = Session::Unauthenticated;

        let next = match &self.step {
            ResetStep::RequestCode => {
                let email = input.trim();
                if email.is_empty() {
                    return Err(ValidationError::MissingEmail.into());
                }
                api.call(&anonymous, ForgotPassword { email: email.to_string() })
                    .await?;
                ResetStep::VerifyCode {
                    email: email.to_string(),
                }
            }
            ResetStep::VerifyCode { email } => {
                let code = input.trim();
                if !is_reset_code(code) {
                    return Err(ValidationError::InvalidResetCode.into());
                }
                api.call(
                    &anonymous,
                    VerifyResetCode {
                        email: email.clone(),
                        reset_code: code.to_string(),
                    },
                )
                .await?;
                ResetStep::NewPassword {
                    email: email.clone(),
                }
            }
            ResetStep::NewPassword { email } => {
                if input.is_empty() {
                    return Err(ValidationError::MissingPassword.into());
                }
                api.call(
                    &anonymous,
                    ResetPassword {
                        email: email.clone(),
                        new_password: input.to_string(),
                    },
                )
                .await?;
                ResetStep::Done
            }
            ResetStep::Done => return Ok(&self.step),
        };

        tracing::debug!(?next, "password reset advanced");
        self.step = next;
        Ok(&self.step)
    }

    /// Step back once. Returns `false` at the first step and once done.
    pub fn back(&mut self) -> bool {
        let previous = match &self.step {
            ResetStep::RequestCode | ResetStep::Done => return false,
            ResetStep::VerifyCode { .. } => ResetStep::RequestCode,
            ResetStep::NewPassword { email } => ResetStep::VerifyCode {
                email: email.clone(),
            },
        };
        self.step = previous;
        true
    }
}

fn is_reset_code(code: &str) -> bool {
    (1..=RESET_CODE_MAX_LEN).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit())
}
