//! HTTP client for the ajanda backend.

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use super::endpoint::Endpoint;
use crate::config::AjandaConfig;
use crate::error::{AjandaError, AjandaResult};
use crate::session::Session;

/// Thin wrapper around `reqwest::Client`.
///
/// Every call is a fresh round trip: no caching, no retries, no request
/// deduplication. The session is passed in explicitly so the caller decides
/// which credentials a request carries.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &AjandaConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a typed request and decode its response.
    ///
    /// The session token, when present, is sent verbatim in the
    /// `Authorization` header. An unauthenticated session sends no header.
    pub async fn call<E: Endpoint>(&self, session: &Session, endpoint: E) -> AjandaResult<E::Response> {
        let method = E::method();
        let path = endpoint.path();
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url);

        let query = endpoint.query();
        if !query.is_empty() {
            request = request.query(&query);
        }

        if let Some(token) = session.token() {
            request = request.header(AUTHORIZATION, token);
        }

        if E::has_body() {
            request = request.json(&endpoint);
        }

        tracing::debug!(%method, %path, authorized = session.token().is_some(), "sending request");

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, %path, error = %e, "request failed");
            AjandaError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = backend_message(status.as_u16(), &text);
            tracing::warn!(%method, %path, status = status.as_u16(), %message, "backend error");
            return Err(AjandaError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        decode_body(&text).map_err(|e| {
            AjandaError::Serialization(format!("Failed to parse response from {path}: {e}"))
        })
    }
}

/// Decode a 2xx body. An empty body reads as `null`, and a body that is not
/// JSON at all reads as a JSON string, so plain-text acknowledgements still
/// decode into [`crate::api::Ack`].
fn decode_body<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let body = text.trim();
    if body.is_empty() {
        return serde_json::from_str("null");
    }

    serde_json::from_str(body).or_else(|e| {
        if e.is_syntax() {
            serde_json::from_value(serde_json::Value::String(body.to_string()))
        } else {
            Err(e)
        }
    })
}

/// Pull a human-readable message out of an error response body.
fn backend_message(status: u16, body: &str) -> String {
    let generic = || format!("Request failed with status {status}");
    let body = body.trim();

    if body.is_empty() {
        return generic();
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(message)) if !message.is_empty() => message,
        Ok(serde_json::Value::Object(fields)) => ["message", "msg", "error"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(|v| v.as_str()))
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(generic),
        Ok(_) => generic(),
        // Plain-text bodies, but not whole HTML error pages
        Err(_) if !body.starts_with('<') && body.len() <= 200 => body.to_string(),
        Err(_) => generic(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_json_fields() {
        assert_eq!(
            backend_message(400, r#"{"message": "Email already in use"}"#),
            "Email already in use"
        );
        assert_eq!(backend_message(401, r#"{"msg": "Wrong password"}"#), "Wrong password");
        assert_eq!(backend_message(404, r#"{"error": "No such event"}"#), "No such event");
    }

    #[test]
    fn message_from_bare_string_or_text() {
        assert_eq!(backend_message(400, r#""User not found""#), "User not found");
        assert_eq!(backend_message(400, "Invalid credentials"), "Invalid credentials");
    }

    #[test]
    fn generic_message_when_body_is_unhelpful() {
        assert_eq!(backend_message(500, ""), "Request failed with status 500");
        assert_eq!(backend_message(500, "{}"), "Request failed with status 500");
        assert_eq!(backend_message(502, "<html>bad gateway</html>"), "Request failed with status 502");
        assert_eq!(backend_message(500, "[1, 2]"), "Request failed with status 500");
    }

    #[test]
    fn success_bodies_may_be_empty_or_plain_text() {
        assert!(decode_body::<crate::api::Ack>("").is_ok());
        assert!(decode_body::<crate::api::Ack>("Event deleted").is_ok());
        assert!(decode_body::<crate::api::Ack>(r#"{"message": "ok"}"#).is_ok());

        assert!(decode_body::<Vec<i64>>("[1, 2]").is_ok());
        assert!(decode_body::<Vec<i64>>("Internal error").is_err());
        assert!(decode_body::<Vec<i64>>(r#"{"rows": []}"#).is_err());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
