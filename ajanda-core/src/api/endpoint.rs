//! Typed description of a backend operation.

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

/// Response type for operations whose body the client does not need.
pub type Ack = serde::de::IgnoredAny;

/// One backend operation.
///
/// The response type is tied to the request type, so `ApiClient::call`
/// returns the right shape for every endpoint at compile time. The request
/// struct itself is serialized as the JSON body for methods that carry one;
/// path parameters are marked `#[serde(skip)]`.
pub trait Endpoint: Serialize {
    type Response: DeserializeOwned;

    fn method() -> Method;

    fn path(&self) -> String;

    /// Query string parameters; empty values are left out by the implementor.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn has_body() -> bool {
        let method = Self::method();
        method != Method::GET && method != Method::DELETE
    }
}
