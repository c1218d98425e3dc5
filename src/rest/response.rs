//! Success payload of a resource operation.
//!
//! [`WorkamajigResponse`] holds the parsed JSON body together with the raw
//! [`HttpResponse`] it came from. It implements `Deref<Target = Value>`, so
//! the payload can be indexed directly:
//!
//! ```rust
//! use std::collections::HashMap;
//! use workamajig_api::clients::HttpResponse;
//! use workamajig_api::rest::WorkamajigResponse;
//! use serde_json::json;
//!
//! let raw = HttpResponse::new(200, HashMap::new(), r#"{"data":[{"id":1}]}"#);
//! let response = WorkamajigResponse::new(json!({"data": [{"id": 1}]}), raw);
//!
//! assert_eq!(response["data"][0]["id"], 1);
//! assert_eq!(response.last_response().code, 200);
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::HttpResponse;

/// A parsed response body annotated with the raw transport response.
#[derive(Debug, Clone)]
pub struct WorkamajigResponse {
    body: Value,
    last_response: HttpResponse,
}

impl WorkamajigResponse {
    /// Creates a response from a parsed body and the raw response.
    #[must_use]
    pub const fn new(body: Value, last_response: HttpResponse) -> Self {
        Self {
            body,
            last_response,
        }
    }

    /// Returns the raw response the payload was parsed from.
    #[must_use]
    pub const fn last_response(&self) -> &HttpResponse {
        &self.last_response
    }

    /// Returns the request ID from the `request-id` header, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.last_response.request_id()
    }

    /// Consumes the response and returns the parsed body.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.body
    }

    /// Deserializes the body into a caller-defined type.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }
}

impl Deref for WorkamajigResponse {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.body
    }
}

impl DerefMut for WorkamajigResponse {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.body
    }
}
