//! Request data encoding.
//!
//! Call parameters are a flat JSON object. [`encode`] turns them into the
//! string that travels on the wire: a query string for GET and DELETE, a
//! form body for POST and PUT, or a compact JSON body when the call asks for
//! [`DataType::Json`].
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use workamajig_api::clients::{DataType, HttpMethod};
//! use workamajig_api::rest::{encode, Params};
//! use serde_json::json;
//!
//! let Some(params) = json!({"name": "Q3 launch", "budget": 1200}).as_object().cloned() else {
//!     unreachable!()
//! };
//! let mut headers = HashMap::new();
//!
//! let query = encode(HttpMethod::Get, &params, &mut headers, DataType::FormUrlEncoded).unwrap();
//! assert_eq!(query, "budget=1200&name=Q3%20launch");
//! assert!(headers.is_empty());
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::clients::{DataType, ErrorDetails, HttpMethod, WorkamajigError};

/// Parameters of a single call, keyed by name.
pub type Params = Map<String, Value>;

/// A resource-level replacement for [`encode`].
///
/// Receives the method, the call parameters, and the headers being built,
/// and returns the encoded data.
pub type RequestDataProcessor =
    fn(HttpMethod, &Params, &mut HashMap<String, String>) -> Result<String, EncodeError>;

/// Errors raised while encoding call parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A form-encoded parameter held an object or an array.
    #[error("Parameter '{key}' must be a string, number or boolean to be form-encoded")]
    NestedValue {
        /// The offending parameter.
        key: String,
    },
}

impl From<EncodeError> for WorkamajigError {
    fn from(error: EncodeError) -> Self {
        let message = error.to_string();
        match error {
            EncodeError::NestedValue { key } => Self::InvalidRequest(ErrorDetails {
                raw_type: Some("invalid_request_error".to_string()),
                param: Some(key),
                message: Some(message),
                ..ErrorDetails::default()
            }),
        }
    }
}

const CONTENT_TYPE: &str = "Content-Type";

/// Encodes call parameters for the wire.
///
/// JSON is produced only for POST and PUT with [`DataType::Json`]; every
/// other combination is form-encoded. Body-carrying methods get a matching
/// `Content-Type` in `headers`; GET and DELETE get none. `null` values are
/// dropped.
///
/// # Errors
///
/// Returns [`EncodeError::NestedValue`] when form-encoding an object or
/// array value.
#[allow(clippy::implicit_hasher)]
pub fn encode(
    method: HttpMethod,
    params: &Params,
    headers: &mut HashMap<String, String>,
    data_type: DataType,
) -> Result<String, EncodeError> {
    let data_type = if method.has_body() {
        data_type
    } else {
        DataType::FormUrlEncoded
    };

    let encoded = match data_type {
        DataType::Json => encode_json(params),
        DataType::FormUrlEncoded => encode_form(params)?,
    };

    if method.has_body() {
        headers.insert(
            CONTENT_TYPE.to_string(),
            data_type.as_content_type().to_string(),
        );
    }

    Ok(encoded)
}

/// A [`RequestDataProcessor`] that always sends JSON bodies.
///
/// GET and DELETE parameters still go to the query string.
///
/// # Errors
///
/// Same as [`encode`].
#[allow(clippy::implicit_hasher)]
pub fn json_data_processor(
    method: HttpMethod,
    params: &Params,
    headers: &mut HashMap<String, String>,
) -> Result<String, EncodeError> {
    encode(method, params, headers, DataType::Json)
}

fn encode_json(params: &Params) -> String {
    let present: Map<String, Value> = params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Value::Object(present).to_string()
}

fn encode_form(params: &Params) -> Result<String, EncodeError> {
    let mut pairs = Vec::with_capacity(params.len());

    for (key, value) in params {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(EncodeError::NestedValue { key: key.clone() })
            }
        };
        pairs.push(format!(
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(&text)
        ));
    }

    Ok(pairs.join("&"))
}
