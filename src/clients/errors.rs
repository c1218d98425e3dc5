//! Error types for the Workamajig API SDK.
//!
//! Every call on a resource resolves to either a payload or exactly one
//! [`WorkamajigError`]. The variants form a closed taxonomy:
//!
//! - [`WorkamajigError::Generic`]: Unclassified errors (unknown or missing `type` tag)
//! - [`WorkamajigError::Api`]: Unparsable responses and `api_error` payloads
//! - [`WorkamajigError::InvalidRequest`]: Malformed requests, including missing
//!   required parameters caught before dispatch
//! - [`WorkamajigError::Authentication`]: HTTP 401 or `authentication_error`
//! - [`WorkamajigError::Permission`]: HTTP 403
//! - [`WorkamajigError::RateLimit`]: HTTP 429
//! - [`WorkamajigError::Connection`]: Transport failures and timeouts
//! - [`WorkamajigError::MultiStatus`]: HTTP 207 partial failures, one sub-error per item
//! - [`WorkamajigError::MissingUrlParameter`]: A path placeholder had no value
//!
//! # Classification
//!
//! When the server answers with an `error` object, the status code is
//! consulted first (401, 403, 429) and the body's `type` tag second. A 429
//! carrying `invalid_request_error` is therefore a [`WorkamajigError::RateLimit`].
//!
//! # Example
//!
//! ```rust
//! use workamajig_api::clients::{ErrorDetails, ErrorKind, WorkamajigError};
//! use serde_json::json;
//!
//! let details = ErrorDetails::from_value(&json!({"type": "invalid_request_error"}));
//! let error = WorkamajigError::from_status(429, details);
//! assert_eq!(error.kind(), ErrorKind::RateLimit);
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Failure reported by a [`Transport`](crate::clients::Transport) before a
/// response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response arrived within the configured timeout; the request was aborted.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that was exceeded, in milliseconds.
        timeout_ms: u128,
    },

    /// Network or connection error from the HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// The raw fields of an error object returned by the API.
///
/// Unknown fields are kept in `raw`. `request_id` and `status_code` come
/// from the HTTP response rather than the body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorDetails {
    /// The `type` tag (e.g. `invalid_request_error`).
    pub raw_type: Option<String>,
    /// Machine-readable error code.
    pub code: Option<String>,
    /// The parameter the error refers to.
    pub param: Option<String>,
    /// Human-readable message.
    pub message: Option<String>,
    /// Additional detail supplied by the server.
    pub detail: Option<Value>,
    /// The error object exactly as received.
    pub raw: Value,
    /// Request ID from the `request-id` response header.
    pub request_id: Option<String>,
    /// HTTP status code of the response.
    pub status_code: Option<u16>,
}

impl ErrorDetails {
    /// Extracts error details from an API error value.
    ///
    /// Objects contribute their `type`, `code`, `param`, `message` and
    /// `detail` fields; a bare string becomes the message.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value.get(key).and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
        };

        Self {
            raw_type: text("type"),
            code: text("code"),
            param: text("param"),
            message: text("message").or_else(|| value.as_str().map(String::from)),
            detail: value.get("detail").cloned(),
            raw: value.clone(),
            request_id: None,
            status_code: None,
        }
    }

    /// Attaches the response metadata.
    #[must_use]
    pub fn with_response(mut self, status_code: u16, request_id: Option<&str>) -> Self {
        self.status_code = Some(status_code);
        self.request_id = request_id.map(String::from);
        self
    }

    fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message
            .as_deref()
            .or(self.raw_type.as_deref())
            .unwrap_or(fallback)
    }
}

/// The kind of a [`WorkamajigError`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`WorkamajigError::Generic`].
    Generic,
    /// See [`WorkamajigError::Api`].
    Api,
    /// See [`WorkamajigError::InvalidRequest`].
    InvalidRequest,
    /// See [`WorkamajigError::Authentication`].
    Authentication,
    /// See [`WorkamajigError::Permission`].
    Permission,
    /// See [`WorkamajigError::RateLimit`].
    RateLimit,
    /// See [`WorkamajigError::Connection`].
    Connection,
    /// See [`WorkamajigError::MultiStatus`].
    MultiStatus,
    /// See [`WorkamajigError::MissingUrlParameter`].
    MissingUrlParameter,
}

impl ErrorKind {
    /// Returns the conventional type name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "GenericError",
            Self::Api => "WorkamajigAPIError",
            Self::InvalidRequest => "WorkamajigInvalidRequestError",
            Self::Authentication => "WorkamajigAuthenticationError",
            Self::Permission => "WorkamajigPermissionError",
            Self::RateLimit => "WorkamajigRateLimitError",
            Self::Connection => "WorkamajigConnectionError",
            Self::MultiStatus => "WorkamajigMultiStatusError",
            Self::MissingUrlParameter => "WorkamajigMissingURLParameter",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for every Workamajig API operation.
#[derive(Debug, Error)]
pub enum WorkamajigError {
    /// An error that matched no known kind.
    #[error("{error_type}: {message}")]
    Generic {
        /// The error type name.
        error_type: String,
        /// Human-readable message.
        message: String,
    },

    /// The response could not be parsed, or the API reported a server-side failure.
    #[error("{}", .details.message_or("Workamajig API error"))]
    Api {
        /// Fields of the API error, if the body parsed.
        details: ErrorDetails,
        /// The unparsed response body, when parsing failed.
        raw_body: Option<String>,
        /// The JSON parse failure, when parsing failed.
        #[source]
        parse_error: Option<serde_json::Error>,
    },

    /// The request was malformed.
    #[error("Invalid request: {}", .0.message_or("invalid_request_error"))]
    InvalidRequest(ErrorDetails),

    /// The credentials were rejected (HTTP 401).
    #[error("Authentication failed: {}", .0.message_or("authentication_error"))]
    Authentication(ErrorDetails),

    /// The credentials lack permission for the operation (HTTP 403).
    #[error("Permission denied: {}", .0.message_or("permission_error"))]
    Permission(ErrorDetails),

    /// Too many requests (HTTP 429).
    #[error("Rate limited: {}", .0.message_or("rate_limit_error"))]
    RateLimit(ErrorDetails),

    /// The server could not be reached, or did not answer in time.
    #[error("{message}")]
    Connection {
        /// Human-readable message.
        message: String,
        /// The underlying transport failure.
        #[source]
        detail: TransportError,
    },

    /// Some items of a batch failed (HTTP 207).
    #[error("{} item(s) failed in a multi-status response", .errors.len())]
    MultiStatus {
        /// One error per failed item, in response order.
        errors: Vec<WorkamajigError>,
    },

    /// A `{name}` placeholder in the request path had no value.
    #[error("Missing URL parameter: '{name}'")]
    MissingUrlParameter {
        /// The placeholder name.
        name: String,
    },
}

impl WorkamajigError {
    /// Creates a generic error from a type name and message.
    #[must_use]
    pub fn generic(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generic {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    /// Maps an API error object to a variant using its `type` tag alone.
    ///
    /// Unknown tags yield [`WorkamajigError::Generic`] carrying the tag; a
    /// missing tag yields a generic "Unknown Error".
    #[must_use]
    pub fn generate(details: ErrorDetails) -> Self {
        match details.raw_type.as_deref() {
            Some("authentication_error") => Self::Authentication(details),
            Some("invalid_request_error") => Self::InvalidRequest(details),
            Some("api_error") => Self::Api {
                details,
                raw_body: None,
                parse_error: None,
            },
            Some(other) => Self::generic("Generic", other),
            None => Self::generic("Generic", "Unknown Error"),
        }
    }

    /// Classifies an API error object received with the given status code.
    ///
    /// 401, 403 and 429 decide the kind regardless of the body; any other
    /// status falls through to [`generate`](Self::generate).
    #[must_use]
    pub fn from_status(status: u16, details: ErrorDetails) -> Self {
        match status {
            401 => Self::Authentication(details),
            403 => Self::Permission(details),
            429 => Self::RateLimit(details),
            _ => Self::generate(details),
        }
    }

    /// Builds the error for a response body that is not valid JSON.
    #[must_use]
    pub fn invalid_json(
        raw_body: String,
        parse_error: serde_json::Error,
        status_code: u16,
        request_id: Option<&str>,
    ) -> Self {
        let details = ErrorDetails {
            message: Some("Invalid JSON received from the Workamajig API".to_string()),
            ..ErrorDetails::default()
        }
        .with_response(status_code, request_id);

        Self::Api {
            details,
            raw_body: Some(raw_body),
            parse_error: Some(parse_error),
        }
    }

    /// Builds the error for a required body parameter that was not supplied.
    #[must_use]
    pub fn missing_param(name: &str) -> Self {
        Self::InvalidRequest(ErrorDetails {
            raw_type: Some("invalid_request_error".to_string()),
            param: Some(name.to_string()),
            message: Some(format!("Missing required param: {name}")),
            ..ErrorDetails::default()
        })
    }

    /// Wraps a transport failure.
    #[must_use]
    pub fn connection(detail: TransportError) -> Self {
        let message = match &detail {
            TransportError::Timeout { timeout_ms } => {
                format!("Request aborted due to timeout being reached ({timeout_ms}ms)")
            }
            _ => "An error occurred with our connection to Workamajig".to_string(),
        };
        Self::Connection { message, detail }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Generic { .. } => ErrorKind::Generic,
            Self::Api { .. } => ErrorKind::Api,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Permission(_) => ErrorKind::Permission,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::Connection { .. } => ErrorKind::Connection,
            Self::MultiStatus { .. } => ErrorKind::MultiStatus,
            Self::MissingUrlParameter { .. } => ErrorKind::MissingUrlParameter,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Generic { message, .. } | Self::Connection { message, .. } => message.clone(),
            Self::Api { details, .. } => details.message_or("Workamajig API error").to_string(),
            Self::InvalidRequest(details)
            | Self::Authentication(details)
            | Self::Permission(details)
            | Self::RateLimit(details) => details.message_or(self.kind().as_str()).to_string(),
            Self::MultiStatus { .. } | Self::MissingUrlParameter { .. } => self.to_string(),
        }
    }

    /// Returns the API error fields, for kinds built from an API error object.
    #[must_use]
    pub const fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Api { details, .. }
            | Self::InvalidRequest(details)
            | Self::Authentication(details)
            | Self::Permission(details)
            | Self::RateLimit(details) => Some(details),
            _ => None,
        }
    }

    /// Returns the request ID, if the server supplied one.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.details().and_then(|d| d.request_id.as_deref())
    }

    /// Returns the HTTP status code of the response that produced this error.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.details().and_then(|d| d.status_code)
    }

    /// Returns the per-item errors of a multi-status response.
    #[must_use]
    pub fn item_errors(&self) -> &[Self] {
        match self {
            Self::MultiStatus { errors } => errors,
            _ => &[],
        }
    }

    /// Returns `true` if the server was never reached or never answered.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}
