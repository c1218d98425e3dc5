//! HTTP request types for the Workamajig API SDK.
//!
//! This module provides the [`HttpRequest`] envelope and its builder. A
//! request is built fresh for every call by the resource dispatcher and
//! handed to a [`Transport`](crate::clients::Transport) exactly once.

use std::collections::HashMap;
use std::fmt;

use crate::config::{ApiHost, Protocol};

/// HTTP methods supported by the Workamajig API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating and updating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for methods whose parameters travel in the request body.
    ///
    /// GET and DELETE send their parameters as a query string instead.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content type for HTTP request bodies.
///
/// Specifies the format of the request body and the matching
/// `Content-Type` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataType {
    /// Form content type (`application/x-www-form-urlencoded`).
    #[default]
    FormUrlEncoded,
    /// JSON content type (`application/json`).
    Json,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::Json => "application/json",
        }
    }
}

/// A fully resolved HTTP request ready to hand to a transport.
///
/// `path` already contains the query string for GET and DELETE requests.
///
/// # Example
///
/// ```rust
/// use workamajig_api::clients::{HttpMethod, HttpRequest};
/// use workamajig_api::{ApiHost, Protocol};
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/api/beta1/contacts")
///     .target(Protocol::Https, ApiHost::new("api.workamajig.com").unwrap(), 443)
///     .header("Accept", "application/json")
///     .build();
///
/// assert_eq!(request.url(), "https://api.workamajig.com:443/api/beta1/contacts");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The scheme used to reach the host.
    pub protocol: Protocol,
    /// The host the request is sent to.
    pub host: ApiHost,
    /// The port the request is sent to.
    pub port: u16,
    /// The absolute path, including any query string.
    pub path: String,
    /// Headers to send.
    pub headers: HashMap<String, String>,
    /// The encoded request body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Returns the absolute URL for this request.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.protocol, self.host, self.port, self.path
        )
    }

    /// Looks up a header value case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    protocol: Protocol,
    host: Option<ApiHost>,
    port: u16,
    path: String,
    headers: HashMap<String, String>,
    body: Option<String>,
}

impl HttpRequestBuilder {
    /// Creates a new builder with the required method and path.
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            protocol: Protocol::Https,
            host: None,
            port: crate::config::DEFAULT_PORT,
            path: path.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets the protocol, host, and port the request is sent to.
    #[must_use]
    pub fn target(mut self, protocol: Protocol, host: ApiHost, port: u16) -> Self {
        self.protocol = protocol;
        self.host = Some(host);
        self.port = port;
        self
    }

    /// Sets all headers at once, replacing any set so far.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the encoded request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builds the [`HttpRequest`].
    ///
    /// Without an explicit [`target`](Self::target) the request points at the
    /// default Workamajig host over HTTPS.
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            http_method: self.http_method,
            protocol: self.protocol,
            host: self
                .host
                .unwrap_or_else(|| crate::config::WorkamajigConfig::default().host().clone()),
            port: self.port,
            path: self.path,
            headers: self.headers,
            body: self.body,
        }
    }
}
