//! HTTP client layer for Workamajig API communication.
//!
//! This module holds everything below the resource layer: the request and
//! response envelopes, the [`Transport`] boundary, the shared
//! [`ClientContext`], and the [`WorkamajigError`] taxonomy every call
//! resolves to on failure.
//!
//! # Overview
//!
//! - [`HttpRequest`]: A fully resolved request (method, target, path, headers, body)
//! - [`HttpResponse`]: The raw response a transport returns
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`Transport`] / [`ReqwestTransport`]: The pluggable sending capability
//! - [`ClientContext`]: Configuration and transport shared by a client's resources
//! - [`WorkamajigError`] / [`ErrorKind`]: The error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use workamajig_api::clients::{HttpMethod, HttpRequest, ReqwestTransport, Transport};
//!
//! let transport = ReqwestTransport::new();
//! let request = HttpRequest::builder(HttpMethod::Get, "/api/beta1/contacts")
//!     .header("APIAccessToken", "AT")
//!     .header("UserToken", "UT")
//!     .build();
//!
//! let response = transport.send(request).await?;
//! println!("{}", response.body_text());
//! ```

mod context;
mod errors;
mod http_request;
mod http_response;
mod transport;
mod user_agent;

pub use context::ClientContext;
pub use errors::{ErrorDetails, ErrorKind, TransportError, WorkamajigError};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, REQUEST_ID_HEADER};
pub use transport::{ReqwestTransport, Transport};
pub use user_agent::{client_user_agent_seeded, default_seed, user_agent, SDK_VERSION};
