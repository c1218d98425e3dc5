//! # Workamajig API Rust SDK
//!
//! A Rust client for the Workamajig project-management REST API. Resources
//! (contacts, projects, timesheets) are declared as static tables and turned
//! into callable operations that build the request, send it through a
//! pluggable transport, and classify the response into a JSON payload or a
//! typed [`WorkamajigError`].
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`WorkamajigConfig`] and [`WorkamajigConfigBuilder`]
//! - Validated newtypes for tokens and hosts, with masked debug output for tokens
//! - A [`Workamajig`] client sharing one configuration across its resources
//! - Declarative resources and operations in [`rest`]
//! - A [`Transport`](clients::Transport) boundary with a `reqwest` default
//! - A closed error taxonomy with status-code-first classification
//!
//! ## Quick Start
//!
//! ```rust
//! use workamajig_api::{AccessToken, ApiVersion, UserToken, Workamajig, WorkamajigConfig};
//!
//! let config = WorkamajigConfig::builder()
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .user_token(UserToken::new("your-user-token").unwrap())
//!     .api_version(ApiVersion::Beta1)
//!     .build()
//!     .unwrap();
//!
//! let client = Workamajig::new(config);
//! let list = client.contacts().operation("list").unwrap();
//! assert_eq!(list.name(), "list");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use workamajig_api::{ErrorKind, Workamajig};
//! use serde_json::json;
//!
//! let client = Workamajig::from_env()?;
//!
//! let list = client.projects().operation("list").unwrap();
//! match list.call(&[], json!({"projectKey": "ACME-01"}).as_object().cloned()).await {
//!     Ok(projects) => println!("{}", projects["data"]),
//!     Err(e) if e.kind() == ErrorKind::RateLimit => eprintln!("slow down"),
//!     Err(e) => eprintln!("{e}"),
//! }
//!
//! // Or with a callback, delivered on a spawned task
//! list.call_with_callback(&[], None, |result| {
//!     if let Err(e) = result {
//!         eprintln!("{e}");
//!     }
//! });
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and shared explicitly
//! - **Fail-fast validation**: Newtypes validate on construction; missing
//!   parameters fail before anything is sent
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use client::Workamajig;
pub use config::{
    AccessToken, ApiHost, ApiVersion, Protocol, UserToken, WorkamajigConfig,
    WorkamajigConfigBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ClientContext, DataType, ErrorDetails, ErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestTransport, Transport, TransportError, WorkamajigError,
};

// Re-export resource types
pub use rest::{MethodSpec, Operation, Params, Resource, ResourceDescriptor, WorkamajigResponse};
