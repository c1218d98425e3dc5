//! Error types for the Workamajig API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use workamajig_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Workamajig APIAccessToken.")]
    EmptyAccessToken,

    /// User token cannot be empty.
    #[error("User token cannot be empty. Please provide a valid Workamajig UserToken.")]
    EmptyUserToken,

    /// API host is invalid.
    #[error("Invalid API host '{host}'. Expected a bare host name such as 'api.workamajig.com'.")]
    InvalidHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// Protocol is not one of the supported schemes.
    #[error("Invalid protocol '{protocol}'. Expected 'http' or 'https'.")]
    InvalidProtocol {
        /// The invalid protocol that was provided.
        protocol: String,
    },

    /// Port is out of range.
    #[error("Invalid port {port}. Expected a value between 1 and 65535.")]
    InvalidPort {
        /// The invalid port that was provided.
        port: u32,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected 'beta1', 'latest', or a non-empty version tag.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable: '{name}'.")]
    MissingEnvVar {
        /// The name of the missing variable.
        name: &'static str,
    },
}
