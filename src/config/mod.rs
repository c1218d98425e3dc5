//! Configuration types for the Workamajig API SDK.
//!
//! This module provides the configuration that every resource of a client
//! reads when it builds a request: where the API lives, which version to
//! speak, which tokens to send, and how long to wait for a response.
//!
//! # Overview
//!
//! - [`WorkamajigConfig`]: The configuration struct holding all SDK settings
//! - [`WorkamajigConfigBuilder`]: A builder for constructing [`WorkamajigConfig`] instances
//! - [`AccessToken`] / [`UserToken`]: Validated credentials with masked debug output
//! - [`ApiHost`]: A validated API host name
//! - [`Protocol`]: `http` or `https`
//! - [`ApiVersion`]: The Workamajig API version to use
//!
//! # Example
//!
//! ```rust
//! use workamajig_api::{WorkamajigConfig, AccessToken, UserToken, ApiVersion};
//!
//! let config = WorkamajigConfig::builder()
//!     .access_token(AccessToken::new("AT").unwrap())
//!     .user_token(UserToken::new("UT").unwrap())
//!     .api_version(ApiVersion::Beta1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.host().as_ref(), "api.workamajig.com");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, ApiHost, Protocol, UserToken};
pub use version::ApiVersion;

use std::time::Duration;

use crate::error::ConfigError;

/// Default API host.
pub const DEFAULT_HOST: &str = "api.workamajig.com";

/// Default API port.
pub const DEFAULT_PORT: u16 = 443;

/// Default base path that every request path is rooted under.
pub const DEFAULT_BASE_PATH: &str = "/api/";

/// Default request timeout (two minutes).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(120_000);

/// Environment variable holding the tenant host.
pub const ENV_CLIENT_URL: &str = "WORKAMAJIG_CLIENT_URL";
/// Environment variable holding the API version.
pub const ENV_API_VERSION: &str = "WORKAMAJIG_API_VERSION";
/// Environment variable holding the access token.
pub const ENV_ACCESS_TOKEN: &str = "WORKAMAJIG_ACCESS_TOKEN";
/// Environment variable holding the user token.
pub const ENV_USER_TOKEN: &str = "WORKAMAJIG_USER_TOKEN";

/// Configuration for the Workamajig API SDK.
///
/// A client holds exactly one configuration and shares it with every
/// resource it creates. The setters mutate it in place; they are meant to be
/// called between requests, since a request reads the configuration once
/// when it is dispatched.
///
/// # Thread Safety
///
/// `WorkamajigConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkamajigConfig {
    host: ApiHost,
    port: u16,
    protocol: Protocol,
    base_path: String,
    api_version: Option<ApiVersion>,
    access_token: Option<AccessToken>,
    user_token: Option<UserToken>,
    timeout: Duration,
}

// Verify WorkamajigConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WorkamajigConfig>();
};

impl Default for WorkamajigConfig {
    fn default() -> Self {
        Self {
            host: ApiHost(DEFAULT_HOST.to_string()),
            port: DEFAULT_PORT,
            protocol: Protocol::Https,
            base_path: DEFAULT_BASE_PATH.to_string(),
            api_version: Some(ApiVersion::default()),
            access_token: None,
            user_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl WorkamajigConfig {
    /// Creates a new builder for constructing a `WorkamajigConfig`.
    #[must_use]
    pub fn builder() -> WorkamajigConfigBuilder {
        WorkamajigConfigBuilder::new()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads `WORKAMAJIG_ACCESS_TOKEN` and `WORKAMAJIG_USER_TOKEN` (required),
    /// plus `WORKAMAJIG_CLIENT_URL` and `WORKAMAJIG_API_VERSION` (optional).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when a required variable is
    /// unset, or the validation error of any value that is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// This is what [`from_env`](Self::from_env) uses; it exists so the
    /// parsing can be exercised without touching the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingEnvVar { name })
        };

        let mut builder = Self::builder()
            .access_token(AccessToken::new(required(ENV_ACCESS_TOKEN)?)?)
            .user_token(UserToken::new(required(ENV_USER_TOKEN)?)?);

        if let Some(url) = lookup(ENV_CLIENT_URL).filter(|v| !v.trim().is_empty()) {
            if let Some(protocol) = Protocol::from_url(&url) {
                builder = builder.protocol(protocol);
            }
            builder = builder.host(ApiHost::new(url)?);
        }
        if let Some(version) = lookup(ENV_API_VERSION).filter(|v| !v.trim().is_empty()) {
            builder = builder.api_version(version.parse()?);
        }

        builder.build()
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &ApiHost {
        &self.host
    }

    /// Returns the API port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the protocol.
    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns the base path requests are rooted under.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the API version, if one is configured.
    #[must_use]
    pub const fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the user token, if configured.
    #[must_use]
    pub const fn user_token(&self) -> Option<&UserToken> {
        self.user_token.as_ref()
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets the host, and optionally the port and protocol with it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `port` is `Some(0)`; nothing
    /// is changed in that case.
    pub fn set_host(
        &mut self,
        host: ApiHost,
        port: Option<u16>,
        protocol: Option<Protocol>,
    ) -> Result<(), ConfigError> {
        if let Some(port) = port {
            self.port = validate_port(port)?;
        }
        self.host = host;
        if let Some(protocol) = protocol {
            self.protocol = protocol;
        }
        Ok(())
    }

    /// Sets the protocol.
    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = protocol;
    }

    /// Sets the port.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if the port is `0`.
    pub fn set_port(&mut self, port: u16) -> Result<(), ConfigError> {
        self.port = validate_port(port)?;
        Ok(())
    }

    /// Sets the API version.
    pub fn set_api_version(&mut self, version: ApiVersion) {
        self.api_version = Some(version);
    }

    /// Sets whichever tokens are provided; `None` leaves the current value.
    pub fn set_api_key(&mut self, access: Option<AccessToken>, user: Option<UserToken>) {
        if let Some(access) = access {
            self.access_token = Some(access);
        }
        if let Some(user) = user {
            self.user_token = Some(user);
        }
    }

    /// Sets the request timeout; `None` resets it to [`DEFAULT_TIMEOUT`].
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
    }
}

/// Builder for constructing [`WorkamajigConfig`] instances.
///
/// Every field has a default, so an empty builder yields a configuration
/// pointing at `https://api.workamajig.com:443/api/` with API version `beta1`
/// and no tokens.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use workamajig_api::{WorkamajigConfig, ApiHost, Protocol};
///
/// let config = WorkamajigConfig::builder()
///     .host(ApiHost::new("localhost").unwrap())
///     .port(8080)
///     .protocol(Protocol::Http)
///     .timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.port(), 8080);
/// ```
#[derive(Debug, Default)]
pub struct WorkamajigConfigBuilder {
    host: Option<ApiHost>,
    port: Option<u16>,
    protocol: Option<Protocol>,
    base_path: Option<String>,
    api_version: Option<ApiVersion>,
    without_api_version: bool,
    access_token: Option<AccessToken>,
    user_token: Option<UserToken>,
    timeout: Option<Duration>,
}

impl WorkamajigConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host.
    #[must_use]
    pub fn host(mut self, host: ApiHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the protocol.
    #[must_use]
    pub const fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    /// Sets the base path (default `/api/`).
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self.without_api_version = false;
        self
    }

    /// Sends requests without a version path segment or `Workamajig-Version` header.
    #[must_use]
    pub fn without_api_version(mut self) -> Self {
        self.api_version = None;
        self.without_api_version = true;
        self
    }

    /// Sets the access token.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the user token.
    #[must_use]
    pub fn user_token(mut self, token: UserToken) -> Self {
        self.user_token = Some(token);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`WorkamajigConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if the port is `0`.
    pub fn build(self) -> Result<WorkamajigConfig, ConfigError> {
        let defaults = WorkamajigConfig::default();

        let port = validate_port(self.port.unwrap_or(defaults.port))?;

        let api_version = if self.without_api_version {
            None
        } else {
            Some(self.api_version.unwrap_or_default())
        };

        Ok(WorkamajigConfig {
            host: self.host.unwrap_or(defaults.host),
            port,
            protocol: self.protocol.unwrap_or(defaults.protocol),
            base_path: self.base_path.unwrap_or(defaults.base_path),
            api_version,
            access_token: self.access_token,
            user_token: self.user_token,
            timeout: self.timeout.unwrap_or(defaults.timeout),
        })
    }
}

fn validate_port(port: u16) -> Result<u16, ConfigError> {
    if port == 0 {
        return Err(ConfigError::InvalidPort { port: 0 });
    }
    Ok(port)
}
