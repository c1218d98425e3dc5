//! The Workamajig client.
//!
//! [`Workamajig`] owns one [`ClientContext`] and hands out resources bound
//! to it. Resources never copy the context, so a setter called on the
//! client is seen by every resource on its next request.

use std::sync::Arc;
use std::time::Duration;

use crate::clients::{ClientContext, Transport};
use crate::config::{AccessToken, ApiHost, ApiVersion, Protocol, UserToken, WorkamajigConfig};
use crate::error::ConfigError;
use crate::rest::resources::{self, CONTACTS, PROJECTS, TIMESHEETS};
use crate::rest::Resource;

/// Client for the Workamajig REST API.
///
/// Cloning is cheap; clones share configuration and transport.
///
/// # Example
///
/// ```rust
/// use workamajig_api::{AccessToken, UserToken, Workamajig, WorkamajigConfig};
///
/// let config = WorkamajigConfig::builder()
///     .access_token(AccessToken::new("AT").unwrap())
///     .user_token(UserToken::new("UT").unwrap())
///     .build()
///     .unwrap();
/// let client = Workamajig::new(config);
///
/// assert_eq!(client.contacts().name(), "contacts");
/// assert!(client.resource("timesheets").is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Workamajig {
    context: Arc<ClientContext>,
}

// Verify Workamajig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Workamajig>();
};

impl Workamajig {
    /// Creates a client using the default `reqwest` transport.
    #[must_use]
    pub fn new(config: WorkamajigConfig) -> Self {
        Self {
            context: Arc::new(ClientContext::new(config)),
        }
    }

    /// Creates a client with a custom transport.
    #[must_use]
    pub fn with_transport(config: WorkamajigConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            context: Arc::new(ClientContext::with_transport(config, transport)),
        }
    }

    /// Creates a client configured from the environment.
    ///
    /// # Errors
    ///
    /// See [`WorkamajigConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(WorkamajigConfig::from_env()?))
    }

    /// Returns a snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> WorkamajigConfig {
        self.context.config()
    }

    /// Returns the shared context.
    #[must_use]
    pub const fn context(&self) -> &Arc<ClientContext> {
        &self.context
    }

    /// Sets the host, and optionally the port and protocol with it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `port` is `Some(0)`.
    pub fn set_host(
        &self,
        host: ApiHost,
        port: Option<u16>,
        protocol: Option<Protocol>,
    ) -> Result<(), ConfigError> {
        self.context
            .update_config(|config| config.set_host(host, port, protocol))
    }

    /// Sets the protocol.
    pub fn set_protocol(&self, protocol: Protocol) {
        self.context
            .update_config(|config| config.set_protocol(protocol));
    }

    /// Sets the port.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if the port is `0`.
    pub fn set_port(&self, port: u16) -> Result<(), ConfigError> {
        self.context.update_config(|config| config.set_port(port))
    }

    /// Sets the API version.
    pub fn set_api_version(&self, version: ApiVersion) {
        if !version.is_known() {
            tracing::debug!("Workamajig client using unrecognized API version {}", version);
        }
        self.context
            .update_config(|config| config.set_api_version(version));
    }

    /// Sets whichever tokens are provided.
    pub fn set_api_key(&self, access: Option<AccessToken>, user: Option<UserToken>) {
        self.context
            .update_config(|config| config.set_api_key(access, user));
    }

    /// Sets the request timeout; `None` restores the default.
    pub fn set_timeout(&self, timeout: Option<Duration>) {
        self.context
            .update_config(|config| config.set_timeout(timeout));
    }

    /// Replaces the transport used by subsequent requests.
    pub fn set_transport(&self, transport: Arc<dyn Transport>) {
        self.context.set_transport(transport);
    }

    /// The contacts resource.
    #[must_use]
    pub fn contacts(&self) -> Resource {
        Resource::new(Arc::clone(&self.context), &CONTACTS)
    }

    /// The projects resource.
    #[must_use]
    pub fn projects(&self) -> Resource {
        Resource::new(Arc::clone(&self.context), &PROJECTS)
    }

    /// The timesheets resource.
    #[must_use]
    pub fn timesheets(&self) -> Resource {
        Resource::new(Arc::clone(&self.context), &TIMESHEETS)
    }

    /// Looks a resource up by name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<Resource> {
        resources::find(name).map(|descriptor| Resource::new(Arc::clone(&self.context), descriptor))
    }
}
