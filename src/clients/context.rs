//! Shared client context.
//!
//! One [`ClientContext`] exists per client. Every resource created from the
//! client holds an `Arc` to it and reads it when dispatching a request; none
//! of them own or copy it. Changing it goes through the client's setters.

use std::sync::{Arc, PoisonError, RwLock};

use crate::clients::transport::{ReqwestTransport, Transport};
use crate::clients::user_agent::{client_user_agent_seeded, default_seed, user_agent};
use crate::config::WorkamajigConfig;

/// Configuration, transport, and user agent shared by a client's resources.
///
/// Reads take a snapshot, so a request in flight keeps the values it
/// started with. Writes are expected between requests; nothing orders a
/// write against a concurrent dispatch.
#[derive(Debug)]
pub struct ClientContext {
    config: RwLock<WorkamajigConfig>,
    transport: RwLock<Arc<dyn Transport>>,
    user_agent: String,
    client_user_agent: String,
}

// Verify ClientContext is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientContext>();
};

impl ClientContext {
    /// Creates a context with the default `reqwest` transport.
    #[must_use]
    pub fn new(config: WorkamajigConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Creates a context with a custom transport.
    #[must_use]
    pub fn with_transport(config: WorkamajigConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: RwLock::new(config),
            transport: RwLock::new(transport),
            user_agent: user_agent(),
            client_user_agent: client_user_agent_seeded(&default_seed()),
        }
    }

    /// Returns a snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> WorkamajigConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mutates the configuration in place and returns what `update` returns.
    pub fn update_config<F, R>(&self, update: F) -> R
    where
        F: FnOnce(&mut WorkamajigConfig) -> R,
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut config)
    }

    /// Returns the current transport.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the transport used by subsequent requests.
    pub fn set_transport(&self, transport: Arc<dyn Transport>) {
        *self.transport.write().unwrap_or_else(PoisonError::into_inner) = transport;
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the `X-Workamajig-Client-User-Agent` header value.
    ///
    /// Computed once, when the context is created.
    #[must_use]
    pub fn client_user_agent(&self) -> &str {
        &self.client_user_agent
    }
}
