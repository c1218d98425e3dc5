//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A validated Workamajig API access token, sent as the `APIAccessToken` header.
///
/// The `Debug` implementation masks the token so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use workamajig_api::AccessToken;
///
/// let token = AccessToken::new("my-access-token").unwrap();
/// assert_eq!(token.as_ref(), "my-access-token");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated Workamajig user token, sent as the `UserToken` header.
///
/// Masked in `Debug` output like [`AccessToken`].
#[derive(Clone, PartialEq, Eq)]
pub struct UserToken(String);

impl UserToken {
    /// Creates a new validated user token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUserToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyUserToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for UserToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserToken(*****)")
    }
}

/// A validated API host name.
///
/// Workamajig customers are served from per-tenant hosts, so the host is
/// configurable. A scheme prefix (`https://`) and trailing slashes are
/// stripped; anything else that is not part of a host name is rejected.
///
/// # Example
///
/// ```rust
/// use workamajig_api::ApiHost;
///
/// let host = ApiHost::new("https://acme.workamajig.com/").unwrap();
/// assert_eq!(host.as_ref(), "acme.workamajig.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiHost(pub(super) String);

impl ApiHost {
    /// Creates a new validated host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] if the value is empty or contains
    /// path, query, or whitespace characters.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = host.into();
        let trimmed = raw.trim();
        let without_scheme = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed)
            .trim_end_matches('/');

        let valid = !without_scheme.is_empty()
            && without_scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'));

        if !valid {
            return Err(ConfigError::InvalidHost { host: raw });
        }

        Ok(Self(without_scheme.to_lowercase()))
    }
}

impl AsRef<str> for ApiHost {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URL scheme used to reach the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Plain HTTP. Only useful against local test servers.
    Http,
    /// HTTPS.
    #[default]
    Https,
}

impl Protocol {
    /// Returns the protocol named by a leading `http://` or `https://`.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.trim();
        if url.starts_with("https://") {
            Some(Self::Https)
        } else if url.starts_with("http://") {
            Some(Self::Http)
        } else {
            None
        }
    }

    /// Returns the scheme string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            _ => Err(ConfigError::InvalidProtocol {
                protocol: s.to_string(),
            }),
        }
    }
}
