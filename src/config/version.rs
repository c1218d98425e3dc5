//! Workamajig API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which version
//! of the Workamajig API to use.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Workamajig API version.
///
/// The version is sent both as a path segment (`/api/beta1/projects`) and as
/// the `Workamajig-Version` header. `Beta1` is the only published version;
/// `Latest` asks the server for its newest revision and `Custom` carries any
/// other tag verbatim.
///
/// # Example
///
/// ```rust
/// use workamajig_api::ApiVersion;
///
/// let version: ApiVersion = "beta1".parse().unwrap();
/// assert_eq!(version, ApiVersion::Beta1);
/// assert_eq!(ApiVersion::default().to_string(), "beta1");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// The `beta1` API.
    #[default]
    Beta1,
    /// Whatever the server currently considers its latest version.
    Latest,
    /// Custom version tag for unreleased or private versions.
    Custom(String),
}

impl ApiVersion {
    /// Returns `true` for versions this SDK was built against.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    fn is_valid_tag(s: &str) -> bool {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::Beta1 => "beta1",
            Self::Latest => "latest",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "beta1" => Ok(Self::Beta1),
            "latest" => Ok(Self::Latest),
            _ if Self::is_valid_tag(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}
