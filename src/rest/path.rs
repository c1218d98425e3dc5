//! Path building infrastructure for REST resources.
//!
//! This module turns path templates such as `/{id}` into concrete request
//! paths and joins the pieces of a request path (base path, API version,
//! resource path, operation path) into one normalized absolute path.
//!
//! # Path Templates
//!
//! Templates use `{name}` placeholders. Values are percent-encoded when
//! substituted, so a value can never introduce a path separator. A
//! placeholder with no value, or an empty one, fails with
//! [`PathError::MissingUrlParameter`] when the template is interpolated,
//! not when it is parsed. A value of `.` or `..` fails with
//! [`PathError::DotSegment`]: URL parsers resolve those (even
//! percent-encoded), which would move the request to another endpoint.
//!
//! # Example
//!
//! ```rust
//! use workamajig_api::rest::{join_path, UrlTemplate};
//! use std::collections::HashMap;
//!
//! let template = UrlTemplate::new("/{id}");
//! let mut params = HashMap::new();
//! params.insert("id", "a b");
//!
//! let command = template.interpolate(&params).unwrap();
//! assert_eq!(command, "/a%20b");
//!
//! let full = join_path(&["/api/", "beta1", "contacts", &command]);
//! assert_eq!(full, "/api/beta1/contacts/a%20b");
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use thiserror::Error;

use crate::clients::{ErrorDetails, HttpMethod, WorkamajigError};

/// Errors raised while building a request path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A placeholder had no value in the parameter map.
    #[error("Missing URL parameter: '{name}'")]
    MissingUrlParameter {
        /// The placeholder name.
        name: String,
    },
    /// A placeholder value was a relative path segment.
    #[error("URL parameter '{name}' cannot be '{value}'")]
    DotSegment {
        /// The placeholder name.
        name: String,
        /// The rejected value.
        value: String,
    },
}

impl From<PathError> for WorkamajigError {
    fn from(error: PathError) -> Self {
        match error {
            PathError::MissingUrlParameter { name } => Self::MissingUrlParameter { name },
            PathError::DotSegment { name, value } => Self::InvalidRequest(ErrorDetails {
                raw_type: Some("invalid_request_error".to_string()),
                message: Some(format!("URL parameter '{name}' cannot be '{value}'")),
                param: Some(name),
                ..ErrorDetails::default()
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed path template.
///
/// Parsing never fails: text that is not a well-formed `{name}` token is
/// kept as a literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlTemplate {
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parses a template.
    #[must_use]
    pub fn new(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            let name = &rest[open + 1..close];
            if name.is_empty() || name.contains('{') {
                // Not a token: keep everything up to and including the brace.
                push_literal(&mut segments, &rest[..=open]);
                rest = &rest[open + 1..];
                continue;
            }
            push_literal(&mut segments, &rest[..open]);
            segments.push(Segment::Param(name.to_string()));
            rest = &rest[close + 1..];
        }
        push_literal(&mut segments, rest);

        Self { segments }
    }

    /// Returns the placeholder names in order of appearance.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes every placeholder with its percent-encoded value.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingUrlParameter`] for the first placeholder
    /// without a value or with an empty one, and [`PathError::DotSegment`]
    /// for a value of `.` or `..`.
    #[allow(clippy::implicit_hasher)]
    pub fn interpolate<V: Display>(&self, params: &HashMap<&str, V>) -> Result<String, PathError> {
        let mut result = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Param(name) => {
                    let value = params
                        .get(name.as_str())
                        .map(ToString::to_string)
                        .filter(|value| !value.is_empty())
                        .ok_or_else(|| PathError::MissingUrlParameter { name: name.clone() })?;
                    if value == "." || value == ".." {
                        return Err(PathError::DotSegment {
                            name: name.clone(),
                            value,
                        });
                    }
                    result.push_str(&urlencoding::encode(&value));
                }
            }
        }

        Ok(result)
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}

/// Joins path pieces into one absolute path.
///
/// Backslashes are treated as separators, repeated separators collapse,
/// and empty or `.` segments are dropped. The result always starts with
/// `/` and never ends with one (unless it is the root).
#[must_use]
pub fn join_path(parts: &[&str]) -> String {
    let segments: Vec<&str> = parts
        .iter()
        .flat_map(|part| part.split(['/', '\\']))
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    format!("/{}", segments.join("/"))
}

/// The basic operations a resource can enable without declaring them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Create a record (POST /resource).
    Create,
    /// List records (GET /resource).
    List,
    /// Fetch one record (GET /resource/{id}).
    Retrieve,
    /// Update a record (POST /resource/{id}).
    Update,
    /// Delete a record (DELETE /resource/{id}).
    Delete,
}

impl ResourceOperation {
    /// All basic operations.
    pub const ALL: [Self; 5] = [
        Self::Create,
        Self::List,
        Self::Retrieve,
        Self::Update,
        Self::Delete,
    ];

    /// Returns the HTTP method for this operation.
    ///
    /// The Workamajig API updates records with POST, not PUT.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::List | Self::Retrieve => HttpMethod::Get,
            Self::Create | Self::Update => HttpMethod::Post,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation path template, relative to the resource path.
    #[must_use]
    pub const fn path_template(&self) -> &'static str {
        match self {
            Self::Create | Self::List => "",
            Self::Retrieve | Self::Update | Self::Delete => "/{id}",
        }
    }

    /// Returns the URL parameters the operation path needs.
    #[must_use]
    pub const fn url_params(&self) -> &'static [&'static str] {
        match self {
            Self::Create | Self::List => &[],
            Self::Retrieve | Self::Update | Self::Delete => &["id"],
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Retrieve => "retrieve",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Looks an operation up by name. `del` is accepted for `delete`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "del" {
            return Some(Self::Delete);
        }
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<UrlTemplate>();
};
