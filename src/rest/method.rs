//! Declarative operations.
//!
//! A [`MethodSpec`] describes one operation of a resource: its HTTP method,
//! its path relative to the resource, the URL parameters that fill the path,
//! the body parameters that must be present, and any header or encoding
//! overrides. Binding a spec to a [`Resource`] yields an [`Operation`] that
//! can be called.
//!
//! # Example
//!
//! ```rust
//! use workamajig_api::clients::{DataType, HttpMethod};
//! use workamajig_api::rest::MethodSpec;
//!
//! const CREATE: MethodSpec = MethodSpec::new(HttpMethod::Post)
//!     .required(&["projectName"])
//!     .headers(&[("Content-Type", "application/json")])
//!     .encoding(DataType::Json);
//!
//! assert_eq!(CREATE.path, "");
//! assert_eq!(CREATE.required, &["projectName"]);
//! ```

use std::collections::HashMap;

use tokio::task::JoinHandle;

use crate::clients::{DataType, HttpMethod, WorkamajigError};
use crate::rest::codec::Params;
use crate::rest::path::{ResourceOperation, UrlTemplate};
use crate::rest::resource::Resource;
use crate::rest::response::WorkamajigResponse;

/// The immutable description of one operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodSpec {
    /// HTTP method.
    pub http_method: HttpMethod,
    /// Path template relative to the resource path.
    pub path: &'static str,
    /// URL parameter names, in the order values are supplied.
    pub url_params: &'static [&'static str],
    /// Body parameters that must be present before dispatch.
    pub required: &'static [&'static str],
    /// Headers applied after the defaults; these win.
    pub headers: &'static [(&'static str, &'static str)],
    /// Encoding override for the request data.
    pub encoding: Option<DataType>,
}

impl MethodSpec {
    /// Creates a method spec with an empty path and no parameters or overrides.
    #[must_use]
    pub const fn new(http_method: HttpMethod) -> Self {
        Self {
            http_method,
            path: "",
            url_params: &[],
            required: &[],
            headers: &[],
            encoding: None,
        }
    }

    /// Returns the method spec of a basic operation.
    #[must_use]
    pub const fn basic(operation: ResourceOperation) -> Self {
        Self::new(operation.default_http_method())
            .path(operation.path_template())
            .url_params(operation.url_params())
    }

    /// Sets the path template.
    #[must_use]
    pub const fn path(mut self, path: &'static str) -> Self {
        self.path = path;
        self
    }

    /// Sets the URL parameter names.
    #[must_use]
    pub const fn url_params(mut self, url_params: &'static [&'static str]) -> Self {
        self.url_params = url_params;
        self
    }

    /// Sets the required body parameter names.
    #[must_use]
    pub const fn required(mut self, required: &'static [&'static str]) -> Self {
        self.required = required;
        self
    }

    /// Sets the header overrides.
    #[must_use]
    pub const fn headers(mut self, headers: &'static [(&'static str, &'static str)]) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the encoding override.
    #[must_use]
    pub const fn encoding(mut self, encoding: DataType) -> Self {
        self.encoding = Some(encoding);
        self
    }
}

/// A callable operation bound to a resource.
///
/// Operations are cheap to clone; clones share the resource's client
/// context.
#[derive(Clone, Debug)]
pub struct Operation {
    name: &'static str,
    spec: MethodSpec,
    resource: Resource,
}

// Verify Operation is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Operation>();
};

impl Operation {
    pub(crate) const fn new(name: &'static str, spec: MethodSpec, resource: Resource) -> Self {
        Self {
            name,
            spec,
            resource,
        }
    }

    /// Returns the operation name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the method spec this operation was built from.
    #[must_use]
    pub const fn spec(&self) -> &MethodSpec {
        &self.spec
    }

    /// Calls the operation.
    ///
    /// `url_values` fill the URL parameters in declaration order;
    /// extra values are ignored. `params` are the body (or query)
    /// parameters.
    ///
    /// # Errors
    ///
    /// Before anything is sent:
    /// - [`WorkamajigError::InvalidRequest`] if a required parameter is
    ///   absent or `null`, or a parameter cannot be encoded
    /// - [`WorkamajigError::MissingUrlParameter`] if fewer URL values than
    ///   URL parameters were given, or one of them is empty
    /// - [`WorkamajigError::InvalidRequest`] if a URL value is `.` or `..`
    ///
    /// After dispatch, any error the response classifies to.
    pub async fn call(
        &self,
        url_values: &[&str],
        params: Option<Params>,
    ) -> Result<WorkamajigResponse, WorkamajigError> {
        let params = params.unwrap_or_default();

        if let Some(missing) = self
            .spec
            .required
            .iter()
            .find(|name| params.get(**name).map_or(true, serde_json::Value::is_null))
        {
            tracing::debug!(
                operation = self.name,
                param = *missing,
                "Rejecting call with missing required parameter"
            );
            return Err(WorkamajigError::missing_param(missing));
        }

        let url_data: HashMap<&str, &str> = self
            .spec
            .url_params
            .iter()
            .copied()
            .zip(url_values.iter().copied())
            .collect();
        let command_path = UrlTemplate::new(self.spec.path).interpolate(&url_data)?;

        self.resource
            .request(
                self.spec.http_method,
                &command_path,
                &params,
                self.spec.headers,
                self.spec.encoding,
            )
            .await
    }

    /// Calls the operation and hands the outcome to `callback`.
    ///
    /// The callback always runs on a freshly spawned task, never before this
    /// method returns. Must be called from within a Tokio runtime.
    pub fn call_with_callback<F>(
        &self,
        url_values: &[&str],
        params: Option<Params>,
        callback: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(Result<WorkamajigResponse, WorkamajigError>) + Send + 'static,
    {
        let operation = self.clone();
        let url_values: Vec<String> = url_values.iter().map(|v| (*v).to_string()).collect();

        tokio::spawn(async move {
            let url_values: Vec<&str> = url_values.iter().map(String::as_str).collect();
            let result = operation.call(&url_values, params).await;
            callback(result);
        })
    }
}
