//! Resources and the request dispatcher.
//!
//! A resource is a [`ResourceDescriptor`] (static data: name, path, which
//! basic operations it enables, its custom operations) bound to a client's
//! shared [`ClientContext`]. Every call on one of its operations goes
//! through [`Resource::request`]:
//!
//! 1. resolve the full path from the base path, API version, resource path
//!    and operation path
//! 2. encode the parameters, as a query string or a body
//! 3. build the headers, with per-operation overrides applied last
//! 4. send exactly one request, aborting it if the timeout elapses
//! 5. classify the response into a payload or a [`WorkamajigError`]

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::{
    ClientContext, DataType, ErrorDetails, HttpMethod, HttpRequest, HttpResponse, TransportError,
    WorkamajigError,
};
use crate::config::ApiHost;
use crate::rest::codec::{encode, Params, RequestDataProcessor};
use crate::rest::method::{MethodSpec, Operation};
use crate::rest::path::{join_path, ResourceOperation};
use crate::rest::response::WorkamajigResponse;

/// Header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "APIAccessToken";
/// Header carrying the user token.
pub const USER_TOKEN_HEADER: &str = "UserToken";
/// Header carrying the API version.
pub const VERSION_HEADER: &str = "Workamajig-Version";
/// Header carrying the JSON client description.
pub const CLIENT_USER_AGENT_HEADER: &str = "X-Workamajig-Client-User-Agent";

/// Static description of a resource kind.
#[derive(Clone, Copy)]
pub struct ResourceDescriptor {
    /// Resource name, as used by [`Workamajig::resource`](crate::Workamajig::resource).
    pub name: &'static str,
    /// Path segment under the versioned base path.
    pub path: &'static str,
    /// Basic operations the resource enables.
    pub basic: &'static [ResourceOperation],
    /// Resource-specific operations. These replace a basic operation of the
    /// same name.
    pub custom: &'static [(&'static str, MethodSpec)],
    /// Replaces the default parameter encoding for every operation.
    pub request_data_processor: Option<RequestDataProcessor>,
}

impl ResourceDescriptor {
    /// Creates a descriptor with no operations.
    #[must_use]
    pub const fn new(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            basic: &[],
            custom: &[],
            request_data_processor: None,
        }
    }

    /// Enables basic operations.
    #[must_use]
    pub const fn basic(mut self, basic: &'static [ResourceOperation]) -> Self {
        self.basic = basic;
        self
    }

    /// Declares custom operations.
    #[must_use]
    pub const fn custom(mut self, custom: &'static [(&'static str, MethodSpec)]) -> Self {
        self.custom = custom;
        self
    }

    /// Sets a request data processor.
    #[must_use]
    pub const fn request_data_processor(mut self, processor: RequestDataProcessor) -> Self {
        self.request_data_processor = Some(processor);
        self
    }

    /// Looks up the method spec of an operation by name.
    #[must_use]
    pub fn method_spec(&self, name: &str) -> Option<(&'static str, MethodSpec)> {
        if let Some((custom_name, spec)) = self.custom.iter().find(|(n, _)| *n == name) {
            return Some((*custom_name, *spec));
        }
        ResourceOperation::from_name(name)
            .filter(|op| self.basic.contains(op))
            .map(|op| (op.as_str(), MethodSpec::basic(op)))
    }

    /// Returns the names of every operation the resource exposes.
    #[must_use]
    pub fn operation_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .basic
            .iter()
            .map(ResourceOperation::as_str)
            .filter(|name| !self.custom.iter().any(|(n, _)| n == name))
            .collect();
        names.extend(self.custom.iter().map(|(n, _)| *n));
        names
    }
}

impl fmt::Debug for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDescriptor")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("operations", &self.operation_names())
            .field("request_data_processor", &self.request_data_processor.is_some())
            .finish()
    }
}

/// A resource bound to a client context.
#[derive(Clone, Debug)]
pub struct Resource {
    context: Arc<ClientContext>,
    descriptor: &'static ResourceDescriptor,
    override_host: Option<ApiHost>,
}

impl Resource {
    /// Binds a descriptor to a context.
    #[must_use]
    pub const fn new(context: Arc<ClientContext>, descriptor: &'static ResourceDescriptor) -> Self {
        Self {
            context,
            descriptor,
            override_host: None,
        }
    }

    /// Sends every request of this resource to `host` instead of the
    /// configured host.
    #[must_use]
    pub fn with_override_host(mut self, host: ApiHost) -> Self {
        self.override_host = Some(host);
        self
    }

    /// Returns the resource name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Returns the descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &'static ResourceDescriptor {
        self.descriptor
    }

    /// Returns the operation with the given name, if the resource has one.
    #[must_use]
    pub fn operation(&self, name: &str) -> Option<Operation> {
        self.descriptor
            .method_spec(name)
            .map(|(name, spec)| Operation::new(name, spec, self.clone()))
    }

    /// Builds, sends and classifies one request.
    ///
    /// `command_path` is the operation path with its URL parameters already
    /// substituted.
    pub(crate) async fn request(
        &self,
        method: HttpMethod,
        command_path: &str,
        params: &Params,
        header_overrides: &[(&str, &str)],
        encoding: Option<DataType>,
    ) -> Result<WorkamajigResponse, WorkamajigError> {
        let config = self.context.config();

        let version = config.api_version().map(ToString::to_string);
        let mut path = join_path(&[
            config.base_path(),
            version.as_deref().unwrap_or_default(),
            self.descriptor.path,
            command_path,
        ]);

        let mut content_headers = HashMap::new();
        let data = match self.descriptor.request_data_processor {
            Some(processor) => processor(method, params, &mut content_headers)?,
            None => encode(method, params, &mut content_headers, encoding.unwrap_or_default())?,
        };

        let body = if method.has_body() {
            Some(data)
        } else {
            if !data.is_empty() {
                path = format!("{path}?{data}");
            }
            None
        };

        let mut headers = HashMap::new();
        if let Some(token) = config.access_token() {
            set_header(&mut headers, ACCESS_TOKEN_HEADER, token.as_ref());
        }
        if let Some(token) = config.user_token() {
            set_header(&mut headers, USER_TOKEN_HEADER, token.as_ref());
        }
        set_header(&mut headers, "Accept", "application/json");
        set_header(&mut headers, "User-Agent", self.context.user_agent());
        if let Some(version) = &version {
            set_header(&mut headers, VERSION_HEADER, version);
        }
        set_header(
            &mut headers,
            CLIENT_USER_AGENT_HEADER,
            self.context.client_user_agent(),
        );
        for (key, value) in &content_headers {
            set_header(&mut headers, key, value);
        }
        for (key, value) in header_overrides {
            set_header(&mut headers, key, value);
        }

        let host = self
            .override_host
            .clone()
            .unwrap_or_else(|| config.host().clone());

        let mut builder = HttpRequest::builder(method, path)
            .target(config.protocol(), host, config.port())
            .headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let request = builder.build();

        tracing::debug!(
            resource = self.descriptor.name,
            method = %request.http_method,
            path = %request.path,
            "Dispatching Workamajig request"
        );

        let timeout = config.timeout();
        let transport = self.context.transport();

        // Dropping the send future on timeout aborts the request.
        let response = match tokio::time::timeout(timeout, transport.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(error)) => {
                tracing::warn!(
                    resource = self.descriptor.name,
                    error = %error,
                    "Workamajig request failed"
                );
                return Err(WorkamajigError::connection(error));
            }
            Err(_) => {
                tracing::warn!(
                    resource = self.descriptor.name,
                    timeout = ?timeout,
                    "Workamajig request aborted after timeout"
                );
                return Err(WorkamajigError::connection(TransportError::Timeout {
                    timeout_ms: timeout.as_millis(),
                }));
            }
        };

        classify(response)
    }
}

/// Inserts a header, replacing any existing header with the same name in
/// any letter case.
fn set_header(headers: &mut HashMap<String, String>, key: &str, value: &str) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
    headers.insert(key.to_string(), value.to_string());
}

/// Turns a raw response into a payload or an error.
///
/// Order matters: an unparsable body wins over everything, then an `error`
/// object (classified by status first), then a 207 status.
pub(crate) fn classify(response: HttpResponse) -> Result<WorkamajigResponse, WorkamajigError> {
    let status = response.code;
    let request_id = response.request_id().map(String::from);

    let body: Value = match serde_json::from_slice(&response.body) {
        Ok(body) => body,
        Err(parse_error) => {
            tracing::debug!(status, "Workamajig response body is not valid JSON");
            return Err(WorkamajigError::invalid_json(
                response.body_text(),
                parse_error,
                status,
                request_id.as_deref(),
            ));
        }
    };

    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let details = ErrorDetails::from_value(error).with_response(status, request_id.as_deref());
        let error = WorkamajigError::from_status(status, details);
        tracing::debug!(status, kind = %error.kind(), "Workamajig request returned an error");
        return Err(error);
    }

    if status == 207 {
        let errors: Vec<WorkamajigError> = body
            .get("errors")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| {
                        WorkamajigError::generate(
                            ErrorDetails::from_value(item)
                                .with_response(status, request_id.as_deref()),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();
        tracing::debug!(
            failed = errors.len(),
            "Workamajig request partially failed"
        );
        return Err(WorkamajigError::MultiStatus { errors });
    }

    tracing::debug!(status, "Workamajig request succeeded");
    Ok(WorkamajigResponse::new(body, response))
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
    assert_send_sync::<ResourceDescriptor>();
};
