//! The projects resource.
//!
//! Listing projects requires a `projectKey`; creating one sends a JSON body.
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let projects = client.projects();
//!
//! let list = projects.operation("list").unwrap();
//! let found = list.call(&[], json!({"projectKey": "ACME-01"}).as_object().cloned()).await?;
//!
//! let create = projects.operation("create").unwrap();
//! let created = create.call(&[], json!({"projectName": "Launch"}).as_object().cloned()).await?;
//! ```

use crate::clients::{DataType, HttpMethod};
use crate::rest::method::MethodSpec;
use crate::rest::resource::ResourceDescriptor;

const LIST: MethodSpec = MethodSpec::new(HttpMethod::Get).required(&["projectKey"]);

const CREATE: MethodSpec = MethodSpec::new(HttpMethod::Post)
    .headers(&[("Content-Type", "application/json")])
    .encoding(DataType::Json);

/// Projects: `GET {base}/projects` and `POST {base}/projects`.
pub const PROJECTS: ResourceDescriptor =
    ResourceDescriptor::new("projects", "projects").custom(&[("list", LIST), ("create", CREATE)]);
