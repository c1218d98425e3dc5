//! REST resource infrastructure for the Workamajig API.
//!
//! This module turns declarative resource tables into callable operations:
//!
//! - **[`UrlTemplate`]** and **[`join_path`]**: Path building
//! - **[`encode`]**: Parameter encoding as a query string, form body or JSON body
//! - **[`MethodSpec`]** and **[`Operation`]**: Declared and callable operations
//! - **[`ResourceDescriptor`]** and **[`Resource`]**: Resource tables and the
//!   request dispatcher
//! - **[`WorkamajigResponse`]**: A Deref-based wrapper around the parsed body
//! - **[`resources`]**: The resources the API offers
//!
//! # Example: Using a Resource
//!
//! ```rust,ignore
//! use workamajig_api::{Workamajig, WorkamajigConfig};
//! use serde_json::json;
//!
//! let client = Workamajig::new(WorkamajigConfig::from_env()?);
//!
//! // GET /api/beta1/contacts
//! let list = client.contacts().operation("list").expect("contacts can be listed");
//! let contacts = list.call(&[], None).await?;
//! println!("{}", contacts["data"]);
//!
//! // POST /api/beta1/projects with a JSON body
//! let create = client.projects().operation("create").expect("projects can be created");
//! let params = json!({"projectName": "Launch"}).as_object().cloned();
//! let created = create.call(&[], params).await?;
//! ```

mod codec;
mod method;
mod path;
mod resource;
mod response;
pub mod resources;

pub use codec::{encode, json_data_processor, EncodeError, Params, RequestDataProcessor};
pub use method::{MethodSpec, Operation};
pub use path::{join_path, PathError, ResourceOperation, UrlTemplate};
pub use resource::{
    Resource, ResourceDescriptor, ACCESS_TOKEN_HEADER, CLIENT_USER_AGENT_HEADER,
    USER_TOKEN_HEADER, VERSION_HEADER,
};
pub use response::WorkamajigResponse;
