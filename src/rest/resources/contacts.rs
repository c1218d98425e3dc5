//! The contacts resource.
//!
//! ```rust,ignore
//! let contacts = client.contacts().operation("list").unwrap().call(&[], None).await?;
//! ```

use crate::rest::path::ResourceOperation;
use crate::rest::resource::ResourceDescriptor;

/// Contacts: `GET {base}/contacts`.
pub const CONTACTS: ResourceDescriptor =
    ResourceDescriptor::new("contacts", "contacts").basic(&[ResourceOperation::List]);
