//! The timesheets resource.

use crate::rest::path::ResourceOperation;
use crate::rest::resource::ResourceDescriptor;

/// Timesheets: `GET {base}/timesheets`.
pub const TIMESHEETS: ResourceDescriptor =
    ResourceDescriptor::new("timesheets", "timesheets").basic(&[ResourceOperation::List]);
