//! Declarations of the Workamajig resources.
//!
//! Each resource is a `const` [`ResourceDescriptor`]. [`ALL`] lists them in
//! the order [`find`] searches.
//!
//! | Resource     | Path         | Operations                                  |
//! |--------------|--------------|---------------------------------------------|
//! | `contacts`   | `contacts`   | `list`                                      |
//! | `projects`   | `projects`   | `list` (needs `projectKey`), `create` (JSON) |
//! | `timesheets` | `timesheets` | `list`                                      |

mod contacts;
mod projects;
mod timesheets;

pub use contacts::CONTACTS;
pub use projects::PROJECTS;
pub use timesheets::TIMESHEETS;

use crate::rest::resource::ResourceDescriptor;

/// Every resource the client exposes.
pub static ALL: [&ResourceDescriptor; 3] = [&CONTACTS, &PROJECTS, &TIMESHEETS];

/// Finds a resource by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static ResourceDescriptor> {
    ALL.iter().copied().find(|descriptor| descriptor.name == name)
}
