//! Auth-domain identifiers, scopes, and delegated-authorization records.

pub mod description;
pub mod id;
pub mod scope;

pub use description::*;
pub use id::*;
pub use scope::*;
