//! Relying-party flows that prepare the outbound authentication redirect.

pub mod auth_request;

pub use auth_request::*;
