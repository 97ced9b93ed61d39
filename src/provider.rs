//! Provider-facing data consumed by the redirect builder.
//!
//! `endpoint` exposes [`ServiceEndpoint`], the validated pair of URLs discovery yields for a
//! provider, and the [`IdentityEndpoint`] accessor trait the builder reads it through.
//! `association` models the optional shared-secret handle negotiated with that provider.

pub mod association;
pub mod endpoint;

pub use association::*;
pub use endpoint::*;
