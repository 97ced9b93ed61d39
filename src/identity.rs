//! Provider-side directed identity: per-realm pseudonymous identifiers.
//!
//! [`DirectedIdentityResolver`] is the pluggable capability; [`resolve_directed_identity`] is the
//! checked entry point providers should call, since it rejects identifiers that could not be
//! discovered back to the provider instead of passing them along.

pub mod memory;
pub mod pairwise;

pub use memory::*;
pub use pairwise::*;

// self
use crate::{
	_prelude::*,
	auth::{LocalIdentifier, Realm},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Produces the identifier a provider asserts to a given relying-party realm.
///
/// Implementations must be safe for concurrent invocation; providers serve many handshakes at
/// once and impose no ordering between calls. An implementation that cannot produce a valid
/// identifier must return an error rather than a degraded value, and must never fall back to the
/// local identifier.
pub trait DirectedIdentityResolver: Send + Sync {
	/// Returns the claimed/local identifier to assert for `local_identifier` at `realm`.
	fn identifier_for(
		&self,
		local_identifier: &LocalIdentifier,
		realm: &Realm,
	) -> Result<Url, ResolverError>;
}
impl<T> DirectedIdentityResolver for Arc<T>
where
	T: ?Sized + DirectedIdentityResolver,
{
	fn identifier_for(
		&self,
		local_identifier: &LocalIdentifier,
		realm: &Realm,
	) -> Result<Url, ResolverError> {
		(**self).identifier_for(local_identifier, realm)
	}
}

/// Failures raised while resolving a directed identifier.
#[derive(Debug, ThisError)]
pub enum ResolverError {
	/// Resolver produced a URL that discovery could not follow.
	#[error("Resolved identifier {url} is not discoverable: {reason}.")]
	NotDiscoverable {
		/// Rejected URL.
		url: String,
		/// Why the URL was rejected.
		reason: &'static str,
	},
	/// Resolver base URL cannot carry appended pseudonyms.
	#[error("Resolver base URL {url} cannot carry path segments.")]
	InvalidBase {
		/// Rejected base URL.
		url: String,
	},
	/// Identifier could not be joined onto the resolver base.
	#[error("Identifier could not be joined onto the resolver base.")]
	Join(#[from] url::ParseError),
	/// Resolver secret was rejected by the keyed hash.
	#[error("Resolver key is invalid.")]
	InvalidKey,
}

/// Resolves `local_identifier` for `realm`, rejecting non-discoverable results.
pub fn resolve_directed_identity<R>(
	resolver: &R,
	local_identifier: &LocalIdentifier,
	realm: &Realm,
) -> Result<Url>
where
	R: ?Sized + DirectedIdentityResolver,
{
	let kind = FlowKind::DirectedIdentity;
	let _guard = FlowSpan::new(kind, "resolve_directed_identity").entered();

	obs::record_flow_outcome(kind, FlowOutcome::Attempt);

	let resolved = resolver
		.identifier_for(local_identifier, realm)
		.and_then(|url| ensure_discoverable(url, local_identifier));

	match resolved {
		Ok(url) => {
			obs::record_flow_outcome(kind, FlowOutcome::Success);

			Ok(url)
		},
		Err(e) => {
			obs::record_flow_outcome(kind, FlowOutcome::Failure);

			Err(e.into())
		},
	}
}

/// Accepts only HTTP(S) URLs with a host that differ from the local identifier.
fn ensure_discoverable(url: Url, local_identifier: &LocalIdentifier) -> Result<Url, ResolverError> {
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ResolverError::NotDiscoverable {
			url: url.to_string(),
			reason: "scheme must be http or https",
		});
	}
	if url.host_str().is_none_or(str::is_empty) {
		return Err(ResolverError::NotDiscoverable { url: url.to_string(), reason: "missing host" });
	}
	if leaks_local_identifier(&url, local_identifier) {
		return Err(ResolverError::NotDiscoverable {
			url: url.to_string(),
			reason: "identifier leaks the local identifier",
		});
	}

	Ok(url)
}

/// True when `url` names the local identifier, compared in normalized URL form.
fn leaks_local_identifier(url: &Url, local_identifier: &LocalIdentifier) -> bool {
	match Url::parse(local_identifier.as_ref()) {
		Ok(local) => url == &local,
		Err(_) => url.as_str() == local_identifier.as_ref(),
	}
}

/// Validates a resolver base URL and normalizes it to end with `/`.
pub(crate) fn normalize_base(mut base: Url) -> Result<Url, ResolverError> {
	if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
		return Err(ResolverError::InvalidBase { url: base.to_string() });
	}
	if !base.path().ends_with('/') {
		let path = format!("{}/", base.path());

		base.set_path(&path);
	}

	base.set_query(None);
	base.set_fragment(None);

	Ok(base)
}
