//! Stateless pairwise identifiers derived from a keyed hash.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	auth::{LocalIdentifier, Realm},
	identity::{DirectedIdentityResolver, ResolverError},
};

type HmacSha256 = Hmac<Sha256>;

/// Secret keying the pairwise hash; redacted from formatting output.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolverKey(Vec<u8>);
impl ResolverKey {
	/// Wraps raw key bytes.
	pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into())
	}

	/// Returns the key bytes. Callers must avoid logging them.
	pub fn expose(&self) -> &[u8] {
		&self.0
	}
}
impl Debug for ResolverKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ResolverKey").field(&"<redacted>").finish()
	}
}

/// Derives `base/<HMAC-SHA256(key, local ‖ realm)>` identifiers.
///
/// The same (local identifier, realm) pair always yields the same URL, different realms yield
/// unrelated URLs, and nothing is stored, so one instance can serve any number of concurrent
/// handshakes.
#[derive(Clone, Debug)]
pub struct PairwiseIdentifierResolver {
	base: Url,
	key: ResolverKey,
}
impl PairwiseIdentifierResolver {
	/// Creates a resolver that mints identifiers below `base`.
	pub fn new(base: Url, key: ResolverKey) -> Result<Self, ResolverError> {
		if key.expose().is_empty() {
			return Err(ResolverError::InvalidKey);
		}

		Ok(Self { base: super::normalize_base(base)?, key })
	}

	/// Base URL identifiers are minted under.
	pub fn base(&self) -> &Url {
		&self.base
	}

	fn digest(
		&self,
		local_identifier: &LocalIdentifier,
		realm: &Realm,
	) -> Result<String, ResolverError> {
		let mut mac =
			HmacSha256::new_from_slice(self.key.expose()).map_err(|_| ResolverError::InvalidKey)?;

		// Length prefixes keep ("ab", "c") and ("a", "bc") apart.
		mac.update(&(local_identifier.len() as u64).to_be_bytes());
		mac.update(local_identifier.as_bytes());
		mac.update(&(realm.len() as u64).to_be_bytes());
		mac.update(realm.as_bytes());

		Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
	}
}
impl DirectedIdentityResolver for PairwiseIdentifierResolver {
	fn identifier_for(
		&self,
		local_identifier: &LocalIdentifier,
		realm: &Realm,
	) -> Result<Url, ResolverError> {
		let digest = self.digest(local_identifier, realm)?;

		Ok(self.base.join(&digest)?)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn resolver() -> PairwiseIdentifierResolver {
		PairwiseIdentifierResolver::new(
			Url::parse("https://idp.example/ppid").expect("Base fixture should parse."),
			ResolverKey::new(b"0123456789abcdef".to_vec()),
		)
		.expect("Resolver fixture should build.")
	}

	fn local(value: &str) -> LocalIdentifier {
		LocalIdentifier::new(value).expect("Local fixture should be valid.")
	}

	fn realm(value: &str) -> Realm {
		Realm::new(value).expect("Realm fixture should be valid.")
	}

	#[test]
	fn identifiers_are_stable_per_realm() {
		let resolver = resolver();
		let alice = local("alice");
		let first = resolver
			.identifier_for(&alice, &realm("https://a.example/"))
			.expect("Resolution should succeed.");
		let again = resolver
			.identifier_for(&alice, &realm("https://a.example/"))
			.expect("Resolution should succeed.");
		let other = resolver
			.identifier_for(&alice, &realm("https://b.example/"))
			.expect("Resolution should succeed.");

		assert_eq!(first, again);
		assert_ne!(first, other);
		assert!(first.as_str().starts_with("https://idp.example/ppid/"));
		assert!(!first.as_str().contains("alice"));
	}

	#[test]
	fn length_prefix_separates_boundaries() {
		let resolver = resolver();
		let left = resolver.digest(&local("ab"), &realm("c")).expect("Digest should succeed.");
		let right = resolver.digest(&local("a"), &realm("bc")).expect("Digest should succeed.");

		assert_ne!(left, right);
		assert_eq!(left.len(), 43);
	}

	#[test]
	fn empty_keys_and_bad_bases_are_rejected() {
		let base = Url::parse("https://idp.example/ppid/").expect("Base fixture should parse.");

		assert!(matches!(
			PairwiseIdentifierResolver::new(base, ResolverKey::new(Vec::new())),
			Err(ResolverError::InvalidKey)
		));
		assert!(matches!(
			PairwiseIdentifierResolver::new(
				Url::parse("urn:example:ppid").expect("URN fixture should parse."),
				ResolverKey::new(b"k".to_vec())
			),
			Err(ResolverError::InvalidBase { .. })
		));
		assert_eq!(format!("{:?}", ResolverKey::new(b"k".to_vec())), "ResolverKey(\"<redacted>\")");
	}
}
