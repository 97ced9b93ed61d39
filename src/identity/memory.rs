//! Thread-safe in-memory pseudonym assignment for local development and tests.

// crates.io
use parking_lot::RwLock;
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::{LocalIdentifier, Realm},
	identity::{DirectedIdentityResolver, ResolverError},
};

const PSEUDONYM_LEN: usize = 24;

type PseudonymMap = HashMap<(LocalIdentifier, Realm), String>;

/// Assigns a random pseudonym per (local identifier, realm) pair on first use.
///
/// Assignments live only as long as the resolver; a persistent deployment would back the map with
/// its own store.
#[derive(Debug)]
pub struct MemoryPseudonymResolver {
	base: Url,
	assigned: RwLock<PseudonymMap>,
}
impl MemoryPseudonymResolver {
	/// Creates a resolver that mints identifiers below `base`.
	pub fn new(base: Url) -> Result<Self, ResolverError> {
		Ok(Self { base: super::normalize_base(base)?, assigned: Default::default() })
	}

	/// Number of pairs with an assigned pseudonym.
	pub fn len(&self) -> usize {
		self.assigned.read().len()
	}

	/// Returns true if nothing has been assigned yet.
	pub fn is_empty(&self) -> bool {
		self.assigned.read().is_empty()
	}

	fn pseudonym(&self, local_identifier: &LocalIdentifier, realm: &Realm) -> String {
		let key = (local_identifier.clone(), realm.clone());
		let existing = self.assigned.read().get(&key).cloned();

		if let Some(existing) = existing {
			return existing;
		}

		// Another caller may have assigned one between the read and write locks.
		self.assigned.write().entry(key).or_insert_with(random_pseudonym).clone()
	}
}
impl DirectedIdentityResolver for MemoryPseudonymResolver {
	fn identifier_for(
		&self,
		local_identifier: &LocalIdentifier,
		realm: &Realm,
	) -> Result<Url, ResolverError> {
		let pseudonym = self.pseudonym(local_identifier, realm);

		Ok(self.base.join(&pseudonym)?)
	}
}

fn random_pseudonym() -> String {
	rand::rng().sample_iter(Alphanumeric).take(PSEUDONYM_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn assignments_are_remembered_per_pair() {
		let base = Url::parse("https://idp.example/anon/").expect("Base should parse.");
		let resolver = MemoryPseudonymResolver::new(base).expect("Resolver should build.");
		let alice = LocalIdentifier::new("alice").expect("Local fixture should be valid.");
		let rp_a = Realm::new("https://a.example/").expect("Realm fixture should be valid.");
		let rp_b = Realm::new("https://b.example/").expect("Realm fixture should be valid.");

		assert!(resolver.is_empty());

		let first = resolver.identifier_for(&alice, &rp_a).expect("Resolution should succeed.");
		let again = resolver.identifier_for(&alice, &rp_a).expect("Resolution should succeed.");
		let other = resolver.identifier_for(&alice, &rp_b).expect("Resolution should succeed.");

		assert_eq!(first, again);
		assert_ne!(first, other);
		assert_eq!(resolver.len(), 2);
		assert_eq!(first.path().len(), "/anon/".len() + PSEUDONYM_LEN);
	}
}
