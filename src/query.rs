//! Ordered query-argument sets and the append-only URL assembler.
//!
//! [`QueryArgs`] keeps `(key, value)` pairs in insertion order. Within one set
//! [`QueryArgs::insert`] is last-write-wins, while [`QueryArgs::append`] keeps duplicates for
//! protocols that rely on them. [`append_query_args`] never touches parameters already present on
//! the target URL.

// std
use std::slice::Iter;
// self
use crate::_prelude::*;

/// Ordered sequence of query arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryArgs(Vec<(String, String)>);
impl QueryArgs {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key` to `value`, replacing an earlier value in place.
	///
	/// Any further duplicates of `key` added through [`append`](Self::append) are dropped.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		let key = key.into();
		let value = value.into();

		match self.0.iter().position(|(k, _)| *k == key) {
			Some(idx) => {
				self.0[idx].1 = value;

				let mut seen = false;

				self.0.retain(|(k, _)| {
					if *k != key {
						return true;
					}

					let keep = !seen;

					seen = true;

					keep
				});
			},
			None => self.0.push((key, value)),
		}

		self
	}

	/// Appends a pair without looking for an existing key.
	pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.0.push((key.into(), value.into()));

		self
	}

	/// Returns the first value stored for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Returns every value stored for `key` in insertion order.
	pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
		self.0.iter().filter(move |(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Returns true if at least one pair uses `key`.
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.iter().any(|(k, _)| k == key)
	}

	/// Removes every pair using `key`, returning how many were dropped.
	pub fn remove(&mut self, key: &str) -> usize {
		let before = self.0.len();

		self.0.retain(|(k, _)| k != key);

		before - self.0.len()
	}

	/// Number of pairs.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the set holds no pairs.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over pairs in insertion order.
	pub fn iter(&self) -> QueryArgsIter<'_> {
		QueryArgsIter { inner: self.0.iter() }
	}
}
impl<K, V> FromIterator<(K, V)> for QueryArgs
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut args = Self::new();

		args.extend(iter);

		args
	}
}
impl<K, V> Extend<(K, V)> for QueryArgs
where
	K: Into<String>,
	V: Into<String>,
{
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}
impl<'a> IntoIterator for &'a QueryArgs {
	type IntoIter = QueryArgsIter<'a>;
	type Item = (&'a str, &'a str);

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Borrowing iterator over [`QueryArgs`].
pub struct QueryArgsIter<'a> {
	inner: Iter<'a, (String, String)>,
}
impl<'a> Iterator for QueryArgsIter<'a> {
	type Item = (&'a str, &'a str);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

/// Appends `args` to the query of `url`, keeping every existing parameter.
///
/// Values are form-urlencoded. An empty argument set leaves `url` untouched so no bare `?` is
/// introduced.
pub fn append_query_args<'a, I>(url: &mut Url, args: I)
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut args = args.into_iter().peekable();

	if args.peek().is_none() {
		return;
	}

	url.query_pairs_mut().extend_pairs(args);
}
