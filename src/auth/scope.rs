//! Scope modeling for delegated authorizations.

// std
use std::collections::BTreeSet;
// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain embedded whitespace characters.
	#[error("Scope contains whitespace: {scope}.")]
	ContainsWhitespace {
		/// The offending scope string.
		scope: String,
	},
}

/// Normalized set of granted scopes.
///
/// Entries are deduplicated and sorted so equality stays independent of the order a grant listed
/// them in. The wire form is the space-delimited string used by OAuth-style grants; an empty
/// scope is valid and left to the consuming authorization check to interpret.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Scope(Vec<String>);
impl Scope {
	/// Creates a normalized scope from any iterator of entries.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut set = BTreeSet::new();

		for scope in scopes {
			let scope = scope.into();

			if scope.is_empty() {
				return Err(ScopeValidationError::Empty);
			}
			if scope.chars().any(char::is_whitespace) {
				return Err(ScopeValidationError::ContainsWhitespace { scope });
			}

			set.insert(scope);
		}

		Ok(Self(set.into_iter().collect()))
	}

	/// Builds the set from a whitespace-delimited grant string, ignoring blank input.
	pub fn from_delimited(value: &str) -> Self {
		let set: BTreeSet<String> = value.split_whitespace().map(str::to_owned).collect();

		Self(set.into_iter().collect())
	}

	/// Number of distinct entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no entries are granted.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the scope contains the provided entry.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.binary_search_by(|candidate| candidate.as_str().cmp(scope)).is_ok()
	}

	/// Returns true if every entry of `self` is also in `other`.
	pub fn is_subset_of(&self, other: &Scope) -> bool {
		self.iter().all(|scope| other.contains(scope))
	}

	/// Iterator over normalized entries.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Space-delimited wire form.
	pub fn normalized(&self) -> String {
		self.0.join(" ")
	}
}
impl Debug for Scope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Scope").field(&self.0).finish()
	}
}
impl Display for Scope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.normalized())
	}
}
impl FromStr for Scope {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Ok(Self::default());
		}
		if s.chars().all(char::is_whitespace) {
			return Err(ScopeValidationError::Empty);
		}

		Self::new(s.split_whitespace())
	}
}
impl TryFrom<String> for Scope {
	type Error = ScopeValidationError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
impl From<Scope> for String {
	fn from(value: Scope) -> Self {
		value.normalized()
	}
}
