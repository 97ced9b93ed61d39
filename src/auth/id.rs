//! Strongly typed identifiers enforced across the handshake domain.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $policy:expr) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view, &$policy)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value, &$policy)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const CORRELATION_TOKEN_LEN: usize = 32;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier starts or ends with whitespace.
	#[error("{kind} identifier has surrounding whitespace.")]
	SurroundingWhitespace {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier contains characters outside printable ASCII.
	#[error("{kind} identifier must be printable ASCII.")]
	NonPrintable {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier.
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

enum Whitespace {
	Rejected,
	InnerOnly,
	Allowed,
}

struct Policy {
	max_len: Option<usize>,
	whitespace: Whitespace,
	printable_ascii: bool,
}

// Carried to and from the wire untouched; only emptiness is rejected.
const VERBATIM: Policy =
	Policy { max_len: None, whitespace: Whitespace::Allowed, printable_ascii: false };
const OPAQUE: Policy =
	Policy { max_len: Some(2048), whitespace: Whitespace::Rejected, printable_ascii: false };
const HANDLE: Policy =
	Policy { max_len: Some(255), whitespace: Whitespace::Rejected, printable_ascii: true };
const CLIENT: Policy =
	Policy { max_len: Some(255), whitespace: Whitespace::Rejected, printable_ascii: false };
const ACCOUNT: Policy =
	Policy { max_len: Some(255), whitespace: Whitespace::InnerOnly, printable_ascii: false };

def_id! {
	CorrelationToken,
	"Opaque value round-tripped through the return-to URI to match a response to its request.",
	"Correlation token",
	VERBATIM
}
def_id! {
	AssociationHandle,
	"Handle naming a shared secret previously negotiated with a provider.",
	"Association handle",
	HANDLE
}
def_id! {
	ClientId,
	"Identifier of a client that received a delegated authorization.",
	"Client",
	CLIENT
}
def_id! { UserName, "Name on the account whose data a grant exposes.", "User", ACCOUNT }
def_id! {
	LocalIdentifier,
	"Provider-local identifier of the authenticating user.",
	"Local",
	OPAQUE
}
def_id! {
	Realm,
	"Realm (trust root) a relying party declares for itself; carried without validation.",
	"Realm",
	VERBATIM
}

impl CorrelationToken {
	/// Generates a fresh random alphanumeric token.
	pub fn generate() -> Self {
		let token =
			rand::rng().sample_iter(Alphanumeric).take(CORRELATION_TOKEN_LEN).map(char::from).collect();

		Self(token)
	}
}

fn validate_view(kind: &'static str, view: &str, policy: &Policy) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	match policy.whitespace {
		Whitespace::Rejected if view.chars().any(char::is_whitespace) => {
			return Err(IdentifierError::ContainsWhitespace { kind });
		},
		Whitespace::InnerOnly
			if view.starts_with(char::is_whitespace) || view.ends_with(char::is_whitespace) =>
		{
			return Err(IdentifierError::SurroundingWhitespace { kind });
		},
		_ => {},
	}
	if policy.printable_ascii && !view.bytes().all(|b| b.is_ascii_graphic()) {
		return Err(IdentifierError::NonPrintable { kind });
	}
	if let Some(max) = policy.max_len.filter(|max| view.chars().count() > *max) {
		return Err(IdentifierError::TooLong { kind, max });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_empty() {
		assert!(ClientId::new("client ").is_err(), "Trailing whitespace must be rejected.");
		assert!(CorrelationToken::new("").is_err());
		assert!(Realm::new("").is_err());
		assert!(LocalIdentifier::new("with space").is_err());

		let token = CorrelationToken::new("tok123").expect("Token fixture should be valid.");

		assert_eq!(token.as_ref(), "tok123");
	}

	#[test]
	fn user_names_allow_inner_whitespace_only() {
		UserName::new("Jane Doe").expect("Inner whitespace should be accepted for user names.");

		assert_eq!(
			UserName::new(" Jane"),
			Err(IdentifierError::SurroundingWhitespace { kind: "User" })
		);
		assert_eq!(UserName::new(""), Err(IdentifierError::Empty { kind: "User" }));
	}

	#[test]
	fn tokens_and_realms_are_carried_verbatim() {
		let token = CorrelationToken::new(" tok en ").expect("Whitespace should be carried through.");
		let long = "r".repeat(4096);
		let realm = Realm::new(&long).expect("Realm length should not be capped.");

		assert_eq!(token.as_ref(), " tok en ");
		assert_eq!(realm.len(), 4096);
		assert_eq!(Realm::new("*.rp example"), Ok(Realm("*.rp example".into())));
		assert_eq!(Realm::new(""), Err(IdentifierError::Empty { kind: "Realm" }));
	}

	#[test]
	fn association_handles_are_printable_ascii() {
		AssociationHandle::new("{HMAC-SHA1}{4a1b}{x==}").expect("Printable handle should pass.");

		assert!(matches!(
			AssociationHandle::new("h\u{e9}"),
			Err(IdentifierError::NonPrintable { .. })
		));

		let exact = "h".repeat(255);

		AssociationHandle::new(&exact).expect("Exact length should succeed.");

		assert!(matches!(
			AssociationHandle::new("h".repeat(256)),
			Err(IdentifierError::TooLong { max: 255, .. })
		));
	}

	#[test]
	fn generated_tokens_are_alphanumeric_and_distinct() {
		let first = CorrelationToken::generate();
		let second = CorrelationToken::generate();

		assert_eq!(first.len(), CORRELATION_TOKEN_LEN);
		assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(first, second);
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let realm: Realm = serde_json::from_str("\"https://rp.example/\"")
			.expect("Realm should deserialize successfully.");

		assert_eq!(realm.as_ref(), "https://rp.example/");
		assert!(serde_json::from_str::<Realm>("\"\"").is_err());
		assert!(serde_json::from_str::<ClientId>("\"with space\"").is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<Realm, u8> = HashMap::from_iter([(
			Realm::new("https://rp.example/").expect("Realm used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("https://rp.example/"), Some(&7));
	}
}
