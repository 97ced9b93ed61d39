//! Crate-level error types shared across request building, resolvers, and records.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or input problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),
	/// Scope string failed validation.
	#[error(transparent)]
	Scope(#[from] crate::auth::ScopeValidationError),
	/// Authorization description violates its contract.
	#[error(transparent)]
	Description(#[from] crate::auth::AuthorizationDescriptionError),
	/// Service endpoint failed validation.
	#[error(transparent)]
	Endpoint(#[from] crate::provider::ServiceEndpointError),
	/// Directed-identity resolver could not produce an identifier.
	#[error(transparent)]
	Resolver(#[from] crate::identity::ResolverError),

	/// Mode string does not name a known `checkid` mode.
	#[error("Unrecognized checkid mode `{value}`.")]
	UnrecognizedMode {
		/// Rejected input.
		value: String,
	},
	/// Caller tried to overwrite the reserved correlation-token key in the return-to args.
	#[error("Return-to key `{key}` is reserved for the correlation token.")]
	ReservedReturnToKey {
		/// Rejected key.
		key: String,
	},
}

/// Configuration and input failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Return-to URI cannot be parsed.
	#[error("Return-to URI is invalid.")]
	InvalidReturnTo {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider endpoint contains an invalid URL.
	#[error("Endpoint `{field}` URL is invalid.")]
	InvalidEndpoint {
		/// Endpoint field that failed to parse.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Return-to URI must use HTTP(S).
	#[error("Return-to URI must use http or https: {url}.")]
	UnsupportedReturnTo {
		/// URL that failed validation.
		url: String,
	},
	/// Trust root must not be empty.
	#[error("Trust root cannot be empty.")]
	EmptyTrustRoot,
	/// JSON payload could not be decoded.
	#[error("Failed to decode JSON at `{path}`.")]
	Decode {
		/// Field path at which decoding failed.
		path: String,
		/// Underlying decoding failure.
		#[source]
		source: serde_json::Error,
	},
	/// Value could not be encoded to JSON.
	#[error("Failed to encode JSON.")]
	Encode(#[source] serde_json::Error),
}
impl ConfigError {
	/// Converts a path-aware decoding failure into [`ConfigError::Decode`].
	pub fn decode(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = err.path().to_string();

		Self::Decode { path, source: err.into_inner() }
	}
}

/// Decodes JSON into `T`, retaining the field path of the first failure.
pub(crate) fn decode_json<T>(payload: &str) -> Result<T, ConfigError>
where
	T: for<'de> Deserialize<'de>,
{
	let mut de = serde_json::Deserializer::from_str(payload);
	let value = serde_path_to_error::deserialize(&mut de).map_err(ConfigError::decode)?;

	de.end().map_err(|source| ConfigError::Decode { path: ".".into(), source })?;

	Ok(value)
}
