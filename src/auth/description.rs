//! Immutable description of a granted delegated authorization, plus its builder.

// crates.io
use time::UtcOffset;
// self
use crate::{
	_prelude::*,
	auth::{ClientId, Scope, UserName},
	error::{ConfigError, decode_json},
};

/// Errors produced while building an [`AuthorizationDescription`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum AuthorizationDescriptionError {
	/// Issue instant lies after the issuer's notion of "now".
	#[error("Authorization issue instant {issued} is later than {now}.")]
	IssuedInFuture {
		/// Requested issue instant.
		issued: OffsetDateTime,
		/// Issuer's current instant.
		now: OffsetDateTime,
	},
}

/// Describes a delegated authorization between a resource server, a client, and a user.
///
/// Records are produced once, at grant time, and never mutated; a new grant yields a new record.
/// The issue instant is always stored in UTC. The scope is kept exactly as the issuer granted it;
/// [`scope_set`](Self::scope_set) offers a normalized view for authorization checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDescription {
	client_identifier: ClientId,
	#[serde(serialize_with = "time::serde::rfc3339::serialize", deserialize_with = "deserialize_utc")]
	utc_issued: OffsetDateTime,
	user: UserName,
	#[serde(default)]
	scope: String,
}
impl AuthorizationDescription {
	/// Returns a builder for the provided client and user.
	pub fn builder(client_identifier: ClientId, user: UserName) -> AuthorizationDescriptionBuilder {
		AuthorizationDescriptionBuilder::new(client_identifier, user)
	}

	/// Decodes a record from its JSON form.
	pub fn from_json_str(payload: &str) -> Result<Self> {
		Ok(decode_json(payload)?)
	}

	/// Encodes the record as JSON with an RFC 3339 issue instant.
	pub fn to_json_string(&self) -> Result<String> {
		Ok(serde_json::to_string(self).map_err(ConfigError::Encode)?)
	}

	/// Identifier of the client authorized to access protected data.
	pub fn client_identifier(&self) -> &ClientId {
		&self.client_identifier
	}

	/// Instant the authorization was established, in UTC.
	pub fn utc_issued(&self) -> OffsetDateTime {
		self.utc_issued
	}

	/// Name on the account whose data the authorization exposes.
	pub fn user(&self) -> &UserName {
		&self.user
	}

	/// Scope of operations the client may invoke, verbatim and possibly empty.
	pub fn scope(&self) -> &str {
		&self.scope
	}

	/// Normalized set of the whitespace-delimited entries in [`scope`](Self::scope).
	pub fn scope_set(&self) -> Scope {
		Scope::from_delimited(&self.scope)
	}

	/// Time elapsed between issuance and `now`, clamped at zero.
	pub fn age_at(&self, now: OffsetDateTime) -> Duration {
		let age = now - self.utc_issued;

		if age.is_negative() { Duration::ZERO } else { age }
	}

	/// Returns true if every requested entry was granted.
	pub fn permits(&self, requested: &Scope) -> bool {
		requested.is_subset_of(&self.scope_set())
	}
}

/// Builder for [`AuthorizationDescription`].
#[derive(Clone, Debug)]
pub struct AuthorizationDescriptionBuilder {
	client_identifier: ClientId,
	user: UserName,
	scope: String,
	issued_at: Option<OffsetDateTime>,
}
impl AuthorizationDescriptionBuilder {
	fn new(client_identifier: ClientId, user: UserName) -> Self {
		Self { client_identifier, user, scope: String::new(), issued_at: None }
	}

	/// Sets the granted scope; a [`Scope`] converts to its normalized wire form.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = scope.into();

		self
	}

	/// Sets the issue instant; any offset is normalized to UTC.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Consumes the builder using the current clock as "now".
	pub fn build(self) -> Result<AuthorizationDescription, AuthorizationDescriptionError> {
		self.build_at(OffsetDateTime::now_utc())
	}

	/// Consumes the builder, validating the issue instant against `now`.
	///
	/// A missing issue instant defaults to `now`.
	pub fn build_at(
		self,
		now: OffsetDateTime,
	) -> Result<AuthorizationDescription, AuthorizationDescriptionError> {
		let now = now.to_offset(UtcOffset::UTC);
		let issued = self.issued_at.map_or(now, |instant| instant.to_offset(UtcOffset::UTC));

		if issued > now {
			return Err(AuthorizationDescriptionError::IssuedInFuture { issued, now });
		}

		Ok(AuthorizationDescription {
			client_identifier: self.client_identifier,
			utc_issued: issued,
			user: self.user,
			scope: self.scope,
		})
	}
}

fn deserialize_utc<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let instant = time::serde::rfc3339::deserialize(deserializer)?;

	Ok(instant.to_offset(UtcOffset::UTC))
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn client() -> ClientId {
		ClientId::new("client-1").expect("Client fixture should be valid.")
	}

	fn user() -> UserName {
		UserName::new("alice").expect("User fixture should be valid.")
	}

	#[test]
	fn builder_normalizes_offsets_to_utc() {
		let description = AuthorizationDescription::builder(client(), user())
			.issued_at(macros::datetime!(2025-01-01 02:00 +2))
			.build_at(macros::datetime!(2025-01-01 00:30 UTC))
			.expect("Past issue instant should build.");

		assert_eq!(description.utc_issued(), macros::datetime!(2025-01-01 00:00 UTC));
		assert_eq!(description.utc_issued().offset(), UtcOffset::UTC);
		assert_eq!(description.age_at(macros::datetime!(2025-01-01 00:30 UTC)), Duration::minutes(30));
	}

	#[test]
	fn builder_rejects_future_issue_instant() {
		let err = AuthorizationDescription::builder(client(), user())
			.issued_at(macros::datetime!(2025-01-01 01:00 UTC))
			.build_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expect_err("Future issue instant must be rejected.");

		assert!(matches!(err, AuthorizationDescriptionError::IssuedInFuture { .. }));
	}

	#[test]
	fn missing_issue_instant_defaults_to_now() {
		let now = macros::datetime!(2025-03-04 05:06 UTC);
		let description = AuthorizationDescription::builder(client(), user())
			.build_at(now)
			.expect("Default issue instant should build.");

		assert_eq!(description.utc_issued(), now);
		assert!(description.scope().is_empty());
		assert_eq!(description.age_at(now - Duration::hours(1)), Duration::ZERO);
	}

	#[test]
	fn permits_requires_every_requested_scope() {
		let granted = Scope::new(["read", "write"]).expect("Scope fixture should build.");
		let description = AuthorizationDescription::builder(client(), user())
			.scope(granted)
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.build_at(macros::datetime!(2025-01-02 00:00 UTC))
			.expect("Description should build.");

		assert!(description.permits(&Scope::new(["read"]).expect("Scope should build.")));
		assert!(!description.permits(&Scope::new(["admin"]).expect("Scope should build.")));
	}

	#[test]
	fn issued_scope_is_kept_verbatim() {
		let description = AuthorizationDescription::from_json_str(
			"{\"client_identifier\":\"c\",\"utc_issued\":\"2025-01-01T00:00:00Z\",\"user\":\"u\",\"scope\":\"write read read\"}",
		)
		.expect("Producer payload should decode.");

		assert_eq!(description.scope(), "write read read");
		assert_eq!(description.scope_set().normalized(), "read write");
		assert!(
			description
				.to_json_string()
				.expect("Description should encode.")
				.contains("\"scope\":\"write read read\"")
		);
	}

	#[test]
	fn whitespace_only_scope_decodes_as_no_entries() {
		let description = AuthorizationDescription::from_json_str(
			"{\"client_identifier\":\"c\",\"utc_issued\":\"2025-01-01T00:00:00Z\",\"user\":\"u\",\"scope\":\" \"}",
		)
		.expect("Whitespace-only scope should decode.");

		assert_eq!(description.scope(), " ");
		assert!(description.scope_set().is_empty());
		assert!(description.permits(&Scope::default()));
		assert!(!description.permits(&Scope::new(["read"]).expect("Scope should build.")));
	}
}
