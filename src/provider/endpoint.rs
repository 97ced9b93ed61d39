//! Service endpoint descriptors and their builder.

// self
use crate::{_prelude::*, error::ConfigError};

/// Accessors the redirect builder needs from a provider endpoint.
///
/// Discovery layers may hand over richer endpoint types; implementing this trait is enough to feed
/// them into [`AuthRequest`](crate::flows::AuthRequest).
pub trait IdentityEndpoint {
	/// Endpoint the user agent is redirected to.
	fn server_url(&self) -> &Url;

	/// Provider-asserted identity URI for the user being authenticated.
	fn provider_identity_uri(&self) -> &Url;
}
impl<T> IdentityEndpoint for &T
where
	T: ?Sized + IdentityEndpoint,
{
	fn server_url(&self) -> &Url {
		(**self).server_url()
	}

	fn provider_identity_uri(&self) -> &Url {
		(**self).provider_identity_uri()
	}
}

/// Errors raised while constructing or validating endpoints.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ServiceEndpointError {
	/// Server URL is required.
	#[error("Missing server URL.")]
	MissingServerUrl,
	/// Provider identity URI is required.
	#[error("Missing server identity URI.")]
	MissingServerId,
	/// Endpoint URLs must use HTTP(S).
	#[error("The {field} URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which field failed validation.
		field: &'static str,
		/// URL that failed validation.
		url: String,
	},
	/// HTTPS was required but the URL uses plain HTTP.
	#[error("The {field} URL must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which field failed validation.
		field: &'static str,
		/// URL that failed validation.
		url: String,
	},
}

/// Provider endpoint produced by discovery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawServiceEndpoint")]
pub struct ServiceEndpoint {
	server_url: Url,
	server_id: Url,
}
impl ServiceEndpoint {
	/// Creates a new builder.
	pub fn builder() -> ServiceEndpointBuilder {
		ServiceEndpointBuilder::default()
	}

	/// Validates and wraps already-parsed URLs.
	pub fn new(server_url: Url, server_id: Url) -> Result<Self, ServiceEndpointError> {
		Self::builder().server_url(server_url).server_id(server_id).build()
	}

	/// Parses and validates textual URLs.
	pub fn parse(server_url: &str, server_id: &str) -> Result<Self> {
		let server_url = Url::parse(server_url)
			.map_err(|source| ConfigError::InvalidEndpoint { field: "server_url", source })?;
		let server_id = Url::parse(server_id)
			.map_err(|source| ConfigError::InvalidEndpoint { field: "server_id", source })?;

		Ok(Self::new(server_url, server_id)?)
	}

	fn validate(&self, require_https: bool) -> Result<(), ServiceEndpointError> {
		validate_url("server_url", &self.server_url, require_https)?;
		validate_url("server_id", &self.server_id, require_https)?;

		Ok(())
	}
}
impl IdentityEndpoint for ServiceEndpoint {
	fn server_url(&self) -> &Url {
		&self.server_url
	}

	fn provider_identity_uri(&self) -> &Url {
		&self.server_id
	}
}

#[derive(Deserialize)]
struct RawServiceEndpoint {
	server_url: Url,
	server_id: Url,
}
impl TryFrom<RawServiceEndpoint> for ServiceEndpoint {
	type Error = ServiceEndpointError;

	fn try_from(raw: RawServiceEndpoint) -> Result<Self, Self::Error> {
		Self::new(raw.server_url, raw.server_id)
	}
}

/// Builder for [`ServiceEndpoint`] values.
#[derive(Debug, Default)]
pub struct ServiceEndpointBuilder {
	/// Endpoint the user agent is redirected to.
	pub server_url: Option<Url>,
	/// Provider-asserted identity URI.
	pub server_id: Option<Url>,
	/// Rejects plain-HTTP URLs when set.
	pub require_https: bool,
}
impl ServiceEndpointBuilder {
	/// Sets the server URL.
	pub fn server_url(mut self, url: Url) -> Self {
		self.server_url = Some(url);

		self
	}

	/// Sets the provider identity URI.
	pub fn server_id(mut self, url: Url) -> Self {
		self.server_id = Some(url);

		self
	}

	/// Rejects plain-HTTP URLs at build time.
	pub fn require_https(mut self, required: bool) -> Self {
		self.require_https = required;

		self
	}

	/// Consumes the builder and validates the resulting endpoint.
	pub fn build(self) -> Result<ServiceEndpoint, ServiceEndpointError> {
		let server_url = self.server_url.ok_or(ServiceEndpointError::MissingServerUrl)?;
		let server_id = self.server_id.ok_or(ServiceEndpointError::MissingServerId)?;
		let endpoint = ServiceEndpoint { server_url, server_id };

		endpoint.validate(self.require_https)?;

		Ok(endpoint)
	}
}

fn validate_url(
	field: &'static str,
	url: &Url,
	require_https: bool,
) -> Result<(), ServiceEndpointError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if require_https =>
			Err(ServiceEndpointError::InsecureEndpoint { field, url: url.to_string() }),
		"http" => Ok(()),
		_ => Err(ServiceEndpointError::UnsupportedScheme { field, url: url.to_string() }),
	}
}
