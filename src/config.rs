//! Relying-party configuration applied when building redirects.

// self
use crate::{
	_prelude::*,
	error::{ConfigError, decode_json},
	flows::AuthRequest,
	openid::CheckIdMode,
	provider::IdentityEndpoint,
};

/// Static settings a relying party applies to every authentication request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelyingPartyConfig {
	/// Trust root (realm) sent verbatim as `openid.trust_root`.
	pub trust_root: String,
	/// Base return-to URI the provider sends the user agent back to.
	pub return_to: Url,
	/// Mode used when the caller does not pick one; defaults to `checkid_setup`.
	#[serde(default)]
	pub mode: CheckIdMode,
}
impl RelyingPartyConfig {
	/// Creates a configuration using the default `checkid_setup` mode.
	pub fn new(trust_root: impl Into<String>, return_to: Url) -> Self {
		Self { trust_root: trust_root.into(), return_to, mode: CheckIdMode::default() }
	}

	/// Overrides the default mode.
	pub fn with_mode(mut self, mode: CheckIdMode) -> Self {
		self.mode = mode;

		self
	}

	/// Decodes and validates a JSON configuration document.
	pub fn from_json_str(payload: &str) -> Result<Self> {
		let config: Self = decode_json(payload)?;

		config.validate()?;

		Ok(config)
	}

	/// Checks the settings the redirect relies on.
	///
	/// The trust root is only required to be non-empty; its relationship to the return-to URI is
	/// left to the provider.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.trust_root.is_empty() {
			return Err(ConfigError::EmptyTrustRoot);
		}
		if !matches!(self.return_to.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedReturnTo { url: self.return_to.to_string() });
		}

		Ok(())
	}

	/// Builds the redirect for `request` with the configured mode.
	pub fn redirect_for<E>(&self, request: &AuthRequest<E>) -> Url
	where
		E: IdentityEndpoint,
	{
		self.redirect_with_mode(request, self.mode)
	}

	/// Builds the redirect for `request` with an explicit mode.
	pub fn redirect_with_mode<E>(&self, request: &AuthRequest<E>, mode: CheckIdMode) -> Url
	where
		E: IdentityEndpoint,
	{
		request.create_redirect(&self.trust_root, &self.return_to, mode)
	}
}
