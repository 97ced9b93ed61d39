//! Relying-party authentication request and redirect construction.

// self
use crate::{
	_prelude::*,
	auth::CorrelationToken,
	error::ConfigError,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	openid::{self, CheckIdMode},
	provider::{Association, IdentityEndpoint, ServiceEndpoint},
	query::{self, QueryArgs},
};

/// Pending OpenID authentication request awaiting a redirect.
///
/// The correlation token is written into the return-to query at redirect time rather than at
/// construction, so [`replace_token`](Self::replace_token) always takes effect and the return-to
/// value can never disagree with [`token`](Self::token).
///
/// The request is not internally synchronized: every mutator takes `&mut self`, and sharing a
/// request across threads requires the caller's own locking.
#[derive(Clone)]
pub struct AuthRequest<E = ServiceEndpoint>
where
	E: IdentityEndpoint,
{
	token: CorrelationToken,
	association: Option<Association>,
	endpoint: E,
	extra_args: QueryArgs,
	return_to_args: QueryArgs,
}
impl<E> AuthRequest<E>
where
	E: IdentityEndpoint,
{
	/// Creates a request for `endpoint`, signing against `association` when one is supplied.
	pub fn new(token: CorrelationToken, association: Option<Association>, endpoint: E) -> Self {
		Self {
			token,
			association,
			endpoint,
			extra_args: QueryArgs::new(),
			return_to_args: QueryArgs::new(),
		}
	}

	/// Correlation token embedded in the return-to URI.
	pub fn token(&self) -> &CorrelationToken {
		&self.token
	}

	/// Replaces the correlation token, returning the previous one.
	///
	/// Subsequent redirects carry the new token.
	pub fn replace_token(&mut self, token: CorrelationToken) -> CorrelationToken {
		std::mem::replace(&mut self.token, token)
	}

	/// Association whose handle accompanies the request, if any.
	pub fn association(&self) -> Option<&Association> {
		self.association.as_ref()
	}

	/// Provider endpoint the request targets.
	pub fn endpoint(&self) -> &E {
		&self.endpoint
	}

	/// Extension arguments appended after the core protocol fields.
	pub fn extra_args(&self) -> &QueryArgs {
		&self.extra_args
	}

	/// Mutable access to the extension arguments.
	pub fn extra_args_mut(&mut self) -> &mut QueryArgs {
		&mut self.extra_args
	}

	/// Sets an extension argument.
	pub fn with_extra_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_args.insert(key, value);

		self
	}

	/// Adds state to round-trip through the return-to URI.
	///
	/// The correlation-token key is reserved and rejected.
	pub fn add_return_to_arg(
		&mut self,
		key: impl Into<String>,
		value: impl Into<String>,
	) -> Result<&mut Self> {
		let key = key.into();

		if key == openid::RETURN_TO_TOKEN_KEY {
			return Err(Error::ReservedReturnToKey { key });
		}

		self.return_to_args.insert(key, value);

		Ok(self)
	}

	/// Builder-style variant of [`add_return_to_arg`](Self::add_return_to_arg).
	pub fn with_return_to_arg(
		mut self,
		key: impl Into<String>,
		value: impl Into<String>,
	) -> Result<Self> {
		self.add_return_to_arg(key, value)?;

		Ok(self)
	}

	/// Full return-to argument set: the correlation token first, then caller state.
	pub fn return_to_args(&self) -> QueryArgs {
		let mut args = QueryArgs::new();

		args.insert(openid::RETURN_TO_TOKEN_KEY, self.token.as_ref());
		args.extend(self.return_to_args.iter());

		args
	}

	/// Builds the redirect URL that sends the user agent to the provider.
	///
	/// `trust_root` is passed through verbatim. The result is deterministic for identical request
	/// state and arguments.
	pub fn create_redirect(&self, trust_root: &str, return_to: &Url, mode: CheckIdMode) -> Url {
		let kind = FlowKind::from(mode);
		let _guard = FlowSpan::new(kind, "create_redirect").entered();

		obs::record_flow_outcome(kind, FlowOutcome::Attempt);

		let mut return_to = return_to.clone();

		query::append_query_args(&mut return_to, &self.return_to_args());

		let mut core = QueryArgs::new();

		core.insert(openid::MODE, mode.as_str())
			.insert(openid::IDENTITY, self.endpoint.provider_identity_uri().as_str())
			.insert(openid::RETURN_TO, return_to.as_str())
			.insert(openid::TRUST_ROOT, trust_root);

		if let Some(assoc) = &self.association {
			core.insert(openid::ASSOC_HANDLE, assoc.handle().as_ref());
		}

		for (key, _) in &self.extra_args {
			if openid::CORE_KEYS.contains(&key) {
				obs::warn_shadowed_key(key);
			}
		}

		let mut redirect = self.endpoint.server_url().clone();

		query::append_query_args(&mut redirect, &core);
		query::append_query_args(&mut redirect, &self.extra_args);
		obs::record_flow_outcome(kind, FlowOutcome::Success);

		redirect
	}

	/// Parses textual inputs and delegates to [`create_redirect`](Self::create_redirect).
	///
	/// Fails without producing a URL when `return_to` is malformed or `mode` is not a known
	/// `checkid` literal. Input rejected here is not counted as a flow attempt.
	pub fn create_redirect_from_str(
		&self,
		trust_root: &str,
		return_to: &str,
		mode: &str,
	) -> Result<Url> {
		let mode = mode.parse::<CheckIdMode>()?;
		let return_to =
			Url::parse(return_to).map_err(|source| ConfigError::InvalidReturnTo { source })?;

		Ok(self.create_redirect(trust_root, &return_to, mode))
	}
}
impl<E> Debug for AuthRequest<E>
where
	E: IdentityEndpoint,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthRequest")
			.field("token", &self.token)
			.field("association", &self.association)
			.field("server_url", &self.endpoint.server_url().as_str())
			.field("identity", &self.endpoint.provider_identity_uri().as_str())
			.field("extra_args", &self.extra_args)
			.field("return_to_args", &self.return_to_args)
			.finish()
	}
}
