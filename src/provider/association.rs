//! Association handles negotiated with a provider ahead of the redirect.

// self
use crate::{_prelude::*, auth::AssociationHandle};

/// Previously negotiated shared secret, referenced by handle.
///
/// Only the handle travels in a redirect; the secret itself stays with whichever store created the
/// association.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Association {
	handle: AssociationHandle,
}
impl Association {
	/// Wraps a validated handle.
	pub fn new(handle: AssociationHandle) -> Self {
		Self { handle }
	}

	/// Validates `handle` and wraps it.
	pub fn from_handle(handle: impl AsRef<str>) -> Result<Self> {
		Ok(Self::new(AssociationHandle::new(handle)?))
	}

	/// Handle sent as `openid.assoc_handle`.
	pub fn handle(&self) -> &AssociationHandle {
		&self.handle
	}
}
impl From<AssociationHandle> for Association {
	fn from(handle: AssociationHandle) -> Self {
		Self::new(handle)
	}
}
