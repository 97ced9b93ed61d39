//! OpenID protocol literals and the `checkid` mode selector.

// self
use crate::_prelude::*;

/// Query key carrying the request mode.
pub const MODE: &str = "openid.mode";
/// Query key carrying the provider-side identity URI.
pub const IDENTITY: &str = "openid.identity";
/// Query key carrying the serialized return-to URI.
pub const RETURN_TO: &str = "openid.return_to";
/// Query key carrying the relying party's trust root.
pub const TRUST_ROOT: &str = "openid.trust_root";
/// Query key carrying the association handle.
pub const ASSOC_HANDLE: &str = "openid.assoc_handle";
/// Return-to query key under which the correlation token round-trips.
pub const RETURN_TO_TOKEN_KEY: &str = "token";

/// Keys the redirect builder always owns; extension args reusing them are appended after.
pub const CORE_KEYS: [&str; 5] = [MODE, IDENTITY, RETURN_TO, TRUST_ROOT, ASSOC_HANDLE];

/// Whether the provider may interact with the user before answering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckIdMode {
	/// Provider must answer without user interaction.
	#[serde(rename = "checkid_immediate")]
	Immediate,
	/// Provider may run an interactive flow.
	#[default]
	#[serde(rename = "checkid_setup")]
	Setup,
}
impl CheckIdMode {
	/// Returns the wire literal sent as `openid.mode`.
	pub const fn as_str(self) -> &'static str {
		match self {
			CheckIdMode::Immediate => "checkid_immediate",
			CheckIdMode::Setup => "checkid_setup",
		}
	}
}
impl Display for CheckIdMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for CheckIdMode {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"checkid_immediate" => Ok(CheckIdMode::Immediate),
			"checkid_setup" => Ok(CheckIdMode::Setup),
			other => Err(Error::UnrecognizedMode { value: other.to_owned() }),
		}
	}
}
