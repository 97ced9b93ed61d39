//! Optional observability helpers for handshake operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `openid_handshake.flow` with the `flow`
//!   (operation) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `openid_handshake_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, openid::CheckIdMode};

/// Handshake operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// `checkid_immediate` redirect construction.
	CheckIdImmediate,
	/// `checkid_setup` redirect construction.
	CheckIdSetup,
	/// Directed-identity resolution on the provider side.
	DirectedIdentity,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::CheckIdImmediate => "checkid_immediate",
			FlowKind::CheckIdSetup => "checkid_setup",
			FlowKind::DirectedIdentity => "directed_identity",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl From<CheckIdMode> for FlowKind {
	fn from(mode: CheckIdMode) -> Self {
		match mode {
			CheckIdMode::Immediate => FlowKind::CheckIdImmediate,
			CheckIdMode::Setup => FlowKind::CheckIdSetup,
		}
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a handshake helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
