//! Counter emission for handshake flows.

// self
use crate::obs::{FlowKind, FlowOutcome};

/// Name of the counter incremented by [`record_flow_outcome`].
pub const FLOW_COUNTER: &str = "openid_handshake_flow_total";

#[cfg(test)]
thread_local! {
	static RECORDED: std::cell::RefCell<Vec<(FlowKind, FlowOutcome)>> =
		const { std::cell::RefCell::new(Vec::new()) };
}

/// Records a flow outcome via the global metrics recorder (when enabled).
///
/// The counter is labeled with `flow` (the [`FlowKind`] label) and `outcome`.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(test)]
	RECORDED.with_borrow_mut(|recorded| recorded.push((kind, outcome)));

	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			FLOW_COUNTER,
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Drains the outcomes recorded on the current thread.
#[cfg(test)]
pub(crate) fn take_recorded() -> Vec<(FlowKind, FlowOutcome)> {
	RECORDED.with_borrow_mut(std::mem::take)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn outcomes_are_recorded_in_call_order() {
		take_recorded();
		record_flow_outcome(FlowKind::CheckIdImmediate, FlowOutcome::Attempt);
		record_flow_outcome(FlowKind::CheckIdImmediate, FlowOutcome::Success);
		record_flow_outcome(FlowKind::DirectedIdentity, FlowOutcome::Failure);

		assert_eq!(take_recorded(), vec![
			(FlowKind::CheckIdImmediate, FlowOutcome::Attempt),
			(FlowKind::CheckIdImmediate, FlowOutcome::Success),
			(FlowKind::DirectedIdentity, FlowOutcome::Failure),
		]);
		assert!(take_recorded().is_empty(), "Draining must reset the thread's record.");
	}

	#[test]
	fn counter_labels_match_flow_names() {
		assert_eq!(FLOW_COUNTER, "openid_handshake_flow_total");
		assert_eq!(FlowKind::CheckIdSetup.as_str(), "checkid_setup");
		assert_eq!(FlowOutcome::Attempt.as_str(), "attempt");
	}
}
