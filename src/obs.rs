//! Optional observability around connector flows.
//!
//! Every flow runs through [`observe`], which counts the attempt and its outcome and, when the
//! `tracing` feature is enabled, wraps the flow future in a span. The shims compile to
//! passthroughs when both features are disabled.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `hubspot_connect.flow` with the `flow`
//!   (operation) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `hubspot_connect_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

// self
use crate::_prelude::*;

/// Connector operations observed by the flows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization initiator producing the authorize URL.
	Authorize,
	/// Redirect callback completing the token exchange.
	Callback,
	/// Single-shot credential consumption.
	Credentials,
	/// Contact fetch + normalization.
	Items,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorize => "authorize",
			FlowKind::Callback => "callback",
			FlowKind::Credentials => "credentials",
			FlowKind::Items => "items",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a connector operation.
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

/// Drives a flow future with attempt/outcome accounting and an optional tracing span.
///
/// The result passes through untouched; observation never alters flow semantics.
pub(crate) async fn observe<T, Fut>(kind: FlowKind, stage: &'static str, flow: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	record(kind, FlowOutcome::Attempt);

	#[cfg(feature = "tracing")]
	let flow = {
		use tracing::Instrument;

		flow.instrument(tracing::info_span!("hubspot_connect.flow", flow = kind.as_str(), stage))
	};
	#[cfg(not(feature = "tracing"))]
	let _ = stage;

	let result = flow.await;

	match &result {
		Ok(_) => record(kind, FlowOutcome::Success),
		Err(_) => record(kind, FlowOutcome::Failure),
	}

	result
}

fn record(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"hubspot_connect_flow_total",
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

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(FlowKind::Authorize.to_string(), "authorize");
		assert_eq!(FlowKind::Callback.as_str(), "callback");
		assert_eq!(FlowKind::Credentials.as_str(), "credentials");
		assert_eq!(FlowKind::Items.as_str(), "items");
		assert_eq!(FlowOutcome::Attempt.to_string(), "attempt");
		assert_eq!(FlowOutcome::Success.as_str(), "success");
		assert_eq!(FlowOutcome::Failure.as_str(), "failure");
	}

	#[tokio::test]
	async fn observe_passes_results_through() {
		let ok = observe(FlowKind::Authorize, "observe_passes_results_through", async { Ok(7) })
			.await
			.expect("Successful flows should pass their value through.");

		assert_eq!(ok, 7);

		let err = observe(FlowKind::Credentials, "observe_passes_results_through", async {
			Err::<(), _>(Error::NoCredentials)
		})
		.await;

		assert!(matches!(err, Err(Error::NoCredentials)));
	}
}
