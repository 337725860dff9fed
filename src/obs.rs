//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `chartmetric.call` with the `call` (request
//!   kind), `method`, and `path` fields, plus a `debug!` event for every retry.
//! - Enable `metrics` to increment the `chartmetric_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`, and `chartmetric_retry_total` for
//!   every retry, labeled by `call`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, http::HttpMethod};

/// Runs `fut` inside its call span and records the attempt plus the final outcome.
pub async fn observe_call<T, Fut>(
	kind: CallKind,
	method: HttpMethod,
	path: &str,
	fut: Fut,
) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	record_call_outcome(kind, CallOutcome::Attempt);

	let result = instrument_call(kind, method, path, fut).await;
	let outcome = if result.is_ok() { CallOutcome::Success } else { CallOutcome::Failure };

	record_call_outcome(kind, outcome);

	result
}

/// Call kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Refresh-token exchange against `/token`.
	TokenFetch,
	/// Authenticated API request.
	Request,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::TokenFetch => "token_fetch",
			CallKind::Request => "request",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a call.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn observe_call_passes_result_through() {
		let ok = observe_call(CallKind::Request, HttpMethod::Get, "/charts", async { Ok(3) }).await;
		let err = observe_call::<(), _>(CallKind::TokenFetch, HttpMethod::Post, "/token", async {
			Err(Error::NotFound { reason: "fixture".into() })
		})
		.await;

		assert_eq!(ok.expect("Successful call should pass through."), 3);
		assert!(matches!(err, Err(Error::NotFound { .. })));
	}
}
