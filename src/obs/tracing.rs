// self
use crate::{_prelude::*, http::HttpMethod, obs::CallKind};

/// `fut` wrapped in its `chartmetric.call` span, or `fut` itself without the `tracing` feature.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// `fut` wrapped in its `chartmetric.call` span, or `fut` itself without the `tracing` feature.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Attaches a `chartmetric.call` span carrying `call`, `method`, and `path` to `fut`.
///
/// The span is entered on every poll, so nothing is held across `.await` points.
pub fn instrument_call<Fut>(
	kind: CallKind,
	method: HttpMethod,
	path: &str,
	fut: Fut,
) -> InstrumentedCall<Fut>
where
	Fut: Future,
{
	#[cfg(feature = "tracing")]
	{
		use tracing::Instrument;

		let span = tracing::info_span!(
			"chartmetric.call",
			call = kind.as_str(),
			method = method.as_str(),
			path
		);

		fut.instrument(span)
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, method, path);

		fut
	}
}

/// Emits a `debug!` event announcing that attempt `attempt` failed and will be retried.
pub fn trace_retry(kind: CallKind, attempt: u32, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			call = kind.as_str(),
			attempt,
			status = err.status(),
			error = %err,
			"retrying after transient failure"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, attempt, err);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::TransientError;

	#[tokio::test]
	async fn instrumented_call_yields_inner_output() {
		let output = instrument_call(CallKind::Request, HttpMethod::Get, "/charts", async {
			"charted"
		})
		.await;

		assert_eq!(output, "charted");
	}

	#[test]
	fn retry_event_accepts_transient_errors() {
		let err = Error::from(TransientError::RateLimited { retry_after: None });

		trace_retry(CallKind::TokenFetch, 1, &err);
	}
}
