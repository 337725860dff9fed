//! Per-call cancellation context honored at every suspension point of the request pipeline.
//!
//! A [`CallContext`] bundles an optional [`CancellationToken`] with an optional deadline. The rate
//! limiter wait, the retry delay, and the transport send all race against it and resolve to
//! [`Cancelled`] as soon as either fires.

// crates.io
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
// self
use crate::_prelude::*;

/// Reasons a call stopped before it completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ThisError)]
pub enum Cancelled {
	/// The caller triggered the context's cancellation token.
	#[error("Call was cancelled by the caller.")]
	ByCaller,
	/// The context deadline passed (or would pass before the next permit).
	#[error("Call deadline exceeded.")]
	DeadlineExceeded,
}

/// Cancellation scope for a single logical call.
///
/// The default context never cancels. Contexts are cheap to clone; clones share the same
/// cancellation token.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
	cancel: Option<CancellationToken>,
	deadline: Option<Instant>,
}
impl CallContext {
	/// Creates a context without cancellation or deadline.
	pub fn new() -> Self {
		Self::default()
	}

	/// Attaches a cancellation token.
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancel = Some(token);

		self
	}

	/// Sets an absolute deadline (tokio clock).
	pub fn with_deadline(mut self, deadline: Instant) -> Self {
		self.deadline = Some(deadline);

		self
	}

	/// Sets a deadline relative to now.
	///
	/// A timeout too large to represent leaves the context without a deadline.
	pub fn with_timeout(self, timeout: Duration) -> Self {
		match Instant::now().checked_add(timeout) {
			Some(deadline) => self.with_deadline(deadline),
			None => self,
		}
	}

	/// Returns the configured deadline, if any.
	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	/// Fails fast when the context has already ended.
	pub fn check(&self) -> Result<(), Cancelled> {
		if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
			return Err(Cancelled::ByCaller);
		}
		if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
			return Err(Cancelled::DeadlineExceeded);
		}

		Ok(())
	}

	/// Drives `fut` to completion unless the context ends first.
	///
	/// The future is dropped (and therefore aborted) when the context wins the race.
	pub async fn run<F>(&self, fut: F) -> Result<F::Output, Cancelled>
	where
		F: Future,
	{
		self.check()?;

		let cancelled = async {
			match &self.cancel {
				Some(token) => token.cancelled().await,
				None => std::future::pending::<()>().await,
			}
		};
		let expired = async {
			match self.deadline {
				Some(deadline) => time::sleep_until(deadline).await,
				None => std::future::pending::<()>().await,
			}
		};

		tokio::select! {
			biased;

			_ = cancelled => Err(Cancelled::ByCaller),
			_ = expired => Err(Cancelled::DeadlineExceeded),
			output = fut => Ok(output),
		}
	}

	/// Sleeps for `duration` unless the context ends first.
	pub async fn sleep(&self, duration: Duration) -> Result<(), Cancelled> {
		if duration.is_zero() {
			return self.check();
		}

		self.run(time::sleep(duration)).await
	}
}
