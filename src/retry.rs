//! Fixed-delay retry wrapper shared by the token fetch and the authenticated request layers.

// self
use crate::{
	_prelude::*,
	context::{CallContext, Cancelled},
};

/// Bounded retry policy with a constant inter-attempt delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Total attempts, including the first call.
	pub max_attempts: u32,
	/// Delay between consecutive attempts.
	pub delay: Duration,
}
impl RetryPolicy {
	/// Attempts used when no override is supplied.
	pub const DEFAULT_ATTEMPTS: u32 = 3;
	/// Delay used when no override is supplied.
	pub const DEFAULT_DELAY: Duration = Duration::from_millis(700);

	/// Creates a policy with the provided attempt budget and delay.
	pub const fn new(max_attempts: u32, delay: Duration) -> Self {
		Self { max_attempts, delay }
	}

	/// Runs `op` until it succeeds, fails permanently, or exhausts the attempt budget.
	///
	/// The last error is returned unchanged so callers can still classify it. A context that
	/// ends before an attempt or during a delay yields the cancellation error instead.
	pub async fn run<T, E, F, Fut, P>(
		&self,
		ctx: &CallContext,
		op: F,
		is_retryable: P,
	) -> Result<T, E>
	where
		E: From<Cancelled>,
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<T, E>>,
		P: Fn(&E) -> bool,
	{
		self.run_observed(ctx, op, is_retryable, |_, _| {}).await
	}

	/// Same as [`RetryPolicy::run`], invoking `on_retry(attempt, &err)` before every delay.
	pub async fn run_observed<T, E, F, Fut, P, O>(
		&self,
		ctx: &CallContext,
		mut op: F,
		is_retryable: P,
		mut on_retry: O,
	) -> Result<T, E>
	where
		E: From<Cancelled>,
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<T, E>>,
		P: Fn(&E) -> bool,
		O: FnMut(u32, &E),
	{
		let max_attempts = self.max_attempts.max(1);
		let mut attempt = 1;

		loop {
			ctx.check()?;

			let err = match op().await {
				Ok(value) => return Ok(value),
				Err(err) => err,
			};

			if attempt >= max_attempts || !is_retryable(&err) {
				return Err(err);
			}

			on_retry(attempt, &err);
			ctx.sleep(self.delay).await?;

			attempt += 1;
		}
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_DELAY)
	}
}
