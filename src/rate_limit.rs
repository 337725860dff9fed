//! Client-side token-bucket rate limiting applied before every outbound HTTP call.
//!
//! The bucket refills continuously at [`RateLimit::per_second`] permits per second and holds at
//! most [`RateLimit::burst`] permits. Waiters reserve a permit up front, letting the bucket run
//! into deficit, so concurrent callers are served in arrival order.

// crates.io
use tokio::time::Instant;
// self
use crate::{
	_prelude::*,
	context::{CallContext, Cancelled},
};

/// Steady rate and burst capacity for the limiter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateLimit {
	/// Sustained permits per second.
	pub per_second: f64,
	/// Maximum permits available at once.
	pub burst: u32,
}
impl RateLimit {
	/// Slowest accepted rate: one request per day.
	pub const MIN_PER_SECOND: f64 = 1.0 / 86_400.0;

	/// Creates a limit with independent rate and burst values.
	pub const fn new(per_second: f64, burst: u32) -> Self {
		Self { per_second, burst }
	}

	/// Creates a limit where both the rate and the burst equal `requests`.
	///
	/// Matches the request-per-second budget advertised by Chartmetric API plans.
	pub fn per_second(requests: u32) -> Self {
		Self::new(f64::from(requests), requests)
	}
}
impl Default for RateLimit {
	fn default() -> Self {
		Self::per_second(1)
	}
}

/// Outcome of reserving a permit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
	/// A permit was available immediately.
	Allow,
	/// The reserved permit matures after the delay.
	Delay(Duration),
}

#[derive(Debug)]
struct Bucket {
	tokens: f64,
	updated_at: Instant,
}
impl Bucket {
	fn advance(&mut self, now: Instant, limit: RateLimit) {
		if now <= self.updated_at {
			return;
		}

		let elapsed = (now - self.updated_at).as_secs_f64();

		self.tokens = (self.tokens + elapsed * limit.per_second).min(f64::from(limit.burst));
		self.updated_at = now;
	}
}

/// Token-bucket limiter shared by every call issued through one client.
#[derive(Debug)]
pub struct RateLimiter {
	limit: RateLimit,
	bucket: Mutex<Bucket>,
}
impl RateLimiter {
	/// Creates a limiter whose bucket starts full.
	pub fn new(limit: RateLimit) -> Self {
		Self::new_at(limit, Instant::now())
	}

	fn new_at(limit: RateLimit, now: Instant) -> Self {
		let bucket = Bucket { tokens: f64::from(limit.burst), updated_at: now };

		Self { limit, bucket: Mutex::new(bucket) }
	}

	/// Returns the configured limit.
	pub fn limit(&self) -> RateLimit {
		self.limit
	}

	/// Blocks until a permit is available or the context ends.
	///
	/// Fails without sleeping when the context deadline falls before the permit matures. A
	/// reservation abandoned through cancellation is handed back to the bucket.
	pub async fn wait(&self, ctx: &CallContext) -> Result<(), Cancelled> {
		ctx.check()?;

		let now = Instant::now();
		let delay = match self.reserve_at(now) {
			RateLimitDecision::Allow => return Ok(()),
			RateLimitDecision::Delay(delay) => delay,
		};

		let matures_at = now.checked_add(delay);

		if ctx.deadline().is_some_and(|deadline| matures_at.is_none_or(|at| at > deadline)) {
			self.release_at(now);

			return Err(Cancelled::DeadlineExceeded);
		}

		ctx.sleep(delay).await.inspect_err(|_| self.release_at(Instant::now()))
	}

	/// Reserves one permit at `now`, reporting how long the caller must wait for it.
	pub fn reserve_at(&self, now: Instant) -> RateLimitDecision {
		let mut bucket = self.bucket.lock();

		bucket.advance(now, self.limit);
		bucket.tokens -= 1.0;

		if bucket.tokens >= 0.0 {
			RateLimitDecision::Allow
		} else {
			// A degenerate rate (zero or subnormal) saturates instead of overflowing.
			let delay = Duration::try_from_secs_f64(-bucket.tokens / self.limit.per_second)
				.unwrap_or(Duration::MAX);

			RateLimitDecision::Delay(delay)
		}
	}

	fn release_at(&self, now: Instant) {
		let mut bucket = self.bucket.lock();

		bucket.advance(now, self.limit);
		bucket.tokens = (bucket.tokens + 1.0).min(f64::from(self.limit.burst));
	}
}
