// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
	rate_limit::RateLimit,
	retry::RetryPolicy,
};

/// Errors raised while validating a [`ClientConfig`].
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ClientConfigError {
	/// Base URL could not be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Offending URL text.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Rate must be finite and at least [`RateLimit::MIN_PER_SECOND`].
	#[error("Rate limit must be at least one request per day, got {per_second} per second.")]
	InvalidRateLimit {
		/// Rejected rate.
		per_second: f64,
	},
	/// Burst must admit at least one request.
	#[error("Rate limit burst must be at least 1.")]
	ZeroBurst,
	/// At least one attempt is required.
	#[error("Retry attempts must be at least 1.")]
	ZeroRetryAttempts,
}

/// Builder for [`ClientConfig`] values.
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
	refresh_token: TokenSecret,
	base_url: String,
	rate_limit: RateLimit,
	retry: RetryPolicy,
	timeout: Duration,
}
impl ClientConfigBuilder {
	/// Creates a builder seeded with the production defaults.
	pub fn new(refresh_token: impl Into<TokenSecret>) -> Self {
		Self {
			refresh_token: refresh_token.into(),
			base_url: DEFAULT_BASE_URL.into(),
			rate_limit: RateLimit::default(),
			retry: RetryPolicy::default(),
			timeout: DEFAULT_TIMEOUT,
		}
	}

	/// Overrides the API root.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();

		self
	}

	/// Overrides rate and burst independently.
	pub fn rate_limit(mut self, limit: RateLimit) -> Self {
		self.rate_limit = limit;

		self
	}

	/// Allows `requests` per second with an equal burst.
	pub fn rate_limit_per_sec(self, requests: u32) -> Self {
		self.rate_limit(RateLimit::per_second(requests))
	}

	/// Overrides the total number of attempts per call (first call included).
	pub fn retry_attempts(mut self, attempts: u32) -> Self {
		self.retry.max_attempts = attempts;

		self
	}

	/// Overrides the fixed delay between attempts.
	pub fn retry_delay(mut self, delay: Duration) -> Self {
		self.retry.delay = delay;

		self
	}

	/// Overrides the transport timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Consumes the builder and validates the resulting config.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let base_url = Url::parse(&self.base_url)
			.map_err(|source| ClientConfigError::InvalidBaseUrl { url: self.base_url, source })?;

		validate_rate_limit(self.rate_limit)?;

		if self.retry.max_attempts == 0 {
			return Err(ClientConfigError::ZeroRetryAttempts);
		}

		Ok(ClientConfig {
			refresh_token: self.refresh_token,
			base_url,
			rate_limit: self.rate_limit,
			retry: self.retry,
			timeout: self.timeout,
		})
	}
}

fn validate_rate_limit(limit: RateLimit) -> Result<(), ClientConfigError> {
	if !limit.per_second.is_finite() || limit.per_second < RateLimit::MIN_PER_SECOND {
		return Err(ClientConfigError::InvalidRateLimit { per_second: limit.per_second });
	}
	if limit.burst == 0 {
		return Err(ClientConfigError::ZeroBurst);
	}

	Ok(())
}
