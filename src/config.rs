//! Immutable client configuration assembled through [`ClientConfigBuilder`].

/// Validating builder for [`ClientConfig`].
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*, auth::TokenSecret, error::ConfigError, rate_limit::RateLimit, retry::RetryPolicy,
};

/// Production API root used when no override is supplied.
pub const DEFAULT_BASE_URL: &str = "https://api.chartmetric.com/api";
/// Transport timeout applied to every HTTP call by the default reqwest client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Validated settings shared by every call issued through one client.
#[derive(Clone)]
pub struct ClientConfig {
	/// Long-lived credential exchanged for bearer tokens.
	pub refresh_token: TokenSecret,
	/// API root; request paths are appended to it verbatim.
	pub base_url: Url,
	/// Client-side rate limit applied to every outbound call, token fetches included.
	pub rate_limit: RateLimit,
	/// Retry policy applied to token fetches and authenticated requests alike.
	pub retry: RetryPolicy,
	/// Per-request transport timeout.
	pub timeout: Duration,
}
impl ClientConfig {
	/// Starts a builder seeded with defaults and the provided refresh token.
	pub fn builder(refresh_token: impl Into<TokenSecret>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(refresh_token)
	}

	/// Joins `path` onto the base URL without collapsing the base path.
	pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let base = self.base_url.as_str().trim_end_matches('/');
		let raw =
			if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") };

		Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source })
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("refresh_token", &self.refresh_token)
			.field("base_url", &self.base_url.as_str())
			.field("rate_limit", &self.rate_limit)
			.field("retry", &self.retry)
			.field("timeout", &self.timeout)
			.finish()
	}
}
