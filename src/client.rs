//! Client handle that owns the transport, the token cache, and the rate limiter.
//!
//! A [`Client`] is cheap to clone: every clone shares the same configuration, bearer token, and
//! rate-limit bucket, so the configured request budget holds across all of them.

/// Token cache counters.
pub mod metrics;
pub mod request;

mod token;

pub use metrics::TokenMetrics;
pub use request::*;

// self
use crate::{
	_prelude::*,
	auth::TokenCache,
	config::ClientConfig,
	http::ApiHttpClient,
	rate_limit::RateLimiter,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type DefaultClient = Client<ReqwestHttpClient>;

/// Chartmetric API client.
///
/// Every outbound call, the token exchange included, passes through one rate limiter and is
/// retried by the configured policy when the API answers `429` or `503`.
pub struct Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Validated configuration shared by every clone.
	pub config: Arc<ClientConfig>,
	/// Counters describing token cache behavior.
	pub token_metrics: Arc<TokenMetrics>,
	token_cache: Arc<TokenCache>,
	rate_limiter: Arc<RateLimiter>,
}
impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit));

		Self {
			http_client: http_client.into(),
			config: Arc::new(config),
			token_metrics: Default::default(),
			token_cache: Default::default(),
			rate_limiter,
		}
	}

	/// Returns the shared token cache.
	pub fn token_cache(&self) -> &TokenCache {
		&self.token_cache
	}

	/// Returns the shared rate limiter.
	pub fn rate_limiter(&self) -> &RateLimiter {
		&self.rate_limiter
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client backed by a reqwest transport honoring [`ClientConfig::timeout`].
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(config.timeout)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			config: self.config.clone(),
			token_metrics: self.token_metrics.clone(),
			token_cache: self.token_cache.clone(),
			rate_limiter: self.rate_limiter.clone(),
		}
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("config", &self.config)
			.field("token_cached", &self.token_cache.current().is_some())
			.field("rate_limit", &self.rate_limiter.limit())
			.finish()
	}
}
