//! Per-client bearer token cache with serialized renewal.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenSecret},
};

/// Where a resolved bearer token came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenSource {
	/// The cached token was still valid.
	Cached,
	/// The token endpoint was called for a replacement.
	Fetched,
}

/// Holds the current [`AccessToken`] and decides between reuse and renewal.
///
/// Renewals are singleflight: callers that observe a missing or expired token queue on an async
/// guard and re-check the slot once they hold it, so a burst of callers shares one fetch.
#[derive(Debug, Default)]
pub struct TokenCache {
	slot: RwLock<Option<AccessToken>>,
	refresh_guard: AsyncMutex<()>,
}
impl TokenCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a clone of the cached token, expired or not.
	pub fn current(&self) -> Option<AccessToken> {
		self.slot.read().clone()
	}

	/// Returns the cached bearer value when it is still valid at `now`.
	pub fn valid_at(&self, now: OffsetDateTime) -> Option<TokenSecret> {
		self.slot
			.read()
			.as_ref()
			.filter(|token| !token.is_expired_at(now))
			.map(|token| token.value.clone())
	}

	/// Replaces the cached token wholesale.
	pub fn store(&self, token: AccessToken) {
		*self.slot.write() = Some(token);
	}

	/// Returns the cached token, or runs `refresh` to mint and store a new one.
	///
	/// A failed refresh leaves the cache untouched and the error is returned as is.
	pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<(TokenSecret, TokenSource)>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<AccessToken>>,
	{
		if let Some(value) = self.valid_at(OffsetDateTime::now_utc()) {
			return Ok((value, TokenSource::Cached));
		}

		let _singleflight = self.refresh_guard.lock().await;

		if let Some(value) = self.valid_at(OffsetDateTime::now_utc()) {
			return Ok((value, TokenSource::Cached));
		}

		let token = refresh().await?;
		let value = token.value.clone();

		self.store(token);

		Ok((value, TokenSource::Fetched))
	}
}
