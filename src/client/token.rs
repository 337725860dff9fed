//! Bearer token resolution: cache lookup with a singleflight refresh-token exchange on miss.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenRequest, TokenResponse, TokenSecret, TokenSource},
	client::{Client, request},
	context::CallContext,
	error::Phase,
	http::{ApiHttpClient, ApiRequest, HttpMethod},
	obs::{self, CallKind},
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Returns a bearer token valid right now, exchanging the refresh token when the cached one
	/// is missing or expired.
	///
	/// Concurrent callers that find the cache stale share a single exchange. A failed exchange
	/// leaves the previous token (if any) in place.
	pub async fn resolve_access_token(&self, ctx: &CallContext) -> Result<TokenSecret> {
		let (value, source) = self
			.token_cache
			.get_or_refresh(|| self.fetch_access_token(ctx))
			.await
			.inspect_err(|_| self.token_metrics.record_failure())?;

		match source {
			TokenSource::Cached => self.token_metrics.record_reuse(),
			TokenSource::Fetched => self.token_metrics.record_fetch(),
		}

		Ok(value)
	}

	async fn fetch_access_token(&self, ctx: &CallContext) -> Result<AccessToken> {
		const KIND: CallKind = CallKind::TokenFetch;

		let fetch = async {
			let exchange = self.token_request()?;
			let body = self
				.config
				.retry
				.run_observed(
					ctx,
					|| self.dispatch(ctx, exchange.clone()),
					Error::is_retryable,
					|attempt, err| request::on_retry(KIND, attempt, err),
				)
				.await
				.map_err(|e| e.in_phase(Phase::FetchToken))?;
			let response = request::decode_json::<TokenResponse>(&body)
				.map_err(|e| e.in_phase(Phase::Decode))?;

			AccessToken::from_response(response, OffsetDateTime::now_utc())
		};

		obs::observe_call(KIND, HttpMethod::Post, "/token", fetch).await
	}

	fn token_request(&self) -> Result<ApiRequest> {
		let payload = TokenRequest { refresh_token: self.config.refresh_token.expose() };
		let body = serde_json::to_vec(&payload).map_err(|source| Error::Encode { source })?;
		let url = self.config.endpoint("/token")?;

		Ok(ApiRequest { method: HttpMethod::Post, url, bearer: None, body })
	}
}
