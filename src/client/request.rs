//! Authenticated request execution: resolve token, build, rate-limit, send, classify, retry.
//!
//! Every call runs the full sequence inside the configured retry policy, so a `429` or `503`
//! re-enters at token resolution and the retried send waits for its own rate-limit permit.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::Client,
	context::CallContext,
	error::{Phase, TransientError},
	http::{ApiHttpClient, ApiRequest, ApiResponse, HttpMethod, QueryParams},
	obs::{self, CallKind},
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Executes `method path` with an optional query and JSON body, returning the raw 2xx body.
	///
	/// Transient failures (`429`, `503`) are retried with the configured fixed delay. Any other
	/// failure ends the call; token resolution failures are labeled
	/// [`Phase::ResolveToken`] and never retried at this layer.
	pub async fn execute<B>(
		&self,
		ctx: &CallContext,
		method: HttpMethod,
		path: &str,
		query: Option<&QueryParams>,
		body: Option<&B>,
	) -> Result<Vec<u8>>
	where
		B: ?Sized + Serialize,
	{
		const KIND: CallKind = CallKind::Request;

		let attempts = self.config.retry.run_observed(
			ctx,
			|| self.request(ctx, method, path, query, body),
			Error::is_retryable,
			|attempt, err| on_retry(KIND, attempt, err),
		);

		obs::observe_call(KIND, method, path, attempts).await
	}

	/// Executes a `GET` and decodes the JSON response into `T`.
	pub async fn get<T>(
		&self,
		ctx: &CallContext,
		path: &str,
		query: Option<&QueryParams>,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let body = self.get_any(ctx, path, query).await?;

		decode_json(&body).map_err(|e| e.in_phase(Phase::Decode))
	}

	/// Executes a `GET` against any API path and returns the undecoded body.
	///
	/// Escape hatch for endpoints without a typed wrapper; the caller decodes the bytes.
	pub async fn get_any(
		&self,
		ctx: &CallContext,
		path: &str,
		query: Option<&QueryParams>,
	) -> Result<Vec<u8>> {
		self.execute::<()>(ctx, HttpMethod::Get, path, query, None).await
	}

	async fn request<B>(
		&self,
		ctx: &CallContext,
		method: HttpMethod,
		path: &str,
		query: Option<&QueryParams>,
		body: Option<&B>,
	) -> Result<Vec<u8>>
	where
		B: ?Sized + Serialize,
	{
		let bearer =
			self.resolve_access_token(ctx).await.map_err(|e| e.in_phase(Phase::ResolveToken))?;
		let request = self
			.build_request(method, path, query, body, bearer)
			.map_err(|e| e.in_phase(Phase::BuildRequest))?;

		self.dispatch(ctx, request).await
	}

	fn build_request<B>(
		&self,
		method: HttpMethod,
		path: &str,
		query: Option<&QueryParams>,
		body: Option<&B>,
		bearer: TokenSecret,
	) -> Result<ApiRequest>
	where
		B: ?Sized + Serialize,
	{
		let mut url = self.config.endpoint(path)?;

		if let Some(query) = query {
			query.apply(&mut url);
		}

		let body = match body {
			Some(body) => serde_json::to_vec(body).map_err(|source| Error::Encode { source })?,
			None => Vec::new(),
		};

		Ok(ApiRequest { method, url, bearer: Some(bearer), body })
	}

	/// Waits for a rate-limit permit, sends `request`, and classifies the response.
	pub(crate) async fn dispatch(&self, ctx: &CallContext, request: ApiRequest) -> Result<Vec<u8>> {
		self.rate_limiter
			.wait(ctx)
			.await
			.map_err(|e| Error::from(e).in_phase(Phase::RateLimit))?;

		let response = ctx
			.run(self.http_client.send(request))
			.await
			.map_err(Error::from)
			.and_then(|sent| sent.map_err(Error::from))
			.map_err(|e| e.in_phase(Phase::Send))?;

		classify(response)
	}
}

/// Maps a raw response onto the status contract: 2xx succeeds, `429`/`503` are transient, and
/// everything else is a permanent [`Error::Status`].
pub fn classify(response: ApiResponse) -> Result<Vec<u8>> {
	let ApiResponse { metadata, body } = response;

	match metadata.status {
		200..=299 => Ok(body),
		429 => Err(TransientError::RateLimited { retry_after: metadata.retry_after }.into()),
		503 => Err(TransientError::Unavailable { retry_after: metadata.retry_after }.into()),
		status => Err(Error::Status { status, body: String::from_utf8_lossy(&body).into_owned() }),
	}
}

/// Decodes a JSON body, reporting the path of the first mismatching field.
pub fn decode_json<T>(body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| Error::Decode { source })
}

pub(crate) fn on_retry(kind: CallKind, attempt: u32, err: &Error) {
	obs::record_retry(kind);
	obs::trace_retry(kind, attempt, err);
}

#[cfg(test)]
mod tests {
	// crates.io
	use tokio::time::Instant;
	// self
	use super::*;
	use crate::{
		_preludet::*, CancellationToken, config::ClientConfig, http::ResponseMetadata,
		rate_limit::RateLimit,
	};

	fn authorized() -> ScriptedHttpClient {
		ScriptedHttpClient::default().token(ScriptedReply::new(200, TOKEN_BODY))
	}

	#[tokio::test]
	async fn success_returns_body_with_bearer_and_content_type() {
		let (client, transport) =
			scripted_client(scripted_config(3), authorized().respond(200, "{\"obj\":[]}"));
		let query = QueryParams::new().with("since", "2024-01-01");
		let body = client
			.get_any(&CallContext::new(), "/artist/3380/stat/spotify", Some(&query))
			.await
			.expect("Call should succeed.");

		assert_eq!(body, b"{\"obj\":[]}");

		let sent = transport.sent();
		let (request, _) = sent.last().expect("API request should be recorded.");

		assert_eq!(
			request.url.as_str(),
			"https://chartmetric.test/api/artist/3380/stat/spotify?since=2024-01-01"
		);
		assert_eq!(request.method, HttpMethod::Get);
		assert_eq!(
			request.bearer.as_ref().map(TokenSecret::bearer_header),
			Some("Bearer scripted-token".into())
		);
		assert!(request.body.is_empty());
	}

	#[tokio::test]
	async fn json_body_is_serialized() {
		let (client, transport) = scripted_client(scripted_config(1), authorized().respond(201, "{}"));
		let payload = serde_json::json!({ "name": "watchlist" });

		client
			.execute(&CallContext::new(), HttpMethod::Post, "/playlist", None, Some(&payload))
			.await
			.expect("Call should succeed.");

		let sent = transport.sent();
		let (request, _) = sent.last().expect("API request should be recorded.");

		assert_eq!(request.body, br#"{"name":"watchlist"}"#);
	}

	#[tokio::test]
	async fn expired_token_is_refetched_before_next_call() {
		let transport = ScriptedHttpClient::default()
			.token(ScriptedReply::new(200, r#"{"token":"short-lived","expires_in":0}"#))
			.token(ScriptedReply::new(200, r#"{"token":"renewed","expires_in":3600}"#))
			.respond(200, "{}")
			.respond(200, "{}");
		let (client, transport) = scripted_client(scripted_config(1), transport);
		let ctx = CallContext::new();

		client.get_any(&ctx, "/charts", None).await.expect("First call should succeed.");
		client.get_any(&ctx, "/charts", None).await.expect("Second call should succeed.");

		let bearers = transport
			.sent()
			.into_iter()
			.filter(|(request, _)| !request.url.path().ends_with("/token"))
			.map(|(request, _)| request.bearer.map(|bearer| bearer.expose().to_owned()))
			.collect::<Vec<_>>();

		assert_eq!(transport.calls_to("/token"), 2);
		assert_eq!(bearers, vec![Some("short-lived".into()), Some("renewed".into())]);
		assert_eq!(client.token_metrics.fetches(), 2);
		assert_eq!(client.token_metrics.reuses(), 0);
	}

	#[tokio::test]
	async fn rate_limited_twice_then_success_within_three_attempts() {
		let (client, transport) = scripted_client(
			scripted_config(3),
			authorized().respond(429, "").respond(429, "").respond(200, "ok"),
		);
		let body = client
			.get_any(&CallContext::new(), "/charts", None)
			.await
			.expect("Third attempt should succeed.");

		assert_eq!(body, b"ok");
		assert_eq!(transport.calls_to("/charts"), 3);
		assert_eq!(transport.calls_to("/token"), 1);
	}

	#[tokio::test]
	async fn rate_limited_twice_with_two_attempts_returns_retryable_error() {
		let (client, transport) = scripted_client(
			scripted_config(2),
			authorized().respond(429, "").respond(429, "").respond(200, "ok"),
		);
		let err = client
			.get_any(&CallContext::new(), "/charts", None)
			.await
			.expect_err("Budget should be exhausted.");

		assert!(err.is_retryable());
		assert!(matches!(err, Error::Transient(TransientError::RateLimited { .. })));
		assert_eq!(transport.calls_to("/charts"), 2);
	}

	#[tokio::test]
	async fn unavailable_is_retried_like_rate_limited() {
		let (client, transport) = scripted_client(
			scripted_config(3),
			authorized().respond(503, "").respond(503, "").respond(200, "ok"),
		);

		client.get_any(&CallContext::new(), "/charts", None).await.expect("Third attempt should succeed.");

		assert_eq!(transport.calls_to("/charts"), 3);
	}

	#[tokio::test]
	async fn not_found_is_never_retried() {
		let (client, transport) = scripted_client(
			scripted_config(3),
			authorized().respond(404, "{\"error\":\"missing\"}").respond(200, "ok"),
		);
		let err = client
			.get_any(&CallContext::new(), "/track/0", None)
			.await
			.expect_err("404 should fail.");

		assert!(!err.is_retryable());
		assert_eq!(err.status(), Some(404));
		assert!(err.to_string().contains("{\"error\":\"missing\"}"));
		assert_eq!(transport.calls_to("/track/0"), 1);
	}

	#[tokio::test]
	async fn token_failure_is_labeled_and_not_retried_by_request_layer() {
		let (client, transport) = scripted_client(
			scripted_config(3),
			ScriptedHttpClient::default().token(ScriptedReply::new(401, "bad refresh token")),
		);
		let err = client
			.get_any(&CallContext::new(), "/charts", None)
			.await
			.expect_err("Token failure should fail the call.");

		assert_eq!(err.phase(), Some(Phase::ResolveToken));
		assert_eq!(err.status(), Some(401));
		assert_eq!(transport.calls_to("/token"), 1);
		assert_eq!(transport.calls_to("/charts"), 0);
	}

	#[tokio::test(start_paused = true)]
	async fn one_request_per_second_spaces_sends() {
		let config = ClientConfig::builder("refresh")
			.base_url("https://chartmetric.test/api")
			.rate_limit_per_sec(1)
			.retry_delay(Duration::ZERO)
			.build()
			.expect("Config should build.");
		let (client, transport) =
			scripted_client(config, authorized().respond(200, "a").respond(200, "b"));
		let ctx = CallContext::new();

		client.get_any(&ctx, "/charts", None).await.expect("First call should succeed.");
		client.get_any(&ctx, "/charts", None).await.expect("Second call should be delayed, not refused.");

		let sends = transport
			.sent()
			.into_iter()
			.filter(|(request, _)| request.url.path().ends_with("/charts"))
			.map(|(_, at)| at)
			.collect::<Vec<Instant>>();
		let gap = sends[1] - sends[0];

		assert!(gap >= Duration::from_secs(1) && gap < Duration::from_millis(1_010), "Gap was {gap:?}.");
	}

	#[tokio::test(start_paused = true)]
	async fn cancellation_during_retry_delay_fails_immediately() {
		let config = ClientConfig::builder("refresh")
			.base_url("https://chartmetric.test/api")
			.rate_limit(RateLimit::new(1_000.0, 1_000))
			.retry_attempts(5)
			.retry_delay(Duration::from_secs(60))
			.build()
			.expect("Config should build.");
		let (client, _) = scripted_client(config, authorized().respond(429, "").respond(429, ""));
		let token = CancellationToken::new();
		let ctx = CallContext::new().with_cancellation(token.clone());
		let started = Instant::now();
		let canceller = tokio::spawn(async move {
			tokio::time::sleep(Duration::from_millis(100)).await;
			token.cancel();
		});
		let err = client.get_any(&ctx, "/charts", None).await.expect_err("Cancelled call should fail.");

		canceller.await.expect("Canceller task should finish.");

		assert!(err.is_cancelled());
		assert!(started.elapsed() < Duration::from_secs(1));
	}

	#[tokio::test(start_paused = true)]
	async fn cancellation_during_rate_limit_wait_fails_immediately() {
		let config = ClientConfig::builder("refresh")
			.base_url("https://chartmetric.test/api")
			.rate_limit(RateLimit::new(0.01, 1))
			.build()
			.expect("Config should build.");
		let (client, transport) = scripted_client(config, authorized().respond(200, "ok"));
		let token = CancellationToken::new();
		let ctx = CallContext::new().with_cancellation(token.clone());
		let started = Instant::now();
		let canceller = tokio::spawn(async move {
			tokio::time::sleep(Duration::from_millis(100)).await;
			token.cancel();
		});
		// The token exchange takes the only permit; the API call then waits 100 s for the next.
		let err = client.get_any(&ctx, "/charts", None).await.expect_err("Cancelled call should fail.");

		canceller.await.expect("Canceller task should finish.");

		assert!(err.is_cancelled());
		assert_eq!(err.phase(), Some(Phase::RateLimit));
		assert!(started.elapsed() < Duration::from_secs(1));
		assert_eq!(transport.calls_to("/charts"), 0);
	}

	#[tokio::test]
	async fn concurrent_calls_share_one_token_exchange() {
		let (client, transport) = scripted_client(
			scripted_config(1),
			authorized().respond(200, "a").respond(200, "b").respond(200, "c"),
		);
		let ctx = CallContext::new();
		let (a, b, c) = tokio::join!(
			client.get_any(&ctx, "/charts", None),
			client.get_any(&ctx, "/charts", None),
			client.get_any(&ctx, "/charts", None),
		);

		for result in [a, b, c] {
			result.expect("Every concurrent call should succeed.");
		}

		assert_eq!(transport.calls_to("/token"), 1);
		assert_eq!(transport.calls_to("/charts"), 3);
	}

	#[tokio::test]
	async fn typed_get_reports_decode_path() {
		#[derive(Debug, Deserialize)]
		struct Envelope {
			#[allow(dead_code)]
			obj: Vec<u32>,
		}

		let (client, _) =
			scripted_client(scripted_config(1), authorized().respond(200, r#"{"obj":[1,"two"]}"#));
		let err = client
			.get::<Envelope>(&CallContext::new(), "/charts", None)
			.await
			.expect_err("Mismatched payload should fail.");

		assert_eq!(err.phase(), Some(Phase::Decode));

		match err.root() {
			Error::Decode { source } => assert_eq!(source.path().to_string(), "obj[1]"),
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	#[test]
	fn classify_maps_status_contract() {
		let response = |status| ApiResponse {
			metadata: ResponseMetadata { status, retry_after: Some(Duration::from_secs(2)) },
			body: b"body".to_vec(),
		};

		assert_eq!(classify(response(204)).expect("2xx should succeed."), b"body");

		let limited = classify(response(429)).expect_err("429 should fail.");

		assert!(limited.is_retryable());
		assert!(matches!(
			limited,
			Error::Transient(TransientError::RateLimited { retry_after: Some(d) }) if d == Duration::from_secs(2)
		));
		assert!(classify(response(503)).expect_err("503 should fail.").is_retryable());
		assert!(!classify(response(500)).expect_err("500 should fail.").is_retryable());
	}
}
