//! Transport primitives for Chartmetric API calls.
//!
//! [`ApiHttpClient`] is the crate's only dependency on an HTTP stack. The request executor hands
//! it fully built [`ApiRequest`] values and classifies the returned [`ApiResponse`]; transports
//! never interpret status codes themselves. The default implementation wraps reqwest.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, auth::TokenSecret, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`ApiHttpClient::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to execute Chartmetric API calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by every clone
/// of a client. The returned future must be `Send` so calls can hop executors.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and returns the raw response, whatever its status.
	///
	/// Only failures that prevent a response from being read (DNS, TLS, timeouts, broken
	/// connections) are reported as errors.
	fn send(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// HTTP verbs used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the method token as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Patch => "PATCH",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully built outbound request.
///
/// Every request carries `Content-Type: application/json`; the body is empty when the call has
/// no payload.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: HttpMethod,
	/// Absolute URL, query string included.
	pub url: Url,
	/// Bearer credential for the `Authorization` header; absent for the token exchange.
	pub bearer: Option<TokenSecret>,
	/// JSON payload bytes.
	pub body: Vec<u8>,
}
impl ApiRequest {
	/// Content type sent with every request.
	pub const CONTENT_TYPE: &'static str = "application/json";
}

/// Status line details captured from a response.
///
/// Additional metadata fields may be added in future releases, so downstream code
/// should construct values using field names instead of struct update syntax.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}

/// Raw response handed back to the executor.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// Status line details.
	pub metadata: ResponseMetadata,
	/// Undecoded body bytes.
	pub body: Vec<u8>,
}

/// Query parameters with keys kept in sorted order.
///
/// Values are stringified through [`Display`], so numbers, dates, and enum labels share one path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);
impl QueryParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key` to `value`, replacing any previous value.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
		self.0.insert(key.into(), value.to_string());

		self
	}

	/// Sets `key` only when `value` is present.
	pub fn insert_opt<V>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self
	where
		V: Display,
	{
		if let Some(value) = value {
			self.insert(key, value);
		}

		self
	}

	/// Builder-style variant of [`QueryParams::insert`].
	pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
		self.insert(key, value);

		self
	}

	/// Returns the value stored for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// Returns `true` when no parameter is set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Iterates over the parameters in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Appends the parameters to `url` as a form-encoded query string.
	pub fn apply(&self, url: &mut Url) {
		if self.is_empty() {
			return;
		}

		url.query_pairs_mut().extend_pairs(self.iter());
	}
}
impl<K, V> FromIterator<(K, V)> for QueryParams
where
	K: Into<String>,
	V: Display,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut params = Self::new();

		for (key, value) in iter {
			params.insert(key, value);
		}

		params
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a reqwest client that aborts any call exceeding `timeout`.
	pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
		Ok(Self(ReqwestClient::builder().timeout(timeout).build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
				HttpMethod::Put => reqwest::Method::PUT,
				HttpMethod::Patch => reqwest::Method::PATCH,
				HttpMethod::Delete => reqwest::Method::DELETE,
			};
			let mut builder =
				self.0.request(method, request.url).header(CONTENT_TYPE, ApiRequest::CONTENT_TYPE);

			if let Some(bearer) = &request.bearer {
				builder = builder.header(AUTHORIZATION, bearer.bearer_header());
			}
			if !request.body.is_empty() {
				builder = builder.body(request.body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let retry_after = response
				.headers()
				.get(RETRY_AFTER)
				.and_then(|value| value.to_str().ok())
				.and_then(parse_retry_after);
			let body = response.bytes().await?.to_vec();

			Ok::<_, TransportError>(ApiResponse {
				metadata: ResponseMetadata { status, retry_after },
				body,
			})
		})
	}
}

/// Parses a `Retry-After` header value given either as delay seconds or as an HTTP date.
///
/// Dates in the past yield `None`.
pub fn parse_retry_after(raw: &str) -> Option<Duration> {
	let raw = raw.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::from_secs(secs));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Duration::try_from(delta).ok();
		}
	}

	None
}
