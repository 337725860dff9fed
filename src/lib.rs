//! Typed async client for the Chartmetric music-analytics API: cached bearer tokens,
//! client-side rate limiting, and transient-failure retries composed into one request pipeline.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod obs;
pub mod rate_limit;
pub mod retry;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		client::Client,
		config::ClientConfig,
		error::TransportError,
		http::{ApiHttpClient, ApiRequest, ApiResponse, ResponseMetadata, TransportFuture},
		rate_limit::RateLimit,
	};

	/// Token endpoint payload handed out by [`ScriptedHttpClient::token`].
	pub const TOKEN_BODY: &str = r#"{"token":"scripted-token","expires_in":3600}"#;

	/// Client type alias used by scripted-transport tests.
	pub type ScriptedClient = Client<ScriptedHttpClient>;

	/// Canned reply returned by [`ScriptedHttpClient`].
	#[derive(Clone, Debug)]
	pub struct ScriptedReply {
		/// HTTP status code.
		pub status: u16,
		/// Raw response body.
		pub body: String,
	}
	impl ScriptedReply {
		/// Builds a reply with the provided status and body.
		pub fn new(status: u16, body: impl Into<String>) -> Self {
			Self { status, body: body.into() }
		}
	}

	/// In-process transport that replays queued replies and records every request it receives.
	///
	/// Requests to `/token` are answered from the token queue; every other path drains the API
	/// queue. An exhausted queue answers with `500` so misconfigured tests fail loudly.
	#[derive(Debug, Default)]
	pub struct ScriptedHttpClient {
		token_replies: Mutex<VecDeque<ScriptedReply>>,
		api_replies: Mutex<VecDeque<ScriptedReply>>,
		sent: Mutex<Vec<(ApiRequest, tokio::time::Instant)>>,
	}
	impl ScriptedHttpClient {
		/// Queues a token endpoint reply.
		pub fn token(self, reply: ScriptedReply) -> Self {
			self.token_replies.lock().push_back(reply);

			self
		}

		/// Queues an API reply.
		pub fn reply(self, reply: ScriptedReply) -> Self {
			self.api_replies.lock().push_back(reply);

			self
		}

		/// Queues an API reply with the provided status and body.
		pub fn respond(self, status: u16, body: &str) -> Self {
			self.reply(ScriptedReply::new(status, body))
		}

		/// Returns every request observed so far, paired with the (tokio) instant it was sent.
		pub fn sent(&self) -> Vec<(ApiRequest, tokio::time::Instant)> {
			self.sent.lock().clone()
		}

		/// Counts the requests sent to the provided path suffix.
		pub fn calls_to(&self, path: &str) -> usize {
			self.sent
				.lock()
				.iter()
				.filter(|(request, _)| request.url.path().ends_with(path))
				.count()
		}
	}
	impl ApiHttpClient for ScriptedHttpClient {
		fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
			Box::pin(async move {
				let queue = if request.url.path().ends_with("/token") {
					&self.token_replies
				} else {
					&self.api_replies
				};
				let reply = queue
					.lock()
					.pop_front()
					.unwrap_or_else(|| ScriptedReply::new(500, "scripted transport exhausted"));

				self.sent.lock().push((request, tokio::time::Instant::now()));

				Ok::<_, TransportError>(ApiResponse {
					metadata: ResponseMetadata { status: reply.status, retry_after: None },
					body: reply.body.into_bytes(),
				})
			})
		}
	}

	/// Builds a config pointed at a fake host with a permissive rate limit and no retry delay.
	pub fn scripted_config(retry_attempts: u32) -> ClientConfig {
		ClientConfig::builder("scripted-refresh-token")
			.base_url("https://chartmetric.test/api")
			.rate_limit(RateLimit::new(1_000.0, 1_000))
			.retry_attempts(retry_attempts)
			.retry_delay(Duration::ZERO)
			.build()
			.expect("Scripted client config should build.")
	}

	/// Wraps the transport in a client built from `config`.
	pub fn scripted_client(
		config: ClientConfig,
		transport: ScriptedHttpClient,
	) -> (ScriptedClient, Arc<ScriptedHttpClient>) {
		let transport = Arc::new(transport);

		(Client::with_http_client(config, transport.clone()), transport)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use tokio_util::sync::CancellationToken;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
