//! Demonstrates plugging a custom [`ApiHttpClient`] into [`Client::with_http_client`].
//!
//! The canned transport answers the token exchange, throttles the first API call with `429`, and
//! then serves a TikTok chart, so the client's retry loop is visible without any network access.

// std
use std::{
	sync::atomic::{AtomicU32, Ordering},
	time::Duration,
};
// crates.io
use color_eyre::Result;
// self
use chartmetric_client::{
	api::{Date, TikTokChartInterval, TikTokChartParams, TikTokChartType},
	client::Client,
	config::ClientConfig,
	context::CallContext,
	http::{ApiHttpClient, ApiRequest, ApiResponse, ResponseMetadata, TransportFuture},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::builder("demo-refresh-token")
		.retry_attempts(3)
		.retry_delay(Duration::from_millis(50))
		.build()?;
	let client = <Client<CannedHttpClient>>::with_http_client(config, CannedHttpClient::default());
	let params = TikTokChartParams::new(TikTokChartType::Tracks, Date::today_utc())
		.interval(TikTokChartInterval::Weekly);
	let entries = client.tiktok_chart(&CallContext::new(), &params).await?;

	println!(
		"Fetched {} chart entries after {} API attempts.",
		entries.len(),
		client.http_client.api_calls.load(Ordering::SeqCst)
	);

	Ok(())
}

#[derive(Debug, Default)]
struct CannedHttpClient {
	api_calls: AtomicU32,
}
impl ApiHttpClient for CannedHttpClient {
	fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			println!("{} {}.", request.method, request.url.path());

			if request.url.path().ends_with("/token") {
				return Ok(reply(200, r#"{"token":"canned-access","expires_in":3600}"#));
			}

			match self.api_calls.fetch_add(1, Ordering::SeqCst) {
				0 => Ok(reply(429, "")),
				_ => Ok(reply(200, r#"{"obj":{"data":[{"name":"Canned","rank":1}]}}"#)),
			}
		})
	}
}

fn reply(status: u16, body: &str) -> ApiResponse {
	ApiResponse {
		metadata: ResponseMetadata { status, retry_after: None },
		body: body.as_bytes().to_vec(),
	}
}
