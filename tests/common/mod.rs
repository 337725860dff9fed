// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
// self
use chartmetric_client::{client::DefaultClient, config::ClientConfig, rate_limit::RateLimit};

pub const REFRESH_TOKEN: &str = "it-refresh-token";
pub const ACCESS_TOKEN: &str = "it-access-token";

pub fn build_client(server: &MockServer) -> DefaultClient {
	let config = ClientConfig::builder(REFRESH_TOKEN)
		.base_url(server.url("/api"))
		.rate_limit(RateLimit::new(100.0, 100))
		.retry_delay(Duration::from_millis(10))
		.build()
		.expect("Integration client config should build.");

	DefaultClient::new(config).expect("Integration reqwest client should build.")
}

pub async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/token")
				.header("content-type", "application/json")
				.json_body(serde_json::json!({ "refreshtoken": REFRESH_TOKEN }));
			then.status(200).header("content-type", "application/json").body(format!(
				"{{\"token\":\"{ACCESS_TOKEN}\",\"expires_in\":3600,\"refresh_token\":\"rotated\",\"scope\":\"api\"}}"
			));
		})
		.await
}
