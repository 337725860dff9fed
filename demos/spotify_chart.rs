//! Demonstrates fetching a Spotify track chart with the default reqwest transport against a local
//! mock of the Chartmetric API. The second call reuses the cached bearer token.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use time::Month;
// self
use chartmetric_client::{
	api::{Date, SpotifyTrackChartInterval, SpotifyTrackChartParams, SpotifyTrackChartType},
	client::DefaultClient,
	config::ClientConfig,
	context::CallContext,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"token\":\"demo-access\",\"expires_in\":3600}");
		})
		.await;
	let chart_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/charts/spotify")
				.header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				r#"{"obj":{"data":[{"name":"Espresso","rank":1,"artist_names":["Sabrina Carpenter"]}]}}"#,
			);
		})
		.await;
	let config = ClientConfig::builder("demo-refresh-token")
		.base_url(server.url("/api"))
		.rate_limit_per_sec(2)
		.build()?;
	let client = DefaultClient::new(config)?;
	let ctx = CallContext::new();
	let params = SpotifyTrackChartParams::new(
		Date::from_calendar_date(2024, Month::May, 1)?,
		"us",
		SpotifyTrackChartType::Regional,
		SpotifyTrackChartInterval::Daily,
	);

	for _ in 0..2 {
		for track in client.spotify_track_chart(&ctx, &params).await? {
			println!(
				"#{} {}.",
				track.rank.unwrap_or_default(),
				track.name.as_deref().unwrap_or("unknown")
			);
		}
	}

	println!(
		"Token fetches: {}, cache reuses: {}.",
		client.token_metrics.fetches(),
		client.token_metrics.reuses()
	);

	token_mock.assert_calls_async(1).await;
	chart_mock.assert_calls_async(2).await;

	Ok(())
}
