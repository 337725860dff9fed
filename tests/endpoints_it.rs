mod common;

// crates.io
use httpmock::prelude::*;
use time::Month;
// self
use chartmetric_client::{
	api::{
		ChartPlatform, Date, SpotifyTrackChartInterval, SpotifyTrackChartParams,
		SpotifyTrackChartType, TrackPlatform,
	},
	context::CallContext,
	error::Error,
};
use common::{build_client, mock_token};

#[tokio::test]
async fn spotify_track_chart_sends_typed_query() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let _token_mock = mock_token(&server).await;
	let chart_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/charts/spotify")
				.query_param("date", "2024-05-01")
				.query_param("country_code", "se")
				.query_param("type", "viral")
				.query_param("interval", "daily")
				.query_param("offset", "50");
			then.status(200).header("content-type", "application/json").body(
				r#"{"obj":{"length":2,"data":[{"name":"One","rank":51},{"name":"Two","rank":52}]}}"#,
			);
		})
		.await;
	let date = Date::from_calendar_date(2024, Month::May, 1).expect("Fixture date should be valid.");
	let params = SpotifyTrackChartParams::new(
		date,
		"se",
		SpotifyTrackChartType::Viral,
		SpotifyTrackChartInterval::Daily,
	)
	.offset(50);
	let rows = client
		.spotify_track_chart(&CallContext::new(), &params)
		.await
		.expect("Chart call should succeed.");

	assert_eq!(rows.iter().map(|row| row.rank).collect::<Vec<_>>(), vec![Some(51), Some(52)]);

	chart_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn chart_countries_without_filters() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let _token_mock = mock_token(&server).await;
	let countries_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/charts/shazam/countries");
			then.status(200).body(r#"{"obj":{"countries":["us","de"]}}"#);
		})
		.await;
	let countries = client
		.chart_countries(&CallContext::new(), ChartPlatform::Shazam, &Default::default())
		.await
		.expect("Countries call should succeed.");

	assert_eq!(countries, vec!["us", "de"]);

	countries_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn track_ids_reports_missing_tracks() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let _token_mock = mock_token(&server).await;
	let ids_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/track/spotify/nope/get-ids");
			then.status(200).body(r#"{"obj":[]}"#);
		})
		.await;
	let err = client
		.track_ids(&CallContext::new(), TrackPlatform::Spotify, "nope")
		.await
		.expect_err("Empty lookup should fail.");

	assert!(matches!(err, Error::NotFound { .. }));

	ids_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let _token_mock = mock_token(&server).await;
	let _ids_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/track/isrc/USRC17607839/get-ids");
			then.status(200).body(r#"{"obj":[{"chartmetric_ids":"not-a-list"}]}"#);
		})
		.await;
	let err = client
		.track_ids(&CallContext::new(), TrackPlatform::Isrc, "USRC17607839")
		.await
		.expect_err("Malformed payload should fail.");

	match err.root() {
		Error::Decode { source } => assert_eq!(source.path().to_string(), "obj[0].chartmetric_ids"),
		other => panic!("Unexpected error: {other:?}."),
	}
}
