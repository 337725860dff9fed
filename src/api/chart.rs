//! Chart endpoints: available countries per platform plus Spotify, TikTok, and Apple Music charts.

// self
use crate::{
	_prelude::*,
	api::{ChartPage, Date, Envelope, Paging, date, nullable, wire_enum},
	client::Client,
	context::CallContext,
	http::{ApiHttpClient, QueryParams},
};

wire_enum! {
	/// Platforms that publish charts.
	ChartPlatform {
		/// Airplay radio charts.
		Airplay => "airplay",
		/// Amazon Music.
		Amazon => "amazon",
		/// Apple Music.
		AppleMusic => "applemusic",
		/// Deezer.
		Deezer => "deezer",
		/// iTunes store.
		ITunes => "itunes",
		/// Shazam.
		Shazam => "shazam",
		/// SoundCloud.
		SoundCloud => "soundcloud",
		/// Spotify.
		Spotify => "spotify",
		/// TikTok.
		TikTok => "tiktok",
		/// YouTube.
		YouTube => "youtube",
	}
}

wire_enum! {
	/// Chart family used to narrow the country list (`chart_type`).
	ChartCountriesType {
		/// Album charts.
		Albums => "albums",
		/// Artist charts.
		Artists => "artists",
		/// Track charts.
		Tracks => "tracks",
		/// Trend charts.
		Trends => "trends",
		/// Video charts.
		Videos => "videos",
	}
}

wire_enum! {
	/// Chart sub-type used to narrow the country list (`type`).
	ChartCountriesSubType {
		/// Daily chart.
		Daily => "daily",
		/// New album chart.
		NewAlbum => "new_album",
		/// New track chart.
		NewTrack => "new_track",
		/// Popular album chart.
		PopularAlbum => "popular_album",
		/// Popular track chart.
		PopularTrack => "popular_track",
		/// Top chart.
		Top => "top",
	}
}

wire_enum! {
	/// Chart cadence used to narrow the country list (`duration`).
	ChartCountriesDuration {
		/// Daily chart.
		Daily => "daily",
		/// Weekly chart.
		Weekly => "weekly",
	}
}

wire_enum! {
	/// Spotify track chart kinds.
	SpotifyTrackChartType {
		/// Most-streamed tracks.
		Regional => "regional",
		/// Viral 50.
		Viral => "viral",
	}
}

wire_enum! {
	/// Spotify track chart cadence.
	SpotifyTrackChartInterval {
		/// Daily chart.
		Daily => "daily",
		/// Weekly chart.
		Weekly => "weekly",
	}
}

wire_enum! {
	/// Metric ranking the Spotify artist chart.
	SpotifyArtistChartType {
		/// Monthly listeners.
		MonthlyListeners => "monthly_listeners",
		/// Spotify popularity index.
		Popularity => "popularity",
		/// Followers.
		Followers => "followers",
		/// Number of playlists featuring the artist.
		PlaylistCount => "playlist_count",
		/// Combined follower reach of those playlists.
		PlaylistReach => "playlist_reach",
	}
}

wire_enum! {
	/// Spotify artist chart cadence.
	SpotifyArtistChartInterval {
		/// Daily chart.
		Daily => "daily",
		/// Weekly chart.
		Weekly => "weekly",
		/// Monthly chart.
		Monthly => "monthly",
	}
}

wire_enum! {
	/// TikTok chart kinds (path segment).
	TikTokChartType {
		/// Sounds used in videos.
		Tracks => "tracks",
		/// Individual videos.
		Videos => "videos",
		/// Creators.
		Users => "users",
	}
}

wire_enum! {
	/// TikTok chart cadence.
	TikTokChartInterval {
		/// Daily chart.
		Daily => "daily",
		/// Weekly chart.
		Weekly => "weekly",
		/// All-time chart.
		AllTime => "all_time",
	}
}

wire_enum! {
	/// Metric ranking the TikTok user chart.
	TikTokUserChartType {
		/// Total likes.
		Likes => "likes",
		/// Followers.
		Followers => "followers",
	}
}

wire_enum! {
	/// Apple Music chart kinds (path segment).
	AppleMusicChartType {
		/// Album chart.
		Albums => "albums",
		/// Track chart.
		Tracks => "tracks",
		/// Music video chart.
		Videos => "videos",
	}
}

wire_enum! {
	/// Apple Music track chart flavor.
	AppleMusicTrackChartType {
		/// Daily chart.
		Daily => "daily",
		/// Top chart.
		Top => "top",
	}
}

/// Optional filters for [`Client::chart_countries`]. Different platforms accept different
/// combinations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChartCountriesParams {
	/// Sent as `chart_type`.
	pub chart_type: Option<ChartCountriesType>,
	/// Sent as `type`.
	pub sub_type: Option<ChartCountriesSubType>,
	/// Sent as `duration`.
	pub duration: Option<ChartCountriesDuration>,
}
impl ChartCountriesParams {
	fn query(&self) -> QueryParams {
		let mut params = QueryParams::new();

		params
			.insert_opt("chart_type", self.chart_type)
			.insert_opt("type", self.sub_type)
			.insert_opt("duration", self.duration);

		params
	}
}

/// Parameters for [`Client::spotify_track_chart`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpotifyTrackChartParams {
	/// Chart date.
	pub date: Date,
	/// ISO 3166-1 alpha-2 code, or `global`.
	pub country_code: String,
	/// Chart kind.
	pub chart_type: SpotifyTrackChartType,
	/// Chart cadence.
	pub interval: SpotifyTrackChartInterval,
	/// Records to skip.
	pub offset: Option<u32>,
	/// Return the most recent chart when `date` has none.
	pub latest: Option<bool>,
}
impl SpotifyTrackChartParams {
	/// Creates parameters with the required fields.
	pub fn new(
		date: Date,
		country_code: impl Into<String>,
		chart_type: SpotifyTrackChartType,
		interval: SpotifyTrackChartInterval,
	) -> Self {
		Self {
			date,
			country_code: country_code.into(),
			chart_type,
			interval,
			offset: None,
			latest: None,
		}
	}

	/// Sets the record offset.
	pub fn offset(mut self, offset: u32) -> Self {
		self.offset = Some(offset);

		self
	}

	/// Sets the `latest` flag.
	pub fn latest(mut self, latest: bool) -> Self {
		self.latest = Some(latest);

		self
	}

	fn query(&self) -> QueryParams {
		let mut params = QueryParams::new();

		params
			.insert("date", self.date)
			.insert("country_code", &self.country_code)
			.insert("type", self.chart_type)
			.insert("interval", self.interval)
			.insert_opt("offset", self.offset)
			.insert_opt("latest", self.latest);

		params
	}
}

/// Parameters for [`Client::spotify_artist_chart`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpotifyArtistChartParams {
	/// Chart date.
	pub date: Date,
	/// Ranking metric.
	pub chart_type: SpotifyArtistChartType,
	/// Chart cadence.
	pub interval: SpotifyArtistChartInterval,
	/// Records to skip.
	pub offset: Option<u32>,
	/// Return the most recent chart when `date` has none.
	pub latest: Option<bool>,
}
impl SpotifyArtistChartParams {
	/// Creates parameters with the required fields.
	pub fn new(
		date: Date,
		chart_type: SpotifyArtistChartType,
		interval: SpotifyArtistChartInterval,
	) -> Self {
		Self { date, chart_type, interval, offset: None, latest: None }
	}

	/// Sets the record offset.
	pub fn offset(mut self, offset: u32) -> Self {
		self.offset = Some(offset);

		self
	}

	/// Sets the `latest` flag.
	pub fn latest(mut self, latest: bool) -> Self {
		self.latest = Some(latest);

		self
	}

	fn query(&self) -> QueryParams {
		let mut params = QueryParams::new();

		params
			.insert("date", self.date)
			.insert("type", self.chart_type)
			.insert("interval", self.interval)
			.insert_opt("offset", self.offset)
			.insert_opt("latest", self.latest);

		params
	}
}

/// Parameters for [`Client::tiktok_chart`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TikTokChartParams {
	/// Chart kind (path segment).
	pub chart_type: TikTokChartType,
	/// Chart date.
	pub date: Date,
	/// Chart cadence.
	pub interval: Option<TikTokChartInterval>,
	/// Ranking metric for the user chart, sent as `type`.
	pub user_type: Option<TikTokUserChartType>,
	/// Limit and offset.
	pub paging: Paging,
	/// Return the most recent chart when `date` has none.
	pub latest: Option<bool>,
	/// Request the per-country chart instead of the global one.
	pub country_chart: Option<bool>,
	/// ISO 3166-1 alpha-2 code, sent as `code2`.
	pub country_code: Option<String>,
}
impl TikTokChartParams {
	/// Creates parameters with the required fields.
	pub fn new(chart_type: TikTokChartType, date: Date) -> Self {
		Self {
			chart_type,
			date,
			interval: None,
			user_type: None,
			paging: Paging::default(),
			latest: None,
			country_chart: None,
			country_code: None,
		}
	}

	/// Sets the chart cadence.
	pub fn interval(mut self, interval: TikTokChartInterval) -> Self {
		self.interval = Some(interval);

		self
	}

	/// Sets the user chart metric.
	pub fn user_type(mut self, user_type: TikTokUserChartType) -> Self {
		self.user_type = Some(user_type);

		self
	}

	/// Sets the limit and offset.
	pub fn paging(mut self, paging: Paging) -> Self {
		self.paging = paging;

		self
	}

	/// Sets the `latest` flag.
	pub fn latest(mut self, latest: bool) -> Self {
		self.latest = Some(latest);

		self
	}

	/// Selects the country chart for `country_code`.
	pub fn country(mut self, country_code: impl Into<String>) -> Self {
		self.country_chart = Some(true);
		self.country_code = Some(country_code.into());

		self
	}

	fn query(&self) -> QueryParams {
		let mut params = QueryParams::new();

		params
			.insert("date", self.date)
			.insert_opt("interval", self.interval)
			.insert_opt("type", self.user_type)
			.insert_opt("latest", self.latest)
			.insert_opt("country_chart", self.country_chart)
			.insert_opt("code2", self.country_code.as_deref());

		self.paging.apply(&mut params);

		params
	}
}

/// Parameters for [`Client::apple_music_chart`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppleMusicChartParams {
	/// Chart kind (path segment).
	pub chart_type: AppleMusicChartType,
	/// Track chart flavor, sent as `type`.
	pub track_type: Option<AppleMusicTrackChartType>,
	/// ISO 3166-1 alpha-2 code.
	pub country_code: String,
	/// City chart identifier.
	pub city_id: Option<String>,
	/// Chart date.
	pub date: Date,
	/// Genre filter.
	pub genre: Option<String>,
	/// Records to skip.
	pub offset: Option<u32>,
	/// Return the most recent chart when `date` has none.
	pub latest: Option<bool>,
}
impl AppleMusicChartParams {
	/// Creates parameters with the required fields.
	pub fn new(
		chart_type: AppleMusicChartType,
		country_code: impl Into<String>,
		date: Date,
	) -> Self {
		Self {
			chart_type,
			track_type: None,
			country_code: country_code.into(),
			city_id: None,
			date,
			genre: None,
			offset: None,
			latest: None,
		}
	}

	/// Sets the track chart flavor.
	pub fn track_type(mut self, track_type: AppleMusicTrackChartType) -> Self {
		self.track_type = Some(track_type);

		self
	}

	/// Narrows the chart to one city.
	pub fn city_id(mut self, city_id: impl Into<String>) -> Self {
		self.city_id = Some(city_id.into());

		self
	}

	/// Narrows the chart to one genre.
	pub fn genre(mut self, genre: impl Into<String>) -> Self {
		self.genre = Some(genre.into());

		self
	}

	/// Sets the record offset.
	pub fn offset(mut self, offset: u32) -> Self {
		self.offset = Some(offset);

		self
	}

	/// Sets the `latest` flag.
	pub fn latest(mut self, latest: bool) -> Self {
		self.latest = Some(latest);

		self
	}

	fn query(&self) -> QueryParams {
		let mut params = QueryParams::new();

		params
			.insert_opt("type", self.track_type)
			.insert("country_code", &self.country_code)
			.insert_opt("city_id", self.city_id.as_deref())
			.insert("date", self.date)
			.insert_opt("genre", self.genre.as_deref())
			.insert_opt("offset", self.offset)
			.insert_opt("latest", self.latest);

		params
	}
}

/// Position history attached to chart entries. Fields absent from a given chart stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RankStat {
	/// Rank at that point.
	pub rank: Option<i64>,
	/// Stream count (Spotify track charts).
	pub plays: Option<i64>,
	/// Video count (TikTok charts).
	pub posts: Option<i64>,
	/// Observation time.
	#[serde(rename = "timestp", default, deserialize_with = "date::timestamp::deserialize")]
	pub timestamp: Option<OffsetDateTime>,
	/// Observation date (artist charts).
	#[serde(default, with = "date::option")]
	pub date: Option<Date>,
}

/// One row of a Spotify track chart.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SpotifyChartTrack {
	/// Track title.
	pub name: Option<String>,
	/// International Standard Recording Code.
	pub isrc: Option<String>,
	/// Spotify track ID.
	pub spotify_track_id: Option<String>,
	/// Spotify album ID.
	pub spotify_album_id: Option<String>,
	/// Cover art URL.
	pub image_url: Option<String>,
	/// Spotify popularity index.
	pub spotify_popularity: Option<i64>,
	/// Chartmetric track ID.
	#[serde(rename = "cm_track")]
	pub chartmetric_track_id: Option<i64>,
	/// Chartmetric artist IDs.
	#[serde(rename = "cm_artist", default, deserialize_with = "nullable")]
	pub chartmetric_artist_ids: Vec<i64>,
	/// Artist display names.
	#[serde(default, deserialize_with = "nullable")]
	pub artist_names: Vec<String>,
	/// Artist names as listed on Spotify.
	#[serde(default, deserialize_with = "nullable")]
	pub spotify_artist_names: Vec<String>,
	/// Spotify artist IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub spotify_artist_ids: Vec<String>,
	/// Primary genre.
	#[serde(rename = "track_genre")]
	pub genre: Option<String>,
	/// Countries the track charts in.
	#[serde(rename = "code2s", default, deserialize_with = "nullable")]
	pub country_codes: Vec<String>,
	/// Track length in milliseconds.
	pub spotify_duration_ms: Option<i64>,
	/// Chartmetric album IDs.
	#[serde(rename = "album_ids", default, deserialize_with = "nullable")]
	pub chartmetric_album_ids: Vec<i64>,
	/// Album titles.
	#[serde(default, deserialize_with = "nullable")]
	pub album_names: Vec<String>,
	/// Album UPCs.
	#[serde(default, deserialize_with = "nullable")]
	pub album_upc: Vec<String>,
	/// Album labels.
	#[serde(default, deserialize_with = "nullable")]
	pub album_label: Vec<String>,
	/// Release dates of the albums.
	#[serde(default, deserialize_with = "date::option_seq::deserialize")]
	pub release_dates: Vec<Option<Date>>,
	/// Current rank.
	pub rank: Option<i64>,
	/// Rank on the previous chart.
	pub pre_rank: Option<i64>,
	/// Best rank reached.
	pub peak_rank: Option<i64>,
	/// When the best rank was reached.
	#[serde(default, deserialize_with = "date::timestamp::deserialize")]
	pub peak_date: Option<OffsetDateTime>,
	/// Charting periods so far.
	pub time_on_chart: Option<i64>,
	/// When the track entered the chart.
	#[serde(default, deserialize_with = "date::timestamp::deserialize")]
	pub added_at: Option<OffsetDateTime>,
	/// Chart kind.
	pub chart_type: Option<SpotifyTrackChartType>,
	/// Chart title.
	pub chart_name: Option<String>,
	/// Streams in the current period.
	pub current_plays: Option<i64>,
	/// Chart country.
	#[serde(rename = "code2")]
	pub country_code: Option<String>,
	/// Rank velocity.
	pub velocity: Option<f64>,
	/// Latest position snapshot.
	pub rank_stats: Option<RankStat>,
}

/// One row of a Spotify artist chart.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SpotifyChartArtist {
	/// Chartmetric artist ID.
	pub id: Option<i64>,
	/// Artist name.
	pub name: Option<String>,
	/// Artist image URL.
	pub image_url: Option<String>,
	/// International Standard Name Identifier.
	pub isni: Option<String>,
	/// Home country.
	#[serde(rename = "code2")]
	pub country_code: Option<String>,
	/// Hometown.
	pub hometown_city: Option<String>,
	/// Current city.
	pub current_city: Option<String>,
	/// Spotify followers.
	#[serde(rename = "sp_followers")]
	pub followers: Option<i64>,
	/// Spotify popularity index.
	#[serde(rename = "sp_popularity")]
	pub popularity: Option<i64>,
	/// Spotify monthly listeners.
	#[serde(rename = "sp_monthly_listeners")]
	pub monthly_listeners: Option<i64>,
	/// Deezer fans.
	pub deezer_fans: Option<i64>,
	/// Genre and mood tags.
	#[serde(default, deserialize_with = "nullable")]
	pub tags: Vec<String>,
	/// Spotify artist IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub spotify_artist_ids: Vec<String>,
	/// iTunes artist IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub itunes_artist_ids: Vec<i64>,
	/// Deezer artist IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub deezer_artist_ids: Vec<String>,
	/// Amazon artist IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub amazon_artist_ids: Vec<String>,
	/// Chartmetric artist rank.
	#[serde(rename = "cm_artist_rank")]
	pub chartmetric_artist_rank: Option<i64>,
	/// Chartmetric artist score.
	#[serde(rename = "cm_artist_score")]
	pub chartmetric_artist_score: Option<f64>,
	/// Date of the statistics.
	#[serde(rename = "timestp", default, with = "date::option")]
	pub timestamp: Option<Date>,
	/// Monthly playlist reach.
	pub monthly_playlist_reach: Option<i64>,
	/// Current rank.
	pub rank: Option<i64>,
	/// Rank movement label.
	pub change: Option<String>,
	/// Consecutive periods on the chart.
	pub streak: Option<i64>,
	/// When the best rank was reached.
	#[serde(default, with = "date::option")]
	pub peak_date: Option<Date>,
	/// Best rank reached.
	pub peak_rank: Option<i64>,
	/// Charting periods so far.
	pub time_on_chart: Option<i64>,
	/// Rank history.
	#[serde(rename = "rankStats", default, deserialize_with = "nullable")]
	pub rank_stats: Vec<RankStat>,
}

/// One row of a TikTok chart.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TikTokChartEntry {
	/// TikTok sound ID.
	pub tiktok_track_id: Option<String>,
	/// Sound or video title.
	pub name: Option<String>,
	/// International Standard Recording Code.
	pub isrc: Option<String>,
	/// Cover image URL.
	pub image_url: Option<String>,
	/// Chartmetric track ID.
	#[serde(rename = "cm_track")]
	pub chartmetric_track_id: Option<i64>,
	/// Artist names as listed on TikTok.
	#[serde(default, deserialize_with = "nullable")]
	pub tiktok_artist_names: Vec<String>,
	/// TikTok sound IDs for the same recording.
	#[serde(default, deserialize_with = "nullable")]
	pub tiktok_track_ids: Vec<String>,
	/// Chartmetric album IDs.
	#[serde(rename = "album_ids", default, deserialize_with = "nullable")]
	pub chartmetric_album_ids: Vec<i64>,
	/// Album titles.
	#[serde(default, deserialize_with = "nullable")]
	pub album_names: Vec<String>,
	/// Album UPCs.
	#[serde(default, deserialize_with = "nullable")]
	pub album_upc: Vec<String>,
	/// Album labels.
	#[serde(default, deserialize_with = "nullable")]
	pub album_label: Vec<String>,
	/// Release dates of the albums.
	#[serde(default, deserialize_with = "date::option_seq::deserialize")]
	pub release_dates: Vec<Option<Date>>,
	/// Current rank.
	pub rank: Option<i64>,
	/// Videos using the sound.
	pub posts: Option<i64>,
	/// Views in the current period.
	pub views: Option<i64>,
	/// Views in the previous period.
	#[serde(rename = "views_prev")]
	pub views_previous: Option<i64>,
	/// When the entry joined the chart.
	#[serde(default, deserialize_with = "date::timestamp::deserialize")]
	pub added_at: Option<OffsetDateTime>,
	/// Rank on the previous chart.
	pub pre_rank: Option<i64>,
	/// Best rank reached.
	pub peak_rank: Option<i64>,
	/// When the best rank was reached.
	#[serde(default, deserialize_with = "date::timestamp::deserialize")]
	pub peak_date: Option<OffsetDateTime>,
	/// Charting periods so far.
	pub time_on_chart: Option<i64>,
	/// Rank history.
	#[serde(rename = "rankStats", default, deserialize_with = "nullable")]
	pub rank_stats: Vec<RankStat>,
}

/// One row of an Apple Music chart.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AppleMusicChartEntry {
	/// Chart entry ID.
	pub id: Option<i64>,
	/// Title.
	pub name: Option<String>,
	/// International Standard Recording Code.
	pub isrc: Option<String>,
	/// iTunes album ID; sent as either a number or a string.
	#[serde(default)]
	pub itunes_album_id: serde_json::Value,
	/// Composer credit.
	pub composer_name: Option<String>,
	/// Cover art URL.
	pub image_url: Option<String>,
	/// Chartmetric track ID.
	#[serde(rename = "cm_track")]
	pub chartmetric_track_id: Option<i64>,
	/// Primary genre.
	#[serde(rename = "track_genre")]
	pub genre: Option<String>,
	/// Chartmetric artist IDs.
	#[serde(rename = "cm_artist", default, deserialize_with = "nullable")]
	pub chartmetric_artist_ids: Vec<i64>,
	/// Artist display names.
	#[serde(default, deserialize_with = "nullable")]
	pub artist_names: Vec<String>,
	/// iTunes artist IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub itunes_artist_ids: Vec<i64>,
	/// iTunes track IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub itunes_track_ids: Vec<String>,
	/// Storefronts carrying the release.
	#[serde(default, deserialize_with = "nullable")]
	pub storefronts: Vec<String>,
	/// Chartmetric album IDs.
	#[serde(rename = "album_ids", default, deserialize_with = "nullable")]
	pub chartmetric_album_ids: Vec<i64>,
	/// Album titles.
	#[serde(default, deserialize_with = "nullable")]
	pub album_names: Vec<String>,
	/// Album labels.
	#[serde(default, deserialize_with = "nullable")]
	pub album_label: Vec<String>,
	/// Release UPC.
	pub upc: Option<String>,
	/// Release dates of the albums.
	#[serde(default, deserialize_with = "date::option_seq::deserialize")]
	pub release_dates: Vec<Option<Date>>,
	/// Current rank.
	pub rank: Option<i64>,
	/// When the entry joined the chart.
	#[serde(default, deserialize_with = "date::timestamp::deserialize")]
	pub added_at: Option<OffsetDateTime>,
	/// Chart country code.
	#[serde(rename = "code2")]
	pub country_code: Option<String>,
	/// Chart country name.
	pub country: Option<String>,
	/// Rank velocity.
	pub velocity: Option<f64>,
	/// Rank on the previous chart.
	pub pre_rank: Option<i64>,
	/// Best rank reached.
	pub peak_rank: Option<i64>,
	/// When the best rank was reached.
	#[serde(default, deserialize_with = "date::timestamp::deserialize")]
	pub peak_date: Option<OffsetDateTime>,
	/// Charting periods so far.
	pub time_on_chart: Option<i64>,
	/// Latest position snapshot.
	pub rank_stats: Option<RankStat>,
}

#[derive(Debug, Deserialize)]
struct ChartCountries {
	#[serde(default, deserialize_with = "nullable")]
	countries: Vec<String>,
}

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists the countries with charts on `platform`.
	pub async fn chart_countries(
		&self,
		ctx: &CallContext,
		platform: ChartPlatform,
		params: &ChartCountriesParams,
	) -> Result<Vec<String>> {
		let path = format!("/charts/{platform}/countries");
		let envelope: Envelope<ChartCountries> = self.get(ctx, &path, Some(&params.query())).await?;

		Ok(envelope.obj.countries)
	}

	/// Fetches a Spotify track chart.
	pub async fn spotify_track_chart(
		&self,
		ctx: &CallContext,
		params: &SpotifyTrackChartParams,
	) -> Result<Vec<SpotifyChartTrack>> {
		self.chart_page(ctx, "/charts/spotify", params.query()).await
	}

	/// Fetches a Spotify artist chart.
	pub async fn spotify_artist_chart(
		&self,
		ctx: &CallContext,
		params: &SpotifyArtistChartParams,
	) -> Result<Vec<SpotifyChartArtist>> {
		self.chart_page(ctx, "/charts/spotify/artists", params.query()).await
	}

	/// Fetches a TikTok chart.
	pub async fn tiktok_chart(
		&self,
		ctx: &CallContext,
		params: &TikTokChartParams,
	) -> Result<Vec<TikTokChartEntry>> {
		let path = format!("/charts/tiktok/{}", params.chart_type);

		self.chart_page(ctx, &path, params.query()).await
	}

	/// Fetches an Apple Music chart.
	pub async fn apple_music_chart(
		&self,
		ctx: &CallContext,
		params: &AppleMusicChartParams,
	) -> Result<Vec<AppleMusicChartEntry>> {
		let path = format!("/charts/applemusic/{}", params.chart_type);

		self.chart_page(ctx, &path, params.query()).await
	}

	async fn chart_page<T>(
		&self,
		ctx: &CallContext,
		path: &str,
		query: QueryParams,
	) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		let envelope: Envelope<ChartPage<T>> = self.get(ctx, path, Some(&query)).await?;

		Ok(envelope.obj.data)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::{Month, macros::datetime};
	// self
	use super::*;
	use crate::_preludet::*;

	fn may_first() -> Date {
		Date::from_calendar_date(2024, Month::May, 1).expect("Fixture date should be valid.")
	}

	fn last_query(transport: &ScriptedHttpClient) -> (String, Option<String>) {
		let sent = transport.sent();
		let (request, _) = sent.last().expect("API request should be recorded.");

		(request.url.path().to_owned(), request.url.query().map(str::to_owned))
	}

	#[test]
	fn spotify_track_params_render_required_and_optional_fields() {
		let params = SpotifyTrackChartParams::new(
			may_first(),
			"us",
			SpotifyTrackChartType::Regional,
			SpotifyTrackChartInterval::Weekly,
		)
		.offset(200)
		.latest(true);

		assert_eq!(
			params.query().iter().collect::<Vec<_>>(),
			vec![
				("country_code", "us"),
				("date", "2024-05-01"),
				("interval", "weekly"),
				("latest", "true"),
				("offset", "200"),
				("type", "regional"),
			]
		);
	}

	#[test]
	fn tiktok_params_map_user_type_and_country() {
		let params = TikTokChartParams::new(TikTokChartType::Users, may_first())
			.interval(TikTokChartInterval::AllTime)
			.user_type(TikTokUserChartType::Likes)
			.paging(Paging::new().limit(10))
			.country("BR");
		let query = params.query();

		assert_eq!(query.get("type"), Some("likes"));
		assert_eq!(query.get("interval"), Some("all_time"));
		assert_eq!(query.get("code2"), Some("BR"));
		assert_eq!(query.get("country_chart"), Some("true"));
		assert_eq!(query.get("limit"), Some("10"));
		assert_eq!(query.get("offset"), None);
	}

	#[test]
	fn empty_country_filters_send_no_query() {
		assert!(ChartCountriesParams::default().query().is_empty());
	}

	#[tokio::test]
	async fn chart_countries_unwraps_envelope() {
		let (client, transport) = scripted_client(
			scripted_config(1),
			ScriptedHttpClient::default()
				.token(ScriptedReply::new(200, TOKEN_BODY))
				.respond(200, r#"{"obj":{"countries":["us","gb","global"]}}"#),
		);
		let params = ChartCountriesParams {
			chart_type: Some(ChartCountriesType::Tracks),
			sub_type: Some(ChartCountriesSubType::PopularTrack),
			duration: None,
		};
		let countries = client
			.chart_countries(&CallContext::new(), ChartPlatform::AppleMusic, &params)
			.await
			.expect("Countries should decode.");

		assert_eq!(countries, vec!["us", "gb", "global"]);
		assert_eq!(
			last_query(&transport),
			(
				"/api/charts/applemusic/countries".into(),
				Some("chart_type=tracks&type=popular_track".into())
			)
		);
	}

	#[tokio::test]
	async fn spotify_track_chart_decodes_rows() {
		let body = r#"{"obj":{"length":1,"data":[{
			"name":"Espresso","isrc":"USUM72401994","spotify_track_id":"2qSkIjg1o9h3YT9RAgYN75",
			"cm_track":112233,"cm_artist":[4455],"artist_names":["Sabrina Carpenter"],
			"code2s":null,"release_dates":["2024-04-12",""],"rank":1,"pre_rank":2,"peak_rank":1,
			"added_at":"2024-04-13T00:00:00.000Z","peak_date":"","chart_type":"regional",
			"current_plays":7654321,"code2":"us","velocity":0.5,
			"rank_stats":{"plays":7654321,"rank":1,"timestp":"2024-05-01T00:00:00.000Z"},
			"unexpected_field":true
		}]}}"#;
		let (client, transport) = scripted_client(
			scripted_config(1),
			ScriptedHttpClient::default().token(ScriptedReply::new(200, TOKEN_BODY)).respond(200, body),
		);
		let params = SpotifyTrackChartParams::new(
			may_first(),
			"us",
			SpotifyTrackChartType::Regional,
			SpotifyTrackChartInterval::Daily,
		);
		let rows = client
			.spotify_track_chart(&CallContext::new(), &params)
			.await
			.expect("Chart should decode.");
		let row = &rows[0];

		assert_eq!(rows.len(), 1);
		assert_eq!(row.name.as_deref(), Some("Espresso"));
		assert_eq!(row.chartmetric_track_id, Some(112233));
		assert_eq!(row.chartmetric_artist_ids, vec![4455]);
		assert!(row.country_codes.is_empty());
		assert_eq!(row.release_dates, vec![Some("2024-04-12".parse::<Date>().expect("Date should parse.")), None]);
		assert_eq!(row.added_at, Some(datetime!(2024-04-13 00:00:00 UTC)));
		assert_eq!(row.peak_date, None);
		assert_eq!(row.chart_type, Some(SpotifyTrackChartType::Regional));
		assert_eq!(row.rank_stats.as_ref().and_then(|stats| stats.plays), Some(7654321));
		assert_eq!(last_query(&transport).0, "/api/charts/spotify");
	}

	#[tokio::test]
	async fn artist_tiktok_and_apple_charts_hit_their_paths() {
		let (client, transport) = scripted_client(
			scripted_config(1),
			ScriptedHttpClient::default()
				.token(ScriptedReply::new(200, TOKEN_BODY))
				.respond(
					200,
					r#"{"obj":{"data":[{"id":1,"name":"A","sp_monthly_listeners":10,"timestp":"2024-05-01","rankStats":[{"rank":3,"date":"2024-04-30"}]}]}}"#,
				)
				.respond(200, r#"{"obj":{"data":[{"name":"Sound","posts":12,"views_prev":99,"rankStats":null}]}}"#)
				.respond(200, r#"{"obj":{"data":[{"id":7,"itunes_album_id":"1739079974","upc":null}]}}"#),
		);
		let ctx = CallContext::new();
		let artists = client
			.spotify_artist_chart(
				&ctx,
				&SpotifyArtistChartParams::new(
					may_first(),
					SpotifyArtistChartType::MonthlyListeners,
					SpotifyArtistChartInterval::Monthly,
				),
			)
			.await
			.expect("Artist chart should decode.");

		assert_eq!(artists[0].monthly_listeners, Some(10));
		assert_eq!(artists[0].rank_stats[0].date.map(|date| date.to_string()), Some("2024-04-30".into()));
		assert_eq!(last_query(&transport).0, "/api/charts/spotify/artists");

		let sounds = client
			.tiktok_chart(&ctx, &TikTokChartParams::new(TikTokChartType::Tracks, may_first()))
			.await
			.expect("TikTok chart should decode.");

		assert_eq!(sounds[0].views_previous, Some(99));
		assert!(sounds[0].rank_stats.is_empty());
		assert_eq!(last_query(&transport).0, "/api/charts/tiktok/tracks");

		let albums = client
			.apple_music_chart(
				&ctx,
				&AppleMusicChartParams::new(AppleMusicChartType::Albums, "jp", may_first())
					.track_type(AppleMusicTrackChartType::Top),
			)
			.await
			.expect("Apple Music chart should decode.");

		assert_eq!(albums[0].itunes_album_id, serde_json::json!("1739079974"));
		assert_eq!(albums[0].upc, None);
		assert_eq!(
			last_query(&transport),
			(
				"/api/charts/applemusic/albums".into(),
				Some("country_code=jp&date=2024-05-01&type=top".into())
			)
		);
	}
}
