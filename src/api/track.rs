//! Track identifier lookups across streaming platforms.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
// self
use crate::{
	_prelude::*,
	api::{Envelope, nullable, wire_enum},
	client::Client,
	context::CallContext,
	http::ApiHttpClient,
};

// RFC 3986 unreserved characters stay literal in a path segment.
const PATH_SEGMENT: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

wire_enum! {
	/// Platforms whose track identifiers can be cross-referenced.
	TrackPlatform {
		/// Amazon Music.
		Amazon => "amazon",
		/// Beatport.
		Beatport => "beatport",
		/// Deezer.
		Deezer => "deezer",
		/// Genius.
		Genius => "genius",
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
		/// QQ Music.
		QQ => "qq",
		/// YouTube.
		YouTube => "youtube",
		/// Chartmetric's own track IDs.
		Chartmetric => "chartmetric",
		/// International Standard Recording Code.
		Isrc => "isrc",
	}
}

/// Identifiers of one recording across platforms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TrackIds {
	/// International Standard Recording Code.
	pub isrc: Option<String>,
	/// Chartmetric track IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub chartmetric_ids: Vec<i64>,
	/// Spotify track IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub spotify_ids: Vec<String>,
	/// iTunes track IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub itunes_ids: Vec<String>,
	/// Deezer track IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub deezer_ids: Vec<String>,
	/// Amazon track IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub amazon_ids: Vec<String>,
	/// YouTube video IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub youtube_ids: Vec<String>,
	/// SoundCloud track IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub soundcloud_ids: Vec<String>,
	/// Shazam track IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub shazam_ids: Vec<String>,
	/// TikTok sound IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub tiktok_ids: Vec<String>,
	/// Beatport track IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub beatport_ids: Vec<i64>,
	/// QQ Music track IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub qq_ids: Vec<i64>,
	/// Genius song IDs.
	#[serde(default, deserialize_with = "nullable")]
	pub genius_ids: Vec<i64>,
}

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Resolves the identifiers of the track known as `id` on `platform`.
	///
	/// Returns [`Error::NotFound`] when the API knows no such track.
	pub async fn track_ids(
		&self,
		ctx: &CallContext,
		platform: TrackPlatform,
		id: &str,
	) -> Result<TrackIds> {
		let path = format!("/track/{platform}/{}/get-ids", utf8_percent_encode(id, PATH_SEGMENT));
		let envelope: Envelope<Vec<TrackIds>> = self.get(ctx, &path, None).await?;

		envelope.obj.into_iter().next().ok_or_else(|| Error::NotFound {
			reason: format!("no track IDs for {platform} track `{id}`"),
		})
	}
}
