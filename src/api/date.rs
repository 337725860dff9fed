//! Calendar dates in the API's `YYYY-MM-DD` form plus lenient decoders for optional values.

// crates.io
use serde::{Deserializer, Serializer, de::Error as _};
use time::macros::format_description;
// self
use crate::_prelude::*;

/// Calendar date rendered as `YYYY-MM-DD` in queries and JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub time::Date);
impl Date {
	/// Builds a date from its components.
	pub fn from_calendar_date(
		year: i32,
		month: time::Month,
		day: u8,
	) -> Result<Self, time::error::ComponentRange> {
		time::Date::from_calendar_date(year, month, day).map(Self)
	}

	/// Today's date in UTC.
	pub fn today_utc() -> Self {
		Self(OffsetDateTime::now_utc().date())
	}
}
impl From<time::Date> for Date {
	fn from(value: time::Date) -> Self {
		Self(value)
	}
}
impl Display for Date {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let rendered = self
			.0
			.format(format_description!("[year]-[month]-[day]"))
			.map_err(|_| std::fmt::Error)?;

		f.write_str(&rendered)
	}
}
impl FromStr for Date {
	type Err = time::error::Parse;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		time::Date::parse(s, format_description!("[year]-[month]-[day]")).map(Self)
	}
}
impl Serialize for Date {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}
impl<'de> Deserialize<'de> for Date {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;

		raw.parse().map_err(D::Error::custom)
	}
}

/// Serde helpers for `Option<Date>` fields where the API sends `""` or `null` for "no date".
///
/// Timestamps such as `2024-05-01T00:00:00.000Z` are accepted too; only the date part is kept.
pub mod option {
	// self
	use super::*;

	/// Decodes an optional date.
	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
	where
		D: Deserializer<'de>,
	{
		Option::<String>::deserialize(deserializer)?
			.as_deref()
			.map(parse_lenient)
			.transpose()
			.map_err(D::Error::custom)
			.map(Option::flatten)
	}

	/// Encodes an optional date as `YYYY-MM-DD` or `null`.
	pub fn serialize<S>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match value {
			Some(date) => serializer.collect_str(date),
			None => serializer.serialize_none(),
		}
	}
}

/// Serde helpers for lists of dates that may contain `""` or `null` entries.
pub mod option_seq {
	// self
	use super::*;

	/// Decodes a list of optional dates; a `null` list decodes as empty.
	pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Option<Date>>, D::Error>
	where
		D: Deserializer<'de>,
	{
		Option::<Vec<Option<String>>>::deserialize(deserializer)?
			.unwrap_or_default()
			.iter()
			.map(|raw| raw.as_deref().map(parse_lenient).transpose().map(Option::flatten))
			.collect::<Result<_, _>>()
			.map_err(D::Error::custom)
	}
}

/// Serde helpers for `Option<OffsetDateTime>` fields holding RFC 3339 timestamps or `""`.
pub mod timestamp {
	// crates.io
	use time::format_description::well_known::Rfc3339;
	// self
	use super::*;

	/// Decodes an optional RFC 3339 timestamp.
	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
	where
		D: Deserializer<'de>,
	{
		match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
			None | Some("") => Ok(None),
			Some(raw) => OffsetDateTime::parse(raw, &Rfc3339).map(Some).map_err(D::Error::custom),
		}
	}
}

fn parse_lenient(raw: &str) -> Result<Option<Date>, time::error::Parse> {
	let raw = raw.trim();

	if raw.is_empty() {
		return Ok(None);
	}

	// `YYYY-MM-DD` prefix of a longer timestamp.
	raw.get(..10).unwrap_or(raw).parse().map(Some)
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::{Month, macros::datetime};
	// self
	use super::*;

	#[derive(Debug, Deserialize, Serialize)]
	struct Fixture {
		#[serde(default, with = "option")]
		peak: Option<Date>,
		#[serde(default, deserialize_with = "option_seq::deserialize", skip_serializing)]
		released: Vec<Option<Date>>,
		#[serde(default, deserialize_with = "timestamp::deserialize", skip_serializing)]
		added_at: Option<OffsetDateTime>,
	}

	#[test]
	fn date_renders_and_parses_wire_form() {
		let date = Date::from_calendar_date(2024, Month::March, 7).expect("Fixture date should be valid.");

		assert_eq!(date.to_string(), "2024-03-07");
		assert_eq!("2024-03-07".parse::<Date>().expect("Wire form should parse."), date);
		assert!("07/03/2024".parse::<Date>().is_err());
	}

	#[test]
	fn optional_fields_accept_empty_and_null() {
		let fixture: Fixture = serde_json::from_str(
			r#"{"peak":"","released":["2020-01-31",null,""],"added_at":"2024-05-01T08:30:00.000Z"}"#,
		)
		.expect("Lenient fixture should decode.");

		assert_eq!(fixture.peak, None);
		assert_eq!(fixture.released.len(), 3);
		assert_eq!(fixture.released[0].map(|date| date.to_string()), Some("2020-01-31".into()));
		assert_eq!(fixture.released[1], None);
		assert_eq!(fixture.released[2], None);
		assert_eq!(fixture.added_at, Some(datetime!(2024-05-01 08:30:00 UTC)));

		let fixture: Fixture = serde_json::from_str(r#"{"peak":"2023-12-25T00:00:00.000Z","added_at":null}"#)
			.expect("Timestamp-shaped date should decode.");

		assert_eq!(fixture.peak.map(|date| date.to_string()), Some("2023-12-25".into()));
		assert_eq!(fixture.added_at, None);
		assert_eq!(
			serde_json::to_string(&fixture).expect("Fixture should serialize."),
			r#"{"peak":"2023-12-25"}"#
		);
	}
}
