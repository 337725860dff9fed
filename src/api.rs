//! Typed endpoint wrappers over [`Client::get`](crate::client::Client::get).
//!
//! Chartmetric wraps every payload in an `{"obj": ...}` envelope; the wrappers strip it and hand
//! back domain structs. Enumerated query values are Rust enums rendered to their wire labels.

pub mod chart;
pub mod date;
pub mod params;
pub mod track;

pub use chart::*;
pub use date::Date;
pub use params::*;
pub use track::*;

// self
use crate::_prelude::*;

/// Declares a string-valued wire enum with serde renames, [`Display`], and [`FromStr`].
macro_rules! wire_enum {
	(
		$(#[$meta:meta])*
		$name:ident {
			$($(#[$variant_meta:meta])* $variant:ident => $label:literal,)+
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		pub enum $name {
			$(
				$(#[$variant_meta])*
				#[serde(rename = $label)]
				$variant,
			)+
		}
		impl $name {
			/// Returns the label sent on the wire.
			pub const fn as_str(self) -> &'static str {
				match self {
					$($name::$variant => $label,)+
				}
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
		impl FromStr for $name {
			type Err = crate::api::UnknownLabel;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($label => Ok($name::$variant),)+
					_ => Err(crate::api::UnknownLabel {
						kind: stringify!($name),
						label: s.to_owned(),
					}),
				}
			}
		}
	};
}
pub(crate) use wire_enum;

/// Error returned when a string does not name any variant of a wire enum.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("`{label}` is not a valid {kind}.")]
pub struct UnknownLabel {
	/// Enum type name.
	pub kind: &'static str,
	/// Rejected label.
	pub label: String,
}

/// Top-level `{"obj": ...}` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
	pub obj: T,
}

/// Paged chart payload: `{"length": n, "data": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ChartPage<T> {
	#[serde(default, deserialize_with = "nullable")]
	pub data: Vec<T>,
}

/// Deserializes `null` as the type's default, the way the API uses `null` for empty values.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: serde::Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
