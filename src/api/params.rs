//! Query parameter helpers shared by the endpoint wrappers.

// self
use crate::{_prelude::*, http::QueryParams};

/// Passthrough pagination window.
///
/// The API has no cursor; `limit` and `offset` are forwarded as is and unset values are omitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
	/// Maximum number of records to return.
	pub limit: Option<u32>,
	/// Number of records to skip.
	pub offset: Option<u32>,
}
impl Paging {
	/// Creates an empty window (server defaults).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the record limit.
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Sets the record offset.
	pub fn offset(mut self, offset: u32) -> Self {
		self.offset = Some(offset);

		self
	}

	/// Writes the set fields into `params`.
	pub fn apply(&self, params: &mut QueryParams) {
		params.insert_opt("limit", self.limit).insert_opt("offset", self.offset);
	}
}
