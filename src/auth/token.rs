//! Access tokens minted by the token endpoint and the wire shapes of that exchange.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Body posted to `/token` to exchange the refresh token.
#[derive(Serialize)]
pub(crate) struct TokenRequest<'a> {
	#[serde(rename = "refreshtoken")]
	pub refresh_token: &'a str,
}

/// Payload returned by `/token`. Additional fields (`refresh_token`, `scope`) are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
	/// Bearer token value.
	pub token: String,
	/// Lifetime in seconds, relative to the moment the response was received.
	pub expires_in: i64,
}

/// Bearer token paired with the instant after which it must not be reused.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
	/// Bearer credential.
	pub value: TokenSecret,
	/// Expiry instant, already shortened by [`AccessToken::SAFETY_MARGIN`].
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Subtracted from the server-declared lifetime so in-flight requests never race the real
	/// expiry.
	pub const SAFETY_MARGIN: Duration = Duration::from_secs(5);

	/// Mints a token that was issued at `now` and lives for `expires_in`.
	pub fn issue(value: impl Into<TokenSecret>, expires_in: Duration, now: OffsetDateTime) -> Self {
		Self { value: value.into(), expires_at: now + expires_in - Self::SAFETY_MARGIN }
	}

	/// Converts a token endpoint response received at `now`.
	pub fn from_response(response: TokenResponse, now: OffsetDateTime) -> Result<Self> {
		let expires_in = u64::try_from(response.expires_in)
			.map_err(|_| ConfigError::NegativeExpiresIn { expires_in: response.expires_in })?;
		let expires_in = Duration::from_secs(expires_in);
		let lifetime =
			time::Duration::try_from(expires_in).map_err(|_| ConfigError::ExpiresInOutOfRange)?;

		now.checked_add(lifetime).ok_or(ConfigError::ExpiresInOutOfRange)?;

		Ok(Self::issue(response.token, expires_in, now))
	}

	/// Returns `true` once `now` is strictly past the (margin-adjusted) expiry.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		now > self.expires_at
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("value", &"<redacted>")
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
