//! Client-level error types shared across the token, transport, and endpoint layers.

// self
use crate::{_prelude::*, config::ClientConfigError, context::Cancelled};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem or malformed value that no retry can fix.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Temporary upstream failure; eligible for automatic retry.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The call context was cancelled or its deadline passed.
	#[error(transparent)]
	Cancelled(#[from] Cancelled),

	/// API answered with a non-success status that is not retryable.
	#[error("API returned a non-success response: [{status}] {body}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Raw response body text.
		body: String,
	},
	/// Request payload could not be serialized.
	#[error("Request body could not be encoded as JSON.")]
	Encode {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response payload did not match the expected shape.
	#[error("Response body could not be decoded: {source}")]
	Decode {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The API answered successfully but returned no entries for the lookup.
	#[error("No results found: {reason}.")]
	NotFound {
		/// Lookup description.
		reason: String,
	},
	/// Wraps an error with the pipeline phase that produced it.
	#[error("Failed to {phase}: {source}")]
	Phase {
		/// Phase that failed.
		phase: Phase,
		/// Underlying failure.
		#[source]
		source: Box<Error>,
	},
}
impl From<ClientConfigError> for Error {
	fn from(e: ClientConfigError) -> Self {
		Self::Config(e.into())
	}
}
impl Error {
	/// Returns `true` when the error is a transient upstream condition (HTTP 429 or 503).
	///
	/// Phase-wrapped errors are never retryable: a phase wrapper marks a failure that already
	/// went through its own retry loop.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::Transient(_))
	}

	/// Returns `true` when the root cause is a cancelled or expired call context.
	pub fn is_cancelled(&self) -> bool {
		matches!(self.root(), Self::Cancelled(_))
	}

	/// Walks through [`Error::Phase`] wrappers and returns the innermost error.
	pub fn root(&self) -> &Error {
		let mut current = self;

		while let Self::Phase { source, .. } = current {
			current = source;
		}

		current
	}

	/// Returns the outermost phase label, if the error was wrapped.
	pub fn phase(&self) -> Option<Phase> {
		match self {
			Self::Phase { phase, .. } => Some(*phase),
			_ => None,
		}
	}

	/// Returns the HTTP status carried by the root cause, if any.
	pub fn status(&self) -> Option<u16> {
		match self.root() {
			Self::Status { status, .. } => Some(*status),
			Self::Transient(err) => Some(err.status()),
			_ => None,
		}
	}

	pub(crate) fn in_phase(self, phase: Phase) -> Self {
		Self::Phase { phase, source: Box::new(self) }
	}
}

/// Request pipeline phases used to label wrapped errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
	/// Reading or renewing the cached bearer token.
	ResolveToken,
	/// Calling the token endpoint (after retries).
	FetchToken,
	/// Building the outbound HTTP request.
	BuildRequest,
	/// Waiting for a rate-limiter permit.
	RateLimit,
	/// Sending the request over the transport.
	Send,
	/// Decoding the response body.
	Decode,
}
impl Phase {
	/// Returns a stable, human-readable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Phase::ResolveToken => "resolve access token",
			Phase::FetchToken => "fetch access token",
			Phase::BuildRequest => "build request",
			Phase::RateLimit => "wait for rate limiter",
			Phase::Send => "send request",
			Phase::Decode => "decode response",
		}
	}
}
impl Display for Phase {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client configuration failed validation.
	#[error(transparent)]
	Client(#[from] ClientConfigError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Request URL could not be assembled from the base URL and path.
	#[error("Request URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL text.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Token endpoint returned a negative `expires_in`.
	#[error("The expires_in value must not be negative, got {expires_in}.")]
	NegativeExpiresIn {
		/// Raw value returned by the token endpoint.
		expires_in: i64,
	},
	/// Token endpoint returned an `expires_in` outside the representable range.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Temporary failure variants (safe to retry).
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Upstream answered `429 Too Many Requests`.
	#[error("Rate limit exceeded.")]
	RateLimited {
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Upstream answered `503 Service Unavailable`.
	#[error("Service is temporarily unavailable.")]
	Unavailable {
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
}
impl TransientError {
	/// HTTP status code that produced this condition.
	pub const fn status(&self) -> u16 {
		match self {
			Self::RateLimited { .. } => 429,
			Self::Unavailable { .. } => 503,
		}
	}

	/// Retry-After hint attached by upstream.
	pub const fn retry_after(&self) -> Option<Duration> {
		match self {
			Self::RateLimited { retry_after } | Self::Unavailable { retry_after } => *retry_after,
		}
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
