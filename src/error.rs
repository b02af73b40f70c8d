//! Connector-level error types shared across flows, the cache seam, and transports.

// self
use crate::_prelude::*;

/// Connector-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical connector error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Cache-layer failure.
	#[error("{0}")]
	Cache(
		#[from]
		#[source]
		crate::cache::CacheError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] crate::provider::ProviderConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Provider (or the end user) declined consent on the authorization screen.
	#[error("Provider denied the authorization request: {description}.")]
	ProviderDenied {
		/// Provider-supplied `error_description`, falling back to the `error` code.
		description: String,
	},
	/// Returned `state` does not match the pending record (or the record is gone).
	#[error("Authorization state mismatch: {reason}.")]
	StateMismatch {
		/// Human-readable mismatch reason; never echoes token material.
		reason: String,
	},
	/// Redirect arrived without the parameters the flow requires.
	#[error("Callback request is malformed: {reason}.")]
	InvalidCallback {
		/// Human-readable description of the missing or malformed parameter.
		reason: String,
	},
	/// No credential record is pending for the requested user/org pair.
	#[error("No credentials found.")]
	NoCredentials,
	/// Provider endpoint answered with a non-success response.
	#[error("Provider {endpoint} endpoint failed: {message}.")]
	UpstreamFailure {
		/// Which provider endpoint failed (`token` or `resource`).
		endpoint: &'static str,
		/// HTTP status code, when one was received.
		status: Option<u16>,
		/// Short provider-supplied message or body preview.
		message: String,
	},
}
impl Error {
	/// HTTP-equivalent status code for surfacing the error to an inbound caller.
	///
	/// Client-triggerable failures map to 400, provider-side failures to 502, and
	/// everything else (cache, configuration) to 500.
	pub fn status_code(&self) -> u16 {
		match self {
			Self::ProviderDenied { .. }
			| Self::StateMismatch { .. }
			| Self::InvalidCallback { .. }
			| Self::NoCredentials => 400,
			Self::UpstreamFailure { .. } | Self::Transport(_) => 502,
			Self::Cache(_) | Self::Config(_) => 500,
		}
	}

	pub(crate) fn state_mismatch(reason: impl Into<String>) -> Self {
		Self::StateMismatch { reason: reason.into() }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
	fn from(e: reqwest::Error) -> Self {
		Self::network(e)
	}
}
