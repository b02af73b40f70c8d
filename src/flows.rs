//! High-level flow orchestrators: authorization initiator, callback handler, credential
//! consumer, and the contact fetcher.

pub mod authorize;
pub mod callback;
pub mod credentials;
pub mod items;

pub use authorize::*;
pub use callback::*;

// self
use crate::{_prelude::*, cache::ConnectorCache, http::ProviderHttpClient, provider::ProviderConfig};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Lifetime of pending-state and credential records in the cache.
///
/// Acts as the implicit upper bound on how long a pending authorization or an unconsumed
/// credential blob may be claimed.
pub const RECORD_TTL: Duration = Duration::seconds(600);

#[cfg(feature = "reqwest")]
/// Connector specialized for the crate's default reqwest transport.
pub type ReqwestConnector = Connector<ReqwestHttpClient>;

/// Coordinates the three-legged HubSpot flow against a single provider configuration.
///
/// The connector owns the HTTP client, the key-value cache, and the provider configuration so
/// individual flow implementations can focus on their own step (state issuance, code exchange,
/// single-shot consumption, normalization). The cache is the only state shared between steps.
#[derive(Clone)]
pub struct Connector<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Cache implementation holding pending state and credential records.
	pub cache: Arc<dyn ConnectorCache>,
	/// Provider configuration defining credentials, endpoints, and scope.
	pub config: ProviderConfig,
}
impl<C> Connector<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Creates a connector that reuses the caller-provided transport.
	pub fn with_http_client(
		cache: Arc<dyn ConnectorCache>,
		config: ProviderConfig,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), cache, config }
	}
}
#[cfg(feature = "reqwest")]
impl Connector<ReqwestHttpClient> {
	/// Creates a new connector for the provided cache and configuration.
	///
	/// The connector provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly.
	pub fn new(cache: Arc<dyn ConnectorCache>, config: ProviderConfig) -> Self {
		Self::with_http_client(cache, config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Connector<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Connector").field("config", &self.config).finish()
	}
}
