//! Key-value cache contract shared by all flows, plus built-in implementations.
//!
//! The cache is the only state shared between the authorization initiator, the callback handler,
//! and the credential consumer. Flows rely on the backend's own atomic set/get/delete plus TTL
//! expiry; the connector itself takes no locks.

pub mod memory;

pub use memory::MemoryCache;

// self
use crate::{
	_prelude::*,
	auth::{OrgId, UserId},
};

/// Boxed future returned by every [`ConnectorCache`] operation.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// Expiring key-value capability consumed by connector flows.
///
/// Implementations typically wrap Redis or a comparable short-lived store; [`MemoryCache`] covers
/// tests and local development. Expired keys must present identically to keys that never existed.
pub trait ConnectorCache
where
	Self: Send + Sync,
{
	/// Writes (or overwrites) a value that expires after `ttl`.
	fn set<'a>(&'a self, key: &'a CacheKey, value: String, ttl: Duration) -> CacheFuture<'a, ()>;

	/// Fetches the live value for `key`, if present and unexpired.
	fn get<'a>(&'a self, key: &'a CacheKey) -> CacheFuture<'a, Option<String>>;

	/// Removes `key`; deleting an absent key is not an error.
	fn delete<'a>(&'a self, key: &'a CacheKey) -> CacheFuture<'a, ()>;
}

/// Error type produced by [`ConnectorCache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Serialization failures surfaced by the backend or while decoding cached payloads.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Namespaces partitioning connector records inside the shared cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheNamespace {
	/// Pending authorization state awaiting the provider callback.
	State,
	/// Verbatim credential blobs awaiting their single consumer.
	Credentials,
}
impl CacheNamespace {
	/// Returns the key prefix used on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			CacheNamespace::State => "hubspot_state",
			CacheNamespace::Credentials => "hubspot_credentials",
		}
	}
}

/// Typed cache key rendering `namespace:{org_id}:{user_id}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
	/// Record namespace.
	pub namespace: CacheNamespace,
	/// Organization component.
	pub org: OrgId,
	/// User component.
	pub user: UserId,
}
impl CacheKey {
	/// Builds the pending-state key for an org/user pair.
	pub fn state(org: OrgId, user: UserId) -> Self {
		Self { namespace: CacheNamespace::State, org, user }
	}

	/// Builds the credentials key for an org/user pair.
	pub fn credentials(org: OrgId, user: UserId) -> Self {
		Self { namespace: CacheNamespace::Credentials, org, user }
	}

	/// Renders the colon-delimited wire form handed to the backend.
	pub fn render(&self) -> String {
		format!("{}:{}:{}", self.namespace.as_str(), self.org, self.user)
	}
}
impl Display for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}:{}:{}", self.namespace.as_str(), self.org, self.user)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::Error;
	use std::error::Error as StdError;

	fn ids() -> (OrgId, UserId) {
		(
			OrgId::new("org-1").expect("Org fixture should be valid."),
			UserId::new("user-1").expect("User fixture should be valid."),
		)
	}

	#[test]
	fn keys_render_the_wire_format() {
		let (org, user) = ids();

		assert_eq!(CacheKey::state(org.clone(), user.clone()).render(), "hubspot_state:org-1:user-1");
		assert_eq!(CacheKey::credentials(org, user).render(), "hubspot_credentials:org-1:user-1");
	}

	#[test]
	fn cache_error_converts_with_source() {
		let cache_error = CacheError::Backend { message: "connection reset".into() };
		let error: Error = cache_error.clone().into();

		assert!(matches!(error, Error::Cache(_)));

		let source = StdError::source(&error)
			.expect("Connector error should expose the original cache error as its source.");

		assert_eq!(source.to_string(), cache_error.to_string());
	}
}
