//! Thread-safe in-memory [`ConnectorCache`] implementation for local development and tests.
//!
//! Expiry is evaluated lazily on read: an entry whose deadline has passed is evicted and reported
//! as absent, matching the "expired and never-written keys are indistinguishable" contract.

// self
use crate::{
	_prelude::*,
	cache::{CacheError, CacheFuture, CacheKey, ConnectorCache},
};

type CacheMap = Arc<RwLock<HashMap<String, Entry>>>;

#[derive(Clone, Debug)]
struct Entry {
	value: String,
	expires_at: OffsetDateTime,
}

/// Thread-safe cache backend that keeps records in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(CacheMap);
impl MemoryCache {
	fn set_now(map: CacheMap, key: String, value: String, ttl: Duration) -> Result<(), CacheError> {
		let expires_at = OffsetDateTime::now_utc() + ttl;

		map.write().insert(key, Entry { value, expires_at });

		Ok(())
	}

	fn get_now(map: CacheMap, key: String) -> Option<String> {
		let now = OffsetDateTime::now_utc();
		let mut guard = map.write();
		let live = guard.get(&key).map(|entry| entry.expires_at > now)?;

		if live {
			guard.get(&key).map(|entry| entry.value.clone())
		} else {
			guard.remove(&key);

			None
		}
	}

	fn delete_now(map: CacheMap, key: String) {
		map.write().remove(&key);
	}

	/// Number of live (unexpired) entries currently held.
	pub fn len(&self) -> usize {
		let now = OffsetDateTime::now_utc();

		self.0.read().values().filter(|entry| entry.expires_at > now).count()
	}

	/// Whether the cache currently holds no live entries.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
impl ConnectorCache for MemoryCache {
	fn set<'a>(&'a self, key: &'a CacheKey, value: String, ttl: Duration) -> CacheFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.render();

		Box::pin(async move { Self::set_now(map, key, value, ttl) })
	}

	fn get<'a>(&'a self, key: &'a CacheKey) -> CacheFuture<'a, Option<String>> {
		let map = self.0.clone();
		let key = key.render();

		Box::pin(async move { Ok(Self::get_now(map, key)) })
	}

	fn delete<'a>(&'a self, key: &'a CacheKey) -> CacheFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.render();

		Box::pin(async move {
			Self::delete_now(map, key);

			Ok(())
		})
	}
}
