//! Credential consumer: single-shot retrieval of the stored credential blob.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, OrgId, UserId},
	cache::{CacheError, CacheKey},
	flows::Connector,
	http::ProviderHttpClient,
	obs::{self, FlowKind},
};

impl<C> Connector<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Returns the stored credential blob for the user/org pair exactly once.
	///
	/// The record is deleted immediately after a successful read, so a second call always fails
	/// with [`Error::NoCredentials`] even when the TTL has not elapsed. An expired record and one
	/// that was never stored present identically.
	pub async fn take_credentials(&self, user_id: UserId, org_id: OrgId) -> Result<Credentials> {
		obs::observe(FlowKind::Credentials, "take_credentials", async move {
			let key = CacheKey::credentials(org_id, user_id);
			let raw =
				self.cache.get(&key).await.map_err(Error::from)?.ok_or(Error::NoCredentials)?;

			// Consume before parsing; a malformed blob must not survive for a retry.
			self.cache.delete(&key).await.map_err(Error::from)?;

			Credentials::from_raw(&raw)
				.map_err(|e| Error::Cache(CacheError::Serialization { message: e.to_string() }))
		})
		.await
	}
}
