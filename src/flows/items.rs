//! Contact fetcher: one authenticated page of contacts, normalized into integration items.

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	flows::Connector,
	http::ProviderHttpClient,
	item::{ContactPage, IntegrationItem},
	obs::{self, FlowKind},
};

impl<C> Connector<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Fetches one page of contacts with the given credentials and normalizes each record.
	///
	/// A non-success resource response yields an empty sequence rather than an error; item order
	/// matches the provider's response order, single page only.
	pub async fn fetch_items(&self, credentials: &Credentials) -> Result<Vec<IntegrationItem>> {
		obs::observe(FlowKind::Items, "fetch_items", async move {
			let access_token =
				credentials.access_token().ok_or_else(|| Error::UpstreamFailure {
					endpoint: "token",
					status: None,
					message: "credential blob is missing access_token".into(),
				})?;
			let response = self
				.http_client
				.get_bearer(&self.config.resource_url, access_token)
				.await
				.map_err(Error::from)?;

			if !response.is_success() {
				return Ok(Vec::new());
			}

			let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
			let page: ContactPage = serde_path_to_error::deserialize(&mut deserializer).map_err(
				|source| Error::UpstreamFailure {
					endpoint: "resource",
					status: Some(response.status),
					message: format!("malformed contact listing at `{}`", source.path()),
				},
			)?;

			Ok(page.results.into_iter().map(IntegrationItem::from).collect())
		})
		.await
	}
}
