//! Three-legged HubSpot OAuth 2.0 connector—CSRF-safe state handling, at-most-once credential
//! caching, and CRM contact normalization behind injectable store and transport seams.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod error;
pub mod flows;
pub mod http;
pub mod item;
pub mod obs;
pub mod provider;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		cache::{ConnectorCache, MemoryCache},
		flows::Connector,
		http::ReqwestHttpClient,
		provider::ProviderConfig,
	};

	/// Connector type alias used by reqwest-backed integration tests.
	pub type ReqwestTestConnector = Connector<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Connector`] backed by an in-memory cache and the reqwest transport used
	/// across integration tests.
	pub fn build_reqwest_test_connector(
		config: ProviderConfig,
	) -> (ReqwestTestConnector, Arc<MemoryCache>) {
		let cache_backend = Arc::new(MemoryCache::default());
		let cache: Arc<dyn ConnectorCache> = cache_backend.clone();
		let http_client = test_reqwest_http_client();
		let connector = Connector::with_http_client(cache, config, http_client);

		(connector, cache_backend)
	}

	/// Builds a provider configuration whose endpoints all live under `base`, pointing the
	/// connector at a mock server.
	pub fn test_provider_config(
		base: &str,
		client_id: &str,
		client_secret: &str,
	) -> ProviderConfig {
		let endpoint = |path: &str| {
			Url::parse(&format!("{base}{path}"))
				.expect("Mock endpoint URL should parse successfully.")
		};

		ProviderConfig::builder()
			.client_id(client_id)
			.client_secret(client_secret)
			.redirect_uri(endpoint("/integrations/hubspot/oauth2callback"))
			.scope("oauth crm.objects.contacts.read")
			.authorization_url(endpoint("/authorize"))
			.token_url(endpoint("/token"))
			.resource_url(endpoint("/contacts"))
			.build()
			.expect("Provider configuration fixture should build successfully.")
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")] pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {httpmock as _, tokio as _};
#[cfg(test)] use hubspot_connect as _;
