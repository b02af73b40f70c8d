//! Explicit provider configuration consumed by every flow.
//!
//! Replaces ambient module-level client id/secret constants with a validated, explicitly passed
//! struct. [`ProviderConfig::hubspot`] carries the real HubSpot endpoints; the builder exists so
//! tests (and any HubSpot-compatible stand-in) can point the connector elsewhere.

// self
use crate::_prelude::*;

const HUBSPOT_AUTHORIZATION_URL: &str = "https://app.hubspot.com/oauth/authorize";
const HUBSPOT_TOKEN_URL: &str = "https://api.hubapi.com/oauth/v1/token";
const HUBSPOT_CONTACTS_URL: &str = "https://api.hubapi.com/crm/v3/objects/contacts";
const HUBSPOT_SCOPE: &str = "oauth crm.objects.contacts.read";

/// Immutable provider configuration consumed by flows.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret used during the token exchange.
	pub client_secret: String,
	/// Redirect URI registered with the provider.
	pub redirect_uri: Url,
	/// Space-delimited scope string embedded in the authorize URL.
	pub scope: String,
	/// Authorization endpoint the end user is redirected to.
	pub authorization_url: Url,
	/// Token endpoint used for the code exchange.
	pub token_url: Url,
	/// Resource endpoint listing contact records.
	pub resource_url: Url,
}
impl ProviderConfig {
	/// Creates a new builder.
	pub fn builder() -> ProviderConfigBuilder {
		ProviderConfigBuilder::default()
	}

	/// Builder pre-populated with the production HubSpot endpoints and contact-read scope.
	pub fn hubspot(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: Url,
	) -> Result<Self, ProviderConfigError> {
		Self::builder()
			.client_id(client_id)
			.client_secret(client_secret)
			.redirect_uri(redirect_uri)
			.scope(HUBSPOT_SCOPE)
			.authorization_url(static_url(HUBSPOT_AUTHORIZATION_URL))
			.token_url(static_url(HUBSPOT_TOKEN_URL))
			.resource_url(static_url(HUBSPOT_CONTACTS_URL))
			.build()
	}
}
impl Debug for ProviderConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderConfig")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("redirect_uri", &self.redirect_uri)
			.field("scope", &self.scope)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("resource_url", &self.resource_url)
			.finish()
	}
}

/// Builder API for assembling provider configurations.
#[derive(Clone, Debug, Default)]
pub struct ProviderConfigBuilder {
	client_id: Option<String>,
	client_secret: Option<String>,
	redirect_uri: Option<Url>,
	scope: Option<String>,
	authorization_url: Option<Url>,
	token_url: Option<Url>,
	resource_url: Option<Url>,
}
impl ProviderConfigBuilder {
	/// Sets the OAuth 2.0 client identifier.
	pub fn client_id(mut self, value: impl Into<String>) -> Self {
		self.client_id = Some(value.into());

		self
	}

	/// Sets the OAuth 2.0 client secret.
	pub fn client_secret(mut self, value: impl Into<String>) -> Self {
		self.client_secret = Some(value.into());

		self
	}

	/// Sets the registered redirect URI.
	pub fn redirect_uri(mut self, value: Url) -> Self {
		self.redirect_uri = Some(value);

		self
	}

	/// Sets the scope string.
	pub fn scope(mut self, value: impl Into<String>) -> Self {
		self.scope = Some(value.into());

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorization_url(mut self, value: Url) -> Self {
		self.authorization_url = Some(value);

		self
	}

	/// Sets the token endpoint.
	pub fn token_url(mut self, value: Url) -> Self {
		self.token_url = Some(value);

		self
	}

	/// Sets the contact resource endpoint.
	pub fn resource_url(mut self, value: Url) -> Self {
		self.resource_url = Some(value);

		self
	}

	/// Validates and assembles the configuration.
	pub fn build(self) -> Result<ProviderConfig, ProviderConfigError> {
		let client_id = require(self.client_id, "client_id")?;
		let client_secret = require(self.client_secret, "client_secret")?;

		if client_id.is_empty() {
			return Err(ProviderConfigError::EmptyCredential { field: "client_id" });
		}
		if client_secret.is_empty() {
			return Err(ProviderConfigError::EmptyCredential { field: "client_secret" });
		}

		let redirect_uri = require(self.redirect_uri, "redirect_uri")?;

		if redirect_uri.cannot_be_a_base() {
			return Err(ProviderConfigError::InvalidRedirect);
		}

		Ok(ProviderConfig {
			client_id,
			client_secret,
			redirect_uri,
			scope: self.scope.unwrap_or_default(),
			authorization_url: require(self.authorization_url, "authorization_url")?,
			token_url: require(self.token_url, "token_url")?,
			resource_url: require(self.resource_url, "resource_url")?,
		})
	}
}

/// Configuration and validation failures raised while assembling a [`ProviderConfig`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderConfigError {
	/// A required field was never supplied.
	#[error("Provider configuration is missing `{field}`.")]
	MissingField {
		/// Name of the absent field.
		field: &'static str,
	},
	/// Client id or secret was supplied but empty.
	#[error("Provider configuration field `{field}` cannot be empty.")]
	EmptyCredential {
		/// Name of the empty field.
		field: &'static str,
	},
	/// Redirect URI cannot serve as a redirect target.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect,
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, ProviderConfigError> {
	value.ok_or(ProviderConfigError::MissingField { field })
}

fn static_url(value: &'static str) -> Url {
	Url::parse(value).expect("Static provider endpoint should parse.")
}
