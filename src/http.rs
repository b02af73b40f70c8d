//! Transport primitives for provider calls.
//!
//! [`ProviderHttpClient`] is the connector's only dependency on an HTTP stack: flows need one
//! form POST (the code-for-token exchange) and one bearer GET (the contact listing). Retry
//! behavior, connection pooling, and proxying all belong to the implementation; the connector
//! only observes a status code and a body.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by every [`ProviderHttpClient`] operation.
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ProviderResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing the connector's provider calls.
///
/// Implementations must be `Send + Sync + 'static` so they can sit behind `Arc<C>` inside a
/// shared connector without additional wrappers.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues a `application/x-www-form-urlencoded` POST (token exchange).
	fn post_form<'a>(&'a self, url: &'a Url, form: &'a [(&'a str, &'a str)]) -> TransportFuture<'a>;

	/// Issues a GET carrying `Authorization: Bearer <token>` (resource fetch).
	fn get_bearer<'a>(&'a self, url: &'a Url, access_token: &'a str) -> TransportFuture<'a>;
}

/// Status code and raw body captured from a provider response.
///
/// Transport errors (DNS, TCP, TLS) never reach this type; a non-success status does, so each
/// flow can decide whether that is a hard failure or an empty result.
#[derive(Clone, Debug)]
pub struct ProviderResponse {
	/// HTTP status code returned by the provider.
	pub status: u16,
	/// Raw response body bytes.
	pub body: Vec<u8>,
}
impl ProviderResponse {
	const PREVIEW_LEN: usize = 256;

	/// Whether the status code is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Lossy UTF-8 view of the body.
	pub fn body_str(&self) -> std::borrow::Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}

	/// Truncated body view safe to embed in error messages.
	pub fn body_preview(&self) -> String {
		let text = self.body_str();
		let mut preview: String = text.chars().take(Self::PREVIEW_LEN).collect();

		if text.chars().count() > Self::PREVIEW_LEN {
			preview.push('…');
		}

		preview
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token requests should not follow redirects, matching OAuth 2.0 guidance that token endpoints
/// return results directly instead of delegating to another URI. Configure any custom
/// [`ReqwestClient`] accordingly before handing it to [`ReqwestHttpClient::with_client`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn capture(response: reqwest::Response) -> Result<ProviderResponse, TransportError> {
		let status = response.status().as_u16();
		let body = response.bytes().await?.to_vec();

		Ok(ProviderResponse { status, body })
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	fn post_form<'a>(
		&'a self,
		url: &'a Url,
		form: &'a [(&'a str, &'a str)],
	) -> TransportFuture<'a> {
		Box::pin(async move {
			let response = self.0.post(url.clone()).form(form).send().await?;

			Self::capture(response).await
		})
	}

	fn get_bearer<'a>(&'a self, url: &'a Url, access_token: &'a str) -> TransportFuture<'a> {
		Box::pin(async move {
			let response = self.0.get(url.clone()).bearer_auth(access_token).send().await?;

			Self::capture(response).await
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_the_2xx_range() {
		assert!(ProviderResponse { status: 200, body: Vec::new() }.is_success());
		assert!(ProviderResponse { status: 204, body: Vec::new() }.is_success());
		assert!(!ProviderResponse { status: 301, body: Vec::new() }.is_success());
		assert!(!ProviderResponse { status: 400, body: Vec::new() }.is_success());
		assert!(!ProviderResponse { status: 503, body: Vec::new() }.is_success());
	}

	#[test]
	fn body_preview_truncates_long_payloads() {
		let response = ProviderResponse { status: 500, body: vec![b'x'; 1_024] };
		let preview = response.body_preview();

		assert_eq!(preview.chars().count(), ProviderResponse::PREVIEW_LEN + 1);
		assert!(preview.ends_with('…'));

		let short = ProviderResponse { status: 500, body: b"oops".to_vec() };

		assert_eq!(short.body_preview(), "oops");
	}
}
