//! Callback handler: validates the returned state and exchanges the code for credentials.
//!
//! The handler walks `AWAITING_CALLBACK → STATE_VALIDATED → TOKEN_EXCHANGED →
//! CREDENTIALS_STORED`, failing closed at every gate. State validation is the CSRF defense: a
//! callback only proceeds when its embedded token exactly matches the cached copy issued to this
//! user's session, and the cached copy is deleted in the same step so a state can never replay.

// crates.io
use futures::future;
// self
use crate::{
	_prelude::*,
	auth::{OrgId, PendingAuthState, UserId},
	cache::CacheKey,
	flows::{Connector, RECORD_TTL},
	http::ProviderHttpClient,
	obs::{self, FlowKind},
};

/// Minimal HTML document that closes the popup which hosted the consent screen.
///
/// Serving this page is the callback's entire response contract; it signals flow completion to
/// the invoking UI.
pub const COMPLETION_PAGE: &str = "<html>\n\t<script>\n\t\twindow.close();\n\t</script>\n</html>\n";

/// Query parameters carried by the provider's redirect back to the callback route.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
	/// Authorization code to exchange at the token endpoint.
	pub code: Option<String>,
	/// URL-safe state blob issued by the authorization initiator.
	pub state: Option<String>,
	/// Provider error code when consent was denied or the request was rejected.
	pub error: Option<String>,
	/// Human-readable companion to `error`.
	pub error_description: Option<String>,
}
impl CallbackParams {
	/// Convenience constructor for a successful redirect.
	pub fn new(code: impl Into<String>, state: impl Into<String>) -> Self {
		Self { code: Some(code.into()), state: Some(state.into()), ..Default::default() }
	}
}

/// Identifies whose credentials were just stored by a completed callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedCallback {
	/// End user the stored credentials belong to.
	pub user_id: UserId,
	/// Organization the stored credentials belong to.
	pub org_id: OrgId,
}

impl<C> Connector<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Completes the token exchange for an inbound provider redirect.
	///
	/// The token-endpoint POST and the single-use state deletion are independent, so they are
	/// issued concurrently and both run to completion; the deletion is never cancelled, so the
	/// state stays single-use even when the exchange faults mid-flight. The verbatim
	/// token-endpoint body lands under the credentials key with [`RECORD_TTL`], overwriting any
	/// previous record for the same user/org pair.
	pub async fn complete_callback(&self, params: CallbackParams) -> Result<CompletedCallback> {
		obs::observe(FlowKind::Callback, "complete_callback", async move {
			if let Some(error) = params.error {
				let description = params.error_description.unwrap_or(error);

				return Err(Error::ProviderDenied { description });
			}

			let encoded_state = params
				.state
				.ok_or_else(|| Error::state_mismatch("callback is missing the state parameter"))?;
			let returned = PendingAuthState::decode(&encoded_state)?;
			let code = params.code.ok_or_else(|| Error::InvalidCallback {
				reason: "callback is missing the authorization code".into(),
			})?;
			let state_key = CacheKey::state(returned.org_id.clone(), returned.user_id.clone());
			let saved_blob =
				self.cache.get(&state_key).await.map_err(Error::from)?.ok_or_else(|| {
					Error::state_mismatch(
						"no pending authorization for this user and organization",
					)
				})?;
			let saved = PendingAuthState::decode(&saved_blob)?;

			if !saved.token_matches(&returned) {
				return Err(Error::state_mismatch("state does not match"));
			}

			let form = [
				("grant_type", "authorization_code"),
				("code", code.as_str()),
				("redirect_uri", self.config.redirect_uri.as_str()),
				("client_id", self.config.client_id.as_str()),
				("client_secret", self.config.client_secret.as_str()),
			];
			let exchange = async {
				self.http_client
					.post_form(&self.config.token_url, &form)
					.await
					.map_err(Error::from)
			};
			let discard_state =
				async { self.cache.delete(&state_key).await.map_err(Error::from) };
			// `join`, not `try_join`: an exchange fault must not cancel the deletion, or the
			// state would stay live and replayable until its TTL.
			let (response, discarded) = future::join(exchange, discard_state).await;
			let response = response?;

			discarded?;

			if !response.is_success() {
				return Err(Error::UpstreamFailure {
					endpoint: "token",
					status: Some(response.status),
					message: response.body_preview(),
				});
			}

			let credentials_key =
				CacheKey::credentials(returned.org_id.clone(), returned.user_id.clone());

			self.cache
				.set(&credentials_key, response.body_str().into_owned(), RECORD_TTL)
				.await
				.map_err(Error::from)?;

			Ok(CompletedCallback { user_id: returned.user_id, org_id: returned.org_id })
		})
		.await
	}
}
