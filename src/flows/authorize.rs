//! Authorization initiator: issues the authorize URL and stashes the pending state.

// self
use crate::{
	_prelude::*,
	auth::{OrgId, PendingAuthState, UserId},
	cache::CacheKey,
	flows::{Connector, RECORD_TTL},
	http::ProviderHttpClient,
	obs::{self, FlowKind},
	provider::ProviderConfig,
};

/// Handshake metadata returned by [`Connector::start_authorization`].
#[derive(Clone, Debug)]
pub struct AuthorizationSession {
	/// End user the session belongs to.
	pub user_id: UserId,
	/// Organization the session belongs to.
	pub org_id: OrgId,
	/// Random token embedded in the state blob; the callback must echo it exactly.
	pub state: String,
	/// Fully-formed authorize URL that callers should send the end user to.
	pub authorize_url: Url,
}

impl<C> Connector<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Builds the provider authorization URL and stashes the pending-state record.
	///
	/// One cache write, no network call. The record expires after [`RECORD_TTL`] and is consumed
	/// exactly once by [`Connector::complete_callback`](crate::flows::Connector::complete_callback).
	pub async fn start_authorization(
		&self,
		user_id: UserId,
		org_id: OrgId,
	) -> Result<AuthorizationSession> {
		obs::observe(FlowKind::Authorize, "start_authorization", async move {
			let pending = PendingAuthState::generate(user_id.clone(), org_id.clone());
			let encoded = pending.encode();
			let authorize_url = build_authorize_url(&self.config, &encoded);
			let key = CacheKey::state(org_id.clone(), user_id.clone());

			self.cache.set(&key, encoded, RECORD_TTL).await.map_err(Error::from)?;

			Ok(AuthorizationSession { user_id, org_id, state: pending.state, authorize_url })
		})
		.await
	}
}

fn build_authorize_url(config: &ProviderConfig, encoded_state: &str) -> Url {
	let mut url = config.authorization_url.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("client_id", &config.client_id);
	pairs.append_pair("redirect_uri", config.redirect_uri.as_str());
	pairs.append_pair("scope", &config.scope);
	pairs.append_pair("state", encoded_state);

	drop(pairs);

	url
}
