//! Pending authorization state records and their URL-safe wire encoding.
//!
//! The record round-trips through the provider untouched: the connector encodes
//! `{state, user_id, org_id}` into the `state` query parameter and keeps a verbatim copy in the
//! cache. Integrity rests on the random token being unguessable plus the exact match against the
//! server-side copy—the blob itself is neither signed nor encrypted.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::{OrgId, UserId},
};

const STATE_TOKEN_LEN: usize = 32;

/// CSRF-defense record created by the authorization initiator and consumed once by the callback
/// handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAuthState {
	/// Opaque random token that must round-trip via the provider redirect.
	pub state: String,
	/// End user the pending authorization belongs to.
	pub user_id: UserId,
	/// Organization the pending authorization belongs to.
	pub org_id: OrgId,
}
impl PendingAuthState {
	/// Creates a record with a freshly generated random token.
	pub fn generate(user_id: UserId, org_id: OrgId) -> Self {
		Self { state: random_token(STATE_TOKEN_LEN), user_id, org_id }
	}

	/// Encodes the record into the URL-safe blob embedded in the authorize URL.
	pub fn encode(&self) -> String {
		let json = serde_json::to_vec(self)
			.expect("Pending-state record serialization should never fail.");

		URL_SAFE.encode(json)
	}

	/// Decodes a blob returned through the provider redirect.
	///
	/// Tampered or truncated blobs surface as [`Error::StateMismatch`]; the connector never
	/// distinguishes malformed state from forged state.
	pub fn decode(encoded: &str) -> Result<Self> {
		let raw = URL_SAFE
			.decode(encoded)
			.map_err(|_| Error::state_mismatch("state parameter is not valid base64"))?;

		serde_json::from_slice(&raw)
			.map_err(|_| Error::state_mismatch("state payload is not a valid pending-state record"))
	}

	/// Compares the embedded random tokens byte for byte.
	pub fn token_matches(&self, other: &Self) -> bool {
		self.state == other.state
	}
}

fn random_token(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
