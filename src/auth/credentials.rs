//! Opaque credential blob wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Verbatim token-endpoint response (access token, token type, expiry, scope).
///
/// The connector never interprets the blob beyond the `access_token` field; everything else is
/// carried untouched so callers can forward it to whatever consumes the provider API next.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(serde_json::Value);
impl Credentials {
	/// Parses a raw cached blob back into structured JSON.
	pub fn from_raw(raw: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(raw).map(Self)
	}

	/// Returns the bearer access token, when the provider issued one.
	pub fn access_token(&self) -> Option<&str> {
		self.0.get("access_token").and_then(serde_json::Value::as_str)
	}

	/// Borrows the underlying JSON document.
	pub fn as_value(&self) -> &serde_json::Value {
		&self.0
	}

	/// Consumes the wrapper and returns the underlying JSON document.
	pub fn into_value(self) -> serde_json::Value {
		self.0
	}
}
impl From<serde_json::Value> for Credentials {
	fn from(value: serde_json::Value) -> Self {
		Self(value)
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Credentials").field(&"<redacted>").finish()
	}
}
impl Display for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
