#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use hubspot_connect::{
	_preludet::*,
	auth::{OrgId, PendingAuthState, UserId},
	cache::{CacheKey, ConnectorCache},
	flows::CallbackParams,
};

const CLIENT_ID: &str = "client-it";
const CLIENT_SECRET: &str = "secret-it";

fn ids() -> (UserId, OrgId) {
	(
		UserId::new("user-456").expect("User identifier should be valid for callback tests."),
		OrgId::new("org-123").expect("Org identifier should be valid for callback tests."),
	)
}

fn state_blob_of(authorize_url: &Url) -> String {
	authorize_url
		.query_pairs()
		.find(|(name, _)| name == "state")
		.map(|(_, value)| value.into_owned())
		.expect("Authorize URL should carry a state parameter.")
}

#[tokio::test]
async fn authorize_then_callback_stores_credentials() {
	let server = MockServer::start_async().await;
	let (connector, _) = build_reqwest_test_connector(test_provider_config(
		&server.base_url(),
		CLIENT_ID,
		CLIENT_SECRET,
	));
	let (user, org) = ids();
	let session = connector
		.start_authorization(user.clone(), org.clone())
		.await
		.expect("Authorization should start successfully.");

	let pairs: HashMap<_, _> = session.authorize_url.query_pairs().into_owned().collect();

	assert_eq!(pairs.get("client_id"), Some(&CLIENT_ID.into()));
	assert_eq!(pairs.get("scope"), Some(&"oauth crm.objects.contacts.read".into()));

	let blob = state_blob_of(&session.authorize_url);
	let decoded = PendingAuthState::decode(&blob).expect("Issued state blob should decode.");

	assert_eq!(decoded.state, session.state);
	assert_eq!(decoded.user_id, user);
	assert_eq!(decoded.org_id, org);

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"access-success\",\"token_type\":\"bearer\",\"expires_in\":1800,\"scope\":\"oauth\"}",
			);
		})
		.await;
	let completed = connector
		.complete_callback(CallbackParams::new("valid-code", blob))
		.await
		.expect("Callback should complete successfully.");

	mock.assert_async().await;

	assert_eq!(completed.user_id, user);
	assert_eq!(completed.org_id, org);

	let credentials = connector
		.take_credentials(user, org)
		.await
		.expect("Stored credentials should be retrievable once.");

	assert_eq!(credentials.access_token(), Some("access-success"));
	assert_eq!(credentials.as_value()["token_type"], "bearer");
}

#[tokio::test]
async fn provider_error_short_circuits_before_the_token_endpoint() {
	let server = MockServer::start_async().await;
	let (connector, _) = build_reqwest_test_connector(test_provider_config(
		&server.base_url(),
		CLIENT_ID,
		CLIENT_SECRET,
	));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200);
		})
		.await;
	let params = CallbackParams {
		error: Some("access_denied".into()),
		error_description: Some("User denied access".into()),
		..Default::default()
	};
	let err = connector
		.complete_callback(params)
		.await
		.expect_err("Provider-signaled errors should fail the callback.");

	assert!(matches!(err, Error::ProviderDenied { ref description } if description == "User denied access"));
	assert_eq!(err.status_code(), 400);
	assert_eq!(mock.hits_async().await, 0, "The token endpoint must never be contacted.");
}

#[tokio::test]
async fn tampered_or_missing_state_fails_with_state_mismatch() {
	let server = MockServer::start_async().await;
	let (connector, _) = build_reqwest_test_connector(test_provider_config(
		&server.base_url(),
		CLIENT_ID,
		CLIENT_SECRET,
	));
	let (user, org) = ids();

	connector
		.start_authorization(user.clone(), org.clone())
		.await
		.expect("Authorization should start successfully.");

	// A forged blob with the right identifiers but a freshly generated token.
	let forged = PendingAuthState::generate(user, org).encode();
	let err = connector
		.complete_callback(CallbackParams::new("valid-code", forged))
		.await
		.expect_err("A forged state token must be rejected.");

	assert!(matches!(err, Error::StateMismatch { .. }));

	let err = connector
		.complete_callback(CallbackParams {
			code: Some("valid-code".into()),
			..Default::default()
		})
		.await
		.expect_err("A callback without state must be rejected.");

	assert!(matches!(err, Error::StateMismatch { .. }));

	let err = connector
		.complete_callback(CallbackParams::new("valid-code", "%%%not-base64%%%"))
		.await
		.expect_err("An undecodable state blob must be rejected.");

	assert!(matches!(err, Error::StateMismatch { .. }));
}

#[tokio::test]
async fn callback_replay_fails_after_the_state_is_consumed() {
	let server = MockServer::start_async().await;
	let (connector, _) = build_reqwest_test_connector(test_provider_config(
		&server.base_url(),
		CLIENT_ID,
		CLIENT_SECRET,
	));
	let (user, org) = ids();
	let session = connector
		.start_authorization(user, org)
		.await
		.expect("Authorization should start successfully.");
	let blob = state_blob_of(&session.authorize_url);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"access-once\"}");
		})
		.await;

	connector
		.complete_callback(CallbackParams::new("valid-code", blob.clone()))
		.await
		.expect("First callback should complete successfully.");

	let err = connector
		.complete_callback(CallbackParams::new("valid-code", blob))
		.await
		.expect_err("Replaying the same state must fail.");

	assert!(matches!(err, Error::StateMismatch { .. }));
	assert_eq!(mock.hits_async().await, 1, "A replay must not reach the token endpoint again.");
}

#[tokio::test]
async fn token_endpoint_failure_surfaces_as_upstream_failure() {
	let server = MockServer::start_async().await;
	let (connector, _) = build_reqwest_test_connector(test_provider_config(
		&server.base_url(),
		CLIENT_ID,
		CLIENT_SECRET,
	));
	let (user, org) = ids();
	let session = connector
		.start_authorization(user.clone(), org.clone())
		.await
		.expect("Authorization should start successfully.");
	let blob = state_blob_of(&session.authorize_url);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"status\":\"error\",\"message\":\"invalid code\"}");
		})
		.await;
	let err = connector
		.complete_callback(CallbackParams::new("stale-code", blob))
		.await
		.expect_err("A failed exchange must surface as an upstream failure.");

	mock.assert_async().await;

	assert!(matches!(err, Error::UpstreamFailure { endpoint: "token", status: Some(400), .. }));
	assert_eq!(err.status_code(), 502);

	let err = connector
		.take_credentials(user, org)
		.await
		.expect_err("No credentials may be stored when the exchange fails.");

	assert!(matches!(err, Error::NoCredentials));
}

#[tokio::test]
async fn transport_fault_still_consumes_the_pending_state() {
	// Nothing listens on this port; the token POST fails at the connection level.
	let config = test_provider_config("http://127.0.0.1:9", CLIENT_ID, CLIENT_SECRET);
	let (connector, cache) = build_reqwest_test_connector(config);
	let (user, org) = ids();
	let session = connector
		.start_authorization(user.clone(), org.clone())
		.await
		.expect("Authorization should start successfully.");
	let blob = state_blob_of(&session.authorize_url);
	let err = connector
		.complete_callback(CallbackParams::new("valid-code", blob.clone()))
		.await
		.expect_err("An unreachable token endpoint must fail the callback.");

	assert!(matches!(err, Error::Transport(_)));

	let pending = cache
		.get(&CacheKey::state(org, user))
		.await
		.expect("Reading the state record should succeed.");

	assert!(pending.is_none(), "The single-use state must be consumed despite the fault.");

	let err = connector
		.complete_callback(CallbackParams::new("valid-code", blob))
		.await
		.expect_err("A retry after the fault must not find a live state.");

	assert!(matches!(err, Error::StateMismatch { .. }));
}
