//! Google provider integration tests

use chrono::{Duration, Utc};
use serde_json::json;
use social_signin::{ErrorKind, SocialProvider};

use helpers::TestFixtures;
use helpers::mock_server::{ErrorMode, MockOAuth2Server};

#[path = "../helpers/mod.rs"]
mod helpers;

#[tokio::test]
async fn test_exchange_code_for_access_token_success() {
	// Arrange
	let mut server = MockOAuth2Server::new().await;
	server.set_token_response(json!({"id_token": "test_token"}));
	let google = TestFixtures::google_provider(&server);

	// Act
	let result = google.exchange_code_for_access_token("test_code").await;

	// Assert - the id_token field comes back verbatim
	assert_eq!(result.unwrap(), "test_token");
}

#[tokio::test]
async fn test_exchange_fails_when_id_token_field_is_missing() {
	// Arrange - a token response without the identity token
	let mut server = MockOAuth2Server::new().await;
	server.set_token_response(json!({"access_token": "ya29.opaque"}));
	let google = TestFixtures::google_provider(&server);

	// Act
	let result = google.exchange_code_for_access_token("test_code").await;

	// Assert - classified as a code exchange failure with the response kept
	let error = result.unwrap_err();
	assert_eq!(error.kind(), ErrorKind::CodeExchange);
	assert_eq!(error.extra().get("field"), Some(&json!("id_token")));
	assert_eq!(
		error.extra().get("response"),
		Some(&json!({"access_token": "ya29.opaque"}))
	);
}

#[tokio::test]
async fn test_exchange_fails_on_invalid_json() {
	// Arrange
	let mut server = MockOAuth2Server::new().await;
	server.set_error_mode(ErrorMode::InvalidResponse);
	let google = TestFixtures::google_provider(&server);

	// Act
	let result = google.exchange_code_for_access_token("test_code").await;

	// Assert
	assert_eq!(result.unwrap_err().kind(), ErrorKind::CodeExchange);
}

#[tokio::test]
async fn test_retrieve_user_data_success() {
	// Arrange - a signed token the validator accepts
	let mut server = MockOAuth2Server::new().await;
	server.set_jwks_response(TestFixtures::jwks());
	let id_token = TestFixtures::sign_id_token(&TestFixtures::google_claims());
	let google = TestFixtures::google_provider(&server);

	// Act
	let user = google.retrieve_user_data(&id_token).await.unwrap();

	// Assert - claim-by-claim mapping
	assert_eq!(user.first_name, "Test");
	assert_eq!(user.last_name, "User");
	assert_eq!(user.full_name.as_deref(), Some("Test User"));
	assert_eq!(user.email, "test@example.com");
	assert!(user.email_verified);
	assert_eq!(
		user.picture.as_deref(),
		Some("http://example.com/picture.jpg")
	);
}

#[tokio::test]
async fn test_retrieve_user_data_rejects_foreign_issuer() {
	// Arrange - valid signature, wrong issuer
	let mut server = MockOAuth2Server::new().await;
	server.set_jwks_response(TestFixtures::jwks());
	let mut claims = TestFixtures::google_claims();
	claims["iss"] = json!("https://evil.example.com");
	let id_token = TestFixtures::sign_id_token(&claims);
	let google = TestFixtures::google_provider(&server);

	// Act
	let result = google.retrieve_user_data(&id_token).await;

	// Assert - a retrieval failure naming the offending issuer
	let error = result.unwrap_err();
	assert_eq!(error.kind(), ErrorKind::UserDataRetrieval);
	assert_eq!(
		error.extra().get("iss"),
		Some(&json!("https://evil.example.com"))
	);
}

#[tokio::test]
async fn test_retrieve_user_data_accepts_the_bare_issuer_form() {
	// Arrange - Google also signs tokens with the scheme-less issuer
	let mut server = MockOAuth2Server::new().await;
	server.set_jwks_response(TestFixtures::jwks());
	let mut claims = TestFixtures::google_claims();
	claims["iss"] = json!("accounts.google.com");
	let id_token = TestFixtures::sign_id_token(&claims);
	let google = TestFixtures::google_provider(&server);

	// Act
	let result = google.retrieve_user_data(&id_token).await;

	// Assert
	assert!(result.is_ok());
}

#[tokio::test]
async fn test_retrieve_user_data_rejects_expired_token() {
	// Arrange
	let mut server = MockOAuth2Server::new().await;
	server.set_jwks_response(TestFixtures::jwks());
	let mut claims = TestFixtures::google_claims();
	claims["exp"] = json!((Utc::now() - Duration::hours(2)).timestamp());
	claims["iat"] = json!((Utc::now() - Duration::hours(3)).timestamp());
	let id_token = TestFixtures::sign_id_token(&claims);
	let google = TestFixtures::google_provider(&server);

	// Act
	let result = google.retrieve_user_data(&id_token).await;

	// Assert
	assert_eq!(result.unwrap_err().kind(), ErrorKind::UserDataRetrieval);
}

#[tokio::test]
async fn test_retrieve_user_data_rejects_wrong_audience() {
	// Arrange - token minted for a different client
	let mut server = MockOAuth2Server::new().await;
	server.set_jwks_response(TestFixtures::jwks());
	let mut claims = TestFixtures::google_claims();
	claims["aud"] = json!("another_client_id");
	let id_token = TestFixtures::sign_id_token(&claims);
	let google = TestFixtures::google_provider(&server);

	// Act
	let result = google.retrieve_user_data(&id_token).await;

	// Assert
	assert_eq!(result.unwrap_err().kind(), ErrorKind::UserDataRetrieval);
}

#[tokio::test]
async fn test_retrieve_user_data_requires_the_profile_claims() {
	// Arrange - verified token without a family_name claim
	let mut server = MockOAuth2Server::new().await;
	server.set_jwks_response(TestFixtures::jwks());
	let mut claims = TestFixtures::google_claims();
	claims.as_object_mut().unwrap().remove("family_name");
	let id_token = TestFixtures::sign_id_token(&claims);
	let google = TestFixtures::google_provider(&server);

	// Act
	let result = google.retrieve_user_data(&id_token).await;

	// Assert
	let error = result.unwrap_err();
	assert_eq!(error.kind(), ErrorKind::UserDataRetrieval);
	assert_eq!(error.extra().get("claim"), Some(&json!("family_name")));
}

#[tokio::test]
async fn test_sign_in_end_to_end() {
	// Arrange - the token endpoint hands out a verifiable ID token
	let mut server = MockOAuth2Server::new().await;
	server.set_jwks_response(TestFixtures::jwks());
	let id_token = TestFixtures::sign_id_token(&TestFixtures::google_claims());
	server.set_token_response(json!({"id_token": id_token}));
	let google = TestFixtures::google_provider(&server);

	// Act
	let user = google.sign_in("test_code").await.unwrap();

	// Assert
	assert_eq!(user.first_name, "Test");
	assert_eq!(user.last_name, "User");
	assert_eq!(user.email, "test@example.com");
	assert_eq!(server.token_hits(), 1);
	assert_eq!(server.jwks_hits(), 1);
}

#[tokio::test]
async fn test_sign_in_skips_retrieval_when_exchange_fails() {
	// Arrange - every endpoint is down; the exchange fails first
	let mut server = MockOAuth2Server::new().await;
	server.set_error_mode(ErrorMode::ServerError);
	let google = TestFixtures::google_provider(&server);

	// Act
	let result = google.sign_in("test_code").await;

	// Assert - verification is never attempted
	assert_eq!(result.unwrap_err().kind(), ErrorKind::CodeExchange);
	assert_eq!(server.token_hits(), 1);
	assert_eq!(server.jwks_hits(), 0);
}
