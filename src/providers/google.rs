//! Google provider
//!
//! OAuth2 Authorization-Code exchange against Google's token endpoint,
//! yielding a signed ID token. Retrieval verifies that token locally
//! against Google's published keys; there is no userinfo round trip.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::core::client::OAuth2Client;
use crate::core::error::{ErrorKind, SocialAuthError};
use crate::core::provider::{Provider, SocialProvider};
use crate::core::translate::{CallFailure, handle_call_failures, read_success_body};
use crate::core::user_data::GoogleUserData;
use crate::oidc::IdTokenValidator;

/// OAuth2 scopes requested from Google
pub const GOOGLE_SCOPES: &[&str] = &[
	"openid",
	"https://www.googleapis.com/auth/userinfo.profile",
	"https://www.googleapis.com/auth/userinfo.email",
];

/// Endpoint exchanging an authorization code for tokens
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Endpoint the user consents at
pub const GOOGLE_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's published signing keys
pub const GOOGLE_JWKS_URI: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Issuer values Google signs ID tokens under
pub const GOOGLE_ISSUERS: &[&str] = &["accounts.google.com", "https://accounts.google.com"];

/// Claims read out of a verified Google ID token.
///
/// Everything is optional at the wire level; normalization enforces which
/// claims the user record requires.
#[derive(Debug, Deserialize)]
struct GoogleIdClaims {
	given_name: Option<String>,
	family_name: Option<String>,
	name: Option<String>,
	email: Option<String>,
	email_verified: Option<bool>,
	picture: Option<String>,
}

/// Google authentication provider.
///
/// One value per set of OAuth2 client credentials. Endpoints default to
/// Google's production endpoints and can be redirected through the
/// builder methods, which tests use to target a local server.
///
/// # Example
///
/// ```ignore
/// use social_signin::{GoogleSocialAuth, SocialProvider};
///
/// let google = GoogleSocialAuth::new(client_id, client_secret, redirect_uri)?;
/// let user = google.sign_in(&code).await?;
/// println!("{} <{}>", user.first_name, user.email);
/// ```
#[derive(Debug)]
pub struct GoogleSocialAuth {
	client_id: String,
	client_secret: String,
	redirect_uri: String,
	token_endpoint: String,
	authorization_endpoint: String,
	jwks_uri: String,
	client: OAuth2Client,
}

impl GoogleSocialAuth {
	/// Creates a Google provider from OAuth2 client credentials.
	///
	/// # Errors
	///
	/// [`SocialAuthError::Configuration`] when any credential is empty.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Result<Self, SocialAuthError> {
		let client_id = client_id.into();
		let client_secret = client_secret.into();
		let redirect_uri = redirect_uri.into();
		if client_id.is_empty() || client_secret.is_empty() || redirect_uri.is_empty() {
			return Err(SocialAuthError::configuration(
				"Google provider requires client_id, client_secret and redirect_uri",
			));
		}

		Ok(Self {
			client_id,
			client_secret,
			redirect_uri,
			token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
			authorization_endpoint: GOOGLE_AUTHORIZATION_ENDPOINT.to_string(),
			jwks_uri: GOOGLE_JWKS_URI.to_string(),
			client: OAuth2Client::new(),
		})
	}

	/// Overrides the token endpoint
	pub fn with_token_endpoint(mut self, url: impl Into<String>) -> Self {
		self.token_endpoint = url.into();
		self
	}

	/// Overrides the authorization endpoint
	pub fn with_authorization_endpoint(mut self, url: impl Into<String>) -> Self {
		self.authorization_endpoint = url.into();
		self
	}

	/// Overrides the key-set URI
	pub fn with_jwks_uri(mut self, url: impl Into<String>) -> Self {
		self.jwks_uri = url.into();
		self
	}

	/// Builds the consent URL the caller redirects the user to.
	///
	/// `state` passes through untouched; generating and validating it is
	/// the caller's responsibility.
	pub fn authorization_url(&self, state: &str) -> Result<String, SocialAuthError> {
		let scope = GOOGLE_SCOPES.join(" ");
		let url = Url::parse_with_params(
			&self.authorization_endpoint,
			&[
				("client_id", self.client_id.as_str()),
				("redirect_uri", self.redirect_uri.as_str()),
				("response_type", "code"),
				("scope", scope.as_str()),
				("state", state),
			],
		)
		.map_err(|err| {
			SocialAuthError::configuration(format!("invalid authorization endpoint: {err}"))
		})?;
		Ok(url.into())
	}
}

#[async_trait]
impl SocialProvider for GoogleSocialAuth {
	type UserData = GoogleUserData;

	fn provider(&self) -> Provider {
		Provider::Google
	}

	async fn exchange_code_for_access_token(&self, code: &str) -> Result<String, SocialAuthError> {
		handle_call_failures("code exchange", ErrorKind::CodeExchange, async {
			let params = [
				("grant_type", "authorization_code"),
				("code", code),
				("client_id", self.client_id.as_str()),
				("client_secret", self.client_secret.as_str()),
				("redirect_uri", self.redirect_uri.as_str()),
			];
			let response = self
				.client
				.client()
				.post(&self.token_endpoint)
				.form(&params)
				.send()
				.await?;
			let body = read_success_body(response).await?;
			let token_response: Value = serde_json::from_str(&body)?;

			match token_response.get("id_token").and_then(Value::as_str) {
				Some(id_token) => Ok(id_token.to_string()),
				None => Err(CallFailure::MissingField {
					field: "id_token",
					response: token_response,
				}),
			}
		})
		.await
	}

	async fn retrieve_user_data(
		&self,
		access_token: &str,
	) -> Result<GoogleUserData, SocialAuthError> {
		let validator = IdTokenValidator::new(
			self.client.clone(),
			self.jwks_uri.clone(),
			self.client_id.clone(),
			GOOGLE_ISSUERS.iter().map(|iss| iss.to_string()).collect(),
		);

		handle_call_failures("user data retrieval", ErrorKind::UserDataRetrieval, async {
			let claims: GoogleIdClaims = validator.validate(access_token).await?;

			Ok(GoogleUserData {
				first_name: required_claim("given_name", claims.given_name)?,
				last_name: required_claim("family_name", claims.family_name)?,
				full_name: claims.name,
				email: required_claim("email", claims.email)?,
				email_verified: claims.email_verified.ok_or(CallFailure::MissingClaim {
					claim: "email_verified",
				})?,
				picture: claims.picture,
			})
		})
		.await
	}
}

/// Rejects missing or empty required claims
fn required_claim(claim: &'static str, value: Option<String>) -> Result<String, CallFailure> {
	match value {
		Some(value) if !value.is_empty() => Ok(value),
		_ => Err(CallFailure::MissingClaim { claim }),
	}
}
