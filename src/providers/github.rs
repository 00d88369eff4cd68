//! GitHub provider
//!
//! OAuth2 Authorization-Code exchange yielding an opaque bearer token;
//! retrieval is a second, authenticated call to the user endpoint.

use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::core::client::OAuth2Client;
use crate::core::error::{ErrorKind, SocialAuthError};
use crate::core::provider::{Provider, SocialProvider};
use crate::core::translate::{CallFailure, handle_call_failures, read_success_body};
use crate::core::user_data::GithubUserData;

/// OAuth2 scopes requested from GitHub
pub const GITHUB_SCOPES: &[&str] = &["user", "user:email"];

/// Endpoint exchanging an authorization code for an access token
pub const GITHUB_TOKEN_ENDPOINT: &str = "https://github.com/login/oauth/access_token";

/// Endpoint the user consents at
pub const GITHUB_AUTHORIZATION_ENDPOINT: &str = "https://github.com/login/oauth/authorize";

/// Authenticated user endpoint
pub const GITHUB_USER_INFO_ENDPOINT: &str = "https://api.github.com/user";

/// Wire shape of the GitHub user endpoint.
///
/// GitHub returns explicit nulls for withheld fields (a privacy-restricted
/// account has `"email": null`); normalization decides which of those are
/// fatal.
#[derive(Debug, Deserialize)]
struct GithubUserResponse {
	login: Option<String>,
	name: Option<String>,
	email: Option<String>,
	avatar_url: Option<String>,
	bio: Option<String>,
	location: Option<String>,
}

/// GitHub authentication provider.
///
/// One value per set of OAuth2 client credentials. Endpoints default to
/// GitHub's production endpoints and can be redirected through the builder
/// methods, which tests use to target a local server.
///
/// # Example
///
/// ```ignore
/// use social_signin::{GithubSocialAuth, SocialProvider};
///
/// let github = GithubSocialAuth::new(client_id, client_secret)?;
/// let user = github.sign_in(&code).await?;
/// println!("{} <{}>", user.username, user.email);
/// ```
#[derive(Debug)]
pub struct GithubSocialAuth {
	client_id: String,
	client_secret: String,
	redirect_uri: Option<String>,
	token_endpoint: String,
	authorization_endpoint: String,
	user_info_endpoint: String,
	client: OAuth2Client,
}

impl GithubSocialAuth {
	/// Creates a GitHub provider from OAuth2 client credentials.
	///
	/// # Errors
	///
	/// [`SocialAuthError::Configuration`] when either credential is empty.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, SocialAuthError> {
		let client_id = client_id.into();
		let client_secret = client_secret.into();
		if client_id.is_empty() || client_secret.is_empty() {
			return Err(SocialAuthError::configuration(
				"GitHub provider requires client_id and client_secret",
			));
		}

		Ok(Self {
			client_id,
			client_secret,
			redirect_uri: None,
			token_endpoint: GITHUB_TOKEN_ENDPOINT.to_string(),
			authorization_endpoint: GITHUB_AUTHORIZATION_ENDPOINT.to_string(),
			user_info_endpoint: GITHUB_USER_INFO_ENDPOINT.to_string(),
			client: OAuth2Client::new(),
		})
	}

	/// Sets the redirect URI sent in the consent URL.
	///
	/// GitHub falls back to the callback configured on the OAuth app when
	/// none is sent.
	pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(uri.into());
		self
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

	/// Overrides the user endpoint
	pub fn with_user_info_endpoint(mut self, url: impl Into<String>) -> Self {
		self.user_info_endpoint = url.into();
		self
	}

	/// Builds the consent URL the caller redirects the user to.
	///
	/// `state` passes through untouched; generating and validating it is
	/// the caller's responsibility.
	pub fn authorization_url(&self, state: &str) -> Result<String, SocialAuthError> {
		let scope = GITHUB_SCOPES.join(" ");
		let mut params = vec![
			("client_id", self.client_id.as_str()),
			("scope", scope.as_str()),
			("state", state),
		];
		if let Some(redirect_uri) = &self.redirect_uri {
			params.push(("redirect_uri", redirect_uri.as_str()));
		}

		let url = Url::parse_with_params(&self.authorization_endpoint, &params).map_err(|err| {
			SocialAuthError::configuration(format!("invalid authorization endpoint: {err}"))
		})?;
		Ok(url.into())
	}
}

#[async_trait]
impl SocialProvider for GithubSocialAuth {
	type UserData = GithubUserData;

	fn provider(&self) -> Provider {
		Provider::Github
	}

	async fn exchange_code_for_access_token(&self, code: &str) -> Result<String, SocialAuthError> {
		handle_call_failures("code exchange", ErrorKind::CodeExchange, async {
			let params = [
				("client_id", self.client_id.as_str()),
				("client_secret", self.client_secret.as_str()),
				("code", code),
			];
			let response = self
				.client
				.client()
				.post(&self.token_endpoint)
				.header(header::ACCEPT, "application/json")
				.form(&params)
				.send()
				.await?;
			let body = read_success_body(response).await?;
			let token_response: Value = serde_json::from_str(&body)?;

			match token_response.get("access_token").and_then(Value::as_str) {
				Some(access_token) => Ok(access_token.to_string()),
				None => Err(CallFailure::MissingField {
					field: "access_token",
					response: token_response,
				}),
			}
		})
		.await
	}

	async fn retrieve_user_data(
		&self,
		access_token: &str,
	) -> Result<GithubUserData, SocialAuthError> {
		handle_call_failures("user data retrieval", ErrorKind::UserDataRetrieval, async {
			let response = self
				.client
				.client()
				.get(&self.user_info_endpoint)
				.bearer_auth(access_token)
				.header(header::ACCEPT, "application/vnd.github+json")
				.send()
				.await?;
			let body = read_success_body(response).await?;
			let user: GithubUserResponse = serde_json::from_str(&body)?;

			Ok(GithubUserData {
				username: required_field("login", user.login)?,
				full_name: required_field("name", user.name)?,
				email: required_field("email", user.email)?,
				picture: user.avatar_url,
				bio: user.bio,
				location: user.location,
			})
		})
		.await
	}
}

/// Rejects missing, null, or empty required profile fields
fn required_field(field: &'static str, value: Option<String>) -> Result<String, CallFailure> {
	match value {
		Some(value) if !value.is_empty() => Ok(value),
		_ => Err(CallFailure::MissingProfileField { field }),
	}
}
