//! Provider tags and the sign-in contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::SocialAuthError;

/// Supported identity providers.
///
/// A closed set of tags. Only [`Provider::Google`] and [`Provider::Github`]
/// have implementations; the remaining tags are reserved for future
/// variants. Adding a provider means adding a tag and an implementation,
/// not touching the dispatch surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
	Apple,
	Facebook,
	Github,
	Google,
	Linkedin,
	Microsoft,
	Twitter,
}

impl Provider {
	/// Lowercase wire form of the tag
	pub fn as_str(&self) -> &'static str {
		match self {
			Provider::Apple => "apple",
			Provider::Facebook => "facebook",
			Provider::Github => "github",
			Provider::Google => "google",
			Provider::Linkedin => "linkedin",
			Provider::Microsoft => "microsoft",
			Provider::Twitter => "twitter",
		}
	}
}

impl std::fmt::Display for Provider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Social sign-in contract.
///
/// Every provider implements the two protocol phases; `sign_in` is the
/// provided composition and the single entry point hosting applications
/// should call. One value per set of client credentials; values are
/// immutable after construction and safe to share across concurrent
/// callers.
///
/// # Example
///
/// ```ignore
/// use social_signin::{GithubSocialAuth, SocialProvider};
///
/// let github = GithubSocialAuth::new("client_id", "client_secret")?;
/// let user = github.sign_in(&code).await?;
/// println!("signed in as {}", user.username);
/// ```
#[async_trait]
pub trait SocialProvider: Send + Sync {
	/// Normalized user record this provider produces
	type UserData: Send;

	/// The fixed provider tag
	fn provider(&self) -> Provider;

	/// Exchange the authorization code for an access or identity token.
	///
	/// Single attempt, fail fast. Authorization codes are one-time-use, so
	/// retrying a failed exchange with the same code is incorrect; callers
	/// that want another attempt must obtain a fresh code.
	///
	/// # Errors
	///
	/// [`SocialAuthError::CodeExchange`] when the token endpoint answers
	/// with a non-success status, the response cannot be parsed, the
	/// expected token field is absent, or the endpoint is unreachable.
	async fn exchange_code_for_access_token(&self, code: &str) -> Result<String, SocialAuthError>;

	/// Retrieve the normalized user record for `access_token`.
	///
	/// # Errors
	///
	/// [`SocialAuthError::UserDataRetrieval`] on transport failure,
	/// non-success status, malformed response, failed token verification,
	/// or a missing required profile field.
	async fn retrieve_user_data(&self, access_token: &str)
	-> Result<Self::UserData, SocialAuthError>;

	/// Complete the sign-in: exchange the code, then retrieve user data.
	///
	/// Pure composition of the two phases. Either error propagates
	/// unchanged; no additional wrapping happens here. Implementations
	/// must not override this.
	async fn sign_in(&self, code: &str) -> Result<Self::UserData, SocialAuthError> {
		let access_token = self.exchange_code_for_access_token(code).await?;
		self.retrieve_user_data(&access_token).await
	}
}
