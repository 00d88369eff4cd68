//! # social-signin
//!
//! Provider-agnostic OAuth2 "social sign-in" client: give it the
//! authorization code handed back by a third-party identity provider and it
//! completes the two-step Authorization Code flow, returning a normalized
//! user record or a classified error.
//!
//! ## Supported providers
//!
//! - **Google**: code exchange yields a signed ID token which is verified
//!   locally (signature, expiry, audience, issuer) against Google's
//!   published keys, with no userinfo round trip
//! - **GitHub**: code exchange yields an opaque bearer token which is
//!   redeemed against GitHub's user endpoint
//!
//! Other provider tags ([`Provider`]) are reserved for future variants.
//!
//! ## Quick start
//!
//! ```ignore
//! use social_signin::{GithubSocialAuth, SocialAuthError, SocialProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SocialAuthError> {
//!     // Credentials come from the hosting application's configuration
//!     let github = GithubSocialAuth::new(client_id, client_secret)?;
//!
//!     match github.sign_in(&code).await {
//!         Ok(user) => println!("signed in as {}", user.username),
//!         Err(err) if err.kind() == ErrorKind::CodeExchange => {
//!             // "your code didn't work"
//!         }
//!         Err(_) => {
//!             // "we couldn't fetch your profile"
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`core`](crate::core): error taxonomy, the [`SocialProvider`]
//!   contract, the shared HTTP client, and the normalized user records
//! - [`oidc`]: key-set retrieval and ID-token verification for providers
//!   with the signed-token trust model
//! - [`providers`]: the Google and GitHub implementations
//!
//! Every `sign_in` call is stateless: providers hold only their
//! construction-time credentials, nothing is cached between calls, and no
//! failed step is retried (authorization codes are one-time-use). Failures
//! cross the crate boundary only as [`SocialAuthError`], with the
//! underlying cause logged via `tracing` and kept in the error context.

pub mod core;
pub mod oidc;
pub mod providers;

pub use crate::core::{
	ErrorKind, GithubUserData, GoogleUserData, OAuth2Client, Provider, SocialAuthError,
	SocialProvider,
};
pub use oidc::{IdTokenValidator, JwksClient};
pub use providers::{GithubSocialAuth, GoogleSocialAuth};
