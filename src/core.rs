//! Core building blocks: error taxonomy, provider contract, HTTP client,
//! failure translation, and the normalized user records

pub mod client;
pub mod error;
pub mod provider;
pub(crate) mod translate;
pub mod user_data;

pub use client::OAuth2Client;
pub use error::{ErrorKind, SocialAuthError};
pub use provider::{Provider, SocialProvider};
pub use user_data::{GithubUserData, GoogleUserData};
