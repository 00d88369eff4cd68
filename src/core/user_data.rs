//! Normalized user records

use serde::{Deserialize, Serialize};

/// User record produced by a Google sign-in.
///
/// Required fields are non-empty whenever retrieval succeeds; a missing
/// required claim fails the retrieval instead of producing a partial
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleUserData {
	/// Corresponds to `given_name` in the ID token
	pub first_name: String,

	/// Corresponds to `family_name` in the ID token
	pub last_name: String,

	/// Corresponds to `name` in the ID token
	#[serde(skip_serializing_if = "Option::is_none")]
	pub full_name: Option<String>,

	/// Corresponds to `email` in the ID token
	pub email: String,

	/// Corresponds to `email_verified` in the ID token
	pub email_verified: bool,

	/// Corresponds to `picture` in the ID token
	#[serde(skip_serializing_if = "Option::is_none")]
	pub picture: Option<String>,
}

/// User record produced by a GitHub sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubUserData {
	/// Corresponds to `login` in the GitHub API
	pub username: String,

	/// Corresponds to `name` in the GitHub API
	pub full_name: String,

	/// Corresponds to `email` in the GitHub API
	pub email: String,

	/// Corresponds to `avatar_url` in the GitHub API
	#[serde(skip_serializing_if = "Option::is_none")]
	pub picture: Option<String>,

	/// Corresponds to `bio` in the GitHub API
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bio: Option<String>,

	/// Corresponds to `location` in the GitHub API
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
}
