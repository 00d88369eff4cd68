//! Social sign-in error taxonomy

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Classification of a [`SocialAuthError`].
///
/// Mirrors the error variants one-to-one so call sites can dispatch on the
/// failure kind without destructuring the carried context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The authorization code could not be exchanged for a token
	CodeExchange,
	/// User data could not be retrieved with the obtained token
	UserDataRetrieval,
	/// A token failed an explicit validation step
	TokenInvalid,
	/// Construction-time credentials are missing or invalid
	Configuration,
}

impl ErrorKind {
	/// Stable name used in log output
	pub fn as_str(&self) -> &'static str {
		match self {
			ErrorKind::CodeExchange => "code_exchange",
			ErrorKind::UserDataRetrieval => "user_data_retrieval",
			ErrorKind::TokenInvalid => "token_invalid",
			ErrorKind::Configuration => "configuration",
		}
	}

	/// Builds the error of this kind carrying `message` and `extra`
	pub(crate) fn into_error(self, message: String, extra: HashMap<String, Value>) -> SocialAuthError {
		match self {
			ErrorKind::CodeExchange => SocialAuthError::CodeExchange { message, extra },
			ErrorKind::UserDataRetrieval => SocialAuthError::UserDataRetrieval { message, extra },
			ErrorKind::TokenInvalid => SocialAuthError::TokenInvalid { message, extra },
			ErrorKind::Configuration => SocialAuthError::Configuration { message, extra },
		}
	}
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Social sign-in errors.
///
/// The closed set of failure kinds that crosses the crate boundary. Every
/// variant carries a human-readable message plus an `extra` map with the
/// structured context preserved at the translation point (underlying cause,
/// offending response, HTTP status, and so on). Transport-library error
/// types never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocialAuthError {
	/// Authorization code invalid, expired, or already used, or the token
	/// endpoint was unreachable or returned a malformed response
	#[error("code exchange failed: {message}")]
	CodeExchange {
		message: String,
		extra: HashMap<String, Value>,
	},

	/// Token invalid, expired, or signed by the wrong issuer, the user-info
	/// endpoint was unreachable or returned a malformed response, or a
	/// required profile field was missing
	#[error("user data retrieval failed: {message}")]
	UserDataRetrieval {
		message: String,
		extra: HashMap<String, Value>,
	},

	/// A token failed a standalone validation step
	#[error("token invalid: {message}")]
	TokenInvalid {
		message: String,
		extra: HashMap<String, Value>,
	},

	/// Missing or invalid construction-time credentials
	#[error("configuration error: {message}")]
	Configuration {
		message: String,
		extra: HashMap<String, Value>,
	},
}

impl SocialAuthError {
	/// The failure kind, for catch-by-kind dispatch
	pub fn kind(&self) -> ErrorKind {
		match self {
			SocialAuthError::CodeExchange { .. } => ErrorKind::CodeExchange,
			SocialAuthError::UserDataRetrieval { .. } => ErrorKind::UserDataRetrieval,
			SocialAuthError::TokenInvalid { .. } => ErrorKind::TokenInvalid,
			SocialAuthError::Configuration { .. } => ErrorKind::Configuration,
		}
	}

	/// The human-readable message
	pub fn message(&self) -> &str {
		match self {
			SocialAuthError::CodeExchange { message, .. }
			| SocialAuthError::UserDataRetrieval { message, .. }
			| SocialAuthError::TokenInvalid { message, .. }
			| SocialAuthError::Configuration { message, .. } => message,
		}
	}

	/// Structured context attached at the translation point
	pub fn extra(&self) -> &HashMap<String, Value> {
		match self {
			SocialAuthError::CodeExchange { extra, .. }
			| SocialAuthError::UserDataRetrieval { extra, .. }
			| SocialAuthError::TokenInvalid { extra, .. }
			| SocialAuthError::Configuration { extra, .. } => extra,
		}
	}

	/// Configuration error without additional context
	pub(crate) fn configuration(message: impl Into<String>) -> Self {
		SocialAuthError::Configuration {
			message: message.into(),
			extra: HashMap::new(),
		}
	}
}
