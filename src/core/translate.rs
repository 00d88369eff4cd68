//! Failure translation for outbound provider calls
//!
//! Providers run every network and verification step through
//! [`handle_call_failures`], which collapses the heterogeneous failure modes
//! of the transport and JWT layers into exactly one [`SocialAuthError`]
//! kind. The underlying cause is logged and kept in the error's `extra`
//! map, never discarded.

use std::collections::HashMap;
use std::future::Future;

use serde_json::Value;
use thiserror::Error;

use crate::core::error::{ErrorKind, SocialAuthError};

/// Ways an outbound provider call can fail before classification.
///
/// Internal to the crate; the public surface only ever sees
/// [`SocialAuthError`].
#[derive(Debug, Error)]
pub(crate) enum CallFailure {
	/// Transport-level failure (connect, timeout, TLS, body read)
	#[error("request error: {0}")]
	Request(#[from] reqwest::Error),

	/// Endpoint answered with a non-success status
	#[error("unexpected status {status}")]
	Status {
		status: reqwest::StatusCode,
		body: String,
	},

	/// Response body was not valid JSON
	#[error("malformed response: {0}")]
	Malformed(#[from] serde_json::Error),

	/// Well-formed response without the expected field
	#[error("response missing required field '{field}'")]
	MissingField {
		field: &'static str,
		response: Value,
	},

	/// ID-token signature, expiry, or audience verification failed
	#[error("token verification failed: {0}")]
	Verification(#[from] jsonwebtoken::errors::Error),

	/// Key set contained no key usable for the token header
	#[error("no key in the key set matches kid {kid:?}")]
	KeyNotFound { kid: Option<String> },

	/// ID token signed by an unexpected issuer
	#[error("invalid token issuer '{iss}'")]
	InvalidIssuer { iss: String },

	/// Verified token without a claim the user record requires
	#[error("required claim '{claim}' is missing or empty")]
	MissingClaim { claim: &'static str },

	/// Profile response without a field the user record requires
	#[error("required profile field '{field}' is missing or empty")]
	MissingProfileField { field: &'static str },
}

impl CallFailure {
	/// Structured context preserved on the classified error
	fn context(&self) -> HashMap<String, Value> {
		let mut extra = HashMap::new();
		extra.insert("cause".to_string(), Value::String(self.to_string()));
		match self {
			CallFailure::Status { status, body } => {
				extra.insert("status".to_string(), Value::from(status.as_u16()));
				extra.insert("body".to_string(), Value::String(body.clone()));
			}
			CallFailure::MissingField { field, response } => {
				extra.insert("field".to_string(), Value::String((*field).to_string()));
				extra.insert("response".to_string(), response.clone());
			}
			CallFailure::KeyNotFound { kid } => {
				if let Some(kid) = kid {
					extra.insert("kid".to_string(), Value::String(kid.clone()));
				}
			}
			CallFailure::InvalidIssuer { iss } => {
				extra.insert("iss".to_string(), Value::String(iss.clone()));
			}
			CallFailure::MissingClaim { claim } => {
				extra.insert("claim".to_string(), Value::String((*claim).to_string()));
			}
			CallFailure::MissingProfileField { field } => {
				extra.insert("field".to_string(), Value::String((*field).to_string()));
			}
			CallFailure::Request(_) | CallFailure::Malformed(_) | CallFailure::Verification(_) => {}
		}
		extra
	}
}

/// Runs `call` and reclassifies any failure into `kind`.
///
/// The classified error message names the action (e.g. "code exchange")
/// and the cause; the original failure is logged at the translation point
/// and retained in the error's `extra` map.
pub(crate) async fn handle_call_failures<T, F>(
	action: &'static str,
	kind: ErrorKind,
	call: F,
) -> Result<T, SocialAuthError>
where
	F: Future<Output = Result<T, CallFailure>>,
{
	match call.await {
		Ok(value) => Ok(value),
		Err(failure) => {
			let context = failure.context();
			tracing::error!(
				action,
				kind = kind.as_str(),
				error = %failure,
				?context,
				"provider call failed"
			);
			let message = format!("{failure} during {action}");
			Err(kind.into_error(message, context))
		}
	}
}

/// Resolves a response into its body text, mapping non-success statuses to
/// [`CallFailure::Status`] with the body preserved for diagnostics.
pub(crate) async fn read_success_body(response: reqwest::Response) -> Result<String, CallFailure> {
	let status = response.status();
	if !status.is_success() {
		let body = response.text().await.unwrap_or_default();
		return Err(CallFailure::Status { status, body });
	}
	Ok(response.text().await?)
}
