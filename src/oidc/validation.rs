//! ID-token verification

use std::str::FromStr;

use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::client::OAuth2Client;
use crate::core::error::{ErrorKind, SocialAuthError};
use crate::core::translate::{CallFailure, handle_call_failures};
use crate::oidc::jwks::JwksClient;

/// Verifies a provider-issued ID token against the provider's key set.
///
/// Checks, in order: signature (key selected by the header `kid`), expiry,
/// audience, then the `iss` claim against the accepted issuer list. The
/// signing algorithm comes from the matching JWK, with the token header
/// only as a fallback, so the provider's published key material rather
/// than the attacker-controllable header decides how verification runs.
pub struct IdTokenValidator {
	jwks: JwksClient,
	audience: String,
	issuers: Vec<String>,
}

impl IdTokenValidator {
	pub fn new(
		client: OAuth2Client,
		jwks_uri: impl Into<String>,
		audience: impl Into<String>,
		issuers: Vec<String>,
	) -> Self {
		Self {
			jwks: JwksClient::new(client, jwks_uri),
			audience: audience.into(),
			issuers,
		}
	}

	/// Standalone validation entry point.
	///
	/// Failures classify as [`SocialAuthError::TokenInvalid`]. The Google
	/// provider's retrieval phase runs the same checks but classifies
	/// failures as retrieval errors, since they occur in the second
	/// protocol phase.
	pub async fn verify<C: DeserializeOwned>(&self, id_token: &str) -> Result<C, SocialAuthError> {
		handle_call_failures(
			"token validation",
			ErrorKind::TokenInvalid,
			self.validate(id_token),
		)
		.await
	}

	/// Verifies `id_token` and deserializes its claims.
	///
	/// An issuer outside the accepted list fails even when the signature
	/// itself is valid.
	pub(crate) async fn validate<C: DeserializeOwned>(
		&self,
		id_token: &str,
	) -> Result<C, CallFailure> {
		let header = jsonwebtoken::decode_header(id_token)?;
		let jwk = self.jwks.fetch_key(header.kid.as_deref()).await?;
		let key = DecodingKey::from_jwk(&jwk)?;

		let mut validation = Validation::new(signing_algorithm(&jwk, header.alg)?);
		validation.set_audience(&[self.audience.as_str()]);

		let token = jsonwebtoken::decode::<Value>(id_token, &key, &validation)?;

		let iss = token
			.claims
			.get("iss")
			.and_then(Value::as_str)
			.unwrap_or_default();
		if !self.issuers.iter().any(|accepted| accepted == iss) {
			return Err(CallFailure::InvalidIssuer {
				iss: iss.to_string(),
			});
		}

		Ok(serde_json::from_value(token.claims)?)
	}
}

/// Algorithm declared by the key, falling back to the token header
fn signing_algorithm(jwk: &Jwk, header_alg: Algorithm) -> Result<Algorithm, CallFailure> {
	match jwk.common.key_algorithm {
		Some(declared) => Ok(Algorithm::from_str(&declared.to_string())?),
		None => Ok(header_alg),
	}
}
