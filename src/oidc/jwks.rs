//! Provider key-set retrieval

use jsonwebtoken::jwk::{Jwk, JwkSet};

use crate::core::client::OAuth2Client;
use crate::core::translate::{CallFailure, read_success_body};

/// Fetches a provider's published JSON Web Key Set.
///
/// Every fetch hits the network: key sets are small, providers rotate them,
/// and sign-in calls hold no cross-call state.
#[derive(Debug, Clone)]
pub struct JwksClient {
	client: OAuth2Client,
	jwks_uri: String,
}

impl JwksClient {
	pub fn new(client: OAuth2Client, jwks_uri: impl Into<String>) -> Self {
		Self {
			client,
			jwks_uri: jwks_uri.into(),
		}
	}

	/// The configured key-set URI
	pub fn jwks_uri(&self) -> &str {
		&self.jwks_uri
	}

	/// Fetches the key set and selects the key for `kid`
	pub(crate) async fn fetch_key(&self, kid: Option<&str>) -> Result<Jwk, CallFailure> {
		let response = self.client.client().get(&self.jwks_uri).send().await?;
		let body = read_success_body(response).await?;
		let jwks: JwkSet = serde_json::from_str(&body)?;

		select_key(&jwks, kid)
	}
}

/// Selects the signing key for a token header.
///
/// A `kid` must match exactly. Without a `kid`, a single-key set is
/// unambiguous and that key is used; anything else fails.
pub(crate) fn select_key(jwks: &JwkSet, kid: Option<&str>) -> Result<Jwk, CallFailure> {
	let jwk = match kid {
		Some(kid) => jwks.find(kid),
		None if jwks.keys.len() == 1 => jwks.keys.first(),
		None => None,
	};

	jwk.cloned().ok_or_else(|| CallFailure::KeyNotFound {
		kid: kid.map(str::to_string),
	})
}
