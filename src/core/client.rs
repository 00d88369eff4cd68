//! Shared HTTP client for outbound provider calls

use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper around [`reqwest::Client`] shared by all providers.
///
/// Connection pooling and timeouts live here; request semantics stay with
/// the callers. Cloning is cheap, the inner client is reference counted.
/// The client also sends a crate-identifying `User-Agent`, which GitHub's
/// API requires.
#[derive(Debug, Clone)]
pub struct OAuth2Client {
	inner: reqwest::Client,
}

impl OAuth2Client {
	/// Creates a client with the default connect and request timeouts
	pub fn new() -> Self {
		let inner = reqwest::Client::builder()
			.connect_timeout(CONNECT_TIMEOUT)
			.timeout(REQUEST_TIMEOUT)
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()
			.expect("failed to construct HTTP client");
		Self { inner }
	}

	/// Access the underlying reqwest client
	pub fn client(&self) -> &reqwest::Client {
		&self.inner
	}
}

impl Default for OAuth2Client {
	fn default() -> Self {
		Self::new()
	}
}
