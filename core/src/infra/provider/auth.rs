use crate::domain::Identity;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
	#[error("invalid credentials for {email}")]
	InvalidCredentials { email: String },
	#[error("no account registered for {email}")]
	UnknownAccount { email: String },
	#[error("auth provider unavailable: {0}")]
	Unavailable(String),
}

/// Hosted authentication provider
#[async_trait]
pub trait AuthProvider: Send + Sync {
	/// Verify credentials and start a session
	async fn sign_in_with_password(&self, email: &str, password: &str)
		-> Result<Identity, AuthError>;

	/// End the active session, if any
	async fn sign_out(&self) -> Result<(), AuthError>;

	async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;

	/// Subscribe to auth state. The current state is delivered first, then
	/// every later change. Dropping the subscription releases it.
	fn on_auth_state_change(&self) -> AuthStateSubscription;
}

/// Live view of the provider's current identity
#[derive(Debug)]
pub struct AuthStateSubscription {
	receiver: watch::Receiver<Option<Identity>>,
	delivered_initial: bool,
}

impl AuthStateSubscription {
	pub fn new(receiver: watch::Receiver<Option<Identity>>) -> Self {
		Self {
			receiver,
			delivered_initial: false,
		}
	}

	/// Wait for the next auth state.
	///
	/// Returns `None` once the provider has gone away. Intermediate states
	/// may be coalesced; the latest one is always delivered.
	pub async fn next(&mut self) -> Option<Option<Identity>> {
		if !self.delivered_initial {
			self.delivered_initial = true;
			return Some(self.receiver.borrow_and_update().clone());
		}

		self.receiver.changed().await.ok()?;
		Some(self.receiver.borrow_and_update().clone())
	}
}
