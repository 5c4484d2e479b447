use super::recover;
use crate::{
	domain::{Identity, SessionToken},
	infra::provider::{AuthError, AuthProvider, AuthStateSubscription},
};

use async_trait::async_trait;
use std::{
	collections::HashMap,
	sync::{
		atomic::{AtomicBool, AtomicUsize, Ordering},
		Mutex, RwLock,
	},
};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

/// Email/password accounts held in memory, with a single active session
#[derive(Debug)]
pub struct MemoryAuth {
	accounts: RwLock<HashMap<String, String>>,
	session: watch::Sender<Option<Identity>>,
	sign_outs: AtomicUsize,
	password_resets: Mutex<Vec<String>>,
	unavailable: AtomicBool,
}

impl MemoryAuth {
	pub fn new() -> Self {
		let (session, _) = watch::channel(None);
		Self {
			accounts: RwLock::new(HashMap::new()),
			session,
			sign_outs: AtomicUsize::new(0),
			password_resets: Mutex::new(Vec::new()),
			unavailable: AtomicBool::new(false),
		}
	}

	pub fn with_account(self, email: &str, password: &str) -> Self {
		self.add_account(email, password);
		self
	}

	pub fn add_account(&self, email: &str, password: &str) {
		recover(self.accounts.write()).insert(email.to_string(), password.to_string());
	}

	/// Start a session for `email` as if it had signed in somewhere else
	pub fn start_session(&self, email: &str) -> Identity {
		let identity = Identity {
			email: email.to_string(),
			token: SessionToken::new(Uuid::new_v4().to_string()),
		};
		self.session.send_replace(Some(identity.clone()));
		identity
	}

	/// End the session without going through `sign_out`, like an expiry
	pub fn expire_session(&self) {
		self.session.send_replace(None);
	}

	pub fn current(&self) -> Option<Identity> {
		self.session.borrow().clone()
	}

	/// Open auth-state subscriptions
	pub fn subscriber_count(&self) -> usize {
		self.session.receiver_count()
	}

	pub fn sign_out_count(&self) -> usize {
		self.sign_outs.load(Ordering::SeqCst)
	}

	pub fn password_resets(&self) -> Vec<String> {
		recover(self.password_resets.lock()).clone()
	}

	/// Make every call fail with [`AuthError::Unavailable`]
	pub fn set_unavailable(&self, unavailable: bool) {
		self.unavailable.store(unavailable, Ordering::SeqCst);
	}

	fn check_available(&self) -> Result<(), AuthError> {
		if self.unavailable.load(Ordering::SeqCst) {
			return Err(AuthError::Unavailable("auth service offline".into()));
		}
		Ok(())
	}
}

impl Default for MemoryAuth {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl AuthProvider for MemoryAuth {
	async fn sign_in_with_password(
		&self,
		email: &str,
		password: &str,
	) -> Result<Identity, AuthError> {
		self.check_available()?;

		let matches = recover(self.accounts.read())
			.get(email)
			.is_some_and(|stored| stored == password);
		if !matches {
			return Err(AuthError::InvalidCredentials {
				email: email.to_string(),
			});
		}

		debug!("Session started for {email}");
		Ok(self.start_session(email))
	}

	async fn sign_out(&self) -> Result<(), AuthError> {
		self.check_available()?;
		self.sign_outs.fetch_add(1, Ordering::SeqCst);
		self.session.send_replace(None);
		Ok(())
	}

	async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
		self.check_available()?;
		if !recover(self.accounts.read()).contains_key(email) {
			return Err(AuthError::UnknownAccount {
				email: email.to_string(),
			});
		}
		recover(self.password_resets.lock()).push(email.to_string());
		Ok(())
	}

	fn on_auth_state_change(&self) -> AuthStateSubscription {
		AuthStateSubscription::new(self.session.subscribe())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn subscription_sees_current_state_then_changes() {
		let auth = MemoryAuth::new().with_account("a@dojo.test", "pw");
		let mut subscription = auth.on_auth_state_change();

		assert_eq!(subscription.next().await, Some(None));

		let identity = auth.sign_in_with_password("a@dojo.test", "pw").await.unwrap();
		assert_eq!(subscription.next().await, Some(Some(identity)));

		auth.sign_out().await.unwrap();
		assert_eq!(subscription.next().await, Some(None));
		assert_eq!(auth.sign_out_count(), 1);
	}

	#[tokio::test]
	async fn wrong_password_is_rejected() {
		let auth = MemoryAuth::new().with_account("a@dojo.test", "pw");

		let err = auth
			.sign_in_with_password("a@dojo.test", "nope")
			.await
			.unwrap_err();

		assert!(matches!(err, AuthError::InvalidCredentials { .. }));
		assert!(auth.current().is_none());
	}
}
