//! Crate-level error type
//!
//! Provider errors never reach the user verbatim. Every variant maps to a
//! normalized message through [`CoreError::user_message`], while the full
//! error is only written to the log.

use crate::{
	infra::provider::{AuthError, BlobError, NotifyError, StoreError},
	ops::{MutationError, ValidationError},
	session::LoginError,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error(transparent)]
	Mutation(#[from] MutationError),
	#[error(transparent)]
	Login(#[from] LoginError),
	#[error("auth provider error: {0}")]
	Auth(#[from] AuthError),
	#[error("document store error: {0}")]
	Store(#[from] StoreError),
	#[error("blob store error: {0}")]
	Blob(#[from] BlobError),
	#[error("email notifier error: {0}")]
	Notify(#[from] NotifyError),
}

impl CoreError {
	pub fn user_message(&self) -> String {
		match self {
			Self::Validation(e) => e.message().to_string(),
			Self::Mutation(e) => e.user_message(),
			Self::Login(e) => e.user_message().to_string(),
			Self::Auth(_) | Self::Store(_) | Self::Blob(_) | Self::Notify(_) => {
				"Something went wrong, please try again".to_string()
			}
		}
	}
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn provider_errors_use_a_generic_message() {
		let err = CoreError::from(StoreError::Unavailable("connection reset by 10.0.0.4".into()));

		assert_eq!(err.user_message(), "Something went wrong, please try again");
	}

	#[test]
	fn login_errors_keep_their_normalized_text() {
		let err = CoreError::from(LoginError::NoAdminAccess);

		assert_eq!(err.user_message(), "You don't have admin access!");
	}
}
