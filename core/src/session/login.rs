//! Admin login form operations
//!
//! Provider failures are folded into a small set of generic messages so the
//! form never reveals whether an account exists.

use super::grants::{has_admin_grant, revoke_session};
use crate::{
	context::SiteContext,
	domain::Identity,
	notice::Notice,
	routes::{AdminRoute, Route},
};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
	#[error("email is required")]
	MissingEmail,
	/// Wrong credentials, unknown account, or provider trouble
	#[error("sign-in failed")]
	InvalidCredentials,
	#[error("identity has no admin grant")]
	NoAdminAccess,
	#[error("password reset failed")]
	ResetFailed,
}

impl LoginError {
	pub fn user_message(&self) -> &'static str {
		match self {
			Self::MissingEmail => "Please enter your email first",
			Self::InvalidCredentials => "Invalid email or password",
			Self::NoAdminAccess => "You don't have admin access!",
			Self::ResetFailed => "Failed to send reset email",
		}
	}

	pub fn notice(&self) -> Notice {
		match self {
			Self::MissingEmail => Notice::warning("Missing email", self.user_message()),
			_ => Notice::error("Login", self.user_message()),
		}
	}
}

/// Successful admin sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admitted {
	pub identity: Identity,
	/// Where the login view navigates next
	pub redirect: Route,
}

impl Admitted {
	pub fn notice(&self) -> Notice {
		Notice::success("Welcome back!")
	}
}

#[derive(Clone)]
pub struct LoginFlow {
	ctx: SiteContext,
}

impl LoginFlow {
	pub fn new(ctx: SiteContext) -> Self {
		Self { ctx }
	}

	/// Sign in and confirm the admin grant.
	///
	/// An identity without a grant is signed out again and the caller stays
	/// on the login view.
	pub async fn sign_in(&self, email: &str, password: &str) -> Result<Admitted, LoginError> {
		let identity = self
			.ctx
			.auth
			.sign_in_with_password(email, password)
			.await
			.map_err(|e| {
				warn!("Login error: {e}");
				LoginError::InvalidCredentials
			})?;

		match has_admin_grant(&self.ctx, &identity.email).await {
			Ok(true) => {
				info!("Admin {} signed in", identity.email);
				Ok(Admitted {
					identity,
					redirect: Route::Admin(AdminRoute::Dashboard),
				})
			}
			Ok(false) => {
				revoke_session(&self.ctx, &identity.email).await;
				Err(LoginError::NoAdminAccess)
			}
			Err(e) => {
				warn!("Login error: admin grant lookup failed: {e}");
				revoke_session(&self.ctx, &identity.email).await;
				Err(LoginError::InvalidCredentials)
			}
		}
	}

	pub async fn request_password_reset(&self, email: &str) -> Result<Notice, LoginError> {
		let email = email.trim();
		if email.is_empty() {
			return Err(LoginError::MissingEmail);
		}

		self.ctx
			.auth
			.send_password_reset(email)
			.await
			.map_err(|e| {
				warn!("Reset error: {e}");
				LoginError::ResetFailed
			})?;

		Ok(Notice::success(
			"Password reset email sent! Check your inbox.",
		))
	}

	/// Admin logout: end the session and go back to the login view
	pub async fn sign_out(&self) -> Route {
		if let Err(e) = self.ctx.auth.sign_out().await {
			warn!("Logout error: {e}");
		}
		Route::Login
	}
}
