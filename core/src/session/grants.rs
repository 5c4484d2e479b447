use crate::{
	context::SiteContext,
	domain::{Collection, RecordId},
	infra::provider::StoreError,
};

use tracing::debug;

/// Whether an admin grant exists for exactly `email`.
///
/// Looked up fresh on every call; grants are never cached.
pub async fn has_admin_grant(ctx: &SiteContext, email: &str) -> Result<bool, StoreError> {
	let grant = ctx
		.store
		.get_one(ctx.collection(Collection::Admins), &RecordId::new(email))
		.await?;
	debug!("Admin grant lookup for {email}: {}", grant.is_some());
	Ok(grant.is_some())
}

/// Sign the current identity out after a failed authorization.
/// A failing sign-out is logged; the caller still treats the visitor as
/// unauthenticated.
pub(crate) async fn revoke_session(ctx: &SiteContext, email: &str) {
	if let Err(e) = ctx.auth.sign_out().await {
		tracing::warn!("Failed to sign out unauthorized identity {email}: {e}");
	}
}
