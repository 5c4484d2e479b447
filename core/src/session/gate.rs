//! # Session Gate
//!
//! Decides whether a protected view may render. The gate starts in
//! [`GateState::Checking`] when the view mounts and re-evaluates on every auth
//! state change reported by the provider for as long as it stays mounted:
//!
//! - no identity leads to [`GateState::Unauthenticated`]
//! - identity with an admin grant leads to [`GateState::Authorized`]
//! - identity without a grant: the identity is signed out, and only once
//!   that call has returned does the gate move to `Unauthenticated`
//!
//! Each new identity passes through `Checking` again, so the guarded subtree
//! is never shown for an identity whose grant has not been confirmed.
//! Dropping the gate (unmounting the view) releases the auth subscription.

use super::grants::{has_admin_grant, revoke_session};
use crate::{
	context::SiteContext,
	domain::Identity,
	infra::provider::AuthStateSubscription,
	routes::Route,
};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
	Checking,
	Authorized(Identity),
	Unauthenticated,
}

/// What the guarded view should do for the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
	/// Show the loading indicator
	Pending,
	Render(Identity),
	Redirect(Route),
}

impl From<&GateState> for GateOutcome {
	fn from(state: &GateState) -> Self {
		match state {
			GateState::Checking => Self::Pending,
			GateState::Authorized(identity) => Self::Render(identity.clone()),
			GateState::Unauthenticated => Self::Redirect(Route::Login),
		}
	}
}

pub struct SessionGate {
	state: watch::Receiver<GateState>,
	task: JoinHandle<()>,
}

impl SessionGate {
	/// Mount the gate: subscribe to auth state and start evaluating
	pub fn mount(ctx: SiteContext) -> Self {
		let (sender, state) = watch::channel(GateState::Checking);
		let subscription = ctx.auth.on_auth_state_change();
		let task = tokio::spawn(run_gate(ctx, subscription, sender));

		Self { state, task }
	}

	pub fn state(&self) -> GateState {
		self.state.borrow().clone()
	}

	pub fn outcome(&self) -> GateOutcome {
		GateOutcome::from(&*self.state.borrow())
	}

	/// Wait until the gate has left `Checking` and return where it landed
	pub async fn settled(&mut self) -> GateState {
		let settled = self
			.state
			.wait_for(|state| !matches!(state, GateState::Checking))
			.await
			.map(|state| state.clone());

		// The evaluation task only stops when the provider goes away
		settled.unwrap_or_else(|_| self.state.borrow().clone())
	}

	/// Wait for the next state transition. `None` once the gate has stopped.
	pub async fn changed(&mut self) -> Option<GateState> {
		self.state.changed().await.ok()?;
		Some(self.state.borrow_and_update().clone())
	}

	/// Unmount the gate, releasing its auth subscription
	pub fn unmount(self) {}
}

impl Drop for SessionGate {
	fn drop(&mut self) {
		self.task.abort();
	}
}

async fn run_gate(
	ctx: SiteContext,
	mut subscription: AuthStateSubscription,
	state: watch::Sender<GateState>,
) {
	while let Some(identity) = subscription.next().await {
		let next = match identity {
			None => GateState::Unauthenticated,
			Some(identity) => {
				transition(&state, GateState::Checking);
				authorize(&ctx, identity).await
			}
		};
		transition(&state, next);
	}
}

async fn authorize(ctx: &SiteContext, identity: Identity) -> GateState {
	match has_admin_grant(ctx, &identity.email).await {
		Ok(true) => GateState::Authorized(identity),
		Ok(false) => {
			info!("No admin grant for {}, signing out", identity.email);
			revoke_session(ctx, &identity.email).await;
			GateState::Unauthenticated
		}
		Err(e) => {
			warn!("Admin grant lookup failed for {}: {e}", identity.email);
			revoke_session(ctx, &identity.email).await;
			GateState::Unauthenticated
		}
	}
}

fn transition(state: &watch::Sender<GateState>, next: GateState) {
	state.send_if_modified(|current| {
		if *current == next {
			return false;
		}
		info!("Session gate: {current:?} -> {next:?}");
		*current = next;
		true
	});
}
