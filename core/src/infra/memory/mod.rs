//! In-process implementations of the backend provider traits
//!
//! These back the development server and the test suite. Each one exposes a
//! few inspection and failure-injection hooks that the hosted services do not
//! have.

mod auth;
mod blob;
mod notifier;
mod seed;
mod store;

pub use auth::MemoryAuth;
pub use blob::MemoryBlobStore;
pub use notifier::MemoryNotifier;
pub use seed::{MemoryBackend, Seed, SeedAccount};
pub use store::MemoryStore;

use std::sync::{LockResult, PoisonError};

/// Lock poisoning only happens if a writer panicked; the maps stay usable.
fn recover<G>(result: LockResult<G>) -> G {
	result.unwrap_or_else(PoisonError::into_inner)
}
