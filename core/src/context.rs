//! Shared context providing access to the backend clients.

use crate::{
	config::AppConfig,
	domain::Collection,
	infra::provider::{AuthProvider, BlobStore, DocumentStore, EmailNotifier},
};

use std::sync::Arc;

/// The one set of backend clients for the whole process.
///
/// Built once at startup and handed to every view, manager and handler by
/// cloning (all fields are `Arc`s). Nothing in the crate keeps a global
/// client; anything that needs one receives a `SiteContext`.
#[derive(Clone)]
pub struct SiteContext {
	pub auth: Arc<dyn AuthProvider>,
	pub store: Arc<dyn DocumentStore>,
	pub blobs: Arc<dyn BlobStore>,
	pub notifier: Arc<dyn EmailNotifier>,
	pub config: Arc<AppConfig>,
}

impl SiteContext {
	pub fn new(
		config: AppConfig,
		auth: Arc<dyn AuthProvider>,
		store: Arc<dyn DocumentStore>,
		blobs: Arc<dyn BlobStore>,
		notifier: Arc<dyn EmailNotifier>,
	) -> Self {
		Self {
			auth,
			store,
			blobs,
			notifier,
			config: Arc::new(config),
		}
	}

	/// Configured remote name of `collection`
	pub fn collection(&self, collection: Collection) -> &str {
		self.config.collections.name(collection)
	}
}
