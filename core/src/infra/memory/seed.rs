use super::{MemoryAuth, MemoryBlobStore, MemoryNotifier, MemoryStore};
use crate::{config::AppConfig, context::SiteContext, domain::Document};

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::Value;
use std::{collections::HashMap, fs, path::Path, sync::Arc};
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct Seed {
	#[serde(default)]
	pub accounts: Vec<SeedAccount>,
	/// Collection name to documents. A document may carry its own `id`
	/// (admin grants are keyed by email); otherwise one is generated.
	#[serde(default)]
	pub collections: HashMap<String, Vec<Document>>,
}

#[derive(Debug, Deserialize)]
pub struct SeedAccount {
	pub email: String,
	pub password: String,
}

impl Seed {
	pub fn from_file(path: &Path) -> Result<Self> {
		let json = fs::read_to_string(path)
			.map_err(|e| anyhow!("Failed to read seed file {}: {e}", path.display()))?;
		serde_json::from_str(&json)
			.map_err(|e| anyhow!("Invalid seed file {}: {e}", path.display()))
	}
}

/// All four in-memory providers, with concrete handles kept for inspection
#[derive(Debug, Clone)]
pub struct MemoryBackend {
	pub auth: Arc<MemoryAuth>,
	pub store: MemoryStore,
	pub blobs: Arc<MemoryBlobStore>,
	pub notifier: Arc<MemoryNotifier>,
}

impl MemoryBackend {
	pub fn new(public_base_url: &str) -> Self {
		Self {
			auth: Arc::new(MemoryAuth::new()),
			store: MemoryStore::new(),
			blobs: Arc::new(MemoryBlobStore::new(public_base_url)),
			notifier: Arc::new(MemoryNotifier::new()),
		}
	}

	pub fn apply_seed(&self, seed: Seed) {
		for account in &seed.accounts {
			self.auth.add_account(&account.email, &account.password);
		}

		let mut documents = 0;
		for (collection, docs) in seed.collections {
			for mut doc in docs {
				let id = match doc.remove("id") {
					Some(Value::String(id)) => id,
					_ => uuid::Uuid::new_v4().simple().to_string(),
				};
				self.store.seed(&collection, id.as_str(), doc);
				documents += 1;
			}
		}

		info!(
			"Seeded {} accounts and {documents} documents",
			seed.accounts.len()
		);
	}

	pub fn context(&self, config: AppConfig) -> SiteContext {
		SiteContext::new(
			config,
			self.auth.clone(),
			Arc::new(self.store.clone()),
			self.blobs.clone(),
			self.notifier.clone(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::domain::RecordId;
	use crate::infra::provider::DocumentStore;

	#[tokio::test]
	async fn seed_keeps_explicit_ids() {
		let seed: Seed = serde_json::from_value(serde_json::json!({
			"accounts": [{ "email": "sensei@dojo.test", "password": "pw" }],
			"collections": {
				"admins": [{ "id": "sensei@dojo.test" }],
				"events": [{ "title": "Grading", "date": "2024-05-01" }],
			}
		}))
		.unwrap();
		let backend = MemoryBackend::new("https://cdn.dojo.test");

		backend.apply_seed(seed);

		let grant = backend
			.store
			.get_one("admins", &RecordId::new("sensei@dojo.test"))
			.await
			.unwrap();
		assert!(grant.is_some());
		assert_eq!(backend.store.len("events"), 1);
	}
}
