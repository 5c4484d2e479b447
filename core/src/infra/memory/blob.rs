use super::recover;
use crate::infra::provider::{BlobError, BlobHandle, BlobStore};

use async_trait::async_trait;
use bytes::Bytes;
use std::{
	collections::HashMap,
	sync::{
		atomic::{AtomicBool, Ordering},
		RwLock,
	},
};

/// Blob storage held in memory, publishing blobs under `base_url`
#[derive(Debug)]
pub struct MemoryBlobStore {
	base_url: String,
	blobs: RwLock<HashMap<String, Bytes>>,
	fail_uploads: AtomicBool,
}

impl MemoryBlobStore {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			blobs: RwLock::new(HashMap::new()),
			fail_uploads: AtomicBool::new(false),
		}
	}

	pub fn get(&self, path: &str) -> Option<Bytes> {
		recover(self.blobs.read()).get(path).cloned()
	}

	/// Resolve a public address issued by this store back to its bytes
	pub fn fetch(&self, url: &str) -> Option<Bytes> {
		let path = url.strip_prefix(&self.base_url)?.strip_prefix('/')?;
		self.get(path)
	}

	pub fn paths(&self) -> Vec<String> {
		let mut paths: Vec<_> = recover(self.blobs.read()).keys().cloned().collect();
		paths.sort();
		paths
	}

	pub fn set_fail_uploads(&self, fail: bool) {
		self.fail_uploads.store(fail, Ordering::SeqCst);
	}
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
	async fn upload(&self, path: &str, bytes: Bytes) -> Result<BlobHandle, BlobError> {
		if self.fail_uploads.load(Ordering::SeqCst) {
			return Err(BlobError::UploadFailed {
				path: path.to_string(),
				reason: "storage quota exceeded".into(),
			});
		}

		recover(self.blobs.write()).insert(path.to_string(), bytes);
		Ok(BlobHandle {
			path: path.to_string(),
		})
	}

	async fn public_url(&self, handle: &BlobHandle) -> Result<String, BlobError> {
		if !recover(self.blobs.read()).contains_key(&handle.path) {
			return Err(BlobError::NotFound(handle.path.clone()));
		}
		Ok(format!("{}/{}", self.base_url, handle.path))
	}
}
