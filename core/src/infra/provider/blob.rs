use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlobError {
	#[error("upload failed (path: {path}): {reason}")]
	UploadFailed { path: String, reason: String },
	#[error("blob not found (path: {0})")]
	NotFound(String),
	#[error("blob store unavailable: {0}")]
	Unavailable(String),
}

/// Reference to an uploaded blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobHandle {
	pub path: String,
}

/// Hosted blob storage
#[async_trait]
pub trait BlobStore: Send + Sync {
	async fn upload(&self, path: &str, bytes: Bytes) -> Result<BlobHandle, BlobError>;

	/// Resolve the publicly reachable address of an uploaded blob
	async fn public_url(&self, handle: &BlobHandle) -> Result<String, BlobError>;
}
