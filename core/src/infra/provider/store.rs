use crate::domain::{Document, OrderBy, RecordId, StoredDocument};

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

/// Push stream of full, ordered collection snapshots
pub type SnapshotStream = BoxStream<'static, Result<Vec<StoredDocument>, StoreError>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
	#[error("document not found (collection: {collection}, id: {id})")]
	NotFound { collection: String, id: RecordId },
	#[error("write rejected (collection: {collection}): {reason}")]
	Rejected { collection: String, reason: String },
	#[error("document store unavailable: {0}")]
	Unavailable(String),
}

/// Hosted document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
	/// Open a push subscription. The stream yields the entire current
	/// snapshot right away and again after every change to the collection.
	/// Dropping the stream releases the subscription.
	async fn subscribe(&self, collection: &str, order: OrderBy)
		-> Result<SnapshotStream, StoreError>;

	/// Insert a new document; the store assigns and returns its id
	async fn insert(&self, collection: &str, document: Document) -> Result<RecordId, StoreError>;

	/// Merge `partial` into an existing document
	async fn update(
		&self,
		collection: &str,
		id: &RecordId,
		partial: Document,
	) -> Result<(), StoreError>;

	async fn delete(&self, collection: &str, id: &RecordId) -> Result<(), StoreError>;

	async fn get_one(
		&self,
		collection: &str,
		id: &RecordId,
	) -> Result<Option<StoredDocument>, StoreError>;
}
