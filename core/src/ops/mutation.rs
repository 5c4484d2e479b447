use super::{upload::StagedBlob, Confirm, Editable, ValidationError};
use crate::{
	context::SiteContext,
	domain::RecordId,
	infra::provider::{BlobError, StoreError},
	notice::Notice,
};

use std::marker::PhantomData;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum MutationError {
	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error("failed to encode record: {0}")]
	Encode(#[from] serde_json::Error),
	#[error("store rejected the write: {0}")]
	Store(#[from] StoreError),
	#[error("upload failed: {0}")]
	Upload(#[from] BlobError),
	#[error("record write failed after upload, blob {blob_path} is orphaned: {source}")]
	Orphaned {
		blob_path: String,
		source: Box<MutationError>,
	},
}

impl MutationError {
	pub fn user_message(&self) -> String {
		match self {
			Self::Validation(e) => e.message().to_string(),
			Self::Upload(_) => "Upload failed, please try again".to_string(),
			_ => "The change could not be saved".to_string(),
		}
	}

	/// Notice for a failed save of a `noun`. Provider details stay in the log.
	pub fn notice(&self, noun: &str) -> Notice {
		match self {
			Self::Validation(e) => e.notice(),
			Self::Upload(_) => Notice::error("Upload Failed", format!("Failed to upload {noun}")),
			_ => Notice::error("Error", format!("Failed to save {noun}")),
		}
	}
}

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
	Deleted,
	/// The user declined the confirmation; nothing was sent
	Declined,
}

/// Create/update/delete calls for one record type
pub struct MutationFacade<T> {
	ctx: SiteContext,
	_record: PhantomData<fn() -> T>,
}

impl<T> Clone for MutationFacade<T> {
	fn clone(&self) -> Self {
		Self {
			ctx: self.ctx.clone(),
			_record: PhantomData,
		}
	}
}

impl<T: Editable> MutationFacade<T> {
	pub fn new(ctx: SiteContext) -> Self {
		Self {
			ctx,
			_record: PhantomData,
		}
	}

	fn collection(&self) -> &str {
		self.ctx.collection(T::COLLECTION)
	}

	/// Validate and insert; the store assigns the id
	pub async fn create(&self, record: &T) -> Result<RecordId, MutationError> {
		record.validate()?;
		let document = record.to_document()?;

		let id = self.ctx.store.insert(self.collection(), document).await?;
		debug!("Created {} {id}", T::NOUN);
		Ok(id)
	}

	/// Validate and send the form's fields as a partial update. Fields the
	/// form does not know about (server metadata) are left as they are.
	pub async fn update(&self, id: &RecordId, record: &T) -> Result<(), MutationError> {
		record.validate()?;
		let document = record.to_document()?;

		self.ctx
			.store
			.update(self.collection(), id, document)
			.await?;
		debug!("Updated {} {id}", T::NOUN);
		Ok(())
	}

	/// Phase 2 of an upload: create the record referencing `staged`
	pub async fn create_with_blob(
		&self,
		staged: &StagedBlob,
		record: &T,
	) -> Result<RecordId, MutationError> {
		self.create(record).await.map_err(|e| staged.orphan(e))
	}

	/// Phase 2 of an upload: update the record to reference `staged`
	pub async fn update_with_blob(
		&self,
		staged: &StagedBlob,
		id: &RecordId,
		record: &T,
	) -> Result<(), MutationError> {
		self.update(id, record).await.map_err(|e| staged.orphan(e))
	}

	/// Ask for confirmation, then delete. Declining sends nothing.
	pub async fn delete(
		&self,
		id: &RecordId,
		confirm: &dyn Confirm,
	) -> Result<Deletion, MutationError> {
		let prompt = format!("Are you sure you want to delete this {}?", T::NOUN);
		if !confirm.confirm(&prompt) {
			debug!("Delete of {} {id} declined", T::NOUN);
			return Ok(Deletion::Declined);
		}

		self.ctx
			.store
			.delete(self.collection(), id)
			.await
			.inspect_err(|e| warn!("Failed to delete {} {id}: {e}", T::NOUN))?;
		Ok(Deletion::Deleted)
	}
}
