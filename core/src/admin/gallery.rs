use super::{RecordManager, Saved};
use crate::{
	context::SiteContext,
	domain::{MediaItem, RecordId, Stored},
	infra::provider::StoreError,
	mirror::RealtimeMirror,
	notice::Notice,
	ops::{
		upload, validate::require_present, Confirm, Editable, FileUpload, MutationError,
		ValidationError,
	},
};

use std::sync::Arc;
use tokio::sync::watch;

/// Gallery uploads. Items are added or deleted, never edited in place.
pub struct GalleryManager {
	manager: RecordManager<MediaItem>,
	file: Option<FileUpload>,
}

impl GalleryManager {
	pub async fn mount(ctx: SiteContext) -> Result<Self, StoreError> {
		Ok(Self {
			manager: RecordManager::mount(ctx).await?,
			file: None,
		})
	}

	pub fn records(&self) -> Arc<[Stored<MediaItem>]> {
		self.manager.records()
	}

	pub fn mirror_mut(&mut self) -> &mut RealtimeMirror<MediaItem> {
		self.manager.mirror_mut()
	}

	pub fn is_saving(&self) -> bool {
		self.manager.is_saving()
	}

	pub fn saving(&self) -> watch::Receiver<bool> {
		self.manager.saving()
	}

	pub fn caption(&self) -> &str {
		&self.manager.form.caption
	}

	pub fn set_caption(&mut self, caption: impl Into<String>) {
		self.manager.form.caption = caption.into();
	}

	pub fn category(&self) -> &str {
		&self.manager.form.category
	}

	pub fn set_category(&mut self, category: impl Into<String>) {
		self.manager.form.category = category.into();
	}

	pub fn select_file(&mut self, file: FileUpload) {
		self.file = Some(file);
	}

	pub fn selected_file(&self) -> Option<&FileUpload> {
		self.file.as_ref()
	}

	/// Upload the selected file and add it to the gallery
	pub async fn upload(&mut self) -> Notice {
		let result = {
			let _saving = self.manager.begin_saving();
			self.upload_selected().await
		};
		if result.is_ok() {
			self.file = None;
		}
		self.manager.finish(result)
	}

	pub async fn delete(&self, id: &RecordId, confirm: &dyn Confirm) -> Option<Notice> {
		self.manager.delete(id, confirm).await
	}

	async fn upload_selected(&self) -> Result<Saved, MutationError> {
		let file = self.file.as_ref();
		require_present(
			&[
				("file", file.map_or("", |file| file.file_name.as_str())),
				("caption", self.caption()),
			],
			MediaItem::MISSING_MESSAGE,
		)?;
		let file =
			file.ok_or_else(|| ValidationError::new(vec!["file"], MediaItem::MISSING_MESSAGE))?;

		let ctx = &self.manager.ctx;
		let staged = upload::stage(ctx, &ctx.config.storage.gallery_prefix, file).await?;
		let item = MediaItem {
			url: staged.url.clone(),
			public_id: Some(staged.path.clone()),
			..self.manager.form.clone()
		};

		self.manager
			.facade
			.create_with_blob(&staged, &item)
			.await
			.map(Saved::Created)
	}
}
