use super::{RecordManager, Saved};
use crate::{
	context::SiteContext,
	domain::{Coach, RecordId, Stored},
	infra::provider::StoreError,
	mirror::RealtimeMirror,
	notice::Notice,
	ops::{upload, Confirm, Editable, FileUpload, MutationError},
};

use std::sync::Arc;
use tokio::sync::watch;

/// Coaches list and form with an optional profile photo.
///
/// Without a newly chosen photo the record keeps the address it was loaded
/// with, so saving an unchanged edit writes the same fields back.
pub struct CoachesManager {
	manager: RecordManager<Coach>,
	photo: Option<FileUpload>,
}

impl CoachesManager {
	pub async fn mount(ctx: SiteContext) -> Result<Self, StoreError> {
		Ok(Self {
			manager: RecordManager::mount(ctx).await?,
			photo: None,
		})
	}

	pub fn form(&self) -> &Coach {
		self.manager.form()
	}

	pub fn form_mut(&mut self) -> &mut Coach {
		self.manager.form_mut()
	}

	pub fn editing(&self) -> Option<&RecordId> {
		self.manager.editing()
	}

	pub fn records(&self) -> Arc<[Stored<Coach>]> {
		self.manager.records()
	}

	pub fn mirror_mut(&mut self) -> &mut RealtimeMirror<Coach> {
		self.manager.mirror_mut()
	}

	pub fn is_saving(&self) -> bool {
		self.manager.is_saving()
	}

	pub fn saving(&self) -> watch::Receiver<bool> {
		self.manager.saving()
	}

	pub fn select_photo(&mut self, photo: FileUpload) {
		self.photo = Some(photo);
	}

	pub fn selected_photo(&self) -> Option<&FileUpload> {
		self.photo.as_ref()
	}

	pub fn begin_edit(&mut self, stored: &Stored<Coach>) {
		self.manager.begin_edit(stored);
		self.photo = None;
	}

	pub fn cancel_edit(&mut self) {
		self.manager.cancel_edit();
		self.photo = None;
	}

	pub async fn submit(&mut self) -> Notice {
		let result = {
			let _saving = self.manager.begin_saving();
			match &self.photo {
				Some(photo) => self.save_with_photo(photo).await,
				None => self.manager.save(&self.manager.form).await,
			}
		};

		if result.is_ok() {
			self.photo = None;
		}
		self.manager.finish(result)
	}

	pub async fn delete(&self, id: &RecordId, confirm: &dyn Confirm) -> Option<Notice> {
		self.manager.delete(id, confirm).await
	}

	/// Upload first, then write the record pointing at the new photo
	async fn save_with_photo(&self, photo: &FileUpload) -> Result<Saved, MutationError> {
		// Nothing is uploaded for a form that would be rejected anyway.
		self.manager.form.validate()?;

		let ctx = &self.manager.ctx;
		let staged = upload::stage(ctx, &ctx.config.storage.coach_prefix, photo).await?;
		let record = Coach {
			photo_url: staged.url.clone(),
			..self.manager.form.clone()
		};

		let facade = &self.manager.facade;
		match &self.manager.editing {
			Some(id) => facade
				.update_with_blob(&staged, id, &record)
				.await
				.map(|()| Saved::Updated),
			None => facade
				.create_with_blob(&staged, &record)
				.await
				.map(Saved::Created),
		}
	}
}
