use crate::{
	context::SiteContext,
	domain::{
		event::DATE_FORMAT, Announcement, Coach, Event, MediaItem, OrderBy, RecordId, Stored,
	},
	infra::provider::StoreError,
	mirror::RealtimeMirror,
	notice::Notice,
	ops::{Confirm, Deletion, Editable, MutationError, MutationFacade},
};

use chrono::Local;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

/// Category preselected in the gallery upload form
pub const DEFAULT_UPLOAD_CATEGORY: &str = "training";

/// A record type with an admin manager
pub trait Managed: Editable {
	/// Capitalised noun for notices
	const LABEL: &'static str;

	/// Ordering of the admin list
	fn admin_order() -> OrderBy;

	/// An empty form
	fn blank() -> Self;

	fn saved_message(saved: &Saved) -> String {
		match saved {
			Saved::Created(_) => format!("{} created successfully", Self::LABEL),
			Saved::Updated => format!("{} updated successfully", Self::LABEL),
		}
	}
}

impl Managed for Event {
	const LABEL: &'static str = "Event";

	fn admin_order() -> OrderBy {
		OrderBy::asc("date")
	}

	fn blank() -> Self {
		Self::default()
	}
}

impl Managed for Announcement {
	const LABEL: &'static str = "Announcement";

	// Ascending here, while the public events page lists newest first.
	fn admin_order() -> OrderBy {
		OrderBy::asc("date")
	}

	fn blank() -> Self {
		Self {
			date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
			..Default::default()
		}
	}
}

impl Managed for Coach {
	const LABEL: &'static str = "Coach";

	fn admin_order() -> OrderBy {
		OrderBy::asc("name")
	}

	fn blank() -> Self {
		Self::default()
	}

	fn saved_message(saved: &Saved) -> String {
		match saved {
			Saved::Created(_) => "Coach added successfully!".to_string(),
			Saved::Updated => "Coach updated successfully!".to_string(),
		}
	}
}

impl Managed for MediaItem {
	const LABEL: &'static str = "Photo";

	fn admin_order() -> OrderBy {
		OrderBy::asc("caption")
	}

	fn blank() -> Self {
		Self {
			url: String::new(),
			caption: String::new(),
			category: DEFAULT_UPLOAD_CATEGORY.to_string(),
			public_id: None,
		}
	}

	fn saved_message(saved: &Saved) -> String {
		match saved {
			Saved::Created(_) => "Photo uploaded successfully!".to_string(),
			Saved::Updated => "Photo updated successfully".to_string(),
		}
	}
}

/// How a submit was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
	Created(RecordId),
	Updated,
}

/// Form, edit target and live list for one collection
pub struct RecordManager<T: Managed> {
	pub(super) ctx: SiteContext,
	pub(super) facade: MutationFacade<T>,
	pub(super) form: T,
	pub(super) editing: Option<RecordId>,
	mirror: RealtimeMirror<T>,
	saving: watch::Sender<bool>,
}

/// Lowers the saving flag when the mutation finishes or is dropped
pub(super) struct SavingGuard<'a>(&'a watch::Sender<bool>);

impl Drop for SavingGuard<'_> {
	fn drop(&mut self) {
		self.0.send_replace(false);
	}
}

impl<T: Managed> RecordManager<T> {
	pub async fn mount(ctx: SiteContext) -> Result<Self, StoreError> {
		let mirror = RealtimeMirror::mount(&ctx, T::admin_order()).await?;

		Ok(Self {
			facade: MutationFacade::new(ctx.clone()),
			form: T::blank(),
			editing: None,
			mirror,
			saving: watch::Sender::new(false),
			ctx,
		})
	}

	pub fn form(&self) -> &T {
		&self.form
	}

	pub fn form_mut(&mut self) -> &mut T {
		&mut self.form
	}

	pub fn editing(&self) -> Option<&RecordId> {
		self.editing.as_ref()
	}

	pub fn records(&self) -> Arc<[Stored<T>]> {
		self.mirror.items()
	}

	pub fn mirror(&self) -> &RealtimeMirror<T> {
		&self.mirror
	}

	pub fn mirror_mut(&mut self) -> &mut RealtimeMirror<T> {
		&mut self.mirror
	}

	/// Whether a create, update or delete is in flight
	pub fn is_saving(&self) -> bool {
		*self.saving.borrow()
	}

	/// Follow the saving flag, e.g. to drive a spinner
	pub fn saving(&self) -> watch::Receiver<bool> {
		self.saving.subscribe()
	}

	pub(super) fn begin_saving(&self) -> SavingGuard<'_> {
		self.saving.send_replace(true);
		SavingGuard(&self.saving)
	}

	/// Load `stored` into the form and target it on the next submit
	pub fn begin_edit(&mut self, stored: &Stored<T>) {
		self.form = stored.record.clone();
		self.editing = Some(stored.id.clone());
	}

	pub fn cancel_edit(&mut self) {
		self.form = T::blank();
		self.editing = None;
	}

	/// Create or update from the form
	pub async fn submit(&mut self) -> Notice {
		let result = {
			let _saving = self.begin_saving();
			self.save(&self.form).await
		};
		self.finish(result)
	}

	/// `None` when the user declined the confirmation
	pub async fn delete(&self, id: &RecordId, confirm: &dyn Confirm) -> Option<Notice> {
		let _saving = self.begin_saving();
		match self.facade.delete(id, confirm).await {
			Ok(Deletion::Declined) => None,
			Ok(Deletion::Deleted) => Some(Notice::success(format!(
				"{} deleted successfully",
				T::LABEL
			))),
			Err(_) => Some(Notice::error(
				"Error",
				format!("Failed to delete {}", T::NOUN),
			)),
		}
	}

	pub(super) async fn save(&self, record: &T) -> Result<Saved, MutationError> {
		match &self.editing {
			Some(id) => self.facade.update(id, record).await.map(|()| Saved::Updated),
			None => self.facade.create(record).await.map(Saved::Created),
		}
	}

	/// Reset the form on success, or turn the failure into a notice
	pub(super) fn finish(&mut self, result: Result<Saved, MutationError>) -> Notice {
		match result {
			Ok(saved) => {
				self.cancel_edit();
				Notice::success(T::saved_message(&saved))
			}
			Err(e) => {
				if !matches!(e, MutationError::Validation(_)) {
					warn!("Failed to save {}: {e}", T::NOUN);
				}
				e.notice(T::NOUN)
			}
		}
	}
}
