use crate::{
	context::SiteContext,
	domain::{MediaItem, MediaKind, OrderBy, RecordId, Stored},
	infra::provider::StoreError,
	mirror::RealtimeMirror,
};

use serde::Serialize;

/// Category filter value that shows everything
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryEntry {
	pub id: RecordId,
	pub url: String,
	pub caption: String,
	pub category: String,
	pub kind: MediaKind,
}

impl From<&Stored<MediaItem>> for GalleryEntry {
	fn from(item: &Stored<MediaItem>) -> Self {
		Self {
			id: item.id.clone(),
			url: item.url.clone(),
			caption: item.caption.clone(),
			category: item.category.clone(),
			kind: item.kind(),
		}
	}
}

/// Category buttons plus the items matching the selected one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryListing {
	pub categories: Vec<String>,
	pub items: Vec<GalleryEntry>,
}

impl GalleryListing {
	/// `all` first, then each category in the order it first appears
	pub fn build(items: &[Stored<MediaItem>], selected: &str) -> Self {
		let mut categories = vec![ALL_CATEGORIES.to_string()];
		for item in items {
			if !categories.iter().any(|c| c == &item.category) {
				categories.push(item.category.clone());
			}
		}

		let items = items
			.iter()
			.filter(|item| selected == ALL_CATEGORIES || item.category == selected)
			.map(GalleryEntry::from)
			.collect();

		Self { categories, items }
	}
}

/// Position of the open lightbox within the filtered items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lightbox {
	pub index: usize,
	pub len: usize,
}

impl Lightbox {
	pub fn next(self) -> Self {
		Self {
			index: if self.index + 1 < self.len { self.index + 1 } else { 0 },
			..self
		}
	}

	pub fn prev(self) -> Self {
		Self {
			index: if self.index > 0 { self.index - 1 } else { self.len.saturating_sub(1) },
			..self
		}
	}
}

pub struct GalleryPage {
	gallery: RealtimeMirror<MediaItem>,
	selected: String,
	lightbox: Option<Lightbox>,
}

impl GalleryPage {
	pub async fn mount(ctx: &SiteContext) -> Result<Self, StoreError> {
		Ok(Self {
			gallery: RealtimeMirror::mount(ctx, OrderBy::asc("caption")).await?,
			selected: ALL_CATEGORIES.to_string(),
			lightbox: None,
		})
	}

	pub fn is_loading(&self) -> bool {
		self.gallery.is_loading()
	}

	pub fn listing(&self) -> GalleryListing {
		self.listing_for(&self.selected)
	}

	/// Listing for `category` regardless of the page's own selection
	pub fn listing_for(&self, category: &str) -> GalleryListing {
		GalleryListing::build(&self.gallery.items(), category)
	}

	pub fn selected_category(&self) -> &str {
		&self.selected
	}

	/// Changing the filter closes the lightbox
	pub fn select_category(&mut self, category: impl Into<String>) {
		self.selected = category.into();
		self.lightbox = None;
	}

	/// Open the lightbox on the `index`th visible item
	pub fn open(&mut self, index: usize) -> Option<GalleryEntry> {
		let listing = self.listing();
		let entry = listing.items.get(index)?.clone();
		self.lightbox = Some(Lightbox {
			index,
			len: listing.items.len(),
		});
		Some(entry)
	}

	pub fn close(&mut self) {
		self.lightbox = None;
	}

	pub fn lightbox(&self) -> Option<Lightbox> {
		self.lightbox
	}

	pub fn next(&mut self) -> Option<GalleryEntry> {
		self.step(Lightbox::next)
	}

	pub fn prev(&mut self) -> Option<GalleryEntry> {
		self.step(Lightbox::prev)
	}

	pub fn current(&self) -> Option<GalleryEntry> {
		let lightbox = self.lightbox?;
		self.listing().items.get(lightbox.index).cloned()
	}

	pub fn mirror_mut(&mut self) -> &mut RealtimeMirror<MediaItem> {
		&mut self.gallery
	}

	fn step(&mut self, advance: fn(Lightbox) -> Lightbox) -> Option<GalleryEntry> {
		let len = self.listing().items.len();
		let lightbox = self.lightbox.as_mut()?;
		// The list may have changed under an open lightbox.
		lightbox.len = len;
		if len == 0 {
			self.lightbox = None;
			return None;
		}
		lightbox.index = lightbox.index.min(len - 1);
		*lightbox = advance(*lightbox);
		self.current()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn item(id: &str, url: &str, category: &str) -> Stored<MediaItem> {
		Stored {
			id: RecordId::new(id),
			record: MediaItem {
				url: url.into(),
				caption: id.into(),
				category: category.into(),
				public_id: None,
			},
		}
	}

	#[test]
	fn categories_keep_first_seen_order() {
		let items = [
			item("a", "/a.jpg", "training"),
			item("b", "/b.mp4", "events"),
			item("c", "/c.jpg", "training"),
			item("d", "/d.jpg", "general"),
		];

		let listing = GalleryListing::build(&items, ALL_CATEGORIES);

		assert_eq!(listing.categories, ["all", "training", "events", "general"]);
		assert_eq!(listing.items.len(), 4);
		assert_eq!(listing.items[1].kind, MediaKind::Video);
	}

	#[test]
	fn filter_keeps_only_selected_category() {
		let items = [item("a", "/a.jpg", "training"), item("b", "/b.jpg", "events")];

		let listing = GalleryListing::build(&items, "events");

		assert_eq!(listing.items.len(), 1);
		assert_eq!(listing.items[0].id, RecordId::new("b"));
		assert_eq!(listing.categories.len(), 3);
	}

	#[test]
	fn lightbox_wraps_both_ways() {
		let first = Lightbox { index: 0, len: 3 };
		let last = Lightbox { index: 2, len: 3 };

		assert_eq!(first.prev().index, 2);
		assert_eq!(last.next().index, 0);
		assert_eq!(first.next().index, 1);
	}
}
