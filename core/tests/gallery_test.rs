//! Gallery upload and public gallery page tests

mod site_helpers;

use dojo_core::{
	admin::GalleryManager,
	domain::MediaKind,
	notice::NoticeLevel,
	ops::FileUpload,
	views::{GalleryPage, ALL_CATEGORIES},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use site_helpers::{within, TestSite};

#[tokio::test]
async fn test_upload_stores_url_caption_category_and_path() {
	let site = TestSite::new();
	let mut gallery = GalleryManager::mount(site.ctx.clone()).await.unwrap();
	assert_eq!(gallery.category(), "training");

	gallery.select_file(FileUpload::new("kick.webm", vec![7; 32]));
	gallery.set_caption("Jump kick");
	let notice = gallery.upload().await;

	assert_eq!(notice.description, "Photo uploaded successfully!");
	assert!(gallery.selected_file().is_none());
	assert_eq!(gallery.caption(), "");

	let items = within(
		gallery
			.mirror_mut()
			.wait_until(|items| items.len() == 1),
	)
	.await;
	let item = &items[0];
	assert_eq!(item.caption, "Jump kick");
	assert_eq!(item.category, "training");
	assert_eq!(item.kind(), MediaKind::Video);
	let path = item.public_id.clone().unwrap();
	assert!(path.starts_with("gallery/"));
	assert_eq!(site.backend.blobs.get(&path).unwrap().len(), 32);
}

#[tokio::test]
async fn test_upload_without_file_or_caption_is_refused() {
	let site = TestSite::new();
	let mut gallery = GalleryManager::mount(site.ctx.clone()).await.unwrap();

	gallery.set_caption("No file");
	let notice = gallery.upload().await;

	assert_eq!(notice.level, NoticeLevel::Warning);
	assert_eq!(notice.description, "Please select a photo and enter a caption");
	assert!(site.backend.blobs.paths().is_empty());
	assert_eq!(site.backend.store.insert_calls(), 0);
}

#[tokio::test]
async fn test_public_page_filters_and_wraps_lightbox() {
	let site = TestSite::new();
	site.seed("gallery", "g1", json!({ "url": "http://x/a.jpg", "caption": "a", "category": "training" }));
	site.seed("gallery", "g2", json!({ "url": "http://x/b.jpg", "caption": "b" }));
	site.seed("gallery", "g3", json!({ "url": "http://x/video/c", "caption": "c", "category": "training" }));

	let mut page = GalleryPage::mount(&site.ctx).await.unwrap();
	within(page.mirror_mut().ready()).await;

	let listing = page.listing();
	assert_eq!(listing.categories, [ALL_CATEGORIES, "training", "general"]);
	assert_eq!(listing.items.len(), 3);

	page.select_category("training");
	let listing = page.listing();
	assert_eq!(listing.items.len(), 2);
	assert_eq!(listing.items[1].kind, MediaKind::Video);

	let first = page.open(0).unwrap();
	assert_eq!(first.caption, "a");
	assert_eq!(page.prev().unwrap().caption, "c");
	assert_eq!(page.next().unwrap().caption, "a");
	assert_eq!(page.next().unwrap().caption, "c");

	page.close();
	assert_eq!(page.lightbox(), None);
	assert_eq!(page.next(), None);
}
