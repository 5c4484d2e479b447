use super::{Collection, Record};

use serde::{Deserialize, Serialize};

/// Category assumed for gallery records stored without one
pub const DEFAULT_MEDIA_CATEGORY: &str = "general";

fn default_category() -> String {
	DEFAULT_MEDIA_CATEGORY.to_string()
}

/// Whether a gallery item renders as an image or a video.
///
/// This is never stored. It is sniffed from the url, so a url that merely
/// mentions "video" is treated as one regardless of the actual payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
	Image,
	Video,
}

impl MediaKind {
	pub fn from_url(url: &str) -> Self {
		if url.contains(".mp4") || url.contains(".webm") || url.contains("video") {
			Self::Video
		} else {
			Self::Image
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
	pub url: String,
	#[serde(default)]
	pub caption: String,
	#[serde(default = "default_category")]
	pub category: String,
	/// Storage path of the uploaded blob
	#[serde(default, rename = "publicId", skip_serializing_if = "Option::is_none")]
	pub public_id: Option<String>,
}

impl Record for MediaItem {
	const COLLECTION: Collection = Collection::Gallery;
}

impl MediaItem {
	pub fn kind(&self) -> MediaKind {
		MediaKind::from_url(&self.url)
	}
}
