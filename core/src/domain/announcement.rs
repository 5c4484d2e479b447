use super::{Collection, Record};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
pub enum AnnouncementCategory {
	Update,
	Promotion,
	Schedule,
	#[default]
	General,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
	pub title: String,
	pub description: String,
	#[serde(default)]
	pub category: AnnouncementCategory,
	pub date: String,
}

impl Record for Announcement {
	const COLLECTION: Collection = Collection::Announcements;
}
