use crate::{
	context::SiteContext,
	domain::{Announcement, Coach, Event, MediaItem},
	infra::provider::StoreError,
	mirror::RealtimeMirror,
};

use super::Managed;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
	pub events: usize,
	pub announcements: usize,
	pub coaches: usize,
	pub photos: usize,
}

/// Admin landing page: live record counts per collection
pub struct Dashboard {
	events: RealtimeMirror<Event>,
	announcements: RealtimeMirror<Announcement>,
	coaches: RealtimeMirror<Coach>,
	gallery: RealtimeMirror<MediaItem>,
}

impl Dashboard {
	pub async fn mount(ctx: &SiteContext) -> Result<Self, StoreError> {
		Ok(Self {
			events: RealtimeMirror::mount(ctx, Event::admin_order()).await?,
			announcements: RealtimeMirror::mount(ctx, Announcement::admin_order()).await?,
			coaches: RealtimeMirror::mount(ctx, Coach::admin_order()).await?,
			gallery: RealtimeMirror::mount(ctx, MediaItem::admin_order()).await?,
		})
	}

	/// Wait until every mirror has its first snapshot
	pub async fn ready(&mut self) -> DashboardCounts {
		self.events.ready().await;
		self.announcements.ready().await;
		self.coaches.ready().await;
		self.gallery.ready().await;
		self.counts()
	}

	pub fn is_loading(&self) -> bool {
		self.events.is_loading()
			|| self.announcements.is_loading()
			|| self.coaches.is_loading()
			|| self.gallery.is_loading()
	}

	pub fn counts(&self) -> DashboardCounts {
		DashboardCounts {
			events: self.events.len(),
			announcements: self.announcements.len(),
			coaches: self.coaches.len(),
			photos: self.gallery.len(),
		}
	}
}
