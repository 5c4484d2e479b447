use crate::{
	context::SiteContext,
	domain::{Announcement, Event, OrderBy, Stored},
	infra::provider::StoreError,
	mirror::RealtimeMirror,
};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::sync::Arc;

/// An event as listed on the public page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventListing {
	#[serde(flatten)]
	pub event: Stored<Event>,
	pub upcoming: bool,
}

/// Public events page: every event oldest first, announcements newest first
pub struct EventsPage {
	events: RealtimeMirror<Event>,
	announcements: RealtimeMirror<Announcement>,
}

impl EventsPage {
	pub async fn mount(ctx: &SiteContext) -> Result<Self, StoreError> {
		Ok(Self {
			events: RealtimeMirror::mount(ctx, OrderBy::asc("date")).await?,
			announcements: RealtimeMirror::mount(ctx, OrderBy::desc("date")).await?,
		})
	}

	/// Only the events list drives the loading indicator
	pub fn is_loading(&self) -> bool {
		self.events.is_loading()
	}

	pub fn events_on(&self, today: NaiveDate) -> Vec<EventListing> {
		self.events
			.items()
			.iter()
			.map(|event| EventListing {
				upcoming: event.is_upcoming(today),
				event: event.clone(),
			})
			.collect()
	}

	pub fn events(&self) -> Vec<EventListing> {
		self.events_on(Local::now().date_naive())
	}

	pub fn announcements(&self) -> Arc<[Stored<Announcement>]> {
		self.announcements.items()
	}

	pub fn events_mirror_mut(&mut self) -> &mut RealtimeMirror<Event> {
		&mut self.events
	}

	pub fn announcements_mirror_mut(&mut self) -> &mut RealtimeMirror<Announcement> {
		&mut self.announcements
	}
}
