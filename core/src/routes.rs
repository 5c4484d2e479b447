//! Client-side route table

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassTrack {
	Kids,
	Adults,
	Private,
}

/// Sections of the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRoute {
	Dashboard,
	Events,
	Announcements,
	Coaches,
	Media,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "section", rename_all = "snake_case")]
pub enum Route {
	Home,
	About,
	Classes(ClassTrack),
	Coaches,
	Gallery,
	Events,
	Join,
	Login,
	Admin(AdminRoute),
	NotFound,
}

impl Route {
	pub fn parse(path: &str) -> Self {
		let path = path.split(['?', '#']).next().unwrap_or_default();
		let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

		match segments.as_slice() {
			[] => Self::Home,
			["about"] => Self::About,
			["classes", "kids"] => Self::Classes(ClassTrack::Kids),
			["classes", "adults"] => Self::Classes(ClassTrack::Adults),
			["classes", "private"] => Self::Classes(ClassTrack::Private),
			["coaches"] => Self::Coaches,
			["gallery"] => Self::Gallery,
			["events"] => Self::Events,
			["join"] => Self::Join,
			["login"] => Self::Login,
			["admin"] => Self::Admin(AdminRoute::Dashboard),
			["admin", "events"] => Self::Admin(AdminRoute::Events),
			["admin", "announcements"] => Self::Admin(AdminRoute::Announcements),
			["admin", "coaches"] => Self::Admin(AdminRoute::Coaches),
			["admin", "media"] => Self::Admin(AdminRoute::Media),
			_ => Self::NotFound,
		}
	}

	/// Whether rendering this route must pass the session gate
	pub fn requires_gate(&self) -> bool {
		matches!(self, Self::Admin(_))
	}

	pub fn path(&self) -> &'static str {
		match self {
			Self::Home => "/",
			Self::About => "/about",
			Self::Classes(ClassTrack::Kids) => "/classes/kids",
			Self::Classes(ClassTrack::Adults) => "/classes/adults",
			Self::Classes(ClassTrack::Private) => "/classes/private",
			Self::Coaches => "/coaches",
			Self::Gallery => "/gallery",
			Self::Events => "/events",
			Self::Join => "/join",
			Self::Login => "/login",
			Self::Admin(AdminRoute::Dashboard) => "/admin",
			Self::Admin(AdminRoute::Events) => "/admin/events",
			Self::Admin(AdminRoute::Announcements) => "/admin/announcements",
			Self::Admin(AdminRoute::Coaches) => "/admin/coaches",
			Self::Admin(AdminRoute::Media) => "/admin/media",
			Self::NotFound => "/404",
		}
	}
}

impl fmt::Display for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.path())
	}
}
