//! Public page and dashboard tests

mod site_helpers;

use chrono::NaiveDate;
use dojo_core::{
	admin::{AnnouncementsManager, Dashboard, DashboardCounts},
	views::{CoachesPage, EventsPage},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use site_helpers::{within, TestSite};

fn seed_announcements(site: &TestSite) {
	for (id, date) in [("a", "2024-01-10"), ("b", "2024-03-01"), ("c", "2024-02-15")] {
		site.seed(
			"announcements",
			id,
			json!({ "title": id, "description": "d", "date": date }),
		);
	}
}

#[tokio::test]
async fn test_events_page_flags_upcoming_events() {
	let site = TestSite::new();
	site.seed("events", "e1", json!({ "title": "Open Mat", "date": "2024-03-01" }));
	site.seed("events", "e2", json!({ "title": "Grading", "date": "2024-03-02" }));
	site.seed("events", "e0", json!({ "title": "Seminar", "date": "2024-02-01" }));

	let mut page = EventsPage::mount(&site.ctx).await.unwrap();
	within(page.events_mirror_mut().ready()).await;
	assert!(!page.is_loading());

	let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
	let listed: Vec<_> = page
		.events_on(today)
		.into_iter()
		.map(|listing| (listing.event.title.clone(), listing.upcoming))
		.collect();

	assert_eq!(
		listed,
		[
			("Seminar".to_string(), false),
			("Open Mat".to_string(), false),
			("Grading".to_string(), true),
		]
	);
}

#[tokio::test]
async fn test_admin_and_public_announcement_orders_differ() {
	let site = TestSite::new();
	seed_announcements(&site);

	let mut page = EventsPage::mount(&site.ctx).await.unwrap();
	let public: Vec<_> = within(page.announcements_mirror_mut().ready())
		.await
		.iter()
		.map(|a| a.date.clone())
		.collect();

	let mut admin = AnnouncementsManager::mount(site.ctx.clone()).await.unwrap();
	let admin: Vec<_> = within(admin.mirror_mut().ready())
		.await
		.iter()
		.map(|a| a.date.clone())
		.collect();

	assert_eq!(public, ["2024-03-01", "2024-02-15", "2024-01-10"]);
	assert_eq!(admin, ["2024-01-10", "2024-02-15", "2024-03-01"]);
}

#[tokio::test]
async fn test_coaches_page_lists_by_name() {
	let site = TestSite::new();
	site.seed("coaches", "c1", json!({ "name": "Yoon", "role": "Coach", "bio": "b" }));
	site.seed("coaches", "c2", json!({ "name": "Kim", "role": "Coach", "bio": "b", "photoUrl": "http://x/k.jpg" }));

	let mut page = CoachesPage::mount(&site.ctx).await.unwrap();
	within(page.mirror_mut().ready()).await;

	let coaches = page.coaches();
	assert_eq!(coaches[0].name, "Kim");
	assert!(coaches[0].has_photo());
	assert_eq!(coaches[1].name, "Yoon");
	assert!(!coaches[1].has_photo());
}

#[tokio::test]
async fn test_dashboard_counts_each_collection() {
	let site = TestSite::new();
	seed_announcements(&site);
	site.seed("events", "e1", json!({ "title": "Grading", "date": "2024-05-01" }));
	site.seed("gallery", "g1", json!({ "url": "http://x/a.jpg", "caption": "a" }));

	let mut dashboard = Dashboard::mount(&site.ctx).await.unwrap();
	let counts = within(dashboard.ready()).await;

	assert_eq!(
		counts,
		DashboardCounts {
			events: 1,
			announcements: 3,
			coaches: 0,
			photos: 1,
		}
	);
}
