use std::sync::Arc;

use axum::{
	body::Bytes,
	extract::{Path, Query, State},
	http::StatusCode,
	routing::{get, post},
	Json, Router,
};
use dojo_core::{
	domain::{Announcement, Coach, Stored},
	enrollment::{send_alert, ContactMessage, Registration},
	views::{EventListing, GalleryListing, ALL_CATEGORIES},
};
use serde::Deserialize;
use tracing::debug;

use crate::{error::AppError, state::AppState};

type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
	Router::new()
		.route("/health", get(|| async { "OK" }))
		.route("/api/events", get(events_handler))
		.route("/api/announcements", get(announcements_handler))
		.route("/api/coaches", get(coaches_handler))
		.route("/api/gallery", get(gallery_handler))
		.route("/api/join", post(join_handler))
		.route("/api/contact", post(contact_handler))
		.route("/blobs/*path", get(blob_handler))
		.with_state(state)
}

async fn events_handler(State(state): State<SharedState>) -> Json<Vec<EventListing>> {
	Json(state.events.events())
}

async fn announcements_handler(State(state): State<SharedState>) -> Json<Vec<Stored<Announcement>>> {
	Json(state.events.announcements().to_vec())
}

async fn coaches_handler(State(state): State<SharedState>) -> Json<Vec<Stored<Coach>>> {
	Json(state.coaches.coaches().to_vec())
}

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
	category: Option<String>,
}

async fn gallery_handler(
	State(state): State<SharedState>,
	Query(query): Query<GalleryQuery>,
) -> Json<GalleryListing> {
	let category = query
		.category
		.filter(|c| !c.is_empty())
		.unwrap_or_else(|| ALL_CATEGORIES.to_string());

	Json(state.gallery.listing_for(&category))
}

async fn join_handler(
	State(state): State<SharedState>,
	Json(registration): Json<Registration>,
) -> Result<StatusCode, AppError> {
	// The alert is delivered in the background; its outcome is only logged.
	send_alert(&state.ctx, &registration)?;
	debug!("Accepted registration");
	Ok(StatusCode::ACCEPTED)
}

async fn contact_handler(
	State(state): State<SharedState>,
	Json(message): Json<ContactMessage>,
) -> Result<StatusCode, AppError> {
	send_alert(&state.ctx, &message)?;
	debug!("Accepted contact message");
	Ok(StatusCode::ACCEPTED)
}

async fn blob_handler(
	State(state): State<SharedState>,
	Path(path): Path<String>,
) -> Result<Bytes, AppError> {
	state.backend.blobs.get(&path).ok_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{
		body::{to_bytes, Body},
		http::{header::CONTENT_TYPE, Request},
	};
	use dojo_core::AppConfig;
	use pretty_assertions::assert_eq;
	use serde_json::{json, Value};
	use tower::ServiceExt;

	async fn app() -> (Router, SharedState, tempfile::TempDir) {
		let dir = tempfile::tempdir().unwrap();
		let seed = dir.path().join("seed.json");
		std::fs::write(
			&seed,
			json!({
				"collections": {
					"events": [
						{ "title": "Old Grading", "date": "2000-01-01" },
						{ "title": "Future Cup", "date": "2999-01-01" }
					],
					"announcements": [
						{ "title": "A", "description": "a", "date": "2024-01-10" },
						{ "title": "C", "description": "c", "date": "2024-03-01" },
						{ "title": "B", "description": "b", "date": "2024-02-15" }
					],
					"gallery": [
						{ "url": "http://x/a.jpg", "caption": "a", "category": "training" },
						{ "url": "http://x/b.mp4", "caption": "b", "category": "events" }
					]
				}
			})
			.to_string(),
		)
		.unwrap();

		let mut config = AppConfig::default_with_dir(dir.path().to_path_buf());
		config.seed_file = Some(seed);
		let state = AppState::new(config).await.unwrap();

		(router(state.clone()), state, dir)
	}

	async fn get_json(app: &Router, uri: &str) -> Value {
		let response = app
			.clone()
			.oneshot(Request::get(uri).body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		serde_json::from_slice(&body).unwrap()
	}

	fn post(uri: &str, body: Value) -> Request<Body> {
		Request::post(uri)
			.header(CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.unwrap()
	}

	#[tokio::test]
	async fn announcements_are_newest_first() {
		let (app, _state, _dir) = app().await;

		let body = get_json(&app, "/api/announcements").await;

		let dates: Vec<_> = body
			.as_array()
			.unwrap()
			.iter()
			.map(|a| a["date"].as_str().unwrap().to_string())
			.collect();
		assert_eq!(dates, ["2024-03-01", "2024-02-15", "2024-01-10"]);
	}

	#[tokio::test]
	async fn events_carry_upcoming_flag() {
		let (app, _state, _dir) = app().await;

		let body = get_json(&app, "/api/events").await;

		assert_eq!(body[0]["title"], "Old Grading");
		assert_eq!(body[0]["upcoming"], false);
		assert_eq!(body[1]["upcoming"], true);
	}

	#[tokio::test]
	async fn gallery_filters_by_category() {
		let (app, _state, _dir) = app().await;

		let body = get_json(&app, "/api/gallery?category=events").await;

		assert_eq!(body["categories"], json!(["all", "training", "events"]));
		assert_eq!(body["items"].as_array().unwrap().len(), 1);
		assert_eq!(body["items"][0]["kind"], "video");
	}

	#[tokio::test]
	async fn join_fires_alert_or_rejects_missing_fields() {
		let (app, state, _dir) = app().await;

		let rejected = app
			.clone()
			.oneshot(post("/api/join", json!({ "athleteName": "Mina" })))
			.await
			.unwrap();
		assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

		let accepted = app
			.oneshot(post(
				"/api/join",
				json!({
					"athleteName": "Mina",
					"age": "9",
					"email": "parent@example.com",
					"phone": "555-0100"
				}),
			))
			.await
			.unwrap();
		assert_eq!(accepted.status(), StatusCode::ACCEPTED);

		// Delivery runs on a detached task.
		for _ in 0..50 {
			if !state.backend.notifier.sent().is_empty() {
				break;
			}
			tokio::time::sleep(std::time::Duration::from_millis(10)).await;
		}
		assert_eq!(state.backend.notifier.sent().len(), 1);
	}
}
