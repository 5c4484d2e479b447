use std::sync::Arc;

use anyhow::Result;
use dojo_core::{
	infra::memory::{MemoryBackend, Seed},
	views::{CoachesPage, EventsPage, GalleryPage},
	AppConfig, SiteContext,
};
use tracing::info;

/// Shared by every request. The pages are mounted once and stay live for the
/// lifetime of the process.
pub struct AppState {
	pub ctx: SiteContext,
	pub backend: MemoryBackend,
	pub events: EventsPage,
	pub coaches: CoachesPage,
	pub gallery: GalleryPage,
}

impl AppState {
	pub async fn new(config: AppConfig) -> Result<Arc<Self>> {
		let backend = MemoryBackend::new(&config.storage.public_base_url);

		if let Some(path) = config.seed_path() {
			info!("Loading seed from {}", path.display());
			backend.apply_seed(Seed::from_file(&path)?);
		}

		let ctx = backend.context(config);

		let mut events = EventsPage::mount(&ctx).await?;
		let mut coaches = CoachesPage::mount(&ctx).await?;
		let mut gallery = GalleryPage::mount(&ctx).await?;

		// Serve the first request from a loaded snapshot.
		events.events_mirror_mut().ready().await;
		events.announcements_mirror_mut().ready().await;
		coaches.mirror_mut().ready().await;
		gallery.mirror_mut().ready().await;

		Ok(Arc::new(Self {
			ctx,
			backend,
			events,
			coaches,
			gallery,
		}))
	}
}
