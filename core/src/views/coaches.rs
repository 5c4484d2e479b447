use crate::{
	context::SiteContext,
	domain::{Coach, OrderBy, Stored},
	infra::provider::StoreError,
	mirror::RealtimeMirror,
};

use std::sync::Arc;

pub struct CoachesPage {
	coaches: RealtimeMirror<Coach>,
}

impl CoachesPage {
	pub async fn mount(ctx: &SiteContext) -> Result<Self, StoreError> {
		Ok(Self {
			coaches: RealtimeMirror::mount(ctx, OrderBy::asc("name")).await?,
		})
	}

	pub fn is_loading(&self) -> bool {
		self.coaches.is_loading()
	}

	pub fn coaches(&self) -> Arc<[Stored<Coach>]> {
		self.coaches.items()
	}

	pub fn mirror_mut(&mut self) -> &mut RealtimeMirror<Coach> {
		&mut self.coaches
	}
}
