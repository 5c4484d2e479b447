//! Shared fixtures for the integration tests

#![allow(dead_code)]

use dojo_core::{
	domain::{AdminGrant, Document, Record},
	infra::memory::MemoryBackend,
	AppConfig, SiteContext,
};
use serde_json::Value;
use std::{future::Future, time::Duration};
use tempfile::TempDir;

pub const ADMIN_EMAIL: &str = "sensei@dojo.test";
pub const ADMIN_PASSWORD: &str = "black-belt";
pub const STUDENT_EMAIL: &str = "student@dojo.test";
pub const STUDENT_PASSWORD: &str = "white-belt";
pub const BLOB_BASE_URL: &str = "http://blobs.test";

/// In-memory backend with one admin and one non-admin account
pub struct TestSite {
	pub backend: MemoryBackend,
	pub ctx: SiteContext,
	_data_dir: TempDir,
}

impl TestSite {
	pub fn new() -> Self {
		let data_dir = tempfile::tempdir().expect("temp dir");
		let backend = MemoryBackend::new(BLOB_BASE_URL);
		backend.auth.add_account(ADMIN_EMAIL, ADMIN_PASSWORD);
		backend.auth.add_account(STUDENT_EMAIL, STUDENT_PASSWORD);

		let grant = AdminGrant::default().to_document().expect("grant");
		backend.store.seed("admins", ADMIN_EMAIL, grant);

		let ctx = backend.context(AppConfig::default_with_dir(data_dir.path().to_path_buf()));

		Self {
			backend,
			ctx,
			_data_dir: data_dir,
		}
	}

	pub fn seed(&self, collection: &str, id: &str, fields: Value) {
		self.backend.store.seed(collection, id, doc(fields));
	}
}

pub fn doc(fields: Value) -> Document {
	fields.as_object().cloned().expect("object literal")
}

/// Poll `condition` until it holds, failing the test after a second
pub async fn eventually(mut condition: impl FnMut() -> bool) {
	for _ in 0..100 {
		if condition() {
			return;
		}
		tokio::time::sleep(Duration::from_millis(10)).await;
	}
	panic!("condition not reached in time");
}

pub async fn within<T>(future: impl Future<Output = T>) -> T {
	tokio::time::timeout(Duration::from_secs(1), future)
		.await
		.expect("timed out")
}
