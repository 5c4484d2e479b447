//! # Realtime Mirror
//!
//! Keeps an in-memory, ordered copy of one remote collection. The store pushes
//! the entire snapshot after every change (by anyone, anywhere) and the mirror
//! replaces its list wholesale; there is no diffing or merging.
//!
//! Re-decoding the whole collection on every change is O(n) per remote write.
//! Collections on this site hold tens to low hundreds of records, so the full
//! snapshot is kept for simplicity rather than patching by id.
//!
//! A mirror is the only read path for its view once mounted. Each mounted view
//! owns its own mirror (no sharing between views of the same collection), and
//! dropping the mirror releases the store subscription.

use crate::{
	context::SiteContext,
	domain::{OrderBy, Record, RecordId, Stored, StoredDocument},
	infra::provider::{SnapshotStream, StoreError},
};

use futures::StreamExt;
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

/// Current contents of a mirror; `None` until the first snapshot arrives
type Snapshot<T> = Option<Arc<[Stored<T>]>>;

pub struct RealtimeMirror<T: Record> {
	collection: String,
	state: watch::Receiver<Snapshot<T>>,
	task: JoinHandle<()>,
}

impl<T: Record> RealtimeMirror<T> {
	/// Open the push subscription for `T`'s collection, ordered by `order`
	pub async fn mount(ctx: &SiteContext, order: OrderBy) -> Result<Self, StoreError> {
		let collection = ctx.collection(T::COLLECTION).to_string();
		let stream = ctx.store.subscribe(&collection, order).await?;
		debug!("Mirror mounted on {collection}");

		let (sender, state) = watch::channel(None);
		let task = tokio::spawn(pump(collection.clone(), stream, sender));

		Ok(Self {
			collection,
			state,
			task,
		})
	}

	pub fn collection(&self) -> &str {
		&self.collection
	}

	/// True until the first snapshot has been received
	pub fn is_loading(&self) -> bool {
		self.state.borrow().is_none()
	}

	/// The latest snapshot (empty while loading)
	pub fn items(&self) -> Arc<[Stored<T>]> {
		self.state
			.borrow()
			.clone()
			.unwrap_or_else(|| Arc::from(Vec::new()))
	}

	pub fn len(&self) -> usize {
		self.state.borrow().as_ref().map_or(0, |items| items.len())
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn find(&self, id: &RecordId) -> Option<Stored<T>> {
		self.state
			.borrow()
			.as_ref()
			.and_then(|items| items.iter().find(|item| &item.id == id).cloned())
	}

	/// Wait for the first snapshot
	pub async fn ready(&mut self) -> Arc<[Stored<T>]> {
		let ready = self
			.state
			.wait_for(Option::is_some)
			.await
			.map(|snapshot| snapshot.clone());

		ready.ok().flatten().unwrap_or_else(|| self.items())
	}

	/// Wait for the next snapshot replacement. `None` once the subscription
	/// has ended.
	pub async fn changed(&mut self) -> Option<Arc<[Stored<T>]>> {
		self.state.changed().await.ok()?;
		self.state.borrow_and_update().clone()
	}

	/// Wait until a snapshot satisfies `predicate`
	pub async fn wait_until(
		&mut self,
		predicate: impl Fn(&[Stored<T>]) -> bool,
	) -> Arc<[Stored<T>]> {
		let matched = self
			.state
			.wait_for(|snapshot| snapshot.as_deref().is_some_and(&predicate))
			.await
			.map(|snapshot| snapshot.clone());

		matched.ok().flatten().unwrap_or_else(|| self.items())
	}
}

impl<T: Record> Drop for RealtimeMirror<T> {
	fn drop(&mut self) {
		self.task.abort();
	}
}

async fn pump<T: Record>(
	collection: String,
	mut stream: SnapshotStream,
	sender: watch::Sender<Snapshot<T>>,
) {
	while let Some(snapshot) = stream.next().await {
		match snapshot {
			Ok(documents) => {
				let items = decode_all::<T>(&collection, documents);
				debug!("Mirror of {collection} replaced ({} records)", items.len());
				sender.send_replace(Some(items.into()));
			}
			// Keep showing the last good snapshot; nothing is retried.
			Err(e) => warn!("Snapshot error on {collection}: {e}"),
		}
	}
	debug!("Snapshot subscription on {collection} ended");
}

/// Documents that do not decode as `T` are skipped, not fatal
fn decode_all<T: Record>(collection: &str, documents: Vec<StoredDocument>) -> Vec<Stored<T>> {
	documents
		.into_iter()
		.filter_map(|document| {
			let id = document.id.clone();
			Stored::decode(document)
				.map_err(|e| warn!("Skipping malformed document {id} in {collection}: {e}"))
				.ok()
		})
		.collect()
}
