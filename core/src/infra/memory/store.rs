use super::recover;
use crate::{
	domain::{Direction, Document, OrderBy, RecordId, StoredDocument},
	infra::{
		event::{ChangeKind, EventBus, EventSubscriber, StoreEvent},
		provider::{DocumentStore, SnapshotStream, StoreError},
	},
};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::{
	cmp::Ordering as CmpOrdering,
	collections::{BTreeMap, HashMap},
	sync::{
		atomic::{AtomicBool, AtomicUsize, Ordering},
		Arc, Mutex, RwLock,
	},
};
use tracing::debug;
use uuid::Uuid;

type Collections = HashMap<String, BTreeMap<RecordId, Document>>;

#[derive(Debug, Default)]
struct CallCounters {
	inserts: AtomicUsize,
	updates: AtomicUsize,
	deletes: AtomicUsize,
	lookups: AtomicUsize,
}

#[derive(Debug, Default)]
struct Inner {
	collections: RwLock<Collections>,
	events: EventBus,
	subscriptions: Mutex<HashMap<String, usize>>,
	calls: CallCounters,
	reject_writes: AtomicBool,
	fail_lookups: AtomicBool,
}

/// Document store held in process memory.
///
/// Snapshot subscriptions are driven by the store's change bus: every write
/// emits a [`StoreEvent`], and each open subscription re-reads and re-sorts
/// its whole collection when it sees one for that collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	inner: Arc<Inner>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a document under a caller-chosen id (fixtures, admin grants)
	pub fn seed(&self, collection: &str, id: impl Into<RecordId>, document: Document) {
		let id = id.into();
		recover(self.inner.collections.write())
			.entry(collection.to_string())
			.or_default()
			.insert(id.clone(), document);
		self.emit(collection, id, ChangeKind::Inserted);
	}

	/// Number of open snapshot subscriptions on `collection`
	pub fn subscriber_count(&self, collection: &str) -> usize {
		recover(self.inner.subscriptions.lock())
			.get(collection)
			.copied()
			.unwrap_or(0)
	}

	pub fn len(&self, collection: &str) -> usize {
		recover(self.inner.collections.read())
			.get(collection)
			.map_or(0, BTreeMap::len)
	}

	pub fn is_empty(&self, collection: &str) -> bool {
		self.len(collection) == 0
	}

	pub fn insert_calls(&self) -> usize {
		self.inner.calls.inserts.load(Ordering::SeqCst)
	}

	pub fn update_calls(&self) -> usize {
		self.inner.calls.updates.load(Ordering::SeqCst)
	}

	pub fn delete_calls(&self) -> usize {
		self.inner.calls.deletes.load(Ordering::SeqCst)
	}

	pub fn lookup_calls(&self) -> usize {
		self.inner.calls.lookups.load(Ordering::SeqCst)
	}

	/// Reject every insert/update/delete until switched back off
	pub fn set_reject_writes(&self, reject: bool) {
		self.inner.reject_writes.store(reject, Ordering::SeqCst);
	}

	/// Make `get_one` fail with [`StoreError::Unavailable`]
	pub fn set_fail_lookups(&self, fail: bool) {
		self.inner.fail_lookups.store(fail, Ordering::SeqCst);
	}

	/// Current fields of one document
	pub fn document(&self, collection: &str, id: &RecordId) -> Option<Document> {
		recover(self.inner.collections.read())
			.get(collection)
			.and_then(|docs| docs.get(id))
			.cloned()
	}

	fn check_writable(&self, collection: &str) -> Result<(), StoreError> {
		if self.inner.reject_writes.load(Ordering::SeqCst) {
			return Err(StoreError::Rejected {
				collection: collection.to_string(),
				reason: "writes are disabled".into(),
			});
		}
		Ok(())
	}

	fn emit(&self, collection: &str, id: RecordId, kind: ChangeKind) {
		debug!("{} {id} in {collection}", kind.as_ref());
		self.inner.events.emit(StoreEvent {
			collection: collection.to_string(),
			id,
			kind,
		});
	}

	fn snapshot(inner: &Inner, collection: &str, order: &OrderBy) -> Vec<StoredDocument> {
		let mut documents: Vec<StoredDocument> = recover(inner.collections.read())
			.get(collection)
			.map(|docs| {
				docs.iter()
					.map(|(id, fields)| StoredDocument {
						id: id.clone(),
						fields: fields.clone(),
					})
					.collect()
			})
			.unwrap_or_default();

		documents.sort_by(|a, b| {
			let by_field = compare_values(a.fields.get(&order.field), b.fields.get(&order.field));
			let by_field = match order.direction {
				Direction::Ascending => by_field,
				Direction::Descending => by_field.reverse(),
			};
			by_field.then_with(|| a.id.cmp(&b.id))
		});

		documents
	}
}

/// Keeps the per-collection subscription count accurate for as long as the
/// stream that owns it is alive.
struct SubscriptionGuard {
	inner: Arc<Inner>,
	collection: String,
}

impl SubscriptionGuard {
	fn register(inner: Arc<Inner>, collection: &str) -> Self {
		*recover(inner.subscriptions.lock())
			.entry(collection.to_string())
			.or_default() += 1;
		Self {
			inner,
			collection: collection.to_string(),
		}
	}
}

impl Drop for SubscriptionGuard {
	fn drop(&mut self) {
		let mut subscriptions = recover(self.inner.subscriptions.lock());
		if let Some(count) = subscriptions.get_mut(&self.collection) {
			*count = count.saturating_sub(1);
			if *count == 0 {
				subscriptions.remove(&self.collection);
			}
		}
		debug!("Released snapshot subscription on {}", self.collection);
	}
}

struct SubscriptionState {
	guard: SubscriptionGuard,
	events: EventSubscriber,
	order: OrderBy,
	delivered_initial: bool,
}

/// Missing values sort first, strings lexically (ISO dates included),
/// numbers numerically. Mixed kinds fall back to their JSON text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> CmpOrdering {
	match (a, b) {
		(None | Some(Value::Null), None | Some(Value::Null)) => CmpOrdering::Equal,
		(None | Some(Value::Null), _) => CmpOrdering::Less,
		(_, None | Some(Value::Null)) => CmpOrdering::Greater,
		(Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
		(Some(Value::Number(a)), Some(Value::Number(b))) => a
			.as_f64()
			.partial_cmp(&b.as_f64())
			.unwrap_or(CmpOrdering::Equal),
		(Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
		(Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
	}
}

#[async_trait]
impl DocumentStore for MemoryStore {
	async fn subscribe(
		&self,
		collection: &str,
		order: OrderBy,
	) -> Result<SnapshotStream, StoreError> {
		// Subscribe to the bus before the initial read so no write can slip
		// between the first snapshot and the first wait.
		let state = SubscriptionState {
			events: self.inner.events.subscribe(),
			guard: SubscriptionGuard::register(self.inner.clone(), collection),
			order,
			delivered_initial: false,
		};

		let stream = stream::unfold(state, |mut state| async move {
			if state.delivered_initial {
				if !state.events.changed_in(&state.guard.collection).await {
					return None;
				}
			} else {
				state.delivered_initial = true;
			}

			let snapshot =
				MemoryStore::snapshot(&state.guard.inner, &state.guard.collection, &state.order);
			Some((Ok(snapshot), state))
		});

		Ok(stream.boxed())
	}

	async fn insert(&self, collection: &str, document: Document) -> Result<RecordId, StoreError> {
		self.inner.calls.inserts.fetch_add(1, Ordering::SeqCst);
		self.check_writable(collection)?;

		let id = RecordId::new(Uuid::new_v4().simple().to_string());
		recover(self.inner.collections.write())
			.entry(collection.to_string())
			.or_default()
			.insert(id.clone(), document);
		self.emit(collection, id.clone(), ChangeKind::Inserted);

		Ok(id)
	}

	async fn update(
		&self,
		collection: &str,
		id: &RecordId,
		partial: Document,
	) -> Result<(), StoreError> {
		self.inner.calls.updates.fetch_add(1, Ordering::SeqCst);
		self.check_writable(collection)?;

		{
			let mut collections = recover(self.inner.collections.write());
			let existing = collections
				.get_mut(collection)
				.and_then(|docs| docs.get_mut(id))
				.ok_or_else(|| StoreError::NotFound {
					collection: collection.to_string(),
					id: id.clone(),
				})?;
			existing.extend(partial);
		}
		self.emit(collection, id.clone(), ChangeKind::Updated);

		Ok(())
	}

	async fn delete(&self, collection: &str, id: &RecordId) -> Result<(), StoreError> {
		self.inner.calls.deletes.fetch_add(1, Ordering::SeqCst);
		self.check_writable(collection)?;

		let removed = recover(self.inner.collections.write())
			.get_mut(collection)
			.and_then(|docs| docs.remove(id))
			.is_some();
		// Deleting a missing document is a no-op, as on the hosted store.
		if removed {
			self.emit(collection, id.clone(), ChangeKind::Deleted);
		}

		Ok(())
	}

	async fn get_one(
		&self,
		collection: &str,
		id: &RecordId,
	) -> Result<Option<StoredDocument>, StoreError> {
		self.inner.calls.lookups.fetch_add(1, Ordering::SeqCst);
		if self.inner.fail_lookups.load(Ordering::SeqCst) {
			return Err(StoreError::Unavailable(format!("lookup in {collection} failed")));
		}

		Ok(recover(self.inner.collections.read())
			.get(collection)
			.and_then(|docs| docs.get(id))
			.map(|fields| StoredDocument {
				id: id.clone(),
				fields: fields.clone(),
			}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn doc(value: Value) -> Document {
		match value {
			Value::Object(map) => map,
			_ => unreachable!(),
		}
	}

	fn field<'a>(snapshot: &'a [StoredDocument], key: &str) -> Vec<&'a str> {
		snapshot
			.iter()
			.map(|d| d.fields[key].as_str().unwrap())
			.collect()
	}

	#[tokio::test]
	async fn snapshots_are_ordered_by_field() {
		let store = MemoryStore::new();
		for date in ["2024-01-10", "2024-03-01", "2024-02-15"] {
			store
				.insert("announcements", doc(json!({ "date": date })))
				.await
				.unwrap();
		}

		let mut desc = store
			.subscribe("announcements", OrderBy::desc("date"))
			.await
			.unwrap();
		let snapshot = desc.next().await.unwrap().unwrap();
		assert_eq!(
			field(&snapshot, "date"),
			["2024-03-01", "2024-02-15", "2024-01-10"]
		);

		let mut asc = store
			.subscribe("announcements", OrderBy::asc("date"))
			.await
			.unwrap();
		let snapshot = asc.next().await.unwrap().unwrap();
		assert_eq!(
			field(&snapshot, "date"),
			["2024-01-10", "2024-02-15", "2024-03-01"]
		);
	}

	#[tokio::test]
	async fn every_write_pushes_a_full_snapshot() {
		let store = MemoryStore::new();
		let mut stream = store.subscribe("coaches", OrderBy::asc("name")).await.unwrap();
		assert!(stream.next().await.unwrap().unwrap().is_empty());

		let id = store
			.insert("coaches", doc(json!({ "name": "Kim" })))
			.await
			.unwrap();
		assert_eq!(stream.next().await.unwrap().unwrap().len(), 1);

		store
			.update("coaches", &id, doc(json!({ "role": "Head Instructor" })))
			.await
			.unwrap();
		let snapshot = stream.next().await.unwrap().unwrap();
		assert_eq!(snapshot[0].fields["name"], json!("Kim"));
		assert_eq!(snapshot[0].fields["role"], json!("Head Instructor"));

		store.delete("coaches", &id).await.unwrap();
		assert!(stream.next().await.unwrap().unwrap().is_empty());
	}

	#[tokio::test]
	async fn dropping_the_stream_releases_the_subscription() {
		let store = MemoryStore::new();
		let stream = store.subscribe("events", OrderBy::asc("date")).await.unwrap();
		assert_eq!(store.subscriber_count("events"), 1);

		drop(stream);

		assert_eq!(store.subscriber_count("events"), 0);
	}

	#[tokio::test]
	async fn update_of_missing_document_is_not_found() {
		let store = MemoryStore::new();

		let err = store
			.update("events", &RecordId::new("nope"), Document::new())
			.await
			.unwrap_err();

		assert!(matches!(err, StoreError::NotFound { .. }));
	}

	#[tokio::test]
	async fn rejected_writes_leave_the_collection_untouched() {
		let store = MemoryStore::new();
		store.set_reject_writes(true);

		let err = store.insert("events", Document::new()).await.unwrap_err();

		assert!(matches!(err, StoreError::Rejected { .. }));
		assert!(store.is_empty("events"));
		assert_eq!(store.insert_calls(), 1);
	}
}
