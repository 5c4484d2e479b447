//! Change bus for decoupled store notifications
//!
//! Writers emit a [`StoreEvent`] after every committed change; snapshot
//! subscriptions listen here and re-read their collection. Events carry no
//! payload beyond the affected id, since subscribers always re-read the full
//! collection.

use crate::domain::RecordId;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::AsRefStr)]
pub enum ChangeKind {
	Inserted,
	Updated,
	Deleted,
}

/// A committed change to one document of one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreEvent {
	pub collection: String,
	pub id: RecordId,
	pub kind: ChangeKind,
}

/// Event bus for broadcasting store changes
#[derive(Debug, Clone)]
pub struct EventBus {
	sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
	/// Create a new event bus with specified capacity
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Emit an event to all subscribers. Having no subscribers is not an error.
	pub fn emit(&self, event: StoreEvent) {
		if let Ok(count) = self.sender.send(event) {
			trace!("Store event delivered to {count} subscribers");
		}
	}

	pub fn subscribe(&self) -> EventSubscriber {
		EventSubscriber {
			receiver: self.sender.subscribe(),
		}
	}

	pub fn subscriber_count(&self) -> usize {
		self.sender.receiver_count()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(1024)
	}
}

/// Outcome of waiting on a subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
	Event(StoreEvent),
	/// Some events were dropped because the subscriber fell behind
	Lagged(u64),
	Closed,
}

#[derive(Debug)]
pub struct EventSubscriber {
	receiver: broadcast::Receiver<StoreEvent>,
}

impl EventSubscriber {
	pub async fn recv(&mut self) -> Received {
		match self.receiver.recv().await {
			Ok(event) => Received::Event(event),
			Err(broadcast::error::RecvError::Lagged(skipped)) => Received::Lagged(skipped),
			Err(broadcast::error::RecvError::Closed) => Received::Closed,
		}
	}

	/// Wait for the next change touching `collection`.
	///
	/// A lag counts as a change, because the skipped events may have touched
	/// it. Returns `false` once the bus is closed.
	pub async fn changed_in(&mut self, collection: &str) -> bool {
		loop {
			match self.recv().await {
				Received::Event(event) if event.collection == collection => return true,
				Received::Event(_) => continue,
				Received::Lagged(_) => return true,
				Received::Closed => return false,
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn event(collection: &str) -> StoreEvent {
		StoreEvent {
			collection: collection.to_string(),
			id: RecordId::new("id"),
			kind: ChangeKind::Inserted,
		}
	}

	#[tokio::test]
	async fn changed_in_skips_other_collections() {
		let bus = EventBus::new(16);
		let mut subscriber = bus.subscribe();

		bus.emit(event("coaches"));
		bus.emit(event("events"));

		assert!(subscriber.changed_in("events").await);
		assert_eq!(bus.subscriber_count(), 1);
	}

	#[tokio::test]
	async fn lag_is_reported_as_a_change() {
		let bus = EventBus::new(1);
		let mut subscriber = bus.subscribe();

		bus.emit(event("coaches"));
		bus.emit(event("coaches"));

		assert!(subscriber.changed_in("events").await);
	}

	#[test]
	fn dropping_subscriber_releases_it() {
		let bus = EventBus::default();
		let subscriber = bus.subscribe();
		assert_eq!(bus.subscriber_count(), 1);

		drop(subscriber);

		assert_eq!(bus.subscriber_count(), 0);
	}
}
