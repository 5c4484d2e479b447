//! Record abstraction shared by the mirror and the mutation facade
//!
//! Remote documents travel as loose JSON maps (`Document`). Typed records are
//! decoded from them on the read path and encoded back on the write path.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, ops::Deref};
use strum::{AsRefStr, EnumIter};

/// Field map of a remote document, without its id
pub type Document = Map<String, Value>;

/// Opaque id assigned by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for RecordId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

/// The remote collections the site reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
	Admins,
	Events,
	Announcements,
	Coaches,
	Gallery,
}

/// A document as returned by the store: id plus fields
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
	pub id: RecordId,
	pub fields: Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Ascending,
	Descending,
}

/// Ordering applied by the store to every snapshot of a subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
	pub field: String,
	pub direction: Direction,
}

impl OrderBy {
	pub fn asc(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			direction: Direction::Ascending,
		}
	}

	pub fn desc(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			direction: Direction::Descending,
		}
	}
}

/// Trait for typed records that live in a remote collection
///
/// Implementors are plain field structs. They never carry their own id; the
/// store-assigned id is attached by [`Stored`] when a document is decoded.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
	/// Collection this record type is stored in
	const COLLECTION: Collection;

	/// Encode the record into a document for insert/update calls
	fn to_document(&self) -> Result<Document, serde_json::Error> {
		match serde_json::to_value(self)? {
			Value::Object(map) => Ok(map),
			other => Err(serde::ser::Error::custom(format!(
				"record encoded to a non-object value: {other}"
			))),
		}
	}
}

/// A record together with the id the store assigned to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<T> {
	pub id: RecordId,
	#[serde(flatten)]
	pub record: T,
}

impl<T: Record> Stored<T> {
	pub fn decode(document: StoredDocument) -> Result<Self, serde_json::Error> {
		let record = serde_json::from_value(Value::Object(document.fields))?;
		Ok(Self {
			id: document.id,
			record,
		})
	}
}

impl<T> Deref for Stored<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.record
	}
}
