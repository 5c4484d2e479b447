//! Core domain models for the academy site
//!
//! Every record here is a transient local projection of a remote document.
//! Identity (`RecordId`) is always assigned by the remote store; the types in
//! this module never mint ids themselves, which is why drafts and stored
//! records are kept apart (`T` vs `Stored<T>`).

pub mod announcement;
pub mod coach;
pub mod event;
pub mod identity;
pub mod media;
pub mod record;

pub use announcement::{Announcement, AnnouncementCategory};
pub use coach::Coach;
pub use event::Event;
pub use identity::{AdminGrant, Identity, SessionToken};
pub use media::{MediaItem, MediaKind};
pub use record::{
	Collection, Direction, Document, OrderBy, Record, RecordId, Stored, StoredDocument,
};
