//! Admin dashboard managers
//!
//! One manager per collection. Each owns its own form state, the id of the
//! record being edited (if any) and a mounted [`RealtimeMirror`] for its
//! list. Form state is never touched by incoming snapshots. Every operation
//! ends in a [`Notice`] rather than an error so the view keeps running.
//!
//! [`RealtimeMirror`]: crate::mirror::RealtimeMirror
//! [`Notice`]: crate::notice::Notice

pub mod coaches;
pub mod dashboard;
pub mod gallery;
pub mod manager;

pub use coaches::CoachesManager;
pub use dashboard::{Dashboard, DashboardCounts};
pub use gallery::GalleryManager;
pub use manager::{Managed, RecordManager, Saved};

use crate::domain::{Announcement, Event};

pub type EventsManager = RecordManager<Event>;
pub type AnnouncementsManager = RecordManager<Announcement>;
