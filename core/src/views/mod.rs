//! Read-only view-models for the public pages
//!
//! Each page mounts its own mirrors and derives what it shows from the latest
//! snapshot on demand.

pub mod coaches;
pub mod events;
pub mod gallery;

pub use coaches::CoachesPage;
pub use events::{EventListing, EventsPage};
pub use gallery::{GalleryEntry, GalleryListing, GalleryPage, Lightbox, ALL_CATEGORIES};
