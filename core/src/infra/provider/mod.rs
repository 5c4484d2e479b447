//! Interfaces of the hosted backend services the site delegates to
//!
//! The site never talks to a concrete backend directly. Auth, documents,
//! blobs and outbound email are reached through these traits, and a single
//! [`SiteContext`](crate::context::SiteContext) holding one implementation of
//! each is built at process start.

pub mod auth;
pub mod blob;
pub mod notifier;
pub mod store;

pub use auth::{AuthError, AuthProvider, AuthStateSubscription};
pub use blob::{BlobError, BlobHandle, BlobStore};
pub use notifier::{EmailNotifier, NotifyError, TemplateVars};
pub use store::{DocumentStore, SnapshotStream, StoreError};
