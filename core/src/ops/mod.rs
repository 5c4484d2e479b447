//! Mutation facade: create/update/delete against the remote collections
//!
//! Every write is a direct, awaited call to the document store. Presence
//! checks run locally before anything is sent, deletes ask for confirmation
//! first, and media writes are preceded by a blob upload (see [`upload`]).

pub mod confirm;
pub mod mutation;
pub mod upload;
pub mod validate;

pub use confirm::Confirm;
pub use mutation::{Deletion, MutationError, MutationFacade};
pub use upload::{FileUpload, StagedBlob};
pub use validate::{Editable, ValidationError};
