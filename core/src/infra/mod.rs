//! Infrastructure layer - external interfaces

pub mod event;
pub mod logging;
pub mod memory;
pub mod provider;
