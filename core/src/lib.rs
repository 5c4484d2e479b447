#![warn(clippy::all)]

//! Core of the academy website: admin session gate, live collection mirrors,
//! the mutation facade and the view-models built on top of them.
//!
//! Everything talks to the hosted backend through the provider traits in
//! [`infra::provider`], reached via one [`SiteContext`] built at startup.

pub mod admin;
pub mod config;
pub mod context;
pub mod domain;
pub mod enrollment;
pub mod error;
pub mod infra;
pub mod mirror;
pub mod notice;
pub mod ops;
pub mod routes;
pub mod session;
pub mod views;

pub use config::AppConfig;
pub use context::SiteContext;
pub use error::{CoreError, Result};
pub use mirror::RealtimeMirror;
pub use notice::{Notice, NoticeLevel};
pub use routes::Route;
