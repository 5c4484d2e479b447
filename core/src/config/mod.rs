//! Application configuration management

pub mod app_config;
pub mod migration;

pub use app_config::{AlertConfig, AppConfig, CollectionNames, ServerConfig, StorageConfig};
pub use dojo_config::default_data_dir;
pub use migration::Migrate;
