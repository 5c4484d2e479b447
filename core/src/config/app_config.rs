//! Application configuration

use super::{default_data_dir, Migrate};
use crate::domain::Collection;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "dojo.json";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
	/// Config schema version
	pub version: u32,

	/// Data directory path
	pub data_dir: PathBuf,

	/// Logging level
	pub log_level: String,

	#[serde(default)]
	pub server: ServerConfig,

	/// Remote collection names
	#[serde(default)]
	pub collections: CollectionNames,

	/// Blob storage layout
	#[serde(default)]
	pub storage: StorageConfig,

	/// Enrollment alert emails
	#[serde(default)]
	pub alerts: AlertConfig,

	/// Optional JSON fixture loaded into the in-memory backend on startup
	#[serde(default)]
	pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 8080,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNames {
	pub admins: String,
	pub events: String,
	pub announcements: String,
	pub coaches: String,
	pub gallery: String,
}

impl CollectionNames {
	pub fn name(&self, collection: Collection) -> &str {
		match collection {
			Collection::Admins => &self.admins,
			Collection::Events => &self.events,
			Collection::Announcements => &self.announcements,
			Collection::Coaches => &self.coaches,
			Collection::Gallery => &self.gallery,
		}
	}
}

impl Default for CollectionNames {
	fn default() -> Self {
		Self {
			admins: Collection::Admins.as_ref().to_string(),
			events: Collection::Events.as_ref().to_string(),
			announcements: Collection::Announcements.as_ref().to_string(),
			coaches: Collection::Coaches.as_ref().to_string(),
			gallery: Collection::Gallery.as_ref().to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
	/// Prefix of every public blob address
	pub public_base_url: String,
	/// Blob path prefix for coach photos
	pub coach_prefix: String,
	/// Blob path prefix for gallery media
	pub gallery_prefix: String,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			public_base_url: "http://localhost:8080/blobs".to_string(),
			coach_prefix: "coaches".to_string(),
			gallery_prefix: "gallery".to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
	/// Template used for every alert email
	pub template_id: String,
	/// Inbox that receives registration and contact alerts
	pub recipient: String,
}

impl Default for AlertConfig {
	fn default() -> Self {
		Self {
			template_id: "enrollment_alert".to_string(),
			recipient: "office@dojo.local".to_string(),
		}
	}
}

impl AppConfig {
	/// Load configuration from the default location
	pub fn load() -> Result<Self> {
		let data_dir = default_data_dir()?;
		Self::load_from(&data_dir)
	}

	/// Load configuration from a specific data directory, writing defaults
	/// there if no config exists yet
	pub fn load_from(data_dir: &Path) -> Result<Self> {
		let config_path = data_dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			info!("Loading config from {:?}", config_path);
			let json = fs::read_to_string(&config_path)?;
			let mut config: AppConfig = serde_json::from_str(&json)
				.map_err(|e| anyhow!("Invalid config at {}: {e}", config_path.display()))?;

			if config.needs_migration() {
				info!(
					"Migrating config from v{} to v{}",
					config.version,
					Self::target_version()
				);
				config.migrate()?;
				config.save()?;
			}

			Ok(config)
		} else {
			warn!("No config found, creating default at {:?}", config_path);
			let config = Self::default_with_dir(data_dir.to_path_buf());
			config.save()?;
			Ok(config)
		}
	}

	/// Create default configuration with specific data directory
	pub fn default_with_dir(data_dir: PathBuf) -> Self {
		Self {
			version: Self::target_version(),
			data_dir,
			log_level: "info".to_string(),
			server: ServerConfig::default(),
			collections: CollectionNames::default(),
			storage: StorageConfig::default(),
			alerts: AlertConfig::default(),
			seed_file: None,
		}
	}

	/// Save configuration to disk
	pub fn save(&self) -> Result<()> {
		fs::create_dir_all(&self.data_dir)?;

		let config_path = self.data_dir.join(CONFIG_FILE_NAME);
		let json = serde_json::to_string_pretty(self)?;
		fs::write(&config_path, json)?;
		info!("Saved config to {:?}", config_path);
		Ok(())
	}

	/// Get the path for logs directory
	pub fn logs_dir(&self) -> PathBuf {
		self.data_dir.join("logs")
	}

	/// Seed file path, resolved against the data directory when relative
	pub fn seed_path(&self) -> Option<PathBuf> {
		self.seed_file.as_ref().map(|path| {
			if path.is_absolute() {
				path.clone()
			} else {
				self.data_dir.join(path)
			}
		})
	}
}

impl Migrate for AppConfig {
	fn current_version(&self) -> u32 {
		self.version
	}

	fn target_version() -> u32 {
		2
	}

	fn migrate(&mut self) -> Result<()> {
		match self.version {
			0 => {
				self.version = 1;
				self.migrate()
			}
			1 => {
				// v2 introduced enrollment alerts
				self.alerts = AlertConfig::default();
				self.version = 2;
				Ok(())
			}
			2 => Ok(()),
			v => Err(anyhow!("Unknown config version: {}", v)),
		}
	}
}
