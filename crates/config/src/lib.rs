use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "dojo";

/// Platform-specific data directory resolution
pub fn default_data_dir() -> Result<PathBuf> {
	#[cfg(any(target_os = "macos", target_os = "ios", target_os = "android"))]
	let dir = dirs::data_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join(APP_DIR_NAME);

	#[cfg(target_os = "windows")]
	let dir = dirs::data_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("Dojo");

	#[cfg(not(any(
		target_os = "macos",
		target_os = "ios",
		target_os = "android",
		target_os = "windows"
	)))]
	let dir = dirs::data_local_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join(APP_DIR_NAME);

	ensure_dir(&dir)?;

	Ok(dir)
}

/// Resolve `DATA_DIR` if set, otherwise the platform default.
pub fn data_dir_from_env() -> Result<PathBuf> {
	match std::env::var_os("DATA_DIR") {
		Some(path) => {
			let dir = PathBuf::from(path);
			ensure_dir(&dir)?;
			Ok(dir)
		}
		None => default_data_dir(),
	}
}

fn ensure_dir(dir: &Path) -> Result<()> {
	fs::create_dir_all(dir)
		.map_err(|e| anyhow!("Failed to create data directory {}: {e}", dir.display()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ensure_dir_creates_nested_directories() {
		let temp = tempfile::tempdir().unwrap();
		let nested = temp.path().join("a").join("b");

		ensure_dir(&nested).unwrap();

		assert!(nested.is_dir());
	}
}
