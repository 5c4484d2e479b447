use anyhow::Result;

/// Versioned config that can upgrade itself in place
pub trait Migrate {
	fn current_version(&self) -> u32;

	fn target_version() -> u32;

	/// Apply every step between `current_version` and `target_version`
	fn migrate(&mut self) -> Result<()>;

	fn needs_migration(&self) -> bool {
		self.current_version() < Self::target_version()
	}
}
