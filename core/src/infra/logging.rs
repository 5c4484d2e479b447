//! Process-wide tracing setup

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{anyhow, Result};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize tracing with console output and daily rolling files under
/// `logs_dir`. `RUST_LOG` overrides `default_level` when set.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_tracing(logs_dir: &Path, default_level: &str) -> Result<()> {
	if FILE_GUARD.get().is_some() {
		return Ok(());
	}

	std::fs::create_dir_all(logs_dir)
		.map_err(|e| anyhow!("Failed to create logs directory: {e}"))?;

	let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(logs_dir, "dojo.log"));

	let default_directives = format!("dojo_core={default_level},dojo_server={default_level},warn");
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(fmt::layer().with_target(true))
		.with(
			fmt::layer()
				.with_target(true)
				.with_ansi(false) // No ANSI colors in log files
				.with_writer(file_writer),
		)
		.try_init()
		.map_err(|e| anyhow!("Failed to initialize tracing: {e}"))?;

	// Dropping the guard would stop the background writer.
	let _ = FILE_GUARD.set(guard);

	Ok(())
}
