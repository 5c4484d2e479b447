use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use axum::http::{header::CONTENT_TYPE, Method};
use clap::Parser;
use dojo_core::{infra::logging::init_tracing, AppConfig};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

mod error;
mod routes;
mod state;

use state::AppState;

/// Public API server for the academy website
#[derive(Debug, Parser)]
#[command(name = "dojo-server", version)]
struct Args {
	/// Data directory (defaults to `$DATA_DIR`, then the platform data dir)
	#[arg(long)]
	data_dir: Option<PathBuf>,

	/// Port to listen on, overriding the config
	#[arg(long, env = "PORT")]
	port: Option<u16>,

	/// JSON seed file for the in-memory backend
	#[arg(long)]
	seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	let data_dir = match args.data_dir {
		Some(dir) => dir,
		None => dojo_config::data_dir_from_env()?,
	};

	let mut config = AppConfig::load_from(&data_dir)?;
	if let Some(port) = args.port {
		config.server.port = port;
	}
	if let Some(seed) = args.seed {
		config.seed_file = Some(seed);
	}

	init_tracing(&config.logs_dir(), &config.log_level)?;

	info!("Initializing state...");
	let address = format!("{}:{}", config.server.host, config.server.port);
	let state = AppState::new(config).await?;

	let cors = CorsLayer::new()
		.allow_origin(Any)
		.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
		.allow_headers([CONTENT_TYPE])
		.max_age(Duration::from_secs(60 * 60));

	let app = routes::router(state).layer(cors);

	let listener = TcpListener::bind(&address).await?;
	info!("Listening on http://{address}");

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	info!("Server shut down");
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = signal::ctrl_c().await {
			tracing::error!("Failed to listen for Ctrl+C: {e}");
			std::future::pending::<()>().await;
		}
		info!("Received Ctrl+C, shutting down");
	};

	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
				info!("Received terminate signal, shutting down");
			}
			Err(e) => {
				tracing::error!("Failed to install SIGTERM handler: {e}");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}
}
