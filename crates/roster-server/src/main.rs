// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Roster server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use roster_server::{create_app_state, create_router};
use roster_server_provisioning::ensure_dashboard_admin;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Roster server - admin dashboard and seed roster reconciliation.
#[derive(Parser, Debug)]
#[command(
	name = "roster-server",
	about = "Roster admin dashboard server",
	version
)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/roster/server.toml)
	#[arg(long, global = true)]
	config: Option<PathBuf>,

	/// Subcommands for roster-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", roster_server::version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => roster_server_config::load_config_with_file(path)?,
		None => roster_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting roster-server"
	);

	let pool = roster_server_db::create_pool(&config.database.url).await?;
	roster_server_db::run_migrations(&pool).await?;

	let state = create_app_state(pool, &config)?;

	if config.dashboard.seed_admin {
		match ensure_dashboard_admin(
			state.account_store.as_ref(),
			&state.dashboard.role,
			&state.dashboard.roster,
			&config.dashboard.admin_email,
			&config.dashboard.admin_password,
		)
		.await
		{
			Ok(outcome) => tracing::info!(?outcome, "dashboard administrator ready"),
			Err(e) => tracing::error!(error = %e, "failed to bootstrap dashboard administrator"),
		}
	}

	let app = create_router(state).layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
