//! Quibble server binary.
//!
//! Wires the storage adapters, the broadcast registry, and the HTTP/WS
//! boundary together. Configuration comes from the environment:
//!
//! - `LISTEN` - bind address (default `0.0.0.0:3000`)
//! - `DB_DIR` - SQLite database directory (default `./data`)
//! - `MEDIA_DIR` - media root for cleanup (default `./media`)
//! - `ADMIN_USER` - optional admin identity to seed at startup
//! - `RUST_LOG` - tracing filter (default `info`)

mod auth;
mod profile;
mod routes;
mod websocket;

use std::{env, path::PathBuf, sync::Arc};

use quibble_core::app::{AppOpts, AppState};
use quibble_core::ws_broadcast::BroadcastManager;
use quibble_media_adapter_fs::MediaAdapterFs;
use quibble_meta_adapter_sqlite::MetaAdapterSqlite;
use quibble_types::meta_adapter::MetaAdapter;
use quibble_types::prelude::*;

#[tokio::main]
async fn main() -> QbResult<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "info".into()),
		)
		.init();

	let listen = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
	let db_dir = PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string()));
	let media_dir = PathBuf::from(env::var("MEDIA_DIR").unwrap_or_else(|_| "./media".to_string()));

	tokio::fs::create_dir_all(&db_dir).await?;

	let meta_adapter = Arc::new(MetaAdapterSqlite::new(db_dir.join("meta.db")).await?);
	let media_adapter = Arc::new(MediaAdapterFs::new(&media_dir));

	let state = Arc::new(AppState {
		broadcast: BroadcastManager::new(),
		opts: AppOpts {
			listen: listen.clone().into_boxed_str(),
			db_dir: db_dir.into_boxed_path(),
			media_dir: media_dir.into_boxed_path(),
		},
		meta_adapter,
		media_adapter,
	});

	// Seed the admin identity when configured, so a fresh instance has a
	// user that can register profiles and subjects
	if let Ok(admin_id) = env::var("ADMIN_USER") {
		let admin = ProfileInfo {
			user_id: admin_id.clone().into_boxed_str(),
			name: admin_id.clone().into_boxed_str(),
			profile_pic: None,
		};
		state.meta_adapter.create_profile(&admin, true).await?;
		info!(user = %admin_id, "Admin profile ensured");
	}

	let router = routes::init(state.clone());

	info!(listen = %listen, version = %quibble_core::app::VERSION, "Quibble listening");
	let listener = tokio::net::TcpListener::bind(listen.as_str()).await?;
	axum::serve(listener, router).await?;

	Ok(())
}

// vim: ts=4
