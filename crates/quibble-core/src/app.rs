//! App state type

use std::{path::Path, sync::Arc};

use crate::ws_broadcast::BroadcastManager;

use quibble_types::media_adapter::MediaAdapter;
use quibble_types::meta_adapter::MetaAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub broadcast: BroadcastManager,
	pub opts: AppOpts,

	pub meta_adapter: Arc<dyn MetaAdapter>,
	pub media_adapter: Arc<dyn MediaAdapter>,
}

pub type App = Arc<AppState>;

#[derive(Debug)]
pub struct AppOpts {
	pub listen: Box<str>,
	pub db_dir: Box<Path>,
	pub media_dir: Box<Path>,
}

// vim: ts=4
