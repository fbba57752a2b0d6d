use std::sync::Arc;

use quibble_core::app::{App, AppOpts, AppState};
use quibble_core::ws_broadcast::BroadcastManager;
use quibble_media_adapter_fs::MediaAdapterFs;
use quibble_meta_adapter_sqlite::MetaAdapterSqlite;
use quibble_types::meta_adapter::MetaAdapter;
use quibble_types::subject_types::{Subject, SubjectKind};
use quibble_types::types::{AuthCtx, Timestamp};

pub struct TestEnv {
	pub app: App,
	// Held so the database and media files outlive the test body
	pub dir: tempfile::TempDir,
}

/// App over a fresh SQLite database and media dir
pub async fn build_app() -> TestEnv {
	let dir = tempfile::tempdir().unwrap();
	let meta_adapter: Arc<dyn MetaAdapter> =
		Arc::new(MetaAdapterSqlite::new(dir.path().join("meta.db")).await.unwrap());
	build_app_with(dir, meta_adapter)
}

/// App with a caller-supplied meta adapter (for failure injection)
pub fn build_app_with(dir: tempfile::TempDir, meta_adapter: Arc<dyn MetaAdapter>) -> TestEnv {
	let media_dir = dir.path().join("media");
	std::fs::create_dir_all(&media_dir).unwrap();

	let app = Arc::new(AppState {
		broadcast: BroadcastManager::new(),
		opts: AppOpts {
			listen: "127.0.0.1:0".into(),
			db_dir: dir.path().to_path_buf().into_boxed_path(),
			media_dir: media_dir.clone().into_boxed_path(),
		},
		meta_adapter,
		media_adapter: Arc::new(MediaAdapterFs::new(media_dir)),
	});

	TestEnv { app, dir }
}

pub fn auth(user_id: &str, name: &str) -> AuthCtx {
	AuthCtx { user_id: user_id.into(), name: name.into(), profile_pic: None, is_admin: false }
}

pub fn admin(user_id: &str, name: &str) -> AuthCtx {
	AuthCtx { user_id: user_id.into(), name: name.into(), profile_pic: None, is_admin: true }
}

/// Seed a review subject owned by the given user
pub async fn seed_subject(app: &App, subject_id: &str, owner: &AuthCtx) -> Subject {
	let subject = Subject {
		subject_id: subject_id.into(),
		typ: SubjectKind::Review,
		owner: owner.profile(),
		title: "Smoky brisket".into(),
		content: Some("Tender, smoky, worth the queue".into()),
		created_at: Timestamp::now(),
	};
	app.meta_adapter.create_subject(&subject).await.unwrap();
	subject
}
