//! SQLite-backed metadata adapter.
//!
//! Stores profiles, subjects, comments, like-sets, activities, and
//! notifications in a single SQLite database (WAL mode). Multi-row
//! mutations (like toggles, cascade deletes) run inside one transaction so
//! concurrent writers to the same row set serialize here.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::{fmt::Debug, path::Path};

use quibble::activity_types::Activity;
use quibble::comment_types::{Comment, CommentView, LikeOutcome, LikeView};
use quibble::meta_adapter::{
	ListActivityOptions, ListNotificationOptions, MetaAdapter, ProfileView,
};
use quibble::notification_types::Notification;
use quibble::prelude::*;
use quibble::subject_types::Subject;

mod activity;
mod comment;
mod notification;
mod profile;
mod schema;
mod subject;
mod utils;

#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
}

impl MetaAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> QbResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| warn!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| warn!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl MetaAdapter for MetaAdapterSqlite {
	// Profile management
	//********************
	async fn read_profile(&self, user_id: &str) -> QbResult<ProfileView> {
		profile::read(&self.db, user_id).await
	}

	async fn create_profile(&self, profile: &ProfileInfo, is_admin: bool) -> QbResult<()> {
		profile::create(&self.db, profile, is_admin).await
	}

	// Subject management
	//********************
	async fn create_subject(&self, subject: &Subject) -> QbResult<()> {
		subject::create(&self.db, subject).await
	}

	async fn read_subject(&self, subject_id: &str) -> QbResult<Subject> {
		subject::read(&self.db, subject_id).await
	}

	async fn list_subject_likes(&self, subject_id: &str) -> QbResult<Vec<LikeView>> {
		subject::list_likes(&self.db, subject_id).await
	}

	async fn set_subject_like(
		&self,
		subject_id: &str,
		user: &ProfileInfo,
		liked: bool,
	) -> QbResult<LikeOutcome> {
		subject::set_like(&self.db, subject_id, user, liked).await
	}

	async fn toggle_subject_like(
		&self,
		subject_id: &str,
		user: &ProfileInfo,
	) -> QbResult<LikeOutcome> {
		subject::toggle_like(&self.db, subject_id, user).await
	}

	// Comment management
	//********************
	async fn create_comment(&self, comment: &Comment) -> QbResult<()> {
		comment::create(&self.db, comment).await
	}

	async fn get_comment(
		&self,
		subject_id: &str,
		comment_id: &str,
	) -> QbResult<Option<CommentView>> {
		comment::get(&self.db, subject_id, comment_id).await
	}

	async fn list_comments(&self, subject_id: &str) -> QbResult<Vec<CommentView>> {
		comment::list(&self.db, subject_id).await
	}

	async fn delete_comments(
		&self,
		subject_id: &str,
		comment_ids: &[Box<str>],
	) -> QbResult<u64> {
		comment::delete_many(&self.db, subject_id, comment_ids).await
	}

	async fn set_comment_like(
		&self,
		subject_id: &str,
		comment_id: &str,
		user: &ProfileInfo,
		liked: bool,
	) -> QbResult<LikeOutcome> {
		comment::set_like(&self.db, subject_id, comment_id, user, liked).await
	}

	async fn toggle_comment_like(
		&self,
		subject_id: &str,
		comment_id: &str,
		user: &ProfileInfo,
	) -> QbResult<LikeOutcome> {
		comment::toggle_like(&self.db, subject_id, comment_id, user).await
	}

	// Activity management
	//*********************
	async fn create_activity(&self, activity: &Activity) -> QbResult<()> {
		activity::create(&self.db, activity).await
	}

	async fn list_activities(&self, opts: &ListActivityOptions) -> QbResult<Vec<Activity>> {
		activity::list(&self.db, opts).await
	}

	async fn delete_activities_for_target(&self, target_id: &str) -> QbResult<u64> {
		activity::delete_for_target(&self.db, target_id).await
	}

	// Notification management
	//*************************
	async fn create_notification(&self, notification: &Notification) -> QbResult<()> {
		notification::create(&self.db, notification).await
	}

	async fn list_notifications(
		&self,
		recipient_id: &str,
		opts: &ListNotificationOptions,
	) -> QbResult<(Vec<Notification>, u64)> {
		notification::list(&self.db, recipient_id, opts).await
	}

	async fn unread_notification_count(&self, recipient_id: &str) -> QbResult<u64> {
		notification::unread_count(&self.db, recipient_id).await
	}

	async fn mark_notification_read(
		&self,
		recipient_id: &str,
		notification_id: &str,
	) -> QbResult<Notification> {
		notification::mark_read(&self.db, recipient_id, notification_id).await
	}

	async fn mark_all_notifications_read(&self, recipient_id: &str) -> QbResult<u64> {
		notification::mark_all_read(&self.db, recipient_id).await
	}

	async fn delete_notification(
		&self,
		recipient_id: &str,
		notification_id: &str,
	) -> QbResult<()> {
		notification::delete(&self.db, recipient_id, notification_id).await
	}

	async fn delete_all_notifications(&self, recipient_id: &str) -> QbResult<u64> {
		notification::delete_all(&self.db, recipient_id).await
	}

	async fn delete_notifications_for_target(&self, target_id: &str) -> QbResult<u64> {
		notification::delete_for_target(&self.db, target_id).await
	}
}

// vim: ts=4
