//! Metadata store adapter trait.
//!
//! Every mutation the engine performs against persistent state goes through
//! this trait. Single-row writes are expected to be atomic; multi-row
//! mutations (like toggles, cascade deletes) are expected to execute inside
//! one storage transaction so concurrent writers serialize at the storage
//! layer.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;

use crate::activity_types::{Activity, ActivityType};
use crate::comment_types::{Comment, CommentView, LikeOutcome, LikeView};
use crate::notification_types::Notification;
use crate::prelude::*;
use crate::subject_types::Subject;

/// Profile as stored, with engine-level flags on top of the display snapshot
#[derive(Clone, Debug)]
pub struct ProfileView {
	pub profile: ProfileInfo,
	pub is_admin: bool,
	pub created_at: Timestamp,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListActivityOptions {
	#[serde(rename = "type")]
	pub typ: Option<ActivityType>,
	pub actor: Option<Box<str>>,
	/// Only activities strictly older than this timestamp
	pub before: Option<Timestamp>,
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListNotificationOptions {
	#[serde(rename = "type")]
	pub typ: Option<ActivityType>,
	pub page: Option<u32>,
	pub limit: Option<u32>,
}

#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	// Profiles (user-identity lookup collaborator)
	async fn read_profile(&self, user_id: &str) -> QbResult<ProfileView>;
	async fn create_profile(&self, profile: &ProfileInfo, is_admin: bool) -> QbResult<()>;

	// Subjects
	async fn create_subject(&self, subject: &Subject) -> QbResult<()>;
	async fn read_subject(&self, subject_id: &str) -> QbResult<Subject>;
	async fn list_subject_likes(&self, subject_id: &str) -> QbResult<Vec<LikeView>>;
	/// Idempotent like-set membership write; safe to retry
	async fn set_subject_like(
		&self,
		subject_id: &str,
		user: &ProfileInfo,
		liked: bool,
	) -> QbResult<LikeOutcome>;
	/// Membership flip decided inside one storage transaction
	async fn toggle_subject_like(
		&self,
		subject_id: &str,
		user: &ProfileInfo,
	) -> QbResult<LikeOutcome>;

	// Comments
	async fn create_comment(&self, comment: &Comment) -> QbResult<()>;
	async fn get_comment(&self, subject_id: &str, comment_id: &str)
	-> QbResult<Option<CommentView>>;
	/// All comments of a subject, in insertion order
	async fn list_comments(&self, subject_id: &str) -> QbResult<Vec<CommentView>>;
	/// Remove the given comments and their like-sets in one transaction.
	/// Returns the number of comment records removed.
	async fn delete_comments(&self, subject_id: &str, comment_ids: &[Box<str>]) -> QbResult<u64>;
	async fn set_comment_like(
		&self,
		subject_id: &str,
		comment_id: &str,
		user: &ProfileInfo,
		liked: bool,
	) -> QbResult<LikeOutcome>;
	async fn toggle_comment_like(
		&self,
		subject_id: &str,
		comment_id: &str,
		user: &ProfileInfo,
	) -> QbResult<LikeOutcome>;

	// Activities (append-only)
	async fn create_activity(&self, activity: &Activity) -> QbResult<()>;
	async fn list_activities(&self, opts: &ListActivityOptions) -> QbResult<Vec<Activity>>;
	async fn delete_activities_for_target(&self, target_id: &str) -> QbResult<u64>;

	// Notifications
	async fn create_notification(&self, notification: &Notification) -> QbResult<()>;
	/// Returns one page of notifications plus the total matching count
	async fn list_notifications(
		&self,
		recipient_id: &str,
		opts: &ListNotificationOptions,
	) -> QbResult<(Vec<Notification>, u64)>;
	async fn unread_notification_count(&self, recipient_id: &str) -> QbResult<u64>;
	async fn mark_notification_read(
		&self,
		recipient_id: &str,
		notification_id: &str,
	) -> QbResult<Notification>;
	async fn mark_all_notifications_read(&self, recipient_id: &str) -> QbResult<u64>;
	async fn delete_notification(&self, recipient_id: &str, notification_id: &str)
	-> QbResult<()>;
	async fn delete_all_notifications(&self, recipient_id: &str) -> QbResult<u64>;
	/// Cascade cleanup when a subject or comment is deleted
	async fn delete_notifications_for_target(&self, target_id: &str) -> QbResult<u64>;
}

// vim: ts=4
