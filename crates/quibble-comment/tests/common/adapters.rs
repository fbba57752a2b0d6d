use std::sync::Arc;

use async_trait::async_trait;

use quibble_types::activity_types::Activity;
use quibble_types::comment_types::{Comment, CommentView, LikeOutcome, LikeView};
use quibble_types::error::{Error, QbResult};
use quibble_types::meta_adapter::{
	ListActivityOptions, ListNotificationOptions, MetaAdapter, ProfileView,
};
use quibble_types::notification_types::Notification;
use quibble_types::subject_types::Subject;
use quibble_types::types::ProfileInfo;

/// Meta adapter wrapper whose notification writes always fail.
/// Used to prove fan-out isolation: a broken notification store must not
/// alter the outcome of any primary action.
#[derive(Debug)]
pub struct FailingNotificationAdapter {
	pub inner: Arc<dyn MetaAdapter>,
}

#[async_trait]
impl MetaAdapter for FailingNotificationAdapter {
	async fn read_profile(&self, user_id: &str) -> QbResult<ProfileView> {
		self.inner.read_profile(user_id).await
	}

	async fn create_profile(&self, profile: &ProfileInfo, is_admin: bool) -> QbResult<()> {
		self.inner.create_profile(profile, is_admin).await
	}

	async fn create_subject(&self, subject: &Subject) -> QbResult<()> {
		self.inner.create_subject(subject).await
	}

	async fn read_subject(&self, subject_id: &str) -> QbResult<Subject> {
		self.inner.read_subject(subject_id).await
	}

	async fn list_subject_likes(&self, subject_id: &str) -> QbResult<Vec<LikeView>> {
		self.inner.list_subject_likes(subject_id).await
	}

	async fn set_subject_like(
		&self,
		subject_id: &str,
		user: &ProfileInfo,
		liked: bool,
	) -> QbResult<LikeOutcome> {
		self.inner.set_subject_like(subject_id, user, liked).await
	}

	async fn toggle_subject_like(
		&self,
		subject_id: &str,
		user: &ProfileInfo,
	) -> QbResult<LikeOutcome> {
		self.inner.toggle_subject_like(subject_id, user).await
	}

	async fn create_comment(&self, comment: &Comment) -> QbResult<()> {
		self.inner.create_comment(comment).await
	}

	async fn get_comment(
		&self,
		subject_id: &str,
		comment_id: &str,
	) -> QbResult<Option<CommentView>> {
		self.inner.get_comment(subject_id, comment_id).await
	}

	async fn list_comments(&self, subject_id: &str) -> QbResult<Vec<CommentView>> {
		self.inner.list_comments(subject_id).await
	}

	async fn delete_comments(
		&self,
		subject_id: &str,
		comment_ids: &[Box<str>],
	) -> QbResult<u64> {
		self.inner.delete_comments(subject_id, comment_ids).await
	}

	async fn set_comment_like(
		&self,
		subject_id: &str,
		comment_id: &str,
		user: &ProfileInfo,
		liked: bool,
	) -> QbResult<LikeOutcome> {
		self.inner.set_comment_like(subject_id, comment_id, user, liked).await
	}

	async fn toggle_comment_like(
		&self,
		subject_id: &str,
		comment_id: &str,
		user: &ProfileInfo,
	) -> QbResult<LikeOutcome> {
		self.inner.toggle_comment_like(subject_id, comment_id, user).await
	}

	async fn create_activity(&self, activity: &Activity) -> QbResult<()> {
		self.inner.create_activity(activity).await
	}

	async fn list_activities(&self, opts: &ListActivityOptions) -> QbResult<Vec<Activity>> {
		self.inner.list_activities(opts).await
	}

	async fn delete_activities_for_target(&self, target_id: &str) -> QbResult<u64> {
		self.inner.delete_activities_for_target(target_id).await
	}

	async fn create_notification(&self, _notification: &Notification) -> QbResult<()> {
		Err(Error::DbError)
	}

	async fn list_notifications(
		&self,
		recipient_id: &str,
		opts: &ListNotificationOptions,
	) -> QbResult<(Vec<Notification>, u64)> {
		self.inner.list_notifications(recipient_id, opts).await
	}

	async fn unread_notification_count(&self, recipient_id: &str) -> QbResult<u64> {
		self.inner.unread_notification_count(recipient_id).await
	}

	async fn mark_notification_read(
		&self,
		recipient_id: &str,
		notification_id: &str,
	) -> QbResult<Notification> {
		self.inner.mark_notification_read(recipient_id, notification_id).await
	}

	async fn mark_all_notifications_read(&self, recipient_id: &str) -> QbResult<u64> {
		self.inner.mark_all_notifications_read(recipient_id).await
	}

	async fn delete_notification(
		&self,
		recipient_id: &str,
		notification_id: &str,
	) -> QbResult<()> {
		self.inner.delete_notification(recipient_id, notification_id).await
	}

	async fn delete_all_notifications(&self, recipient_id: &str) -> QbResult<u64> {
		self.inner.delete_all_notifications(recipient_id).await
	}

	async fn delete_notifications_for_target(&self, target_id: &str) -> QbResult<u64> {
		self.inner.delete_notifications_for_target(target_id).await
	}
}
