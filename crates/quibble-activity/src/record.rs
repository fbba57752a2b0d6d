//! Activity recording

use quibble_types::activity_types::{Activity, CreateActivity};
use quibble_types::notification_types::CreateNotification;
use quibble_types::utils::random_id;

use crate::prelude::*;

/// Persist an immutable activity record and forward the derived
/// notification.
///
/// The notification forward is best-effort: its failure is caught and
/// logged here and never fails or rolls back the already-persisted
/// activity. The forward only happens when the activity names an affected
/// user other than the actor.
pub async fn record_activity(app: &App, input: CreateActivity) -> QbResult<Activity> {
	if input.target.id.is_empty() {
		return Err(Error::ValidationError("activity target is unresolvable".into()));
	}

	let activity = Activity {
		activity_id: random_id()?.into_boxed_str(),
		typ: input.typ,
		actor: input.actor,
		subject: input.subject,
		target: input.target,
		metadata: input.metadata,
		created_at: Timestamp::now(),
	};

	app.meta_adapter.create_activity(&activity).await?;

	info!(
		activity_id = %activity.activity_id,
		typ = %activity.typ,
		actor = %activity.actor.user_id,
		target = %activity.target.id,
		"Activity recorded"
	);

	if let Some(subject) = &activity.subject {
		if subject.user_id.as_ref() != activity.actor.user_id.as_ref() {
			let notification = CreateNotification {
				typ: activity.typ,
				sender: activity.actor.clone(),
				recipient: subject.user_id.clone(),
				target: activity.target.clone(),
			};

			if let Err(err) = quibble_notify::create_notification(app, notification).await {
				warn!(
					activity_id = %activity.activity_id,
					recipient = %subject.user_id,
					error = %err,
					"Notification dispatch failed; activity is already durable"
				);
			}
		}
	}

	Ok(activity)
}

// vim: ts=4
