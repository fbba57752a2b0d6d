//! Notification creation and real-time signaling

use quibble_core::ws_broadcast::BroadcastMessage;
use quibble_types::notification_types::{CreateNotification, Notification};
use quibble_types::utils::random_id;

use crate::prelude::*;

/// Create a notification record and signal the recipient.
///
/// Returns `Ok(None)` without persisting anything when the sender and the
/// recipient are the same user. Rejects inputs whose target id was never
/// populated upstream - persisting those would produce notifications that
/// cannot be rendered or resolved later.
pub async fn create_notification(
	app: &App,
	input: CreateNotification,
) -> QbResult<Option<Notification>> {
	if input.sender.user_id.as_ref() == input.recipient.as_ref() {
		debug!(recipient = %input.recipient, "Skipping self-notification");
		return Ok(None);
	}

	if input.target.id.is_empty() {
		return Err(Error::ValidationError("notification target is unresolvable".into()));
	}

	let notification = Notification {
		notification_id: random_id()?.into_boxed_str(),
		typ: input.typ,
		sender: input.sender,
		recipient: input.recipient,
		target: input.target,
		read: false,
		created_at: Timestamp::now(),
	};

	app.meta_adapter.create_notification(&notification).await?;

	info!(
		notification_id = %notification.notification_id,
		typ = %notification.typ,
		sender = %notification.sender.user_id,
		recipient = %notification.recipient,
		"Notification created"
	);

	signal_unread_count(app, &notification.recipient).await;

	Ok(Some(notification))
}

/// Push the recipient's current unread count over the real-time channel.
///
/// An offline recipient is a normal outcome. A failed count query only
/// logs; the notification itself is already durable.
pub async fn signal_unread_count(app: &App, recipient_id: &str) {
	match app.meta_adapter.unread_notification_count(recipient_id).await {
		Ok(unread) => {
			let msg = BroadcastMessage::new(
				"NOTIFICATION",
				serde_json::json!({ "unread": unread }),
				"system",
			);
			let result = app.broadcast.send_to_user(recipient_id, msg).await;
			debug!(recipient = %recipient_id, unread = %unread, result = ?result, "Unread count signaled");
		}
		Err(err) => {
			warn!(recipient = %recipient_id, error = %err, "Failed to read unread count for signal");
		}
	}
}

// vim: ts=4
