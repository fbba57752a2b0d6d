//! Notification-related types shared between server and adapters.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::activity_types::{ActivityType, TargetRef};
use crate::types::{ProfileInfo, Timestamp};

/// Input for the notification dispatcher. Creation is skipped entirely when
/// `sender.user_id == recipient`.
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CreateNotification {
	#[serde(rename = "type")]
	pub typ: ActivityType,
	pub sender: ProfileInfo,
	pub recipient: Box<str>,
	pub target: TargetRef,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
pub struct Notification {
	#[serde(rename = "notificationId")]
	pub notification_id: Box<str>,
	#[serde(rename = "type")]
	pub typ: ActivityType,
	pub sender: ProfileInfo,
	pub recipient: Box<str>,
	pub target: TargetRef,
	pub read: bool,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

/// Listing payload: one page of notifications plus the recipient's current
/// unread count (pagination metadata travels in the response envelope)
#[derive(Clone, Debug, Serialize)]
pub struct NotificationList {
	pub items: Vec<Notification>,
	#[serde(rename = "unreadCount")]
	pub unread_count: u64,
}

// vim: ts=4
