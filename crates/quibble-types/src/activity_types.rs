//! Activity-related types shared between server and adapters.
//!
//! Activities are append-only records describing "who did what to whom".
//! They embed denormalized snapshots of the actor and the acted-upon target
//! so the feed renders without re-fetching the referenced entities. Target
//! references are weak: the target may be deleted later and readers must
//! tolerate a dangling id.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::types::{ProfileInfo, Timestamp};

/// Closed set of recordable activity types
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
	ReviewLike,
	CommentLike,
	ReviewComment,
	NewUser,
	NewReview,
	NewsLike,
	PollVote,
}

impl ActivityType {
	pub fn as_str(self) -> &'static str {
		match self {
			ActivityType::ReviewLike => "review_like",
			ActivityType::CommentLike => "comment_like",
			ActivityType::ReviewComment => "review_comment",
			ActivityType::NewUser => "new_user",
			ActivityType::NewReview => "new_review",
			ActivityType::NewsLike => "news_like",
			ActivityType::PollVote => "poll_vote",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"review_like" => Some(ActivityType::ReviewLike),
			"comment_like" => Some(ActivityType::CommentLike),
			"review_comment" => Some(ActivityType::ReviewComment),
			"new_user" => Some(ActivityType::NewUser),
			"new_review" => Some(ActivityType::NewReview),
			"news_like" => Some(ActivityType::NewsLike),
			"poll_vote" => Some(ActivityType::PollVote),
			_ => None,
		}
	}
}

impl std::fmt::Display for ActivityType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Kind of entity an activity or notification points at
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
	Review,
	News,
	Poll,
	Comment,
	User,
}

impl TargetType {
	pub fn as_str(self) -> &'static str {
		match self {
			TargetType::Review => "review",
			TargetType::News => "news",
			TargetType::Poll => "poll",
			TargetType::Comment => "comment",
			TargetType::User => "user",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"review" => Some(TargetType::Review),
			"news" => Some(TargetType::News),
			"poll" => Some(TargetType::Poll),
			"comment" => Some(TargetType::Comment),
			"user" => Some(TargetType::User),
			_ => None,
		}
	}
}

/// What was acted upon, denormalized for display without re-fetching
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TargetRef {
	#[serde(rename = "type")]
	pub typ: TargetType,
	pub id: Box<str>,
	/// Title snapshot of the containing subject
	pub title: Option<Box<str>>,
	/// Content snippet snapshot
	pub content: Option<Box<str>>,
	#[serde(rename = "parentId")]
	pub parent_id: Option<Box<str>>,
}

/// Who is affected by an activity (omitted when nobody naturally is)
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SubjectRef {
	#[serde(rename = "userId")]
	pub user_id: Box<str>,
	pub name: Option<Box<str>>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CreateActivity {
	#[serde(rename = "type")]
	pub typ: ActivityType,
	pub actor: ProfileInfo,
	pub subject: Option<SubjectRef>,
	pub target: TargetRef,
	/// Free-form per-type payload (rating, commentId, optionIndex, ...)
	pub metadata: Option<serde_json::Value>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
pub struct Activity {
	#[serde(rename = "activityId")]
	pub activity_id: Box<str>,
	#[serde(rename = "type")]
	pub typ: ActivityType,
	pub actor: ProfileInfo,
	pub subject: Option<SubjectRef>,
	pub target: TargetRef,
	pub metadata: Option<serde_json::Value>,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}


// vim: ts=4
