//! Subject types. A subject is the content item (review, news post, poll)
//! a comment thread or activity is attached to. The engine does not own the
//! full content of these items; it keeps the minimum needed to attach
//! comment trees, resolve like targets, and denormalize activity and
//! notification targets.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::activity_types::{ActivityType, TargetType};
use crate::types::{ProfileInfo, Timestamp};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
	Review,
	News,
	Poll,
}

impl SubjectKind {
	pub fn as_str(self) -> &'static str {
		match self {
			SubjectKind::Review => "review",
			SubjectKind::News => "news",
			SubjectKind::Poll => "poll",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"review" => Some(SubjectKind::Review),
			"news" => Some(SubjectKind::News),
			"poll" => Some(SubjectKind::Poll),
			_ => None,
		}
	}

	pub fn target_type(self) -> TargetType {
		match self {
			SubjectKind::Review => TargetType::Review,
			SubjectKind::News => TargetType::News,
			SubjectKind::Poll => TargetType::Poll,
		}
	}

	/// Activity type produced when this kind of subject is liked.
	/// Polls are votable, not likable.
	pub fn like_activity(self) -> Option<ActivityType> {
		match self {
			SubjectKind::Review => Some(ActivityType::ReviewLike),
			SubjectKind::News => Some(ActivityType::NewsLike),
			SubjectKind::Poll => None,
		}
	}
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Subject {
	#[serde(rename = "subjectId")]
	pub subject_id: Box<str>,
	#[serde(rename = "type")]
	pub typ: SubjectKind,
	/// Owner snapshot taken when the subject was registered
	pub owner: ProfileInfo,
	pub title: Box<str>,
	pub content: Option<Box<str>>,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

// vim: ts=4
