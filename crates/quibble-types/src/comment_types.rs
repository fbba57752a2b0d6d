//! Comment-related types shared between server and adapters.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::subject_types::Subject;
use crate::types::{ProfileInfo, Timestamp};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
	Image,
	Video,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MediaRef {
	pub url: Box<str>,
	#[serde(rename = "type")]
	pub typ: MediaType,
}

/// Comment submission input. At least one of `text` and `media` must be
/// present; this is validated before anything is written.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreateComment {
	pub text: Option<Box<str>>,
	pub media: Option<MediaRef>,
	#[serde(rename = "parentId")]
	pub parent_id: Option<Box<str>>,
}

/// Stored comment record. Author fields are a denormalized snapshot taken
/// at creation time, not a live join.
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
pub struct Comment {
	#[serde(rename = "commentId")]
	pub comment_id: Box<str>,
	#[serde(rename = "subjectId")]
	pub subject_id: Box<str>,
	#[serde(rename = "parentId")]
	pub parent_id: Option<Box<str>>,
	pub author: ProfileInfo,
	pub text: Option<Box<str>>,
	pub media: Option<MediaRef>,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

/// One entry in a like-set, with the liker's display snapshot
#[derive(Clone, Debug, Serialize)]
pub struct LikeView {
	pub user: ProfileInfo,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

/// Comment as read back from storage, including its like-set
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
pub struct CommentView {
	#[serde(rename = "commentId")]
	pub comment_id: Box<str>,
	#[serde(rename = "subjectId")]
	pub subject_id: Box<str>,
	#[serde(rename = "parentId")]
	pub parent_id: Option<Box<str>>,
	pub author: ProfileInfo,
	pub text: Option<Box<str>>,
	pub media: Option<MediaRef>,
	pub likes: Vec<LikeView>,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

/// A comment with its nested replies, as produced by the tree builder
#[derive(Clone, Debug, Serialize)]
pub struct CommentNode {
	#[serde(flatten)]
	pub comment: CommentView,
	pub replies: Vec<CommentNode>,
}

/// The full parent document: subject, its like-set, and the comment forest.
/// Returned by reads and by like/comment mutations so clients can reconcile
/// optimistically mutated local copies against authoritative state.
#[derive(Clone, Debug, Serialize)]
pub struct SubjectWithComments {
	pub subject: Subject,
	pub likes: Vec<LikeView>,
	pub comments: Vec<CommentNode>,
	#[serde(rename = "commentCount")]
	pub comment_count: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct DeletionResult {
	#[serde(rename = "deletedIds")]
	pub deleted_ids: Vec<Box<str>>,
}

/// Authoritative result of a like-set mutation
#[derive(Clone, Debug)]
pub struct LikeOutcome {
	/// The new authoritative like-set
	pub likes: Vec<LikeView>,
	/// Whether the acting user is a member after the mutation
	pub liked: bool,
	/// Whether the mutation changed membership (idempotent retries report false)
	pub changed: bool,
}

// vim: ts=4
