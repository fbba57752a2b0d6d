//! Fan-out coordination
//!
//! Turns one committed primary action into its secondary effects: an
//! activity record, a derived notification (inside the recorder), and the
//! real-time signal (inside the dispatcher). The state machine per action:
//!
//! `PrimaryWriteCommitted → ActivityRecorded → NotificationDispatched → Acknowledged`
//!
//! The primary write happened before any of this runs; each later step is
//! attempted unconditionally and its failure only logs. Handlers spawn the
//! dispatch onto the runtime so a client disconnect after the primary write
//! cannot cancel it.

use quibble_types::activity_types::{
	ActivityType, CreateActivity, SubjectRef, TargetRef, TargetType,
};
use quibble_types::comment_types::CommentView;
use quibble_types::subject_types::Subject;
use quibble_types::utils::snippet;

use crate::prelude::*;
use crate::record;

const SNIPPET_CHARS: usize = 120;

/// A committed primary action, with the denormalized context the
/// secondary effects need
#[derive(Clone, Debug)]
pub enum FanoutEvent {
	/// New root comment or reply
	Comment {
		subject: Subject,
		comment: CommentView,
		/// Author of the parent comment when this is a reply; the affected
		/// user falls back to the subject owner for root comments
		parent_author: Option<ProfileInfo>,
	},
	/// A comment like-set gained a member
	CommentLike { actor: ProfileInfo, subject: Subject, comment: CommentView },
	/// A review or news like-set gained a member
	SubjectLike { actor: ProfileInfo, subject: Subject },
}

/// Dispatch fan-out in the background, detached from the request lifecycle
pub fn spawn_dispatch(app: &App, event: FanoutEvent) {
	let app = app.clone();
	tokio::spawn(async move {
		dispatch(&app, event).await;
	});
}

/// Run the fan-out steps for a committed primary action.
///
/// Infallible by design: every failure is logged and swallowed, because the
/// primary action is already durable and must not appear failed to its
/// caller.
pub async fn dispatch(app: &App, event: FanoutEvent) {
	let Some(input) = build_activity(&event) else {
		return;
	};

	match record::record_activity(app, input).await {
		Ok(activity) => {
			debug!(activity_id = %activity.activity_id, typ = %activity.typ, "Fan-out complete");
		}
		Err(err) => {
			warn!(error = %err, "Activity recording failed; primary action is already durable");
		}
	}
}

/// Map a primary action to its activity input.
///
/// Returns None for actions with no activity shape (e.g. likes on polls).
fn build_activity(event: &FanoutEvent) -> Option<CreateActivity> {
	match event {
		FanoutEvent::Comment { subject, comment, parent_author } => {
			let affected = parent_author.as_ref().unwrap_or(&subject.owner);

			let mut metadata = serde_json::json!({ "commentId": comment.comment_id });
			if let Some(parent_id) = &comment.parent_id {
				metadata["parentCommentId"] = serde_json::json!(parent_id);
			}

			Some(CreateActivity {
				typ: ActivityType::ReviewComment,
				actor: comment.author.clone(),
				subject: Some(SubjectRef {
					user_id: affected.user_id.clone(),
					name: Some(affected.name.clone()),
				}),
				target: TargetRef {
					typ: subject.typ.target_type(),
					id: subject.subject_id.clone(),
					title: Some(subject.title.clone()),
					content: comment.text.as_deref().map(|t| snippet(t, SNIPPET_CHARS)),
					parent_id: comment.parent_id.clone(),
				},
				metadata: Some(metadata),
			})
		}
		FanoutEvent::CommentLike { actor, subject, comment } => Some(CreateActivity {
			typ: ActivityType::CommentLike,
			actor: actor.clone(),
			subject: Some(SubjectRef {
				user_id: comment.author.user_id.clone(),
				name: Some(comment.author.name.clone()),
			}),
			target: TargetRef {
				typ: TargetType::Comment,
				id: comment.comment_id.clone(),
				title: Some(subject.title.clone()),
				content: comment.text.as_deref().map(|t| snippet(t, SNIPPET_CHARS)),
				parent_id: Some(subject.subject_id.clone()),
			},
			metadata: Some(serde_json::json!({ "commentId": comment.comment_id })),
		}),
		FanoutEvent::SubjectLike { actor, subject } => {
			let typ = subject.typ.like_activity()?;

			Some(CreateActivity {
				typ,
				actor: actor.clone(),
				subject: Some(SubjectRef {
					user_id: subject.owner.user_id.clone(),
					name: Some(subject.owner.name.clone()),
				}),
				target: TargetRef {
					typ: subject.typ.target_type(),
					id: subject.subject_id.clone(),
					title: Some(subject.title.clone()),
					content: subject.content.as_deref().map(|t| snippet(t, SNIPPET_CHARS)),
					parent_id: None,
				},
				metadata: None,
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use quibble_types::subject_types::SubjectKind;

	fn profile(user_id: &str, name: &str) -> ProfileInfo {
		ProfileInfo { user_id: user_id.into(), name: name.into(), profile_pic: None }
	}

	fn subject(kind: SubjectKind) -> Subject {
		Subject {
			subject_id: "s1".into(),
			typ: kind,
			owner: profile("owner", "Owner"),
			title: "Best brisket in town".into(),
			content: Some("Long review body".into()),
			created_at: Timestamp(1000),
		}
	}

	fn comment(author: ProfileInfo, parent_id: Option<&str>) -> CommentView {
		CommentView {
			comment_id: "c1".into(),
			subject_id: "s1".into(),
			parent_id: parent_id.map(Into::into),
			author,
			text: Some("nice".into()),
			media: None,
			likes: Vec::new(),
			created_at: Timestamp(1001),
		}
	}

	#[test]
	fn test_root_comment_targets_subject_owner() {
		let event = FanoutEvent::Comment {
			subject: subject(SubjectKind::Review),
			comment: comment(profile("alice", "Alice"), None),
			parent_author: None,
		};

		let input = build_activity(&event).unwrap();
		assert_eq!(input.typ, ActivityType::ReviewComment);
		assert_eq!(input.subject.unwrap().user_id.as_ref(), "owner");
		assert_eq!(input.target.typ, TargetType::Review);
	}

	#[test]
	fn test_reply_targets_parent_author() {
		let event = FanoutEvent::Comment {
			subject: subject(SubjectKind::Review),
			comment: comment(profile("bob", "Bob"), Some("c0")),
			parent_author: Some(profile("alice", "Alice")),
		};

		let input = build_activity(&event).unwrap();
		assert_eq!(input.subject.unwrap().user_id.as_ref(), "alice");
		let metadata = input.metadata.unwrap();
		assert_eq!(metadata["parentCommentId"], "c0");
	}

	#[test]
	fn test_news_like_maps_to_news_like_activity() {
		let event = FanoutEvent::SubjectLike {
			actor: profile("alice", "Alice"),
			subject: subject(SubjectKind::News),
		};

		let input = build_activity(&event).unwrap();
		assert_eq!(input.typ, ActivityType::NewsLike);
	}

	#[test]
	fn test_poll_like_produces_no_activity() {
		let event = FanoutEvent::SubjectLike {
			actor: profile("alice", "Alice"),
			subject: subject(SubjectKind::Poll),
		};

		assert!(build_activity(&event).is_none());
	}
}

// vim: ts=4
