//! Comment lifecycle: creation and cascade deletion

use std::collections::HashMap;

use quibble_types::comment_types::{
	Comment, CommentView, CreateComment, DeletionResult, SubjectWithComments,
};
use quibble_types::subject_types::Subject;
use quibble_types::utils::random_id;

use crate::prelude::*;
use crate::tree;

/// Validate and persist a new comment under a subject.
///
/// Returns the subject and the parent comment's author alongside the
/// created comment so the caller can hand them to the fan-out coordinator
/// without re-fetching.
pub async fn add_comment(
	app: &App,
	subject_id: &str,
	author: &AuthCtx,
	input: CreateComment,
) -> QbResult<(Subject, CommentView, Option<ProfileInfo>)> {
	let has_text = input.text.as_deref().is_some_and(|t| !t.trim().is_empty());
	if !has_text && input.media.is_none() {
		return Err(Error::ValidationError("comment requires text or media".into()));
	}

	let subject = app.meta_adapter.read_subject(subject_id).await?;

	// A reply's parent must already exist under the same subject; this is
	// what keeps the tree acyclic by construction.
	let parent_author = match input.parent_id.as_deref() {
		Some(parent_id) => {
			let parent = app
				.meta_adapter
				.get_comment(subject_id, parent_id)
				.await?
				.ok_or(Error::NotFound)?;
			Some(parent.author)
		}
		None => None,
	};

	let comment = Comment {
		comment_id: random_id()?.into_boxed_str(),
		subject_id: subject_id.into(),
		parent_id: input.parent_id,
		author: author.profile(),
		text: input.text,
		media: input.media,
		created_at: Timestamp::now(),
	};

	app.meta_adapter.create_comment(&comment).await?;

	info!(
		comment_id = %comment.comment_id,
		subject_id = %subject_id,
		author = %comment.author.user_id,
		parent_id = ?comment.parent_id,
		"Comment created"
	);

	let view = CommentView {
		comment_id: comment.comment_id,
		subject_id: comment.subject_id,
		parent_id: comment.parent_id,
		author: comment.author,
		text: comment.text,
		media: comment.media,
		likes: Vec::new(),
		created_at: comment.created_at,
	};

	Ok((subject, view, parent_author))
}

/// Load the full parent document: subject, subject like-set, and the
/// ordered comment forest.
pub async fn load_subject_with_comments(
	app: &App,
	subject_id: &str,
) -> QbResult<SubjectWithComments> {
	let subject = app.meta_adapter.read_subject(subject_id).await?;
	let likes = app.meta_adapter.list_subject_likes(subject_id).await?;
	let comments = app.meta_adapter.list_comments(subject_id).await?;

	let comment_count = comments.len() as u32;
	let forest = tree::build_forest(comments);

	Ok(SubjectWithComments { subject, likes, comments: forest, comment_count })
}

/// Delete a comment together with all of its descendants.
///
/// The requester must be the comment's author or hold elevated privileges.
/// Media cleanup and dependent-record cleanup are best-effort; only the
/// structural delete itself can fail the operation.
pub async fn delete_comment(
	app: &App,
	subject_id: &str,
	comment_id: &str,
	requester: &AuthCtx,
) -> QbResult<DeletionResult> {
	let comments = app.meta_adapter.list_comments(subject_id).await?;
	let target = comments
		.iter()
		.find(|c| c.comment_id.as_ref() == comment_id)
		.ok_or(Error::NotFound)?;

	if target.author.user_id.as_ref() != requester.user_id.as_ref() && !requester.is_admin {
		return Err(Error::PermissionDenied);
	}

	let deleted_ids = collect_with_descendants(&comments, comment_id);

	// Media cleanup first; a missing or failing file never blocks the
	// structural delete.
	let by_id: HashMap<&str, &CommentView> =
		comments.iter().map(|c| (c.comment_id.as_ref(), c)).collect();
	for id in &deleted_ids {
		if let Some(media) = by_id.get(id.as_ref()).and_then(|c| c.media.as_ref()) {
			if let Err(err) = app.media_adapter.remove(&media.url).await {
				warn!(comment_id = %id, url = %media.url, error = %err, "Media cleanup failed, continuing");
			}
		}
	}

	let removed = app.meta_adapter.delete_comments(subject_id, &deleted_ids).await?;

	info!(
		subject_id = %subject_id,
		comment_id = %comment_id,
		removed = %removed,
		"Comment deleted with descendants"
	);

	// Cascade cleanup of dependent records, best-effort
	for id in &deleted_ids {
		if let Err(err) = app.meta_adapter.delete_notifications_for_target(id).await {
			warn!(comment_id = %id, error = %err, "Notification cascade cleanup failed");
		}
		if let Err(err) = app.meta_adapter.delete_activities_for_target(id).await {
			warn!(comment_id = %id, error = %err, "Activity cascade cleanup failed");
		}
	}

	Ok(DeletionResult { deleted_ids })
}

/// Resolve a comment id plus all of its descendants from the flat comment
/// set, via an id→children index built in one pass.
fn collect_with_descendants(comments: &[CommentView], root_id: &str) -> Vec<Box<str>> {
	let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
	for comment in comments {
		if let Some(parent_id) = comment.parent_id.as_deref() {
			children.entry(parent_id).or_default().push(comment.comment_id.as_ref());
		}
	}

	let mut ids: Vec<Box<str>> = vec![root_id.into()];
	let mut stack = vec![root_id];
	while let Some(id) = stack.pop() {
		if let Some(kids) = children.get(id) {
			for kid in kids {
				ids.push((*kid).into());
				stack.push(kid);
			}
		}
	}
	ids
}

#[cfg(test)]
mod tests {
	use super::*;
	use quibble_types::types::ProfileInfo;

	fn comment(id: &str, parent: Option<&str>) -> CommentView {
		CommentView {
			comment_id: id.into(),
			subject_id: "s1".into(),
			parent_id: parent.map(Into::into),
			author: ProfileInfo {
				user_id: "alice".into(),
				name: "Alice".into(),
				profile_pic: None,
			},
			text: Some("text".into()),
			media: None,
			likes: Vec::new(),
			created_at: Timestamp(1),
		}
	}

	fn sorted(mut ids: Vec<Box<str>>) -> Vec<Box<str>> {
		ids.sort();
		ids
	}

	#[test]
	fn test_collect_chain() {
		let comments =
			vec![comment("a", None), comment("b", Some("a")), comment("c", Some("b"))];

		let expected: Vec<Box<str>> = vec!["a".into(), "b".into(), "c".into()];
		assert_eq!(sorted(collect_with_descendants(&comments, "a")), expected);
	}

	#[test]
	fn test_collect_subtree_only() {
		let comments = vec![
			comment("a", None),
			comment("b", Some("a")),
			comment("c", Some("a")),
			comment("d", Some("c")),
			comment("x", None),
		];

		let expected: Vec<Box<str>> = vec!["c".into(), "d".into()];
		assert_eq!(sorted(collect_with_descendants(&comments, "c")), expected);
	}

	#[test]
	fn test_collect_leaf() {
		let comments = vec![comment("a", None), comment("b", Some("a"))];

		let expected: Vec<Box<str>> = vec!["b".into()];
		assert_eq!(collect_with_descendants(&comments, "b"), expected);
	}
}

// vim: ts=4
