//! Like reconciliation
//!
//! Membership in a like-set is reconciled by the storage layer inside one
//! transaction per mutation, so concurrent writers to the same like-set
//! serialize there and a user id can never appear twice.
//!
//! `set_*` is the retry-safe primitive: it declares the desired state and
//! is idempotent. `toggle_*` is kept as the compatibility operation - the
//! server decides the direction from current membership - and is therefore
//! not safe to blindly retry on timeout; clients are expected to prefer
//! `set_*` or guard toggles with an in-flight request check.

use quibble_types::comment_types::{CommentView, LikeOutcome};
use quibble_types::subject_types::Subject;

use crate::prelude::*;

/// Flip the acting user's membership in a comment's like-set
pub async fn toggle_comment_like(
	app: &App,
	subject_id: &str,
	comment_id: &str,
	user: &AuthCtx,
) -> QbResult<(Subject, CommentView, LikeOutcome)> {
	let subject = app.meta_adapter.read_subject(subject_id).await?;
	let comment = app
		.meta_adapter
		.get_comment(subject_id, comment_id)
		.await?
		.ok_or(Error::NotFound)?;

	let outcome =
		app.meta_adapter.toggle_comment_like(subject_id, comment_id, &user.profile()).await?;

	debug!(
		comment_id = %comment_id,
		user = %user.user_id,
		liked = %outcome.liked,
		"Comment like toggled"
	);

	Ok((subject, comment, outcome))
}

/// Set the acting user's membership in a comment's like-set; idempotent
pub async fn set_comment_like(
	app: &App,
	subject_id: &str,
	comment_id: &str,
	user: &AuthCtx,
	liked: bool,
) -> QbResult<(Subject, CommentView, LikeOutcome)> {
	let subject = app.meta_adapter.read_subject(subject_id).await?;
	let comment = app
		.meta_adapter
		.get_comment(subject_id, comment_id)
		.await?
		.ok_or(Error::NotFound)?;

	let outcome = app
		.meta_adapter
		.set_comment_like(subject_id, comment_id, &user.profile(), liked)
		.await?;

	Ok((subject, comment, outcome))
}

/// Flip the acting user's membership in a subject's like-set.
/// Reviews and news posts are likable; polls are not.
pub async fn toggle_subject_like(
	app: &App,
	subject_id: &str,
	user: &AuthCtx,
) -> QbResult<(Subject, LikeOutcome)> {
	let subject = app.meta_adapter.read_subject(subject_id).await?;
	if subject.typ.like_activity().is_none() {
		return Err(Error::ValidationError(format!(
			"{} subjects cannot be liked",
			subject.typ.as_str()
		)));
	}

	let outcome = app.meta_adapter.toggle_subject_like(subject_id, &user.profile()).await?;

	debug!(
		subject_id = %subject_id,
		user = %user.user_id,
		liked = %outcome.liked,
		"Subject like toggled"
	);

	Ok((subject, outcome))
}

// vim: ts=4
