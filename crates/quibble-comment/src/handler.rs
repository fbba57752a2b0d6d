//! Subject and comment HTTP handlers
//!
//! Each mutating handler follows the same shape: perform the primary write,
//! spawn fan-out for it (detached - a failed or slow secondary effect never
//! surfaces here), then respond with the updated authoritative state.

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::Deserialize;

use quibble_activity::fanout::{self, FanoutEvent};
use quibble_core::extract::Auth;
use quibble_types::comment_types::{
	CommentView, CreateComment, DeletionResult, SubjectWithComments,
};
use quibble_types::subject_types::{Subject, SubjectKind};
use quibble_types::types::ApiResponse;
use quibble_types::utils::random_id;

use crate::prelude::*;
use crate::{like, store};

/// Request body for registering a subject
#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
	#[serde(rename = "type")]
	pub typ: SubjectKind,
	pub title: Box<str>,
	pub content: Option<Box<str>>,
	/// Optional collaborator-supplied id (e.g. the review id from the
	/// content service); generated when absent
	#[serde(rename = "subjectId")]
	pub subject_id: Option<Box<str>>,
}

/// POST /api/subject
///
/// Registers a content item so comment threads and likes can attach to it.
/// This is the seam towards the content-item store, which owns the actual
/// review/news/poll data.
pub async fn post_subject(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreateSubjectRequest>,
) -> QbResult<(StatusCode, Json<ApiResponse<Subject>>)> {
	let subject = Subject {
		subject_id: match req.subject_id {
			Some(id) if !id.is_empty() => id,
			_ => random_id()?.into_boxed_str(),
		},
		typ: req.typ,
		owner: auth.profile(),
		title: req.title,
		content: req.content,
		created_at: Timestamp::now(),
	};

	app.meta_adapter.create_subject(&subject).await?;
	info!(subject_id = %subject.subject_id, typ = ?subject.typ, "Subject registered");

	Ok((StatusCode::CREATED, Json(ApiResponse::new(subject))))
}

/// GET /api/subject/{subject_id}/comment
///
/// The ordered comment forest, nested under the subject document. Reads
/// operate on a snapshot; building the tree never mutates stored state.
pub async fn get_comment_tree(
	State(app): State<App>,
	Path(subject_id): Path<String>,
) -> QbResult<(StatusCode, Json<ApiResponse<SubjectWithComments>>)> {
	let doc = store::load_subject_with_comments(&app, &subject_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(doc))))
}

/// POST /api/subject/{subject_id}/comment
pub async fn post_comment(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(subject_id): Path<String>,
	Json(input): Json<CreateComment>,
) -> QbResult<(StatusCode, Json<ApiResponse<CommentView>>)> {
	let (subject, comment, parent_author) =
		store::add_comment(&app, &subject_id, &auth, input).await?;

	fanout::spawn_dispatch(
		&app,
		FanoutEvent::Comment { subject, comment: comment.clone(), parent_author },
	);

	Ok((StatusCode::CREATED, Json(ApiResponse::new(comment))))
}

/// POST /api/subject/{subject_id}/comment/{comment_id}/like
///
/// Toggle endpoint: the server decides the direction from current
/// membership. Responds with the full updated parent document so clients
/// can reconcile optimistically-mutated local copies.
pub async fn post_comment_like(
	State(app): State<App>,
	Auth(auth): Auth,
	Path((subject_id, comment_id)): Path<(String, String)>,
) -> QbResult<(StatusCode, Json<ApiResponse<SubjectWithComments>>)> {
	let (subject, comment, outcome) =
		like::toggle_comment_like(&app, &subject_id, &comment_id, &auth).await?;

	// Only the none → liked transition produces activity and notification
	if outcome.liked && outcome.changed {
		fanout::spawn_dispatch(
			&app,
			FanoutEvent::CommentLike { actor: auth.profile(), subject, comment },
		);
	}

	let doc = store::load_subject_with_comments(&app, &subject_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(doc))))
}

/// Request body for the idempotent like primitive
#[derive(Debug, Deserialize)]
pub struct SetLikeRequest {
	pub liked: bool,
}

/// PUT /api/subject/{subject_id}/comment/{comment_id}/like
///
/// Declares the desired like state instead of flipping it; safe to retry
/// on timeout. Preferred over the toggle endpoint.
pub async fn put_comment_like(
	State(app): State<App>,
	Auth(auth): Auth,
	Path((subject_id, comment_id)): Path<(String, String)>,
	Json(req): Json<SetLikeRequest>,
) -> QbResult<(StatusCode, Json<ApiResponse<SubjectWithComments>>)> {
	let (subject, comment, outcome) =
		like::set_comment_like(&app, &subject_id, &comment_id, &auth, req.liked).await?;

	if outcome.liked && outcome.changed {
		fanout::spawn_dispatch(
			&app,
			FanoutEvent::CommentLike { actor: auth.profile(), subject, comment },
		);
	}

	let doc = store::load_subject_with_comments(&app, &subject_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(doc))))
}

/// POST /api/subject/{subject_id}/like
pub async fn post_subject_like(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(subject_id): Path<String>,
) -> QbResult<(StatusCode, Json<ApiResponse<SubjectWithComments>>)> {
	let (subject, outcome) = like::toggle_subject_like(&app, &subject_id, &auth).await?;

	if outcome.liked && outcome.changed {
		fanout::spawn_dispatch(&app, FanoutEvent::SubjectLike { actor: auth.profile(), subject });
	}

	let doc = store::load_subject_with_comments(&app, &subject_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(doc))))
}

/// DELETE /api/subject/{subject_id}/comment/{comment_id}
pub async fn delete_comment(
	State(app): State<App>,
	Auth(auth): Auth,
	Path((subject_id, comment_id)): Path<(String, String)>,
) -> QbResult<(StatusCode, Json<ApiResponse<DeletionResult>>)> {
	let result = store::delete_comment(&app, &subject_id, &comment_id, &auth).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(result))))
}

// vim: ts=4
