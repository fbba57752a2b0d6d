//! Activity HTTP handlers

use axum::{
	Json,
	extract::{Query, State},
	http::StatusCode,
};

use quibble_core::extract::Auth;
use quibble_types::activity_types::{Activity, CreateActivity};
use quibble_types::meta_adapter::ListActivityOptions;
use quibble_types::types::ApiResponse;

use crate::prelude::*;
use crate::record;

const DEFAULT_FEED_SIZE: u32 = 50;
const MAX_FEED_SIZE: u32 = 200;

/// GET /api/activity
///
/// Reverse-chronological activity feed with optional type filter and
/// `before` cursor for older pages.
pub async fn get_activities(
	State(app): State<App>,
	Query(mut opts): Query<ListActivityOptions>,
) -> QbResult<(StatusCode, Json<ApiResponse<Vec<Activity>>>)> {
	let limit = opts.limit.unwrap_or(DEFAULT_FEED_SIZE).clamp(1, MAX_FEED_SIZE);
	opts.limit = Some(limit);

	let activities = app.meta_adapter.list_activities(&opts).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(activities))))
}

/// POST /api/activity
///
/// Records an activity on behalf of a collaborating service (new_review,
/// new_user, poll_vote) or the acting user. Regular users may only record
/// themselves as the actor.
pub async fn post_activity(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(input): Json<CreateActivity>,
) -> QbResult<(StatusCode, Json<ApiResponse<Activity>>)> {
	if !auth.is_admin && input.actor.user_id.as_ref() != auth.user_id.as_ref() {
		return Err(Error::PermissionDenied);
	}

	let activity = record::record_activity(&app, input).await?;

	Ok((StatusCode::CREATED, Json(ApiResponse::new(activity))))
}

// vim: ts=4
