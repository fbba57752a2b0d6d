//! Profile registration seam
//!
//! The engine consumes a user-identity lookup; this endpoint is how the
//! identity collaborator syncs profiles into it.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use quibble_core::extract::Auth;
use quibble_core::prelude::*;
use quibble_types::types::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
	#[serde(rename = "userId")]
	pub user_id: Box<str>,
	pub name: Box<str>,
	#[serde(rename = "profilePic")]
	pub profile_pic: Option<Box<str>>,
	#[serde(rename = "isAdmin", default)]
	pub is_admin: bool,
}

/// POST /api/profile - upsert a profile (admin only)
pub async fn post_profile(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreateProfileRequest>,
) -> QbResult<(StatusCode, Json<ApiResponse<ProfileInfo>>)> {
	if !auth.is_admin {
		return Err(Error::PermissionDenied);
	}

	if req.user_id.is_empty() || req.name.is_empty() {
		return Err(Error::ValidationError("userId and name are required".into()));
	}

	let profile = ProfileInfo {
		user_id: req.user_id,
		name: req.name,
		profile_pic: req.profile_pic,
	};
	app.meta_adapter.create_profile(&profile, req.is_admin).await?;

	info!(user = %profile.user_id, "Profile registered");

	Ok((StatusCode::CREATED, Json(ApiResponse::new(profile))))
}

// vim: ts=4
