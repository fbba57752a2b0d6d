//! Error taxonomy shared by every crate in the workspace.
//!
//! Errors raised before a primary write commits are returned to the caller;
//! errors raised by fan-out steps after the commit are logged by the caller
//! and never surfaced (see the fanout module in quibble-activity).

use axum::{Json, http::StatusCode, response::IntoResponse};

pub type QbResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Malformed input, surfaced before any side effect is performed
	ValidationError(String),
	/// Actor lacks rights for the requested mutation
	PermissionDenied,
	/// Subject/comment/notification id does not resolve
	NotFound,
	/// Storage-level contention on a primary write
	Conflict,
	DbError,
	Internal(String),

	// externals
	Io(std::io::Error),
	Json(serde_json::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Json(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::NotFound => write!(f, "not found"),
			Error::Conflict => write!(f, "conflict"),
			Error::DbError => write!(f, "database error"),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
			Error::Json(err) => write!(f, "json error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let (status, msg) = match &self {
			Error::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
			Error::PermissionDenied => (StatusCode::FORBIDDEN, "permission denied"),
			Error::NotFound => (StatusCode::NOT_FOUND, "not found"),
			Error::Conflict => (StatusCode::CONFLICT, "conflict"),
			_ => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
		};
		(status, Json(serde_json::json!({ "error": msg }))).into_response()
	}
}

// vim: ts=4
