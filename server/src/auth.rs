//! Identity resolution middleware
//!
//! Authentication mechanics live in an external collaborator; this
//! boundary only resolves the bearer user id through the profile lookup
//! and installs the resulting `AuthCtx` for the extractors.

use axum::{
	extract::{Request, State},
	http::header,
	middleware::Next,
	response::Response,
};

use quibble_core::extract::Auth;
use quibble_core::prelude::*;

fn bearer_user(req: &Request) -> Option<String> {
	let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
	value.strip_prefix("Bearer ").map(|s| s.trim().to_string())
}

async fn resolve(app: &App, user_id: &str) -> Option<AuthCtx> {
	match app.meta_adapter.read_profile(user_id).await {
		Ok(view) => Some(AuthCtx {
			user_id: view.profile.user_id,
			name: view.profile.name,
			profile_pic: view.profile.profile_pic,
			is_admin: view.is_admin,
		}),
		Err(err) => {
			debug!(user = %user_id, error = %err, "Identity lookup failed");
			None
		}
	}
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request,
	next: Next,
) -> Result<Response, Error> {
	let Some(user_id) = bearer_user(&req) else {
		return Err(Error::PermissionDenied);
	};
	let Some(ctx) = resolve(&app, &user_id).await else {
		return Err(Error::PermissionDenied);
	};

	req.extensions_mut().insert(Auth(ctx));
	Ok(next.run(req).await)
}

pub async fn optional_auth(State(app): State<App>, mut req: Request, next: Next) -> Response {
	if let Some(user_id) = bearer_user(&req) {
		if let Some(ctx) = resolve(&app, &user_id).await {
			req.extensions_mut().insert(Auth(ctx));
		}
	}
	next.run(req).await
}

// vim: ts=4
