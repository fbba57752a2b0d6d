use axum::{
	Router, middleware,
	routing::{delete, get, post},
};

use quibble_core::app::App;

use crate::{auth, profile, websocket};

fn init_protected(state: App) -> Router<App> {
	Router::new()
		.route("/api/profile", post(profile::post_profile))
		.route("/api/subject", post(quibble_comment::handler::post_subject))
		.route("/api/subject/{subject_id}/like", post(quibble_comment::handler::post_subject_like))
		.route("/api/subject/{subject_id}/comment", post(quibble_comment::handler::post_comment))
		.route(
			"/api/subject/{subject_id}/comment/{comment_id}",
			delete(quibble_comment::handler::delete_comment),
		)
		.route(
			"/api/subject/{subject_id}/comment/{comment_id}/like",
			post(quibble_comment::handler::post_comment_like)
				.put(quibble_comment::handler::put_comment_like),
		)
		.route("/api/activity", post(quibble_activity::handler::post_activity))
		.route(
			"/api/notification",
			get(quibble_notify::handler::get_notifications)
				.post(quibble_notify::handler::post_notification)
				.delete(quibble_notify::handler::delete_all_notifications),
		)
		.route("/api/notification/unread", get(quibble_notify::handler::get_unread_count))
		.route(
			"/api/notification/read-all",
			post(quibble_notify::handler::post_notifications_read_all),
		)
		.route(
			"/api/notification/{notification_id}/read",
			post(quibble_notify::handler::post_notification_read),
		)
		.route(
			"/api/notification/{notification_id}",
			delete(quibble_notify::handler::delete_notification),
		)
		.layer(middleware::from_fn_with_state(state, auth::require_auth))
}

fn init_public(state: App) -> Router<App> {
	Router::new()
		.route(
			"/api/subject/{subject_id}/comment",
			get(quibble_comment::handler::get_comment_tree),
		)
		.route("/api/activity", get(quibble_activity::handler::get_activities))
		.route("/ws", get(websocket::get_ws))
		.route_layer(middleware::from_fn_with_state(state, auth::optional_auth))
}

pub fn init(state: App) -> Router {
	Router::new()
		.merge(init_public(state.clone()))
		.merge(init_protected(state.clone()))
		.with_state(state)
}

// vim: ts=4
