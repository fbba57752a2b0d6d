//! Notification HTTP handlers

use axum::{
	Json,
	extract::{Path, Query, State},
	http::StatusCode,
};
use serde::Serialize;

use quibble_core::extract::Auth;
use quibble_types::meta_adapter::ListNotificationOptions;
use quibble_types::notification_types::{CreateNotification, Notification, NotificationList};
use quibble_types::types::{ApiResponse, Pagination};

use crate::dispatch;
use crate::prelude::*;

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

/// POST /api/notification
///
/// Dispatches a notification. Regular users may only send as themselves;
/// elevated users may dispatch on behalf of other senders (used by the
/// collaborating services that record new_review / poll_vote events).
pub async fn post_notification(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(input): Json<CreateNotification>,
) -> QbResult<(StatusCode, Json<ApiResponse<Option<Notification>>>)> {
	if !auth.is_admin && input.sender.user_id.as_ref() != auth.user_id.as_ref() {
		return Err(Error::PermissionDenied);
	}

	let notification = dispatch::create_notification(&app, input).await?;

	let status =
		if notification.is_some() { StatusCode::CREATED } else { StatusCode::OK };
	Ok((status, Json(ApiResponse::new(notification))))
}

/// GET /api/notification
///
/// Paginated listing for the authenticated recipient, optionally filtered
/// by type. Every page also carries the current unread count so clients
/// can reconcile their badge state.
pub async fn get_notifications(
	State(app): State<App>,
	Auth(auth): Auth,
	Query(mut opts): Query<ListNotificationOptions>,
) -> QbResult<(StatusCode, Json<ApiResponse<NotificationList>>)> {
	let page = opts.page.unwrap_or(1).max(1);
	let limit = opts.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
	opts.page = Some(page);
	opts.limit = Some(limit);

	let (items, total) = app.meta_adapter.list_notifications(&auth.user_id, &opts).await?;
	let unread_count = app.meta_adapter.unread_notification_count(&auth.user_id).await?;

	let response = ApiResponse::new(NotificationList { items, unread_count })
		.with_pagination(Pagination::new(page, limit, total));

	Ok((StatusCode::OK, Json(response)))
}

#[derive(Debug, Serialize)]
pub struct UnreadCountView {
	pub unread: u64,
}

/// GET /api/notification/unread
pub async fn get_unread_count(
	State(app): State<App>,
	Auth(auth): Auth,
) -> QbResult<(StatusCode, Json<ApiResponse<UnreadCountView>>)> {
	let unread = app.meta_adapter.unread_notification_count(&auth.user_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(UnreadCountView { unread }))))
}

/// POST /api/notification/{notification_id}/read
pub async fn post_notification_read(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(notification_id): Path<String>,
) -> QbResult<(StatusCode, Json<ApiResponse<Notification>>)> {
	let notification =
		app.meta_adapter.mark_notification_read(&auth.user_id, &notification_id).await?;

	dispatch::signal_unread_count(&app, &auth.user_id).await;

	Ok((StatusCode::OK, Json(ApiResponse::new(notification))))
}

#[derive(Debug, Serialize)]
pub struct UpdatedCountView {
	pub updated: u64,
}

/// POST /api/notification/read-all
pub async fn post_notifications_read_all(
	State(app): State<App>,
	Auth(auth): Auth,
) -> QbResult<(StatusCode, Json<ApiResponse<UpdatedCountView>>)> {
	let updated = app.meta_adapter.mark_all_notifications_read(&auth.user_id).await?;
	info!(recipient = %auth.user_id, updated = %updated, "Marked all notifications read");

	dispatch::signal_unread_count(&app, &auth.user_id).await;

	Ok((StatusCode::OK, Json(ApiResponse::new(UpdatedCountView { updated }))))
}

/// DELETE /api/notification/{notification_id}
pub async fn delete_notification(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(notification_id): Path<String>,
) -> QbResult<StatusCode> {
	app.meta_adapter.delete_notification(&auth.user_id, &notification_id).await?;

	dispatch::signal_unread_count(&app, &auth.user_id).await;

	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct DeletedCountView {
	pub deleted: u64,
}

/// DELETE /api/notification
pub async fn delete_all_notifications(
	State(app): State<App>,
	Auth(auth): Auth,
) -> QbResult<(StatusCode, Json<ApiResponse<DeletedCountView>>)> {
	let deleted = app.meta_adapter.delete_all_notifications(&auth.user_id).await?;
	info!(recipient = %auth.user_id, deleted = %deleted, "Deleted all notifications");

	dispatch::signal_unread_count(&app, &auth.user_id).await;

	Ok((StatusCode::OK, Json(ApiResponse::new(DeletedCountView { deleted }))))
}

// vim: ts=4
