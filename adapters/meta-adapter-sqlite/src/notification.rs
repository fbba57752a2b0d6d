//! Notification records

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::utils::*;
use quibble::activity_types::{ActivityType, TargetRef, TargetType};
use quibble::meta_adapter::ListNotificationOptions;
use quibble::notification_types::Notification;
use quibble::prelude::*;

const SELECT_FIELDS: &str = "notification_id, type, sender_id, sender_name, sender_profile_pic,
	recipient_id, target_type, target_id, target_title, target_content, target_parent_id,
	is_read, created_at";

fn map_notification_row(row: &SqliteRow) -> QbResult<Notification> {
	let typ_str: Box<str> = row.try_get("type").map_err(|_| Error::DbError)?;
	let typ = ActivityType::parse(&typ_str).ok_or(Error::DbError)?;

	let target_typ_str: Box<str> = row.try_get("target_type").map_err(|_| Error::DbError)?;
	let target_typ = TargetType::parse(&target_typ_str).ok_or(Error::DbError)?;

	Ok(Notification {
		notification_id: row.try_get("notification_id").map_err(|_| Error::DbError)?,
		typ,
		sender: ProfileInfo {
			user_id: row.try_get("sender_id").map_err(|_| Error::DbError)?,
			name: row.try_get("sender_name").map_err(|_| Error::DbError)?,
			profile_pic: row.try_get("sender_profile_pic").map_err(|_| Error::DbError)?,
		},
		recipient: row.try_get("recipient_id").map_err(|_| Error::DbError)?,
		target: TargetRef {
			typ: target_typ,
			id: row.try_get("target_id").map_err(|_| Error::DbError)?,
			title: row.try_get("target_title").map_err(|_| Error::DbError)?,
			content: row.try_get("target_content").map_err(|_| Error::DbError)?,
			parent_id: row.try_get("target_parent_id").map_err(|_| Error::DbError)?,
		},
		read: row.try_get("is_read").map_err(|_| Error::DbError)?,
		created_at: row.try_get("created_at").map(Timestamp).map_err(|_| Error::DbError)?,
	})
}

/// Persist a notification record
pub(crate) async fn create(db: &SqlitePool, notification: &Notification) -> QbResult<()> {
	sqlx::query(
		"INSERT INTO notifications (notification_id, type, sender_id, sender_name,
			sender_profile_pic, recipient_id, target_type, target_id, target_title,
			target_content, target_parent_id, is_read, created_at)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(notification.notification_id.as_ref())
	.bind(notification.typ.as_str())
	.bind(notification.sender.user_id.as_ref())
	.bind(notification.sender.name.as_ref())
	.bind(notification.sender.profile_pic.as_deref())
	.bind(notification.recipient.as_ref())
	.bind(notification.target.typ.as_str())
	.bind(notification.target.id.as_ref())
	.bind(notification.target.title.as_deref())
	.bind(notification.target.content.as_deref())
	.bind(notification.target.parent_id.as_deref())
	.bind(notification.read)
	.bind(notification.created_at.0)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}

/// One page of a recipient's notifications plus the total matching count
pub(crate) async fn list(
	db: &SqlitePool,
	recipient_id: &str,
	opts: &ListNotificationOptions,
) -> QbResult<(Vec<Notification>, u64)> {
	let page = opts.page.unwrap_or(1).max(1);
	let limit = opts.limit.unwrap_or(20);
	let offset = u64::from(page - 1) * u64::from(limit);

	let mut query = sqlx::QueryBuilder::new("SELECT ");
	query.push(SELECT_FIELDS).push(" FROM notifications WHERE recipient_id=");
	query.push_bind(recipient_id);
	if let Some(typ) = &opts.typ {
		query.push(" AND type=").push_bind(typ.as_str());
	}
	query.push(" ORDER BY created_at DESC, rowid DESC LIMIT ");
	query.push_bind(i64::from(limit));
	query.push(" OFFSET ");
	query.push_bind(offset as i64);

	let rows = query.build().fetch_all(db).await.map_err(db_err)?;

	let mut items = Vec::with_capacity(rows.len());
	for row in &rows {
		items.push(map_notification_row(row)?);
	}

	let mut count_query =
		sqlx::QueryBuilder::new("SELECT count(*) as total FROM notifications WHERE recipient_id=");
	count_query.push_bind(recipient_id);
	if let Some(typ) = &opts.typ {
		count_query.push(" AND type=").push_bind(typ.as_str());
	}
	let total: i64 = map_res(count_query.build().fetch_one(db).await, |row| row.try_get("total"))?;

	Ok((items, total as u64))
}

/// Count of unread notifications for a recipient
pub(crate) async fn unread_count(db: &SqlitePool, recipient_id: &str) -> QbResult<u64> {
	let res = sqlx::query(
		"SELECT count(*) as total FROM notifications WHERE recipient_id=? AND is_read=FALSE",
	)
	.bind(recipient_id)
	.fetch_one(db)
	.await;

	let total: i64 = map_res(res, |row| row.try_get("total"))?;
	Ok(total as u64)
}

/// Mark one notification read, scoped to its recipient
pub(crate) async fn mark_read(
	db: &SqlitePool,
	recipient_id: &str,
	notification_id: &str,
) -> QbResult<Notification> {
	let res = sqlx::query("UPDATE notifications SET is_read=TRUE WHERE notification_id=? AND recipient_id=?")
		.bind(notification_id)
		.bind(recipient_id)
		.execute(db)
		.await
		.map_err(db_err)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	let mut query = sqlx::QueryBuilder::new("SELECT ");
	query.push(SELECT_FIELDS).push(" FROM notifications WHERE notification_id=");
	query.push_bind(notification_id);

	let row = query.build().fetch_one(db).await.map_err(db_err)?;
	map_notification_row(&row)
}

/// Mark all of a recipient's notifications read
pub(crate) async fn mark_all_read(db: &SqlitePool, recipient_id: &str) -> QbResult<u64> {
	let res =
		sqlx::query("UPDATE notifications SET is_read=TRUE WHERE recipient_id=? AND is_read=FALSE")
			.bind(recipient_id)
			.execute(db)
			.await
			.map_err(db_err)?;

	Ok(res.rows_affected())
}

/// Delete one notification, scoped to its recipient
pub(crate) async fn delete(
	db: &SqlitePool,
	recipient_id: &str,
	notification_id: &str,
) -> QbResult<()> {
	let res = sqlx::query("DELETE FROM notifications WHERE notification_id=? AND recipient_id=?")
		.bind(notification_id)
		.bind(recipient_id)
		.execute(db)
		.await
		.map_err(db_err)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	Ok(())
}

/// Delete all notifications of a recipient
pub(crate) async fn delete_all(db: &SqlitePool, recipient_id: &str) -> QbResult<u64> {
	let res = sqlx::query("DELETE FROM notifications WHERE recipient_id=?")
		.bind(recipient_id)
		.execute(db)
		.await
		.map_err(db_err)?;

	Ok(res.rows_affected())
}

/// Delete all notifications referencing a target (cascade cleanup)
pub(crate) async fn delete_for_target(db: &SqlitePool, target_id: &str) -> QbResult<u64> {
	let res = sqlx::query("DELETE FROM notifications WHERE target_id=?")
		.bind(target_id)
		.execute(db)
		.await
		.map_err(db_err)?;

	Ok(res.rows_affected())
}
