//! Activity records (append-only)

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::utils::*;
use quibble::activity_types::{Activity, ActivityType, SubjectRef, TargetRef, TargetType};
use quibble::meta_adapter::ListActivityOptions;
use quibble::prelude::*;

fn map_activity_row(row: &SqliteRow) -> QbResult<Activity> {
	let typ_str: Box<str> = row.try_get("type").map_err(|_| Error::DbError)?;
	let typ = ActivityType::parse(&typ_str).ok_or(Error::DbError)?;

	let target_typ_str: Box<str> = row.try_get("target_type").map_err(|_| Error::DbError)?;
	let target_typ = TargetType::parse(&target_typ_str).ok_or(Error::DbError)?;

	let subject_user_id: Option<Box<str>> =
		row.try_get("subject_user_id").map_err(|_| Error::DbError)?;
	let subject = subject_user_id.map(|user_id| SubjectRef {
		user_id,
		name: row.try_get::<Option<Box<str>>, _>("subject_user_name").ok().flatten(),
	});

	let metadata_str: Option<Box<str>> = row.try_get("metadata").map_err(|_| Error::DbError)?;
	let metadata = match metadata_str {
		Some(s) => Some(serde_json::from_str(&s)?),
		None => None,
	};

	Ok(Activity {
		activity_id: row.try_get("activity_id").map_err(|_| Error::DbError)?,
		typ,
		actor: ProfileInfo {
			user_id: row.try_get("actor_id").map_err(|_| Error::DbError)?,
			name: row.try_get("actor_name").map_err(|_| Error::DbError)?,
			profile_pic: row.try_get("actor_profile_pic").map_err(|_| Error::DbError)?,
		},
		subject,
		target: TargetRef {
			typ: target_typ,
			id: row.try_get("target_id").map_err(|_| Error::DbError)?,
			title: row.try_get("target_title").map_err(|_| Error::DbError)?,
			content: row.try_get("target_content").map_err(|_| Error::DbError)?,
			parent_id: row.try_get("target_parent_id").map_err(|_| Error::DbError)?,
		},
		metadata,
		created_at: row.try_get("created_at").map(Timestamp).map_err(|_| Error::DbError)?,
	})
}

/// Persist an activity record
pub(crate) async fn create(db: &SqlitePool, activity: &Activity) -> QbResult<()> {
	sqlx::query(
		"INSERT INTO activities (activity_id, type, actor_id, actor_name, actor_profile_pic,
			subject_user_id, subject_user_name, target_type, target_id, target_title,
			target_content, target_parent_id, metadata, created_at)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(activity.activity_id.as_ref())
	.bind(activity.typ.as_str())
	.bind(activity.actor.user_id.as_ref())
	.bind(activity.actor.name.as_ref())
	.bind(activity.actor.profile_pic.as_deref())
	.bind(activity.subject.as_ref().map(|s| s.user_id.as_ref()))
	.bind(activity.subject.as_ref().and_then(|s| s.name.as_deref()))
	.bind(activity.target.typ.as_str())
	.bind(activity.target.id.as_ref())
	.bind(activity.target.title.as_deref())
	.bind(activity.target.content.as_deref())
	.bind(activity.target.parent_id.as_deref())
	.bind(activity.metadata.as_ref().map(ToString::to_string))
	.bind(activity.created_at.0)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}

/// List activities with filtering options, newest first
pub(crate) async fn list(db: &SqlitePool, opts: &ListActivityOptions) -> QbResult<Vec<Activity>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT activity_id, type, actor_id, actor_name, actor_profile_pic,
			subject_user_id, subject_user_name, target_type, target_id, target_title,
			target_content, target_parent_id, metadata, created_at
		FROM activities WHERE 1=1",
	);

	if let Some(typ) = &opts.typ {
		query.push(" AND type=").push_bind(typ.as_str());
	}
	if let Some(actor) = &opts.actor {
		query.push(" AND actor_id=").push_bind(actor.as_ref());
	}
	if let Some(before) = &opts.before {
		query.push(" AND created_at<").push_bind(before.0);
	}
	query.push(" ORDER BY created_at DESC, rowid DESC LIMIT ");
	query.push_bind(i64::from(opts.limit.unwrap_or(50)));

	let rows = query.build().fetch_all(db).await.map_err(db_err)?;

	let mut activities = Vec::with_capacity(rows.len());
	for row in &rows {
		activities.push(map_activity_row(row)?);
	}

	Ok(activities)
}

/// Delete all activities referencing a target (cascade cleanup)
pub(crate) async fn delete_for_target(db: &SqlitePool, target_id: &str) -> QbResult<u64> {
	let res = sqlx::query("DELETE FROM activities WHERE target_id=?")
		.bind(target_id)
		.execute(db)
		.await
		.map_err(db_err)?;

	Ok(res.rows_affected())
}
