//! Database schema initialization

use sqlx::SqlitePool;

pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Profiles //
	//**********//
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS profiles (
		user_id text NOT NULL,
		name text NOT NULL,
		profile_pic text,
		is_admin boolean NOT NULL DEFAULT FALSE,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Subjects //
	//**********//
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS subjects (
		subject_id text NOT NULL,
		type text NOT NULL,			-- 'review', 'news', 'poll'
		owner_id text NOT NULL,
		owner_name text NOT NULL,
		owner_profile_pic text,
		title text NOT NULL,
		content text,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(subject_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS subject_likes (
		subject_id text NOT NULL,
		user_id text NOT NULL,
		user_name text NOT NULL,
		user_profile_pic text,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(subject_id, user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Comments //
	//**********//
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS comments (
		comment_id text NOT NULL,
		subject_id text NOT NULL,
		parent_id text,
		author_id text NOT NULL,
		author_name text NOT NULL,
		author_profile_pic text,
		text text,
		media_url text,
		media_type text,			-- 'image', 'video'
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(subject_id, comment_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_subject ON comments(subject_id)")
		.execute(&mut *tx)
		.await?;

	// Primary key enforces the at-most-one-like-per-user invariant
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS comment_likes (
		subject_id text NOT NULL,
		comment_id text NOT NULL,
		user_id text NOT NULL,
		user_name text NOT NULL,
		user_profile_pic text,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(comment_id, user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_comment_likes_subject ON comment_likes(subject_id)",
	)
	.execute(&mut *tx)
	.await?;

	// Activities //
	//************//
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS activities (
		activity_id text NOT NULL,
		type text NOT NULL,
		actor_id text NOT NULL,
		actor_name text NOT NULL,
		actor_profile_pic text,
		subject_user_id text,
		subject_user_name text,
		target_type text NOT NULL,
		target_id text NOT NULL,
		target_title text,
		target_content text,
		target_parent_id text,
		metadata json,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(activity_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_activities_created ON activities(created_at)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_activities_target ON activities(target_id)")
		.execute(&mut *tx)
		.await?;

	// Notifications //
	//***************//
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS notifications (
		notification_id text NOT NULL,
		type text NOT NULL,
		sender_id text NOT NULL,
		sender_name text NOT NULL,
		sender_profile_pic text,
		recipient_id text NOT NULL,
		target_type text NOT NULL,
		target_id text NOT NULL,
		target_title text,
		target_content text,
		target_parent_id text,
		is_read boolean NOT NULL DEFAULT FALSE,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(notification_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_notifications_recipient
		ON notifications(recipient_id, created_at)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_notifications_target ON notifications(target_id)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
