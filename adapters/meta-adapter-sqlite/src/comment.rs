//! Comment records and comment like-sets

use std::collections::HashMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::utils::*;
use quibble::comment_types::{Comment, CommentView, LikeOutcome, LikeView, MediaRef, MediaType};
use quibble::prelude::*;

fn map_comment_row(row: &SqliteRow) -> Result<CommentView, sqlx::Error> {
	let media_url: Option<Box<str>> = row.try_get("media_url")?;
	let media = match media_url {
		Some(url) => {
			let typ: Option<&str> = row.try_get("media_type")?;
			let typ = match typ {
				Some("video") => MediaType::Video,
				_ => MediaType::Image,
			};
			Some(MediaRef { url, typ })
		}
		None => None,
	};

	Ok(CommentView {
		comment_id: row.try_get("comment_id")?,
		subject_id: row.try_get("subject_id")?,
		parent_id: row.try_get("parent_id")?,
		author: ProfileInfo {
			user_id: row.try_get("author_id")?,
			name: row.try_get("author_name")?,
			profile_pic: row.try_get("author_profile_pic")?,
		},
		text: row.try_get("text")?,
		media,
		likes: Vec::new(),
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

/// Create a comment record
pub(crate) async fn create(db: &SqlitePool, comment: &Comment) -> QbResult<()> {
	sqlx::query(
		"INSERT INTO comments (comment_id, subject_id, parent_id, author_id, author_name,
			author_profile_pic, text, media_url, media_type, created_at)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(comment.comment_id.as_ref())
	.bind(comment.subject_id.as_ref())
	.bind(comment.parent_id.as_deref())
	.bind(comment.author.user_id.as_ref())
	.bind(comment.author.name.as_ref())
	.bind(comment.author.profile_pic.as_deref())
	.bind(comment.text.as_deref())
	.bind(comment.media.as_ref().map(|m| m.url.as_ref()))
	.bind(comment.media.as_ref().map(|m| match m.typ {
		MediaType::Image => "image",
		MediaType::Video => "video",
	}))
	.bind(comment.created_at.0)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}

/// Get a single comment with its like-set
pub(crate) async fn get(
	db: &SqlitePool,
	subject_id: &str,
	comment_id: &str,
) -> QbResult<Option<CommentView>> {
	let res = sqlx::query(
		"SELECT comment_id, subject_id, parent_id, author_id, author_name, author_profile_pic,
			text, media_url, media_type, created_at
		FROM comments WHERE subject_id=? AND comment_id=?",
	)
	.bind(subject_id)
	.bind(comment_id)
	.fetch_optional(db)
	.await
	.map_err(db_err)?;

	match res {
		Some(row) => {
			let mut view =
				map_comment_row(&row).inspect_err(inspect).map_err(|_| Error::DbError)?;

			let like_rows = sqlx::query(
				"SELECT user_id, user_name, user_profile_pic, created_at
				FROM comment_likes WHERE comment_id=? ORDER BY rowid",
			)
			.bind(comment_id)
			.fetch_all(db)
			.await
			.map_err(db_err)?;
			view.likes = collect_res(like_rows.iter().map(map_like_row))?;

			Ok(Some(view))
		}
		None => Ok(None),
	}
}

/// List all comments of a subject in insertion order, like-sets included
pub(crate) async fn list(db: &SqlitePool, subject_id: &str) -> QbResult<Vec<CommentView>> {
	let rows = sqlx::query(
		"SELECT comment_id, subject_id, parent_id, author_id, author_name, author_profile_pic,
			text, media_url, media_type, created_at
		FROM comments WHERE subject_id=? ORDER BY rowid",
	)
	.bind(subject_id)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	let like_rows = sqlx::query(
		"SELECT comment_id, user_id, user_name, user_profile_pic, created_at
		FROM comment_likes WHERE subject_id=? ORDER BY rowid",
	)
	.bind(subject_id)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	let mut likes_by_comment: HashMap<Box<str>, Vec<LikeView>> = HashMap::new();
	for row in &like_rows {
		let comment_id: Box<str> = row.try_get("comment_id").map_err(|_| Error::DbError)?;
		let like = map_like_row(row).inspect_err(inspect).map_err(|_| Error::DbError)?;
		likes_by_comment.entry(comment_id).or_default().push(like);
	}

	let mut comments = Vec::with_capacity(rows.len());
	for row in &rows {
		let mut view = map_comment_row(row).inspect_err(inspect).map_err(|_| Error::DbError)?;
		if let Some(likes) = likes_by_comment.remove(view.comment_id.as_ref()) {
			view.likes = likes;
		}
		comments.push(view);
	}

	Ok(comments)
}

/// Delete comments and their like-sets in one transaction.
/// Returns the number of comment records removed.
pub(crate) async fn delete_many(
	db: &SqlitePool,
	subject_id: &str,
	comment_ids: &[Box<str>],
) -> QbResult<u64> {
	if comment_ids.is_empty() {
		return Ok(0);
	}

	let mut tx = db.begin().await.map_err(db_err)?;

	let mut query =
		sqlx::QueryBuilder::new("DELETE FROM comment_likes WHERE subject_id=");
	query.push_bind(subject_id).push(" AND comment_id IN ");
	query = push_in(query, comment_ids);
	query.build().execute(&mut *tx).await.map_err(db_err)?;

	let mut query = sqlx::QueryBuilder::new("DELETE FROM comments WHERE subject_id=");
	query.push_bind(subject_id).push(" AND comment_id IN ");
	query = push_in(query, comment_ids);
	let removed = query.build().execute(&mut *tx).await.map_err(db_err)?.rows_affected();

	tx.commit().await.map_err(db_err)?;

	Ok(removed)
}

async fn fetch_likes(
	conn: &mut sqlx::SqliteConnection,
	comment_id: &str,
) -> QbResult<Vec<LikeView>> {
	let rows = sqlx::query(
		"SELECT user_id, user_name, user_profile_pic, created_at
		FROM comment_likes WHERE comment_id=? ORDER BY rowid",
	)
	.bind(comment_id)
	.fetch_all(conn)
	.await
	.map_err(db_err)?;

	collect_res(rows.iter().map(map_like_row))
}

/// Set like membership to a declared state; idempotent
pub(crate) async fn set_like(
	db: &SqlitePool,
	subject_id: &str,
	comment_id: &str,
	user: &ProfileInfo,
	liked: bool,
) -> QbResult<LikeOutcome> {
	let mut tx = db.begin().await.map_err(db_err)?;

	let exists = sqlx::query("SELECT 1 FROM comments WHERE subject_id=? AND comment_id=?")
		.bind(subject_id)
		.bind(comment_id)
		.fetch_optional(&mut *tx)
		.await
		.map_err(db_err)?;
	if exists.is_none() {
		return Err(Error::NotFound);
	}

	let changed = if liked {
		sqlx::query(
			"INSERT OR IGNORE INTO comment_likes
				(subject_id, comment_id, user_id, user_name, user_profile_pic, created_at)
			VALUES (?, ?, ?, ?, ?, ?)",
		)
		.bind(subject_id)
		.bind(comment_id)
		.bind(user.user_id.as_ref())
		.bind(user.name.as_ref())
		.bind(user.profile_pic.as_deref())
		.bind(Timestamp::now().0)
		.execute(&mut *tx)
		.await
		.map_err(db_err)?
		.rows_affected() > 0
	} else {
		sqlx::query("DELETE FROM comment_likes WHERE comment_id=? AND user_id=?")
			.bind(comment_id)
			.bind(user.user_id.as_ref())
			.execute(&mut *tx)
			.await
			.map_err(db_err)?
			.rows_affected() > 0
	};

	let likes = fetch_likes(&mut *tx, comment_id).await?;
	tx.commit().await.map_err(db_err)?;

	Ok(LikeOutcome { likes, liked, changed })
}

/// Flip like membership; the direction is decided inside the transaction,
/// so concurrent toggles for the same user serialize and cannot
/// double-apply
pub(crate) async fn toggle_like(
	db: &SqlitePool,
	subject_id: &str,
	comment_id: &str,
	user: &ProfileInfo,
) -> QbResult<LikeOutcome> {
	let mut tx = db.begin().await.map_err(db_err)?;

	let exists = sqlx::query("SELECT 1 FROM comments WHERE subject_id=? AND comment_id=?")
		.bind(subject_id)
		.bind(comment_id)
		.fetch_optional(&mut *tx)
		.await
		.map_err(db_err)?;
	if exists.is_none() {
		return Err(Error::NotFound);
	}

	let removed = sqlx::query("DELETE FROM comment_likes WHERE comment_id=? AND user_id=?")
		.bind(comment_id)
		.bind(user.user_id.as_ref())
		.execute(&mut *tx)
		.await
		.map_err(db_err)?
		.rows_affected();

	let liked = if removed == 0 {
		sqlx::query(
			"INSERT INTO comment_likes
				(subject_id, comment_id, user_id, user_name, user_profile_pic, created_at)
			VALUES (?, ?, ?, ?, ?, ?)",
		)
		.bind(subject_id)
		.bind(comment_id)
		.bind(user.user_id.as_ref())
		.bind(user.name.as_ref())
		.bind(user.profile_pic.as_deref())
		.bind(Timestamp::now().0)
		.execute(&mut *tx)
		.await
		.map_err(db_err)?;
		true
	} else {
		false
	};

	let likes = fetch_likes(&mut *tx, comment_id).await?;
	tx.commit().await.map_err(db_err)?;

	Ok(LikeOutcome { likes, liked, changed: true })
}
