//! Subject records and subject like-sets

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use quibble::comment_types::{LikeOutcome, LikeView};
use quibble::prelude::*;
use quibble::subject_types::{Subject, SubjectKind};

/// Create a subject record
pub(crate) async fn create(db: &SqlitePool, subject: &Subject) -> QbResult<()> {
	sqlx::query(
		"INSERT INTO subjects (subject_id, type, owner_id, owner_name, owner_profile_pic,
			title, content, created_at)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(subject.subject_id.as_ref())
	.bind(subject.typ.as_str())
	.bind(subject.owner.user_id.as_ref())
	.bind(subject.owner.name.as_ref())
	.bind(subject.owner.profile_pic.as_deref())
	.bind(subject.title.as_ref())
	.bind(subject.content.as_deref())
	.bind(subject.created_at.0)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}

/// Read a subject by id
pub(crate) async fn read(db: &SqlitePool, subject_id: &str) -> QbResult<Subject> {
	let res = sqlx::query(
		"SELECT subject_id, type, owner_id, owner_name, owner_profile_pic, title, content,
			created_at
		FROM subjects WHERE subject_id=?",
	)
	.bind(subject_id)
	.fetch_one(db)
	.await;

	match res {
		Ok(row) => {
			let typ_str: Box<str> = row.try_get("type").map_err(|_| Error::DbError)?;
			let typ = SubjectKind::parse(&typ_str).ok_or(Error::DbError)?;
			Ok(Subject {
				subject_id: row.try_get("subject_id").map_err(|_| Error::DbError)?,
				typ,
				owner: ProfileInfo {
					user_id: row.try_get("owner_id").map_err(|_| Error::DbError)?,
					name: row.try_get("owner_name").map_err(|_| Error::DbError)?,
					profile_pic: row
						.try_get("owner_profile_pic")
						.map_err(|_| Error::DbError)?,
				},
				title: row.try_get("title").map_err(|_| Error::DbError)?,
				content: row.try_get("content").map_err(|_| Error::DbError)?,
				created_at: row.try_get("created_at").map(Timestamp).map_err(|_| Error::DbError)?,
			})
		}
		Err(err) => Err(db_err(err)),
	}
}

/// List a subject's like-set in insertion order
pub(crate) async fn list_likes(db: &SqlitePool, subject_id: &str) -> QbResult<Vec<LikeView>> {
	let rows = sqlx::query(
		"SELECT user_id, user_name, user_profile_pic, created_at
		FROM subject_likes WHERE subject_id=? ORDER BY rowid",
	)
	.bind(subject_id)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	collect_res(rows.iter().map(map_like_row))
}

async fn fetch_likes(
	conn: &mut sqlx::SqliteConnection,
	subject_id: &str,
) -> QbResult<Vec<LikeView>> {
	let rows = sqlx::query(
		"SELECT user_id, user_name, user_profile_pic, created_at
		FROM subject_likes WHERE subject_id=? ORDER BY rowid",
	)
	.bind(subject_id)
	.fetch_all(conn)
	.await
	.map_err(db_err)?;

	collect_res(rows.iter().map(map_like_row))
}

/// Set like membership to a declared state; idempotent
pub(crate) async fn set_like(
	db: &SqlitePool,
	subject_id: &str,
	user: &ProfileInfo,
	liked: bool,
) -> QbResult<LikeOutcome> {
	let mut tx = db.begin().await.map_err(db_err)?;

	let exists = sqlx::query("SELECT 1 FROM subjects WHERE subject_id=?")
		.bind(subject_id)
		.fetch_optional(&mut *tx)
		.await
		.map_err(db_err)?;
	if exists.is_none() {
		return Err(Error::NotFound);
	}

	let changed = if liked {
		sqlx::query(
			"INSERT OR IGNORE INTO subject_likes
				(subject_id, user_id, user_name, user_profile_pic, created_at)
			VALUES (?, ?, ?, ?, ?)",
		)
		.bind(subject_id)
		.bind(user.user_id.as_ref())
		.bind(user.name.as_ref())
		.bind(user.profile_pic.as_deref())
		.bind(Timestamp::now().0)
		.execute(&mut *tx)
		.await
		.map_err(db_err)?
		.rows_affected() > 0
	} else {
		sqlx::query("DELETE FROM subject_likes WHERE subject_id=? AND user_id=?")
			.bind(subject_id)
			.bind(user.user_id.as_ref())
			.execute(&mut *tx)
			.await
			.map_err(db_err)?
			.rows_affected() > 0
	};

	let likes = fetch_likes(&mut *tx, subject_id).await?;
	tx.commit().await.map_err(db_err)?;

	Ok(LikeOutcome { likes, liked, changed })
}

/// Flip like membership; the direction is decided inside the transaction
pub(crate) async fn toggle_like(
	db: &SqlitePool,
	subject_id: &str,
	user: &ProfileInfo,
) -> QbResult<LikeOutcome> {
	let mut tx = db.begin().await.map_err(db_err)?;

	let exists = sqlx::query("SELECT 1 FROM subjects WHERE subject_id=?")
		.bind(subject_id)
		.fetch_optional(&mut *tx)
		.await
		.map_err(db_err)?;
	if exists.is_none() {
		return Err(Error::NotFound);
	}

	let removed = sqlx::query("DELETE FROM subject_likes WHERE subject_id=? AND user_id=?")
		.bind(subject_id)
		.bind(user.user_id.as_ref())
		.execute(&mut *tx)
		.await
		.map_err(db_err)?
		.rows_affected();

	let liked = if removed == 0 {
		sqlx::query(
			"INSERT INTO subject_likes
				(subject_id, user_id, user_name, user_profile_pic, created_at)
			VALUES (?, ?, ?, ?, ?)",
		)
		.bind(subject_id)
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

	let likes = fetch_likes(&mut *tx, subject_id).await?;
	tx.commit().await.map_err(db_err)?;

	Ok(LikeOutcome { likes, liked, changed: true })
}
