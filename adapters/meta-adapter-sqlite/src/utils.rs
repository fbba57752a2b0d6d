//! Shared utilities for the SQLite adapter
//!
//! Helper functions and error mapping used across all domain modules.

use quibble::prelude::*;
use sqlx::sqlite::SqliteRow;

/// Build an IN clause with parameterized values
pub(crate) fn push_in<'a>(
	mut query: sqlx::QueryBuilder<'a, sqlx::Sqlite>,
	values: &'a [impl AsRef<str>],
) -> sqlx::QueryBuilder<'a, sqlx::Sqlite> {
	query.push("(");
	for (i, value) in values.iter().enumerate() {
		if i > 0 {
			query.push(", ");
		}
		query.push_bind(value.as_ref());
	}
	query.push(")");
	query
}

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Translate an sqlx error into the engine taxonomy.
///
/// Unique-constraint violations and lock contention surface as `Conflict`
/// so callers can distinguish them from plain storage failures.
pub(crate) fn db_err(err: sqlx::Error) -> Error {
	inspect(&err);
	match &err {
		sqlx::Error::RowNotFound => Error::NotFound,
		sqlx::Error::Database(db) => {
			let msg = db.message();
			if msg.contains("UNIQUE constraint")
				|| msg.contains("database is locked")
				|| msg.contains("database is busy")
			{
				Error::Conflict
			} else {
				Error::DbError
			}
		}
		_ => Error::DbError,
	}
}

/// Map a single-row query result, translating SQL errors
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> QbResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(err) => Err(db_err(err)),
	}
}

/// Map a like-set row (shared by comment and subject likes)
pub(crate) fn map_like_row(
	row: &SqliteRow,
) -> Result<quibble::comment_types::LikeView, sqlx::Error> {
	use sqlx::Row;

	Ok(quibble::comment_types::LikeView {
		user: ProfileInfo {
			user_id: row.try_get("user_id")?,
			name: row.try_get("user_name")?,
			profile_pic: row.try_get("user_profile_pic")?,
		},
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

/// Collect an iterator of query results, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> QbResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}
