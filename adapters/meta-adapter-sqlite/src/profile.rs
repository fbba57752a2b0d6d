//! Profile lookup (user-identity collaborator seam)

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use quibble::meta_adapter::ProfileView;
use quibble::prelude::*;

/// Read a profile by user id
pub(crate) async fn read(db: &SqlitePool, user_id: &str) -> QbResult<ProfileView> {
	let res = sqlx::query(
		"SELECT user_id, name, profile_pic, is_admin, created_at FROM profiles WHERE user_id=?",
	)
	.bind(user_id)
	.fetch_one(db)
	.await;

	map_res(res, |row| {
		Ok(ProfileView {
			profile: ProfileInfo {
				user_id: row.try_get("user_id")?,
				name: row.try_get("name")?,
				profile_pic: row.try_get("profile_pic")?,
			},
			is_admin: row.try_get("is_admin")?,
			created_at: row.try_get("created_at").map(Timestamp)?,
		})
	})
}

/// Upsert a profile. The profiles table is the live identity lookup, so a
/// re-sync refreshes name and avatar; denormalized copies embedded in
/// comments and activities are unaffected.
pub(crate) async fn create(db: &SqlitePool, profile: &ProfileInfo, is_admin: bool) -> QbResult<()> {
	sqlx::query(
		"INSERT INTO profiles (user_id, name, profile_pic, is_admin, created_at)
		VALUES (?, ?, ?, ?, ?)
		ON CONFLICT(user_id) DO UPDATE SET name=excluded.name,
			profile_pic=excluded.profile_pic, is_admin=excluded.is_admin",
	)
	.bind(profile.user_id.as_ref())
	.bind(profile.name.as_ref())
	.bind(profile.profile_pic.as_deref())
	.bind(is_admin)
	.bind(Timestamp::now().0)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}
