//! Common types used throughout the Quibble engine.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::time::SystemTime;

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
	/// Current time as epoch seconds
	pub fn now() -> Self {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(res.as_secs() as i64)
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::cmp::PartialEq for Timestamp {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl std::cmp::Eq for Timestamp {}

impl std::cmp::PartialOrd for Timestamp {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::cmp::Ord for Timestamp {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.0.cmp(&other.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

// ProfileInfo //
//*************//
/// Denormalized identity snapshot embedded in comments, activities, and
/// notifications. Captured at write time, not live-joined; it goes stale
/// when the user later changes their name or avatar.
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProfileInfo {
	#[serde(rename = "userId")]
	pub user_id: Box<str>,
	pub name: Box<str>,
	#[serde(rename = "profilePic")]
	pub profile_pic: Option<Box<str>>,
}

// AuthCtx //
//*********//
/// Resolved identity of the acting user, installed by the auth middleware.
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub user_id: Box<str>,
	pub name: Box<str>,
	pub profile_pic: Option<Box<str>>,
	pub is_admin: bool,
}

impl AuthCtx {
	/// Snapshot of the acting user for denormalized embedding
	pub fn profile(&self) -> ProfileInfo {
		ProfileInfo {
			user_id: self.user_id.clone(),
			name: self.name.clone(),
			profile_pic: self.profile_pic.clone(),
		}
	}
}

// ApiResponse //
//*************//
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Pagination {
	pub page: u32,
	pub limit: u32,
	pub total: u64,
	#[serde(rename = "hasMore")]
	pub has_more: bool,
}

impl Pagination {
	pub fn new(page: u32, limit: u32, total: u64) -> Self {
		let has_more = u64::from(page) * u64::from(limit) < total;
		Self { page, limit, total, has_more }
	}
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
pub struct ApiResponse<T> {
	pub data: T,
	pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data, pagination: None }
	}

	pub fn with_pagination(mut self, pagination: Pagination) -> Self {
		self.pagination = Some(pagination);
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_timestamp_ordering() {
		assert!(Timestamp(1) < Timestamp(2));
		assert_eq!(Timestamp(5), Timestamp(5));
	}

	#[test]
	fn test_pagination_has_more() {
		assert!(Pagination::new(1, 20, 21).has_more);
		assert!(!Pagination::new(1, 20, 20).has_more);
		assert!(!Pagination::new(2, 20, 21).has_more);
	}
}

// vim: ts=4
