//! Media cleanup adapter trait.
//!
//! The cascade deleter removes media attached to deleted comments through
//! this seam. Failures are logged by the caller and never block structural
//! deletion.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait MediaAdapter: Debug + Send + Sync {
	/// Remove stored media by its public URL. A missing file is not an error.
	async fn remove(&self, url: &str) -> QbResult<()>;
}

// vim: ts=4
