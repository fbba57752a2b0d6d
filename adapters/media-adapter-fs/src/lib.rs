//! Filesystem media cleanup adapter.
//!
//! Maps a media URL to a file under the configured media root and removes
//! it. A file that is already gone is treated as success - the cascade
//! deleter must be able to proceed when media went missing earlier.

use async_trait::async_trait;
use std::path::PathBuf;

use quibble::media_adapter::MediaAdapter;
use quibble::prelude::*;

#[derive(Debug)]
pub struct MediaAdapterFs {
	root: PathBuf,
}

impl MediaAdapterFs {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Resolve a media URL to its file name under the media root.
	/// Only the final path segment is used; anything that could escape the
	/// root is rejected.
	fn resolve(&self, url: &str) -> QbResult<PathBuf> {
		let name = url.rsplit('/').next().unwrap_or(url);
		if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
			return Err(Error::ValidationError(format!("invalid media url: {}", url)));
		}
		Ok(self.root.join(name))
	}
}

#[async_trait]
impl MediaAdapter for MediaAdapterFs {
	async fn remove(&self, url: &str) -> QbResult<()> {
		let path = self.resolve(url)?;

		match tokio::fs::remove_file(&path).await {
			Ok(()) => {
				debug!(url = %url, path = %path.display(), "Media removed");
				Ok(())
			}
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
				debug!(url = %url, "Media already gone");
				Ok(())
			}
			Err(err) => Err(err.into()),
		}
	}
}


// vim: ts=4
