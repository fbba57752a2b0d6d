//! Utility functions

use crate::prelude::*;
use rand::RngExt;

pub const ID_LENGTH: usize = 24;
pub const SAFE: [char; 62] = [
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
	'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
	'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
	'V', 'W', 'X', 'Y', 'Z',
];

pub fn random_id() -> QbResult<String> {
	let mut rng = rand::rng();
	let mut result = String::with_capacity(ID_LENGTH);

	for _ in 0..ID_LENGTH {
		result.push(SAFE[rng.random_range(0..SAFE.len())]);
	}
	Ok(result)
}

/// Truncate text to a display snippet, respecting char boundaries.
///
/// Used for the denormalized content snapshots embedded in activity and
/// notification targets.
pub fn snippet(text: &str, max_chars: usize) -> Box<str> {
	if text.chars().count() <= max_chars {
		return text.into();
	}
	let truncated: String = text.chars().take(max_chars).collect();
	format!("{}…", truncated.trim_end()).into_boxed_str()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_random_id_length_and_charset() {
		let id = random_id().unwrap();
		assert_eq!(id.len(), ID_LENGTH);
		assert!(id.chars().all(|c| SAFE.contains(&c)));
	}

	#[test]
	fn test_snippet_short_text_unchanged() {
		assert_eq!(snippet("hello", 10).as_ref(), "hello");
	}

	#[test]
	fn test_snippet_truncates_with_ellipsis() {
		let s = snippet("a very long comment body", 6);
		assert_eq!(s.as_ref(), "a very…");
	}

	#[test]
	fn test_snippet_multibyte_boundary() {
		let s = snippet("áéíóúűő", 3);
		assert_eq!(s.as_ref(), "áéí…");
	}
}

// vim: ts=4
