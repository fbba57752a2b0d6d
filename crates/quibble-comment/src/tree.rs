//! Display-tree building
//!
//! Pure transformation from the flat per-subject comment set into an
//! ordered forest. The input order is whatever the storage layer returned
//! (insertion order); the builder never mutates stored records, it only
//! moves them into fresh tree nodes.

use std::collections::{HashMap, HashSet};

use quibble_types::comment_types::{CommentNode, CommentView};

/// Build the ordered comment forest for one subject.
///
/// Comments are indexed by id in one pass, then each comment is attached
/// under its parent. A comment whose `parent_id` does not resolve to a
/// known id is surfaced as a root, never dropped - a deleted parent must
/// not hide surviving children. Every sibling list (including the root
/// list) is sorted by `created_at` ascending; equal timestamps keep their
/// input order (the sort is stable).
pub fn build_forest(comments: Vec<CommentView>) -> Vec<CommentNode> {
	let known: HashSet<Box<str>> = comments.iter().map(|c| c.comment_id.clone()).collect();

	let mut by_parent: HashMap<Box<str>, Vec<CommentView>> = HashMap::new();
	let mut roots: Vec<CommentView> = Vec::new();

	for comment in comments {
		match comment.parent_id.as_ref().filter(|p| known.contains(p.as_ref())) {
			Some(parent_id) => by_parent.entry(parent_id.clone()).or_default().push(comment),
			None => roots.push(comment),
		}
	}

	attach(roots, &mut by_parent)
}

fn attach(
	mut siblings: Vec<CommentView>,
	by_parent: &mut HashMap<Box<str>, Vec<CommentView>>,
) -> Vec<CommentNode> {
	siblings.sort_by_key(|c| c.created_at);

	siblings
		.into_iter()
		.map(|comment| {
			let children = by_parent.remove(comment.comment_id.as_ref()).unwrap_or_default();
			CommentNode { replies: attach(children, by_parent), comment }
		})
		.collect()
}


// vim: ts=4
