//! End-to-end tests for the comment tree, like reconciliation, cascade
//! deletion, and fan-out isolation, run against the SQLite adapter.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::*;

use quibble_activity::fanout::{self, FanoutEvent};
use quibble_comment::{like, store};
use quibble_meta_adapter_sqlite::MetaAdapterSqlite;
use quibble_types::activity_types::{ActivityType, TargetRef, TargetType};
use quibble_types::comment_types::{CreateComment, MediaRef, MediaType};
use quibble_types::error::Error;
use quibble_types::meta_adapter::MetaAdapter;
use quibble_types::notification_types::CreateNotification;

fn text_comment(text: &str, parent_id: Option<&str>) -> CreateComment {
	CreateComment { text: Some(text.into()), media: None, parent_id: parent_id.map(Into::into) }
}

#[tokio::test]
async fn test_comment_requires_text_or_media() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");
	seed_subject(&env.app, "s1", &alice).await;

	let input = CreateComment { text: Some("".into()), media: None, parent_id: None };
	let res = store::add_comment(&env.app, "s1", &alice, input).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));

	// Empty text with media is fine
	let input = CreateComment {
		text: Some("".into()),
		media: Some(MediaRef { url: "https://cdn.example.com/media/x.jpg".into(), typ: MediaType::Image }),
		parent_id: None,
	};
	let (_, comment, _) = store::add_comment(&env.app, "s1", &alice, input).await.unwrap();
	assert!(comment.media.is_some());
}

#[tokio::test]
async fn test_comment_on_unknown_subject_is_not_found() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");

	let res = store::add_comment(&env.app, "missing", &alice, text_comment("hi", None)).await;
	assert!(matches!(res, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_reply_parent_must_exist() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");
	seed_subject(&env.app, "s1", &alice).await;

	let res =
		store::add_comment(&env.app, "s1", &alice, text_comment("hi", Some("missing"))).await;
	assert!(matches!(res, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_tree_shape_and_count() {
	let env = build_app().await;
	let owner = auth("owner", "Owner");
	let alice = auth("alice", "Alice");
	let bob = auth("bob", "Bob");
	seed_subject(&env.app, "s1", &owner).await;

	let (_, a, _) = store::add_comment(&env.app, "s1", &alice, text_comment("root", None))
		.await
		.unwrap();
	let (_, b, parent_author) =
		store::add_comment(&env.app, "s1", &bob, text_comment("reply", Some(&a.comment_id)))
			.await
			.unwrap();
	assert_eq!(parent_author.unwrap().user_id.as_ref(), "alice");

	let doc = store::load_subject_with_comments(&env.app, "s1").await.unwrap();
	assert_eq!(doc.comment_count, 2);
	assert_eq!(doc.comments.len(), 1);
	assert_eq!(doc.comments[0].comment.comment_id, a.comment_id);
	assert_eq!(doc.comments[0].replies.len(), 1);
	assert_eq!(doc.comments[0].replies[0].comment.comment_id, b.comment_id);
}

#[tokio::test]
async fn test_add_reply_delete_root_cascade() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");
	let bob = auth("bob", "Bob");
	let carol = auth("carol", "Carol");
	seed_subject(&env.app, "s1", &alice).await;

	let (_, a, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("hi", None)).await.unwrap();
	let (_, b, _) =
		store::add_comment(&env.app, "s1", &bob, text_comment("reply", Some(&a.comment_id)))
			.await
			.unwrap();
	let (_, c, _) =
		store::add_comment(&env.app, "s1", &carol, text_comment("deeper", Some(&b.comment_id)))
			.await
			.unwrap();

	let result = store::delete_comment(&env.app, "s1", &a.comment_id, &alice).await.unwrap();

	let deleted: HashSet<&str> = result.deleted_ids.iter().map(AsRef::as_ref).collect();
	let expected: HashSet<&str> = [a.comment_id.as_ref(), b.comment_id.as_ref(), c.comment_id.as_ref()]
		.into_iter()
		.collect();
	assert_eq!(deleted, expected);

	// No survivors, and nothing references a deleted id
	let survivors = env.app.meta_adapter.list_comments("s1").await.unwrap();
	assert!(survivors.is_empty());
}

#[tokio::test]
async fn test_delete_subtree_leaves_siblings() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");
	seed_subject(&env.app, "s1", &alice).await;

	let (_, a, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("root", None)).await.unwrap();
	let (_, b, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("kept", Some(&a.comment_id)))
			.await
			.unwrap();
	let (_, c, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("gone", Some(&a.comment_id)))
			.await
			.unwrap();
	let (_, d, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("gone too", Some(&c.comment_id)))
			.await
			.unwrap();

	let result = store::delete_comment(&env.app, "s1", &c.comment_id, &alice).await.unwrap();
	assert_eq!(result.deleted_ids.len(), 2);

	let survivors = env.app.meta_adapter.list_comments("s1").await.unwrap();
	let surviving: HashSet<&str> = survivors.iter().map(|c| c.comment_id.as_ref()).collect();
	assert!(surviving.contains(a.comment_id.as_ref()));
	assert!(surviving.contains(b.comment_id.as_ref()));
	assert!(!surviving.contains(c.comment_id.as_ref()));
	assert!(!surviving.contains(d.comment_id.as_ref()));

	// Link repair: no survivor points at a deleted id
	for s in &survivors {
		if let Some(parent_id) = &s.parent_id {
			assert!(surviving.contains(parent_id.as_ref()));
		}
	}
}

#[tokio::test]
async fn test_delete_requires_author_or_admin() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");
	let mallory = auth("mallory", "Mallory");
	seed_subject(&env.app, "s1", &alice).await;

	let (_, a, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("hi", None)).await.unwrap();

	let res = store::delete_comment(&env.app, "s1", &a.comment_id, &mallory).await;
	assert!(matches!(res, Err(Error::PermissionDenied)));

	// Elevated privileges may remove someone else's comment
	let moderator = admin("mod", "Mod");
	store::delete_comment(&env.app, "s1", &a.comment_id, &moderator).await.unwrap();
}

#[tokio::test]
async fn test_like_toggle_round_trip() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");
	let bob = auth("bob", "Bob");
	seed_subject(&env.app, "s1", &alice).await;

	let (_, a, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("hi", None)).await.unwrap();

	let (_, _, first) =
		like::toggle_comment_like(&env.app, "s1", &a.comment_id, &bob).await.unwrap();
	assert!(first.liked && first.changed);
	assert_eq!(first.likes.len(), 1);
	assert_eq!(first.likes[0].user.user_id.as_ref(), "bob");

	let (_, _, second) =
		like::toggle_comment_like(&env.app, "s1", &a.comment_id, &bob).await.unwrap();
	assert!(!second.liked);
	assert!(second.likes.is_empty());
}

#[tokio::test]
async fn test_set_like_is_retry_safe() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");
	let bob = auth("bob", "Bob");
	seed_subject(&env.app, "s1", &alice).await;

	let (_, a, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("hi", None)).await.unwrap();

	let (_, _, first) =
		like::set_comment_like(&env.app, "s1", &a.comment_id, &bob, true).await.unwrap();
	assert!(first.liked && first.changed);

	// A retried request declares the same state and is a no-op
	let (_, _, retried) =
		like::set_comment_like(&env.app, "s1", &a.comment_id, &bob, true).await.unwrap();
	assert!(retried.liked && !retried.changed);
	assert_eq!(retried.likes.len(), 1);
}

#[tokio::test]
async fn test_poll_subjects_cannot_be_liked() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");

	let poll = quibble_types::subject_types::Subject {
		subject_id: "p1".into(),
		typ: quibble_types::subject_types::SubjectKind::Poll,
		owner: alice.profile(),
		title: "Best sauce?".into(),
		content: None,
		created_at: quibble_types::types::Timestamp::now(),
	};
	env.app.meta_adapter.create_subject(&poll).await.unwrap();

	let res = like::toggle_subject_like(&env.app, "p1", &alice).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_fanout_records_activity_and_notification() {
	let env = build_app().await;
	let owner = auth("owner", "Owner");
	let alice = auth("alice", "Alice");
	let bob = auth("bob", "Bob");
	seed_subject(&env.app, "s1", &owner).await;

	let (_, a, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("root", None)).await.unwrap();
	let (subject, reply, parent_author) =
		store::add_comment(&env.app, "s1", &bob, text_comment("reply", Some(&a.comment_id)))
			.await
			.unwrap();

	fanout::dispatch(&env.app, FanoutEvent::Comment { subject, comment: reply, parent_author })
		.await;

	let activities = env.app.meta_adapter.list_activities(&Default::default()).await.unwrap();
	assert_eq!(activities.len(), 1);
	assert_eq!(activities[0].typ, ActivityType::ReviewComment);
	assert_eq!(activities[0].actor.user_id.as_ref(), "bob");

	// The reply notifies the parent comment's author
	assert_eq!(env.app.meta_adapter.unread_notification_count("alice").await.unwrap(), 1);
	assert_eq!(env.app.meta_adapter.unread_notification_count("bob").await.unwrap(), 0);
}

#[tokio::test]
async fn test_fanout_isolation_on_notification_failure() {
	let dir = tempfile::tempdir().unwrap();
	let inner = Arc::new(MetaAdapterSqlite::new(dir.path().join("meta.db")).await.unwrap());
	let env = build_app_with(dir, Arc::new(FailingNotificationAdapter { inner }));

	let owner = auth("owner", "Owner");
	let alice = auth("alice", "Alice");
	let bob = auth("bob", "Bob");
	seed_subject(&env.app, "s1", &owner).await;

	// Primary write succeeds regardless of the broken notification store
	let (_, a, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("root", None)).await.unwrap();
	let (subject, reply, parent_author) =
		store::add_comment(&env.app, "s1", &bob, text_comment("reply", Some(&a.comment_id)))
			.await
			.unwrap();

	// Fan-out swallows the failure
	fanout::dispatch(
		&env.app,
		FanoutEvent::Comment { subject, comment: reply.clone(), parent_author },
	)
	.await;

	// The comment and the activity are durable; only the notification is lost
	let comments = env.app.meta_adapter.list_comments("s1").await.unwrap();
	assert_eq!(comments.len(), 2);

	let activities = env.app.meta_adapter.list_activities(&Default::default()).await.unwrap();
	assert_eq!(activities.len(), 1);

	let (items, total) = env
		.app
		.meta_adapter
		.list_notifications("alice", &Default::default())
		.await
		.unwrap();
	assert!(items.is_empty());
	assert_eq!(total, 0);

	// Like toggles keep working too
	let (_, _, outcome) =
		like::toggle_comment_like(&env.app, "s1", &reply.comment_id, &alice).await.unwrap();
	assert!(outcome.liked);
}

#[tokio::test]
async fn test_no_self_notification() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");

	let input = CreateNotification {
		typ: ActivityType::CommentLike,
		sender: alice.profile(),
		recipient: "alice".into(),
		target: TargetRef {
			typ: TargetType::Comment,
			id: "c1".into(),
			title: None,
			content: None,
			parent_id: None,
		},
	};

	let res = quibble_notify::create_notification(&env.app, input).await.unwrap();
	assert!(res.is_none());
	assert_eq!(env.app.meta_adapter.unread_notification_count("alice").await.unwrap(), 0);
}

#[tokio::test]
async fn test_unresolvable_notification_target_rejected() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");

	let input = CreateNotification {
		typ: ActivityType::CommentLike,
		sender: alice.profile(),
		recipient: "bob".into(),
		target: TargetRef {
			typ: TargetType::Comment,
			id: "".into(),
			title: None,
			content: None,
			parent_id: None,
		},
	};

	let res = quibble_notify::create_notification(&env.app, input).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_media_cleanup_on_cascade_delete() {
	let env = build_app().await;
	let alice = auth("alice", "Alice");
	seed_subject(&env.app, "s1", &alice).await;

	let media_path = env.app.opts.media_dir.join("pic1.jpg");
	std::fs::write(&media_path, b"jpeg").unwrap();

	let input = CreateComment {
		text: None,
		media: Some(MediaRef {
			url: "https://cdn.example.com/media/pic1.jpg".into(),
			typ: MediaType::Image,
		}),
		parent_id: None,
	};
	let (_, a, _) = store::add_comment(&env.app, "s1", &alice, input).await.unwrap();

	store::delete_comment(&env.app, "s1", &a.comment_id, &alice).await.unwrap();

	assert!(!media_path.exists());
	assert!(env.app.meta_adapter.list_comments("s1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_cascades_notifications_for_deleted_comments() {
	let env = build_app().await;
	let owner = auth("owner", "Owner");
	let alice = auth("alice", "Alice");
	let bob = auth("bob", "Bob");
	seed_subject(&env.app, "s1", &owner).await;

	let (_, a, _) =
		store::add_comment(&env.app, "s1", &alice, text_comment("root", None)).await.unwrap();

	// Bob likes Alice's comment; the notification targets the comment id
	let (subject, liked_comment, _outcome) =
		like::toggle_comment_like(&env.app, "s1", &a.comment_id, &bob).await.unwrap();
	fanout::dispatch(
		&env.app,
		FanoutEvent::CommentLike { actor: bob.profile(), subject, comment: liked_comment },
	)
	.await;
	assert_eq!(env.app.meta_adapter.unread_notification_count("alice").await.unwrap(), 1);

	store::delete_comment(&env.app, "s1", &a.comment_id, &alice).await.unwrap();

	assert_eq!(env.app.meta_adapter.unread_notification_count("alice").await.unwrap(), 0);
}
