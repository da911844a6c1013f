//! End-to-end feed session behavior over the in-memory gateway and the
//! realtime channel.

use artfeed::demo;
use artfeed::feed::{self, FeedItem, FeedSession};
use artfeed::gateway::{LocalGateway, StaticDirectory};
use artfeed::models::{Comment, FeedEvent, Post, Reaction, ReactionKind, User};

fn seeded_posts(count: usize) -> Vec<Post> {
    (0..count)
        .map(|i| {
            serde_json::from_str(&format!(
                r#"{{"id": "p{}", "author": "author{}", "content": "post {}", "created_at": {}}}"#,
                i,
                i % 3,
                i,
                10_000 - i as u64
            ))
            .unwrap()
        })
        .collect()
}

fn viewer() -> User {
    User::new("viewer", "Viewer")
}

#[tokio::test]
async fn pagination_walks_the_whole_backlog_once() {
    let gateway = LocalGateway::new(seeded_posts(12), demo::sample_ads());
    let mut session = FeedSession::new(gateway, viewer(), 5);

    session.refresh().await.unwrap();
    assert_eq!(session.posts().len(), 5);
    assert!(session.has_more());

    assert!(session.load_more().await.unwrap());
    assert_eq!(session.posts().len(), 10);

    assert!(session.load_more().await.unwrap());
    assert_eq!(session.posts().len(), 12);
    // A short page is not the end; only an empty one is.
    assert!(session.has_more());

    assert!(session.load_more().await.unwrap());
    assert!(!session.has_more());

    // Terminal state: further triggers don't fetch.
    assert!(!session.load_more().await.unwrap());
    assert_eq!(session.posts().len(), 12);

    // No duplicates across pages.
    let mut ids: Vec<&str> = session.posts().iter().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 12);
}

#[tokio::test]
async fn timeline_interleaves_ads_every_fifth_post() {
    let gateway = LocalGateway::new(seeded_posts(12), demo::sample_ads());
    let mut session = FeedSession::new(gateway, viewer(), 12);
    session.refresh().await.unwrap();

    let timeline = session.timeline();
    // 12 posts + ad slots before post indices 5 and 10
    assert_eq!(timeline.len(), 14);

    let ad_rows: Vec<usize> = timeline
        .iter()
        .enumerate()
        .filter_map(|(row, item)| match item {
            FeedItem::Ad { .. } => Some(row),
            FeedItem::Post(_) => None,
        })
        .collect();
    assert_eq!(ad_rows, vec![5, 11]);

    let slots: Vec<usize> = timeline
        .iter()
        .filter_map(|item| match item {
            FeedItem::Ad { slot, .. } => Some(*slot),
            FeedItem::Post(_) => None,
        })
        .collect();
    assert_eq!(slots, vec![5, 10]);
}

#[tokio::test]
async fn realtime_events_merge_with_echo_suppression() {
    let gateway = LocalGateway::new(seeded_posts(6), vec![]);
    let mut session = FeedSession::new(gateway, viewer(), 10);
    session.refresh().await.unwrap();

    let (bus, subscription) = feed::channel();
    session.subscribe(subscription);
    let directory = StaticDirectory::new(vec![User::new("author1", "Nadia")]);

    // A third party comments, the viewer's echo arrives, a third party reacts.
    bus.publish(FeedEvent::Comment {
        post_id: "p0".to_string(),
        comment: Comment {
            id: "c-live".to_string(),
            author: "author1".to_string(),
            author_name: String::new(),
            text: "love this".to_string(),
            timestamp: 50,
            parent_id: None,
        },
    });
    bus.publish(FeedEvent::Comment {
        post_id: "p0".to_string(),
        comment: Comment {
            id: "c-echo".to_string(),
            author: "viewer".to_string(),
            author_name: String::new(),
            text: "my own".to_string(),
            timestamp: 51,
            parent_id: None,
        },
    });
    bus.publish(FeedEvent::Reaction(Reaction {
        post_id: "p0".to_string(),
        user_id: "author2".to_string(),
        kind: ReactionKind::Wow,
    }));

    assert_eq!(session.pump(&directory), 2);

    let post = session.post("p0").unwrap();
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].author_name, "Nadia");
    assert_eq!(post.likes, 1);
    assert_eq!(post.likes as usize, post.reactions.len());
}

#[tokio::test]
async fn new_post_flag_raises_and_clears_on_refresh() {
    let gateway = LocalGateway::new(seeded_posts(3), vec![]);
    let mut session = FeedSession::new(gateway, viewer(), 10);
    session.refresh().await.unwrap();

    let (bus, subscription) = feed::channel();
    session.subscribe(subscription);
    let directory = StaticDirectory::default();

    bus.publish(FeedEvent::Post(
        serde_json::from_str(
            r#"{"id": "brand-new", "author": "author0", "content": "x", "created_at": 1}"#,
        )
        .unwrap(),
    ));
    session.pump(&directory);

    assert!(session.new_posts_available());
    // The visible list didn't move under the reader.
    assert_eq!(session.posts().len(), 3);

    session.refresh().await.unwrap();
    assert!(!session.new_posts_available());
}

#[tokio::test]
async fn blocked_authors_never_reach_the_feed() {
    let (gateway, directory) = demo::sample_world();
    let mut session = FeedSession::new(gateway, viewer(), 20);
    session.block("dmitri");
    session.refresh().await.unwrap();

    assert!(session.posts().iter().all(|p| p.author != "dmitri"));

    let (bus, subscription) = feed::channel();
    session.subscribe(subscription);
    bus.publish(FeedEvent::Comment {
        post_id: "p1".to_string(),
        comment: Comment {
            id: "blocked-c".to_string(),
            author: "dmitri".to_string(),
            author_name: String::new(),
            text: "let me in".to_string(),
            timestamp: 1,
            parent_id: None,
        },
    });
    assert_eq!(session.pump(&directory), 0);
}

#[tokio::test]
async fn sample_world_refresh_keeps_like_counts_consistent() {
    let (gateway, _) = demo::sample_world();
    let mut session = FeedSession::new(gateway, viewer(), 20);
    session.refresh().await.unwrap();

    assert!(!session.posts().is_empty());
    for post in session.posts() {
        assert_eq!(post.likes as usize, post.reactions.len());
    }
}
