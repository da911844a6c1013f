//! Seeded sample world so the binary has something to show without a
//! hosted backend: a handful of artists, their posts, an ad pool, and a
//! background task that plays the part of the realtime transport.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::feed::EventBus;
use crate::gateway::{LocalGateway, StaticDirectory, TrackingSink};
use crate::models::{
    Ad, Comment, FeedEvent, Media, Poll, PollOption, Post, Reaction, ReactionKind, User,
    Visibility,
};

pub fn sample_users() -> Vec<User> {
    vec![
        User::new("ana", "Ana Delgado"),
        User::new("brice", "Brice Oluwa"),
        User::new("chiara", "Chiara F."),
        User::new("dmitri", "Dmitri K."),
    ]
}

pub fn sample_posts() -> Vec<Post> {
    let base = 1_725_000_000u64;
    vec![
        post("p1", "ana", "Ana Delgado", "Finished the mural on 5th street today. Three weeks of scaffolding, worth every minute.", base + 11_000)
            .with_media(Media::Image("https://img.example/mural.jpg".to_string()))
            .with_tags(&["mural", "streetart"])
            .with_comment(Comment {
                id: "p1c1".to_string(),
                author: "brice".to_string(),
                author_name: "Brice Oluwa".to_string(),
                text: "The color blocking is unreal".to_string(),
                timestamp: base + 11_200,
                parent_id: None,
            })
            .with_comment(Comment {
                id: "p1c2".to_string(),
                author: "ana".to_string(),
                author_name: "Ana Delgado".to_string(),
                text: "Thanks! All spray, no brush.".to_string(),
                timestamp: base + 11_400,
                parent_id: Some("p1c1".to_string()),
            })
            .with_reaction("brice", ReactionKind::Love)
            .with_reaction("chiara", ReactionKind::Wow),
        post("p2", "brice", "Brice Oluwa", "Open studio this weekend. Come by, bring bad coffee.", base + 10_000)
            .with_tags(&["openstudio"]),
        post("p3", "chiara", "Chiara F.", "Which series should I take to the fair?", base + 9_000)
            .with_poll(Poll {
                question: "Which series?".to_string(),
                options: vec![
                    PollOption { label: "Tidelines".to_string(), votes: voters(&["ana"]) },
                    PollOption { label: "Salt & Iron".to_string(), votes: voters(&["brice", "dmitri"]) },
                ],
            }),
        post("p4", "dmitri", "Dmitri K.", "Clay tests from the new kiln. Reduction firing is a different animal.", base + 8_000)
            .with_media(Media::Video("https://img.example/kiln.mp4".to_string())),
        post("p5", "ana", "Ana Delgado", "Process shot from the mural, week one.", base + 7_000),
        post("p6", "chiara", "Chiara F.", "Sharing Brice's open studio, go if you can.", base + 6_000)
            .with_share(post("p2", "brice", "Brice Oluwa", "Open studio this weekend. Come by, bring bad coffee.", base + 10_000)),
        post("p7", "brice", "Brice Oluwa", "Underpainting day. Everything is brown and that's fine.", base + 5_000),
        post("p8", "dmitri", "Dmitri K.", "Glaze recipe notes, thread below.", base + 4_000),
        post("p9", "ana", "Ana Delgado", "Old sketchbook pages from 2021.", base + 3_000),
        post("p10", "chiara", "Chiara F.", "Fair applications are open. Deadline is the 14th.", base + 2_000),
        post("p11", "brice", "Brice Oluwa", "Sold the big triptych. Celebratory instant noodles tonight.", base + 1_500),
        post("p12", "dmitri", "Dmitri K.", "First pot off the wheel in months.", base + 1_000),
    ]
}

pub fn sample_ads() -> Vec<Ad> {
    vec![
        Ad {
            id: "ad1".to_string(),
            campaign_id: "camp-paints".to_string(),
            title: "Meridian Oils".to_string(),
            body: "Studio-grade oil paint, artist pricing.".to_string(),
            media: None,
            link: "https://example.com/meridian".to_string(),
            cta_label: "Shop now".to_string(),
        },
        Ad {
            id: "ad2".to_string(),
            campaign_id: "camp-fair".to_string(),
            title: "Riverside Art Fair".to_string(),
            body: "Booth applications close soon.".to_string(),
            media: None,
            link: "https://example.com/fair".to_string(),
            cta_label: "Apply".to_string(),
        },
        Ad {
            id: "ad3".to_string(),
            campaign_id: "camp-frames".to_string(),
            title: "TrueLine Frames".to_string(),
            body: "Gallery frames cut to size.".to_string(),
            media: None,
            link: "https://example.com/frames".to_string(),
            cta_label: "Get a quote".to_string(),
        },
    ]
}

pub fn sample_world() -> (LocalGateway, StaticDirectory) {
    (
        LocalGateway::new(sample_posts(), sample_ads()),
        StaticDirectory::new(sample_users()),
    )
}

/// Tracking sink that just logs; the demo has no campaign backend.
pub struct LogSink;

impl TrackingSink for LogSink {
    fn track_impression(&self, ad_id: &str) {
        tracing::info!(ad = %ad_id, "impression");
    }
    fn track_click(&self, ad_id: &str) {
        tracing::info!(ad = %ad_id, "click");
    }
}

/// Play the realtime transport: every few seconds another user comments,
/// reacts, or posts. Stops once the subscriber hangs up.
pub fn spawn_sample_activity(bus: EventBus) {
    tokio::spawn(async move {
        let script: Vec<FeedEvent> = vec![
            FeedEvent::Reaction(Reaction {
                post_id: "p2".to_string(),
                user_id: "dmitri".to_string(),
                kind: ReactionKind::Like,
            }),
            FeedEvent::Comment {
                post_id: "p1".to_string(),
                comment: Comment {
                    id: "live-c1".to_string(),
                    author: "chiara".to_string(),
                    author_name: String::new(),
                    text: "Walked past it this morning, photos don't do it justice".to_string(),
                    timestamp: 1_725_020_000,
                    parent_id: None,
                },
            },
            FeedEvent::Reaction(Reaction {
                post_id: "p1".to_string(),
                user_id: "dmitri".to_string(),
                kind: ReactionKind::Love,
            }),
            FeedEvent::Post(
                post(
                    "p13",
                    "chiara",
                    "Chiara F.",
                    "New series announcement coming Friday.",
                    1_725_021_000,
                ),
            ),
            FeedEvent::Comment {
                post_id: "p4".to_string(),
                comment: Comment {
                    id: "live-c2".to_string(),
                    author: "brice".to_string(),
                    author_name: String::new(),
                    text: "What cone are you firing to?".to_string(),
                    timestamp: 1_725_022_000,
                    parent_id: None,
                },
            },
        ];

        for event in script {
            tokio::time::sleep(Duration::from_secs(4)).await;
            if !bus.publish(event) {
                break;
            }
        }
    });
}

fn post(id: &str, author: &str, author_name: &str, content: &str, created_at: u64) -> Post {
    Post {
        id: id.to_string(),
        author: author.to_string(),
        author_name: author_name.to_string(),
        content: content.to_string(),
        media: None,
        likes: 0,
        comments: Vec::new(),
        reactions: Vec::new(),
        shares: 0,
        created_at,
        tags: BTreeSet::new(),
        visibility: Visibility::Public,
        poll: None,
        shared_from: None,
        edited: false,
    }
}

fn voters(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

trait PostBuilder {
    fn with_media(self, media: Media) -> Post;
    fn with_tags(self, tags: &[&str]) -> Post;
    fn with_comment(self, comment: Comment) -> Post;
    fn with_reaction(self, user_id: &str, kind: ReactionKind) -> Post;
    fn with_poll(self, poll: Poll) -> Post;
    fn with_share(self, original: Post) -> Post;
}

impl PostBuilder for Post {
    fn with_media(mut self, media: Media) -> Post {
        self.media = Some(media);
        self
    }
    fn with_tags(mut self, tags: &[&str]) -> Post {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
    fn with_comment(mut self, comment: Comment) -> Post {
        self.comments.push(comment);
        self
    }
    fn with_reaction(mut self, user_id: &str, kind: ReactionKind) -> Post {
        self.reactions.push(Reaction {
            post_id: self.id.clone(),
            user_id: user_id.to_string(),
            kind,
        });
        self.likes = self.reactions.len() as u32;
        self
    }
    fn with_poll(mut self, poll: Poll) -> Post {
        self.poll = Some(poll);
        self
    }
    fn with_share(mut self, original: Post) -> Post {
        self.shared_from = Some(Box::new(original));
        self
    }
}
