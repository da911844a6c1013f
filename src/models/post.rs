use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Where a post record came from. Cached records may be missing derived
/// fields, so everything passes through [`Post::normalized`] at the boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PostSource {
    Remote,
    LocalCache,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Post {
    pub id: String,
    pub author: String,
    #[serde(default)]
    pub author_name: String,
    pub content: String,
    #[serde(default)]
    pub media: Option<Media>,
    /// Derived count, kept equal to `reactions.len()` by every local mutation.
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub shares: u32,
    pub created_at: u64,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub poll: Option<Poll>,
    /// Original post when this one is a share. The copy never mutates it.
    #[serde(default)]
    pub shared_from: Option<Box<Post>>,
    #[serde(default)]
    pub edited: bool,
}

impl Post {
    /// Boundary normalization: recompute the cached like count from the
    /// reaction set so records with stale or missing derived fields can't
    /// drift the invariant.
    pub fn normalized(mut self, source: PostSource) -> Post {
        self.likes = self.reactions.len() as u32;
        if source == PostSource::LocalCache && self.author_name.is_empty() {
            // Offline records can't be hydrated against the directory.
            self.author_name = self.author.clone();
        }
        self
    }

    /// The viewer's own reaction on this post, if any.
    pub fn reaction_of(&self, user_id: &str) -> Option<&Reaction> {
        self.reactions.iter().find(|r| r.user_id == user_id)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Media {
    Image(String),
    Video(String),
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Friends,
    Private,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Comment {
    pub id: String,
    pub author: String,
    /// Display name hydrated from the author directory; a placeholder when
    /// the lookup came up empty.
    #[serde(default)]
    pub author_name: String,
    pub text: String,
    pub timestamp: u64,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Reaction {
    pub post_id: String,
    pub user_id: String,
    pub kind: ReactionKind,
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReactionKind {
    Like,
    Love,
    Haha,
    Wow,
    Sad,
    Angry,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Poll {
    pub question: String,
    pub options: Vec<PollOption>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PollOption {
    pub label: String,
    #[serde(default)]
    pub votes: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_recounts_likes_from_reactions() {
        let post: Post = serde_json::from_str(
            r#"{
                "id": "p1",
                "author": "u1",
                "content": "hello",
                "created_at": 100,
                "likes": 7,
                "reactions": [
                    {"post_id": "p1", "user_id": "u2", "kind": "LOVE"}
                ]
            }"#,
        )
        .unwrap();
        let post = post.normalized(PostSource::LocalCache);
        assert_eq!(post.likes, 1);
    }

    #[test]
    fn sparse_record_fills_defaults() {
        let post: Post = serde_json::from_str(
            r#"{"id": "p2", "author": "u1", "content": "bare", "created_at": 5}"#,
        )
        .unwrap();
        assert_eq!(post.visibility, Visibility::Public);
        assert!(post.comments.is_empty());
        assert!(post.poll.is_none());
        assert!(!post.edited);
    }

    #[test]
    fn reaction_of_scans_by_user() {
        let post: Post = serde_json::from_str(
            r#"{
                "id": "p3",
                "author": "u1",
                "content": "x",
                "created_at": 1,
                "reactions": [
                    {"post_id": "p3", "user_id": "u2", "kind": "HAHA"},
                    {"post_id": "p3", "user_id": "u3", "kind": "SAD"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(post.reaction_of("u3").unwrap().kind, ReactionKind::Sad);
        assert!(post.reaction_of("u9").is_none());
    }
}
