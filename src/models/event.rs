use serde::{Deserialize, Serialize};

use crate::models::post::{Comment, Post, Reaction};

/// Realtime push event as delivered by the transport: a tagged
/// `{kind, payload}` envelope. Delivery order and duplicate suppression are
/// the transport's problem; the merge layer applies these in arrival order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum FeedEvent {
    Post(Post),
    Comment { post_id: String, comment: Comment },
    Reaction(Reaction),
}
