use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::error::FeedError;
use crate::feed::ads::ad_slot_for;
use crate::feed::pager::PageCursor;
use crate::feed::reactions::apply_reaction;
use crate::feed::subscription::Subscription;
use crate::gateway::{AuthorDirectory, FetchGateway};
use crate::models::{Ad, Comment, FeedEvent, Post, PostSource, ReactionKind, User};

/// How many creatives the session keeps around for interleaving.
const AD_POOL_SIZE: usize = 4;

/// One rendered row of the feed: a post, or the ad slot preceding the post
/// at that index.
#[derive(Debug)]
pub enum FeedItem<'a> {
    Post(&'a Post),
    Ad { ad: &'a Ad, slot: usize },
}

/// A feed session owns the canonical in-memory post list and everything
/// that mutates it: pagination, optimistic local actions, and the realtime
/// merge. Sessions are independent; a group feed and the main feed can
/// coexist without sharing state or subscriptions.
pub struct FeedSession<G> {
    gateway: G,
    viewer: User,
    blocked: HashSet<String>,
    page_size: usize,
    posts: Vec<Post>,
    seen_posts: HashSet<String>,
    seen_comments: HashSet<String>,
    ad_pool: Vec<Ad>,
    pager: PageCursor,
    new_posts_available: bool,
    last_error: Option<String>,
    subscription: Option<Subscription>,
}

impl<G> FeedSession<G> {
    pub fn new(gateway: G, viewer: User, page_size: usize) -> Self {
        FeedSession {
            gateway,
            viewer,
            blocked: HashSet::new(),
            page_size,
            posts: Vec::new(),
            seen_posts: HashSet::new(),
            seen_comments: HashSet::new(),
            ad_pool: Vec::new(),
            pager: PageCursor::new(),
            new_posts_available: false,
            last_error: None,
            subscription: None,
        }
    }

    pub fn viewer(&self) -> &User {
        &self.viewer
    }

    pub fn block(&mut self, user_id: &str) {
        self.blocked.insert(user_id.to_string());
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more()
    }

    pub fn new_posts_available(&self) -> bool {
        self.new_posts_available
    }

    /// User-visible message from the last failed fetch, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // --- subscription lifecycle -------------------------------------------

    /// Attach the realtime channel: Idle -> Subscribed. Any previous
    /// subscription is dropped, which closes its channel.
    pub fn subscribe(&mut self, subscription: Subscription) {
        self.subscription = Some(subscription);
    }

    /// Subscribed -> Idle. Dropping the handle closes the channel.
    pub fn unsubscribe(&mut self) {
        self.subscription = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Drain the subscription and fold every queued event into local state,
    /// in arrival order. Returns how many events were actually applied.
    pub fn pump(&mut self, directory: &impl AuthorDirectory) -> usize {
        let events = match self.subscription.as_mut() {
            Some(subscription) => subscription.drain(),
            None => return 0,
        };
        let mut applied = 0;
        for event in events {
            if self.apply_event(event, directory) {
                applied += 1;
            }
        }
        applied
    }

    /// Fold one realtime event into the feed. Returns whether the event
    /// changed local state; self-echoes, blocked authors, duplicates and
    /// events for unknown posts are dropped.
    pub fn apply_event(&mut self, event: FeedEvent, directory: &impl AuthorDirectory) -> bool {
        match event {
            FeedEvent::Post(post) => {
                if post.author == self.viewer.id || self.blocked.contains(&post.author) {
                    tracing::debug!(post = %post.id, "post insert suppressed");
                    return false;
                }
                if self.seen_posts.contains(&post.id) {
                    return false;
                }
                // Never spliced into the visible list: the reader refreshes
                // on their own terms instead of having the feed reflow
                // under their cursor.
                self.new_posts_available = true;
                true
            }
            FeedEvent::Comment { post_id, comment } => {
                if comment.author == self.viewer.id {
                    // The optimistic local append already represents it.
                    tracing::debug!(comment = %comment.id, "echo suppressed");
                    return false;
                }
                if self.blocked.contains(&comment.author) {
                    return false;
                }
                if self.seen_comments.contains(&comment.id) {
                    tracing::debug!(comment = %comment.id, "duplicate delivery dropped");
                    return false;
                }
                let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) else {
                    return false;
                };
                let author = directory
                    .get_user(&comment.author)
                    .unwrap_or_else(|| User::placeholder(&comment.author));
                let mut comment = comment;
                comment.author_name = author.name;
                self.seen_comments.insert(comment.id.clone());
                post.comments.push(comment);
                true
            }
            FeedEvent::Reaction(reaction) => {
                if reaction.user_id == self.viewer.id {
                    tracing::debug!(post = %reaction.post_id, "echo suppressed");
                    return false;
                }
                if self.blocked.contains(&reaction.user_id) {
                    return false;
                }
                let Some(post) = self.posts.iter_mut().find(|p| p.id == reaction.post_id)
                else {
                    return false;
                };
                // Additive-only path, so the O(1) bump stays consistent
                // with the recount invariant.
                post.reactions.push(reaction);
                post.likes += 1;
                true
            }
        }
    }

    // --- optimistic local actions -----------------------------------------

    /// Toggle/replace the viewer's reaction on a post. Applied locally at
    /// once; the returned post is what the caller persists to the store.
    pub fn react(&mut self, post_id: &str, kind: ReactionKind) -> Option<Post> {
        let index = self.posts.iter().position(|p| p.id == post_id)?;
        let next = apply_reaction(&self.posts[index], &self.viewer.id, kind);
        self.posts[index] = next.clone();
        Some(next)
    }

    /// Append a comment by the viewer. Applied locally at once; the
    /// returned comment is what the caller persists. The realtime echo of
    /// this append is suppressed by `apply_event`.
    pub fn add_comment(
        &mut self,
        post_id: &str,
        text: &str,
        parent_id: Option<String>,
    ) -> Option<Comment> {
        let post = self.posts.iter_mut().find(|p| p.id == post_id)?;
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            author: self.viewer.id.clone(),
            author_name: self.viewer.name.clone(),
            text: text.to_string(),
            timestamp: now(),
            parent_id,
        };
        self.seen_comments.insert(comment.id.clone());
        post.comments.push(comment.clone());
        Some(comment)
    }

    // --- derived render state ---------------------------------------------

    /// The post list decorated with ad slots, in render order.
    pub fn timeline(&self) -> Vec<FeedItem<'_>> {
        let mut items = Vec::with_capacity(self.posts.len() + self.posts.len() / 5);
        for (index, post) in self.posts.iter().enumerate() {
            if let Some(pool_index) = ad_slot_for(index, self.ad_pool.len()) {
                items.push(FeedItem::Ad {
                    ad: &self.ad_pool[pool_index],
                    slot: index,
                });
            }
            items.push(FeedItem::Post(post));
        }
        items
    }

    // --- cache fallback ---------------------------------------------------

    /// Replace the list wholesale with records from another source, e.g.
    /// the offline cache when the gateway is unreachable.
    pub fn restore(&mut self, posts: Vec<Post>, source: PostSource) {
        self.posts.clear();
        self.seen_posts.clear();
        self.seen_comments.clear();
        self.absorb(posts, source);
    }

    fn absorb(&mut self, posts: Vec<Post>, source: PostSource) {
        for post in posts {
            let post = post.normalized(source);
            if self.blocked.contains(&post.author) {
                continue;
            }
            if !self.seen_posts.insert(post.id.clone()) {
                continue;
            }
            for comment in &post.comments {
                self.seen_comments.insert(comment.id.clone());
            }
            self.posts.push(post);
        }
    }
}

impl<G: FetchGateway> FeedSession<G> {
    /// Manual refresh: restart pagination, replace the list wholesale, and
    /// clear the new-posts flag. Also tops up the ad pool, best effort.
    pub async fn refresh(&mut self) -> Result<(), FeedError> {
        let ticket = self.pager.restart();
        let posts = match self.fetch_page(ticket.page).await {
            Ok(posts) => posts,
            Err(e) => {
                self.pager.fail(&ticket);
                self.last_error = Some("couldn't refresh the feed".to_string());
                return Err(e);
            }
        };
        if !self.pager.settle(&ticket, posts.len()) {
            return Ok(());
        }
        self.posts.clear();
        self.seen_posts.clear();
        self.seen_comments.clear();
        self.absorb(posts, PostSource::Remote);
        self.new_posts_available = false;
        self.last_error = None;

        match self.gateway.get_random_ads(AD_POOL_SIZE).await {
            Ok(ads) if !ads.is_empty() => self.ad_pool = ads,
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "ad pool fetch failed, keeping old pool"),
        }
        Ok(())
    }

    /// Fetch the next page if one may exist and none is in flight. Returns
    /// whether a fetch actually happened. Responses superseded by a refresh
    /// are discarded.
    pub async fn load_more(&mut self) -> Result<bool, FeedError> {
        let Some(ticket) = self.pager.advance() else {
            return Ok(false);
        };
        match self.fetch_page(ticket.page).await {
            Ok(posts) => {
                if self.pager.settle(&ticket, posts.len()) {
                    self.absorb(posts, PostSource::Remote);
                    self.last_error = None;
                } else {
                    tracing::debug!(page = ticket.page, "stale page response discarded");
                }
                Ok(true)
            }
            Err(e) => {
                self.pager.fail(&ticket);
                self.last_error = Some("couldn't load more posts".to_string());
                Err(e)
            }
        }
    }

    /// One transparent retry on a failed page fetch before giving up.
    async fn fetch_page(&self, page: u32) -> Result<Vec<Post>, FeedError> {
        match self.gateway.get_posts(page, self.page_size).await {
            Ok(posts) => Ok(posts),
            Err(e) => {
                tracing::warn!(page, error = %e, "page fetch failed, retrying once");
                self.gateway.get_posts(page, self.page_size).await
            }
        }
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
