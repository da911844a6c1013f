use std::collections::HashMap;

use rand::seq::SliceRandom;

use crate::error::FeedError;
use crate::models::{Ad, Post, User};

/// Read side of the hosted backend: offset-based post pagination plus the
/// ad pool. An empty page signals the end of the data.
pub trait FetchGateway {
    fn get_posts(
        &self,
        page: u32,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Post>, FeedError>> + Send;

    fn get_random_ads(
        &self,
        count: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Ad>, FeedError>> + Send;
}

/// Profile lookup used to hydrate bare realtime events with display data.
/// Absence is tolerated; callers fall back to a placeholder identity.
pub trait AuthorDirectory {
    fn get_user(&self, user_id: &str) -> Option<User>;
}

/// Fire-and-forget impression/click counters. No response is consumed;
/// implementations log failures instead of surfacing them.
pub trait TrackingSink {
    fn track_impression(&self, ad_id: &str);
    fn track_click(&self, ad_id: &str);
}

/// In-memory gateway over a seeded post list, newest first. Backs the demo
/// binary and the integration tests.
#[derive(Clone, Default)]
pub struct LocalGateway {
    posts: Vec<Post>,
    ads: Vec<Ad>,
}

impl LocalGateway {
    pub fn new(mut posts: Vec<Post>, ads: Vec<Ad>) -> Self {
        posts.sort_by_key(|p| std::cmp::Reverse(p.created_at));
        LocalGateway { posts, ads }
    }
}

impl FetchGateway for LocalGateway {
    async fn get_posts(&self, page: u32, limit: usize) -> Result<Vec<Post>, FeedError> {
        if page == 0 {
            return Err(FeedError::Gateway("pages are 1-based".to_string()));
        }
        let start = (page as usize - 1) * limit;
        let slice = self
            .posts
            .get(start..)
            .map(|rest| &rest[..rest.len().min(limit)])
            .unwrap_or(&[]);
        Ok(slice.to_vec())
    }

    async fn get_random_ads(&self, count: usize) -> Result<Vec<Ad>, FeedError> {
        let mut pool = self.ads.clone();
        pool.shuffle(&mut rand::thread_rng());
        pool.truncate(count);
        Ok(pool)
    }
}

/// Directory over a fixed user set.
#[derive(Clone, Default)]
pub struct StaticDirectory {
    users: HashMap<String, User>,
}

impl StaticDirectory {
    pub fn new(users: Vec<User>) -> Self {
        StaticDirectory {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }
}

impl AuthorDirectory for StaticDirectory {
    fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, created_at: u64) -> Post {
        serde_json::from_str(&format!(
            r#"{{"id": "{}", "author": "u1", "content": "x", "created_at": {}}}"#,
            id, created_at
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn paginates_newest_first_and_ends_empty() {
        let gateway = LocalGateway::new(
            vec![post("old", 1), post("new", 3), post("mid", 2)],
            vec![],
        );

        let page1 = gateway.get_posts(1, 2).await.unwrap();
        let ids: Vec<&str> = page1.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid"]);

        let page2 = gateway.get_posts(2, 2).await.unwrap();
        assert_eq!(page2.len(), 1);
        assert_eq!(page2[0].id, "old");

        assert!(gateway.get_posts(3, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn random_ads_never_exceed_pool() {
        let ad = Ad {
            id: "a1".to_string(),
            campaign_id: "c1".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            media: None,
            link: "https://example.com".to_string(),
            cta_label: "Go".to_string(),
        };
        let gateway = LocalGateway::new(vec![], vec![ad]);
        assert_eq!(gateway.get_random_ads(5).await.unwrap().len(), 1);
    }

    #[test]
    fn directory_misses_return_none() {
        let directory = StaticDirectory::new(vec![User::new("u1", "Ana")]);
        assert_eq!(directory.get_user("u1").unwrap().name, "Ana");
        assert!(directory.get_user("u2").is_none());
    }
}
