pub mod post;
pub mod user;
pub mod ad;
pub mod event;
pub mod config;
pub mod cache;

// Re-export important structs for convenience
pub use post::{Post, Comment, Reaction, ReactionKind, Visibility, Media, Poll, PollOption, PostSource};
pub use user::User;
pub use ad::Ad;
pub use event::FeedEvent;
pub use config::Config;
