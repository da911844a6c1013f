pub mod models;
pub mod feed;
pub mod gateway;
pub mod views;
pub mod controllers;
pub mod cli;
pub mod error;
pub mod demo;

// Re-exports for convenience
pub use models::{Post, Comment, Reaction, ReactionKind, Ad, User, Config, FeedEvent};
pub use feed::{FeedSession, FeedItem, build_thread, apply_reaction};
pub use gateway::{FetchGateway, AuthorDirectory, TrackingSink, LocalGateway, StaticDirectory};
pub use controllers::{start_app, init_feed};
pub use error::FeedError;
