pub mod app_controller;
pub mod feed_controller;

// Re-export key functions
pub use app_controller::start_app;
pub use feed_controller::init_feed;
