use tracing_subscriber::EnvFilter;

use artfeed::cli::Flags;
use artfeed::controllers::{init_feed, start_app};
use artfeed::demo;
use artfeed::feed::{self, FeedSession};
use artfeed::models::{cache, Config, User};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Silent unless RUST_LOG is set; the TUI owns the screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Get flags
    let flags = Flags::from_args();

    if flags.clean() {
        cache::clear_cache()?;
        println!("cache cleared");
        return Ok(());
    }

    let mut config = Config::load().unwrap_or_default();
    let viewer = User::new(&config.user_id, &config.display_name);

    // Demo world standing in for the hosted backend
    let (gateway, directory) = demo::sample_world();
    let (bus, subscription) = feed::channel();

    let mut session = FeedSession::new(gateway, viewer, config.page_size);
    session.subscribe(subscription);

    init_feed(&mut session, &mut config).await?;
    demo::spawn_sample_activity(bus);

    start_app(session, directory, demo::LogSink).await
}
