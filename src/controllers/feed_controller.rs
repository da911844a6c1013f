use crate::error::FeedError;
use crate::feed::FeedSession;
use crate::gateway::FetchGateway;
use crate::models::{cache, Config, PostSource};

/// First load of a session: apply the config's block list, pull page 1,
/// and write the result through to the offline cache. When the gateway is
/// unreachable the cached feed is served instead.
pub async fn init_feed<G: FetchGateway>(
    session: &mut FeedSession<G>,
    config: &mut Config,
) -> Result<(), FeedError> {
    for blocked in &config.blocked {
        session.block(blocked);
    }
    tracing::debug!(last_refresh = config.get_last_refresh(), "starting feed session");

    match session.refresh().await {
        Ok(()) => {
            if let Err(e) = cache::save_posts_to_cache(session.posts().to_vec()) {
                tracing::warn!(error = %e, "feed cache write failed");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "initial fetch failed, serving cached feed");
            let cached = cache::load_cached_posts()?;
            session.restore(cached, PostSource::LocalCache);
        }
    }

    config.update_last_refresh();
    config.save()?;
    Ok(())
}
