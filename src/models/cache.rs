use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::post::Post;
use crate::error::FeedError;

/// Offline fallback store for the feed, a JSON file under the XDG cache
/// directory. Stands in for the hosted backend when it is unreachable.
pub fn get_cache_file() -> Result<PathBuf, FeedError> {
    // Check the XDG_CACHE_HOME environment variable first
    let base_cache_dir = env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let home = env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(""));

            Path::new(&home).join(".cache")
        });

    cache_file_in(&base_cache_dir)
}

fn cache_file_in(base_cache_dir: &Path) -> Result<PathBuf, FeedError> {
    let app_cache_dir = base_cache_dir.join("artfeed");

    fs::create_dir_all(&app_cache_dir)
        .map_err(|e| FeedError::Cache(format!("Failed to create cache directory: {}", e)))?;

    Ok(app_cache_dir.join("feed.json"))
}

pub fn load_cached_posts() -> Result<Vec<Post>, FeedError> {
    let cache_path = get_cache_file()?;
    load_posts_from(&cache_path)
}

fn load_posts_from(cache_path: &Path) -> Result<Vec<Post>, FeedError> {
    match fs::read_to_string(cache_path) {
        Ok(data) => {
            serde_json::from_str(&data)
                .map_err(|e| FeedError::Cache(format!("Failed to parse cache data: {}", e)))
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // If file doesn't exist, return empty vector
            Ok(Vec::new())
        },
        Err(e) => {
            Err(FeedError::Cache(format!("Failed to read cache file: {}", e)))
        }
    }
}

pub fn save_posts_to_cache(new_posts: Vec<Post>) -> Result<(), FeedError> {
    let cache_path = get_cache_file()?;
    save_posts_to(&cache_path, new_posts)
}

fn save_posts_to(cache_path: &Path, new_posts: Vec<Post>) -> Result<(), FeedError> {
    let mut cached_posts = load_posts_from(cache_path)?;

    for post in new_posts {
        if !cached_posts.iter().any(|p| p.id == post.id) {
            cached_posts.push(post);
        }
    }

    let json = serde_json::to_string(&cached_posts)
        .map_err(|e| FeedError::Cache(format!("Failed to serialize posts: {}", e)))?;

    fs::write(cache_path, json)
        .map_err(|e| FeedError::Cache(format!("Failed to write cache file: {}", e)))?;

    Ok(())
}

pub fn clear_cache() -> Result<(), FeedError> {
    let cache_path = get_cache_file()?;
    match fs::remove_file(&cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FeedError::Cache(format!("Failed to remove cache file: {}", e))),
    }
}
