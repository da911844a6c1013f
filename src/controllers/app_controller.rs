use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use ratatui::Terminal;

use crate::error::FeedError;
use crate::feed::{ads, FeedItem, FeedSession, SlotTracker};
use crate::gateway::{AuthorDirectory, FetchGateway, TrackingSink};
use crate::models::{cache, ReactionKind};
use crate::views::{tui, FeedRow, StatefulList};

pub async fn start_app<G, D, S>(
    mut session: FeedSession<G>,
    directory: D,
    sink: S,
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    G: FetchGateway,
    D: AuthorDirectory,
    S: TrackingSink,
{
    // Setup terminal
    let mut terminal = tui::setup_terminal()?;

    // Run the app
    let res = run_app(&mut terminal, &mut session, &directory, &sink).await;

    // Restore terminal
    tui::restore_terminal(&mut terminal)?;

    // Subscribed -> Idle, whatever way run_app exited
    session.unsubscribe();

    if let Err(err) = res {
        eprintln!("{:?}", err);
    }

    Ok(())
}

pub async fn run_app<B, G, D, S>(
    terminal: &mut Terminal<B>,
    session: &mut FeedSession<G>,
    directory: &D,
    sink: &S,
) -> Result<(), FeedError>
where
    B: ratatui::backend::Backend,
    G: FetchGateway,
    D: AuthorDirectory,
    S: TrackingSink,
{
    let mut expanded: Option<String> = None;
    let mut slots = SlotTracker::new();
    let mut list = StatefulList::with_items(feed_rows(session, expanded.as_deref()));

    loop {
        // Fold in whatever the realtime channel delivered since last tick
        if session.pump(directory) > 0 {
            list.replace_items(feed_rows(session, expanded.as_deref()));
        }

        let status = title(session);
        terminal.draw(|f| tui::render_ui(f, &mut list, status))?;

        // Short poll so realtime events keep flowing between keystrokes
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => {
                    list.next();
                    note_visible_ad(&list, &mut slots, sink);
                    // The last row crossing into view is the load-more signal
                    if list.at_end() && session.has_more() {
                        if let Err(e) = session.load_more().await {
                            tracing::warn!(error = %e, "load more failed");
                        }
                        list.replace_items(feed_rows(session, expanded.as_deref()));
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    list.previous();
                    note_visible_ad(&list, &mut slots, sink);
                }
                KeyCode::Char('g') => list.first(),
                KeyCode::Char('G') => list.last(),
                KeyCode::PageUp => list.jump_up(5),
                KeyCode::PageDown => {
                    list.jump_down(5);
                    note_visible_ad(&list, &mut slots, sink);
                }
                KeyCode::Char('r') => {
                    terminal.draw(|f| {
                        tui::render_ui(f, &mut list, String::from("Refreshing..."))
                    })?;
                    match session.refresh().await {
                        Ok(()) => {
                            if let Err(e) = cache::save_posts_to_cache(session.posts().to_vec()) {
                                tracing::warn!(error = %e, "feed cache write failed");
                            }
                            // Fresh mount: slots may fire again
                            slots = SlotTracker::new();
                            expanded = None;
                            list.replace_items(feed_rows(session, None));
                            list.first();
                        }
                        Err(e) => tracing::warn!(error = %e, "refresh failed"),
                    }
                }
                KeyCode::Char('l') => {
                    react_on_selected(session, &list, ReactionKind::Like);
                    list.replace_items(feed_rows(session, expanded.as_deref()));
                }
                KeyCode::Char('L') => {
                    react_on_selected(session, &list, ReactionKind::Love);
                    list.replace_items(feed_rows(session, expanded.as_deref()));
                }
                KeyCode::Enter => {
                    match list.selected() {
                        Some(FeedRow::Post { post, .. }) => {
                            // Toggle the comment thread open/closed
                            expanded = match expanded.as_deref() {
                                Some(id) if id == post.id => None,
                                _ => Some(post.id.clone()),
                            };
                            list.replace_items(feed_rows(session, expanded.as_deref()));
                        }
                        Some(FeedRow::Ad { ad, .. }) => {
                            ads::click_through(ad, sink);
                        }
                        None => {}
                    }
                }
                _ => {}
            }
        }
    }
}

fn feed_rows<G>(session: &FeedSession<G>, expanded: Option<&str>) -> Vec<FeedRow> {
    let viewer_id = session.viewer().id.clone();
    session
        .timeline()
        .into_iter()
        .map(|item| match item {
            FeedItem::Post(post) => FeedRow::Post {
                expanded: expanded == Some(post.id.as_str()),
                my_reaction: post.reaction_of(&viewer_id).map(|r| r.kind),
                post: post.clone(),
            },
            FeedItem::Ad { ad, slot } => FeedRow::Ad {
                ad: ad.clone(),
                slot,
            },
        })
        .collect()
}

fn title<G>(session: &FeedSession<G>) -> String {
    if let Some(message) = session.last_error() {
        format!("Feed ({})", message)
    } else if session.new_posts_available() {
        String::from("Feed (new posts available, press r)")
    } else if !session.has_more() {
        String::from("Feed (no more posts)")
    } else {
        String::from("Feed")
    }
}

/// Selection standing on an ad row is the TUI's visibility crossing.
fn note_visible_ad(list: &StatefulList<FeedRow>, slots: &mut SlotTracker, sink: &impl TrackingSink) {
    if let Some(FeedRow::Ad { ad, slot }) = list.selected() {
        slots.on_visible(*slot, ad, sink);
    }
}

fn react_on_selected<G>(
    session: &mut FeedSession<G>,
    list: &StatefulList<FeedRow>,
    kind: ReactionKind,
) {
    if let Some(FeedRow::Post { post, .. }) = list.selected() {
        let post_id = post.id.clone();
        session.react(&post_id, kind);
    }
}
