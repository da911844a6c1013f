use std::io;
use ratatui::{
    widgets::{Block, Borders, List, ListItem},
    layout::{Layout, Constraint, Direction},
    style::{Style, Color, Modifier},
    Terminal, Frame,
    text::Line,
    prelude::{Span, Text},
};
use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    execute,
    event::{DisableMouseCapture, EnableMouseCapture},
};

use crate::feed::thread::{build_thread, CommentNode};
use crate::models::{Ad, Post, ReactionKind};
use crate::views::widgets::StatefulList;

/// One materialized row of the rendered feed.
pub enum FeedRow {
    Post {
        post: Post,
        expanded: bool,
        my_reaction: Option<ReactionKind>,
    },
    Ad { ad: Ad, slot: usize },
}

pub fn setup_terminal() -> io::Result<Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

pub fn restore_terminal(terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

pub fn render_ui<B: ratatui::backend::Backend>(
    f: &mut Frame<B>,
    stateful_list: &mut StatefulList<FeedRow>,
    status: String,
) {
    // Create the layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Percentage(100)].as_ref())
        .split(f.size());

    // Create the feed rows
    let items: Vec<ListItem> = stateful_list.items
        .iter()
        .map(|row| match row {
            FeedRow::Post { post, expanded, my_reaction } => {
                post_item(post, *expanded, *my_reaction)
            }
            FeedRow::Ad { ad, .. } => ad_item(ad),
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(status).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Gray)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        );

    f.render_stateful_widget(list, chunks[0], &mut stateful_list.state);
}

fn post_item(post: &Post, expanded: bool, my_reaction: Option<ReactionKind>) -> ListItem<'static> {
    let edited = if post.edited { " (edited)" } else { "" };
    let header = Line::from(vec![
        Span::styled(
            format!("{} posted at {}{}", post.author_name, post.created_at, edited),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        )
    ]);

    let content = Text::raw(post.content.clone());

    let mine = match my_reaction {
        Some(kind) => format!(" · you: {:?}", kind),
        None => String::new(),
    };
    let meta = Line::from(vec![
        Span::styled(
            format!(
                "{} likes · {} comments · {} shares{}",
                post.likes,
                post.comments.len(),
                post.shares,
                mine
            ),
            Style::default().fg(Color::DarkGray)
        )
    ]);

    let mut all_lines = vec![header];
    all_lines.extend(content.lines);
    all_lines.push(meta);

    if expanded {
        for node in build_thread(&post.comments) {
            push_thread_lines(&node, 1, &mut all_lines);
        }
    }
    all_lines.push(Line::from("")); // Empty line for spacing between posts

    ListItem::new(all_lines).style(Style::default())
}

fn push_thread_lines(node: &CommentNode, depth: usize, lines: &mut Vec<Line<'static>>) {
    let indent = "  ".repeat(depth);
    lines.push(Line::from(vec![
        Span::styled(
            format!("{}{}: ", indent, node.comment.author_name),
            Style::default().fg(Color::Green)
        ),
        Span::raw(node.comment.text.clone()),
    ]));
    for child in &node.children {
        push_thread_lines(child, depth + 1, lines);
    }
}

fn ad_item(ad: &Ad) -> ListItem<'static> {
    let header = Line::from(vec![
        Span::styled(
            format!("Sponsored · {}", ad.title),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        )
    ]);
    let body = Text::raw(ad.body.clone());
    let cta = Line::from(vec![
        Span::styled(
            format!("[{}] {}", ad.cta_label, ad.link),
            Style::default().fg(Color::Yellow)
        )
    ]);

    let mut all_lines = vec![header];
    all_lines.extend(body.lines);
    all_lines.push(cta);
    all_lines.push(Line::from(""));

    ListItem::new(all_lines).style(Style::default())
}
