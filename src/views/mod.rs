pub mod tui;
pub mod widgets;

pub use tui::FeedRow;
pub use widgets::StatefulList;
