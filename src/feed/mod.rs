pub mod thread;
pub mod reactions;
pub mod pager;
pub mod ads;
pub mod subscription;
pub mod session;

// Re-export the engine surface
pub use thread::{build_thread, CommentNode};
pub use reactions::apply_reaction;
pub use pager::{PageCursor, FetchTicket};
pub use ads::{ad_slot_for, click_through, SlotTracker, AD_INTERVAL};
pub use subscription::{channel, EventBus, Subscription};
pub use session::{FeedItem, FeedSession};
