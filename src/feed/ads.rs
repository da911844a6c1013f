use std::collections::HashSet;
use std::process::Command;

use crate::gateway::TrackingSink;
use crate::models::Ad;

/// Posts between ad slots.
pub const AD_INTERVAL: usize = 5;

/// Decide whether an ad slot precedes the post at `index` and which pool
/// entry fills it. A slot appears at every fifth post (indices 5, 10, …);
/// the pool is consumed cyclically so a small pool repeats instead of
/// running out.
pub fn ad_slot_for(index: usize, pool_len: usize) -> Option<usize> {
    if pool_len == 0 || index == 0 || index % AD_INTERVAL != 0 {
        return None;
    }
    Some((index / AD_INTERVAL - 1) % pool_len)
}

/// At-most-once impression firing per slot per mount. Once a slot has
/// fired it stays inert for the tracker's lifetime, the equivalent of
/// tearing down that slot's visibility observer.
#[derive(Default)]
pub struct SlotTracker {
    fired: HashSet<usize>,
}

impl SlotTracker {
    pub fn new() -> Self {
        SlotTracker::default()
    }

    /// The slot at post index `slot` crossed into view. Returns whether an
    /// impression was actually recorded.
    pub fn on_visible(&mut self, slot: usize, ad: &Ad, sink: &impl TrackingSink) -> bool {
        if !self.fired.insert(slot) {
            return false;
        }
        tracing::debug!(ad = %ad.id, slot, "ad impression");
        sink.track_impression(&ad.id);
        true
    }
}

/// Handle a click on an ad: count it and open the destination in the
/// system browser. Both are fire-and-forget; a browser that fails to spawn
/// is logged and otherwise ignored.
pub fn click_through(ad: &Ad, sink: &impl TrackingSink) {
    sink.track_click(&ad.id);
    if let Err(e) = Command::new("xdg-open").arg(&ad.link).spawn() {
        tracing::warn!(ad = %ad.id, error = %e, "failed to open ad destination");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingSink {
        impressions: RefCell<Vec<String>>,
        clicks: RefCell<Vec<String>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            RecordingSink {
                impressions: RefCell::new(Vec::new()),
                clicks: RefCell::new(Vec::new()),
            }
        }
    }

    impl TrackingSink for RecordingSink {
        fn track_impression(&self, ad_id: &str) {
            self.impressions.borrow_mut().push(ad_id.to_string());
        }
        fn track_click(&self, ad_id: &str) {
            self.clicks.borrow_mut().push(ad_id.to_string());
        }
    }

    fn ad(id: &str) -> Ad {
        Ad {
            id: id.to_string(),
            campaign_id: "camp".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            media: None,
            link: "https://example.com".to_string(),
            cta_label: "Go".to_string(),
        }
    }

    #[test]
    fn slots_appear_at_every_fifth_index_only() {
        for index in 0..30 {
            let expected = index > 0 && index % 5 == 0;
            assert_eq!(ad_slot_for(index, 3).is_some(), expected, "index {}", index);
        }
    }

    #[test]
    fn pool_is_consumed_cyclically() {
        let picks: Vec<usize> = (0..40)
            .filter_map(|i| ad_slot_for(i, 3))
            .collect();
        assert_eq!(picks, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn twelve_posts_draw_pool_items_zero_and_one() {
        let slots: Vec<(usize, usize)> = (0..12)
            .filter_map(|i| ad_slot_for(i, 2).map(|p| (i, p)))
            .collect();
        assert_eq!(slots, vec![(5, 0), (10, 1)]);
    }

    #[test]
    fn empty_pool_shows_no_ads() {
        assert!(ad_slot_for(5, 0).is_none());
    }

    #[test]
    fn impressions_fire_once_per_slot() {
        let sink = RecordingSink::new();
        let mut tracker = SlotTracker::new();
        let creative = ad("a1");

        assert!(tracker.on_visible(5, &creative, &sink));
        // Scrolling back over the same slot doesn't count again.
        assert!(!tracker.on_visible(5, &creative, &sink));
        // A different slot with the same creative does.
        assert!(tracker.on_visible(10, &creative, &sink));

        assert_eq!(sink.impressions.borrow().len(), 2);
    }
}
