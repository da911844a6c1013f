/// Infinite-scroll cursor: 1-based page, terminal "no more pages" state,
/// single-flight coalescing, and epoch tokens so a response that raced a
/// manual refresh can be recognized and discarded.
#[derive(Debug)]
pub struct PageCursor {
    page: u32,
    has_more: bool,
    in_flight: bool,
    epoch: u64,
}

/// Handed out for every fetch the cursor authorizes; must be passed back to
/// [`PageCursor::settle`] or [`PageCursor::fail`] with the outcome.
#[derive(Copy, Clone, Debug)]
pub struct FetchTicket {
    pub page: u32,
    epoch: u64,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCursor {
    pub fn new() -> Self {
        PageCursor {
            page: 1,
            has_more: true,
            in_flight: false,
            epoch: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Request the next page. Returns `None` when pagination has ended or a
    /// fetch is already outstanding; concurrent scroll triggers coalesce
    /// instead of queueing duplicate fetches.
    pub fn advance(&mut self) -> Option<FetchTicket> {
        if !self.has_more || self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.page += 1;
        Some(FetchTicket {
            page: self.page,
            epoch: self.epoch,
        })
    }

    /// Manual refresh: back to page 1, pagination reopened, and any fetch
    /// still in the air invalidated by bumping the epoch.
    pub fn restart(&mut self) -> FetchTicket {
        self.epoch += 1;
        self.page = 1;
        self.has_more = true;
        self.in_flight = true;
        FetchTicket {
            page: 1,
            epoch: self.epoch,
        }
    }

    /// Record a completed fetch. Returns `false` when the ticket belongs to
    /// a superseded epoch and the response must be thrown away. An empty
    /// page closes pagination for the rest of the session.
    pub fn settle(&mut self, ticket: &FetchTicket, count: usize) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.in_flight = false;
        if count == 0 {
            self.has_more = false;
        }
        true
    }

    /// Record a failed fetch: the slot reopens and the page rolls back so a
    /// retry asks for the same page again. `has_more` is untouched.
    pub fn fail(&mut self, ticket: &FetchTicket) {
        if ticket.epoch == self.epoch {
            self.in_flight = false;
            self.page = ticket.page.saturating_sub(1).max(1);
        }
    }
}
