use ratatui::widgets::ListState;

pub struct StatefulList<T> {
    pub state: ListState,
    pub items: Vec<T>,
}

impl<T> StatefulList<T> {
    pub fn with_items(items: Vec<T>) -> StatefulList<T> {
        let mut state = ListState::default();
        // Start with the first item selected
        if !items.is_empty() {
            state.select(Some(0));
        }
        StatefulList {
            state,
            items,
        }
    }

    /// Swap the items out (after a refresh or a merge) keeping the
    /// selection clamped to the new length.
    pub fn replace_items(&mut self, items: Vec<T>) {
        let selected = self.state.selected().unwrap_or(0);
        self.items = items;
        if self.items.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(selected.min(self.items.len() - 1)));
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn at_end(&self) -> bool {
        match self.state.selected() {
            Some(i) => !self.items.is_empty() && i == self.items.len() - 1,
            None => false,
        }
    }

    pub fn next(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.items.len().saturating_sub(1) {
                    i
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    i
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn first(&mut self) {
        if !self.items.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        if !self.items.is_empty() {
            self.state.select(Some(self.items.len() - 1));
        }
    }

    pub fn jump_up(&mut self, offset: i16) {
        let i = match self.state.selected() {
            Some(i) => (i as i16 - offset).max(0) as usize,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn jump_down(&mut self, offset: i16) {
        let i = match self.state.selected() {
            Some(i) => (i + offset as usize).min(self.items.len().saturating_sub(1)),
            None => 0,
        };
        self.state.select(Some(i));
    }
}
