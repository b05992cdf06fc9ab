//! Unread badge counter for the chat panel.
//!
//! Two states, closed and open. While closed the count is recomputed from
//! the total message count and the rendered baseline, never incremented,
//! so bursts of messages cannot drift it. Opening zeroes the count and pins
//! the baseline to the current total; while open every arrival is rendered,
//! so the baseline follows the total.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnreadCounter {
    open: bool,
    unread: usize,
    rendered_baseline: usize,
}

impl UnreadCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a message arrival; `total` is the full log length.
    pub fn on_messages(&mut self, total: usize) {
        if self.open {
            self.rendered_baseline = total;
        } else {
            self.unread = total.saturating_sub(self.rendered_baseline);
        }
    }

    pub fn open(&mut self, total: usize) {
        self.open = true;
        self.unread = 0;
        self.rendered_baseline = total;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn unread(&self) -> usize {
        self.unread
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn rendered_baseline(&self) -> usize {
        self.rendered_baseline
    }
}

#[cfg(test)]
#[path = "unread_test.rs"]
mod tests;
