use crate::models::{RestaurantResult, ResultSet};

/// Where the list stands relative to the full result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// Nothing came back at all
    Empty,
    /// More results can be revealed
    HasMore,
    /// Everything is on screen
    Exhausted,
}

impl ListStatus {
    /// Footer line shown under the list, if any
    pub fn end_message(&self) -> Option<&'static str> {
        match self {
            ListStatus::Empty => Some("No restaurants found. Try adjusting your filters."),
            ListStatus::HasMore => None,
            ListStatus::Exhausted => Some("No more restaurants to display."),
        }
    }
}

/// Incrementally reveals a result list one page at a time.
///
/// The reveal count only grows, and resets when a new result revision shows up.
#[derive(Debug, Clone)]
pub struct ResultPager {
    page_size: usize,
    revealed: usize,
    revision: Option<u64>,
}

impl ResultPager {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            revealed: page_size,
            revision: None,
        }
    }

    /// Follow the result list; a new revision starts over at one page
    pub fn sync(&mut self, results: &ResultSet) {
        if self.revision != Some(results.revision()) {
            self.revision = Some(results.revision());
            self.revealed = self.page_size;
        }
    }

    /// Reveal one more page. Returns the new reveal count.
    pub fn load_more(&mut self) -> usize {
        self.revealed = self.revealed.saturating_add(self.page_size);
        self.revealed
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// The prefix of `results` currently on screen
    pub fn visible<'a>(&mut self, results: &'a ResultSet) -> &'a [RestaurantResult] {
        self.sync(results);
        let end = self.revealed.min(results.len());
        &results.as_slice()[..end]
    }

    pub fn status(&mut self, results: &ResultSet) -> ListStatus {
        self.sync(results);
        if results.is_empty() {
            ListStatus::Empty
        } else if self.revealed >= results.len() {
            ListStatus::Exhausted
        } else {
            ListStatus::HasMore
        }
    }
}

impl Default for ResultPager {
    fn default() -> Self {
        Self::new(10)
    }
}
