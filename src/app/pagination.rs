//! Paging cursor and active search predicate.

use crate::domain::{PhonebookError, SearchPattern};

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Snapshot of the paging cursor.
///
/// `offset` is always a multiple of `page_size`, and `page_size` is never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub offset: usize,
    pub page_size: usize,
    pub search: SearchPattern,
}

impl PageState {
    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.offset / self.page_size + 1
    }

    #[must_use]
    pub const fn is_aligned(&self) -> bool {
        self.offset % self.page_size == 0
    }
}

/// Owner of the session's [`PageState`].
///
/// `next_page` is unconditional; callers gate it on the published
/// `has_next`. Every operation leaves the offset aligned to the page size.
///
/// # Examples
///
/// ```
/// use phonebook::app::PageStore;
///
/// let mut pages = PageStore::new(10);
/// pages.next_page();
/// assert_eq!(pages.current_page(), 2);
/// pages.set_search("bob");
/// assert_eq!(pages.state().offset, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStore {
    state: PageState,
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageStore {
    /// Creates a store at offset 0 with an empty predicate.
    ///
    /// A `page_size` of zero is replaced by [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            tracing::warn!("page size 0 is invalid, using {}", DEFAULT_PAGE_SIZE);
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            state: PageState {
                offset: 0,
                page_size,
                search: SearchPattern::default(),
            },
        }
    }

    #[must_use]
    pub const fn state(&self) -> &PageState {
        &self.state
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.state.page_size
    }

    #[must_use]
    pub const fn search(&self) -> &SearchPattern {
        &self.state.search
    }

    /// Replaces the predicate and returns to the first page.
    pub fn set_search(&mut self, pattern: impl Into<SearchPattern>) {
        self.state.search = pattern.into();
        self.state.offset = 0;
        tracing::debug!(search = %self.state.search, "search changed");
    }

    pub fn next_page(&mut self) {
        self.state.offset += self.state.page_size;
        self.check_alignment();
    }

    pub fn prev_page(&mut self) {
        self.state.offset = self.state.offset.saturating_sub(self.state.page_size);
        self.check_alignment();
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.state.page()
    }

    /// Pulls the offset back onto the last non-empty page for `count` rows.
    ///
    /// Returns `true` if the offset moved. With `count == 0` the cursor goes
    /// back to the first page.
    pub fn clamp_to(&mut self, count: usize) -> bool {
        let last_start = count.saturating_sub(1) / self.state.page_size * self.state.page_size;
        if self.state.offset <= last_start {
            return false;
        }
        tracing::debug!(from = self.state.offset, to = last_start, count, "offset clamped");
        self.state.offset = last_start;
        true
    }

    /// Debug builds assert alignment; release builds realign silently.
    fn check_alignment(&mut self) {
        debug_assert!(
            self.state.is_aligned(),
            "offset {} is not a multiple of page size {}",
            self.state.offset,
            self.state.page_size
        );
        if !self.state.is_aligned() {
            let defect = PhonebookError::StateInvariant(format!(
                "offset {} is not a multiple of page size {}",
                self.state.offset, self.state.page_size
            ));
            tracing::error!(error = %defect, "realigning page offset");
            self.state.offset -= self.state.offset % self.state.page_size;
        }
    }
}
