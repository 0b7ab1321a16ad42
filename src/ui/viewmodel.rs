//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are optimized for rendering and contain pre-computed display
//! information like highlight ranges and favorite markers.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use phonebook::domain::ContactId;
//! use phonebook::ui::viewmodel::{DisplayItem, SectionInfo};
//!
//! let section = SectionInfo {
//!     title: "Favorites".to_string(),
//!     rows: vec![DisplayItem {
//!         id: ContactId::new(1),
//!         name: "Ann Lee".to_string(),
//!         phones: "555-0100".to_string(),
//!         is_favorite: true,
//!         highlight_ranges: vec![(0, 3)],
//!     }],
//! };
//! assert_eq!(section.rows.len(), 1);
//! ```

use crate::domain::ContactId;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present while a search predicate is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Error or success message shown above the list.
    pub banner: Option<BannerInfo>,

    /// Validation messages of the last rejected form, in field order.
    pub form_errors: Vec<String>,

    /// Favorites first, then the current page of other contacts. Empty
    /// sections are left out.
    pub sections: Vec<SectionInfo>,

    pub pager: Option<PagerInfo>,

    pub footer: FooterInfo,

    /// Shown instead of the sections when there is nothing to list.
    pub empty_state: Option<EmptyState>,
}

/// One titled block of contact rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    pub title: String,
    pub rows: Vec<DisplayItem>,
}

/// Display information for a single contact row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub id: ContactId,

    /// `"first last"`.
    pub name: String,

    /// Phone numbers joined for display.
    pub phones: String,

    pub is_favorite: bool,

    /// Character ranges of `name` matching the search.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Secondary status text, e.g. while a read is in flight.
    pub status: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text (e.g., "/ search | n next | q quit").
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No contacts found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Active search predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerInfo {
    pub kind: BannerKind,
    pub message: String,
}

/// Paging controls below the others section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerInfo {
    pub page: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub total: usize,
}
