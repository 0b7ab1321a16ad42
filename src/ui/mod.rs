//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into ANSI-styled text through
//! composable rendering components. It provides theme support and search
//! match highlighting.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, column fitting)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    BannerInfo, BannerKind, DisplayItem, EmptyState, FooterInfo, HeaderInfo, PagerInfo, SearchBarInfo,
    SectionInfo, UIViewModel,
};
