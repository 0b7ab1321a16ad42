//! Composable UI component renderers.
//!
//! Each component appends the lines of one part of the screen to a shared
//! buffer.
//!
//! # Components
//!
//! - [`header`]: Title bar with loading status
//! - [`search`]: "Showing results for" line, banners and form errors
//! - [`table`]: Favorites and contacts sections
//! - [`footer`]: Pager and command hints
//! - [`empty`]: Empty state message
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Search line]      only while searching
//! [Banner]           error or notice
//! [Form errors]
//! [Sections]         or [Empty state]
//! [Pager]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::{render_footer, render_pager};
use header::render_header;
use search::{render_banner, render_form_errors, render_search_bar};
use table::render_section;

/// Appends a horizontal separator line.
fn render_border(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends the full screen for `vm`.
pub fn render_screen(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    render_header(out, &vm.header, theme, cols);
    render_border(out, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        render_search_bar(out, search, theme);
    }
    if let Some(banner) = &vm.banner {
        render_banner(out, banner, theme);
    }
    render_form_errors(out, &vm.form_errors, theme);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, empty, theme, cols);
    } else {
        for section in &vm.sections {
            render_section(out, section, theme, cols);
        }
    }

    if let Some(pager) = &vm.pager {
        render_pager(out, pager, theme);
    }

    render_border(out, &theme.colors.border, cols);
    render_footer(out, &vm.footer, theme, cols);
}
