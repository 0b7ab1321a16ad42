//! Header component renderer.
//!
//! Renders the title bar with centered text, theme-aware colors and an
//! optional status tag on the right.

use crate::ui::helpers::padding;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Appends the header line.
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding] [status]
/// ```
///
/// Padding is split evenly on both sides of the title. The status, when
/// present, takes room from the right padding.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let title_len = header.title.chars().count();
    let status = header
        .status
        .as_ref()
        .map(|s| format!("[{s}] "))
        .unwrap_or_default();
    let status_len = status.chars().count();
    let left = padding(title_len, cols) / 2;

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(left));
    out.push_str(&header.title);
    out.push_str(&" ".repeat(padding(left + title_len + status_len, cols)));
    out.push_str(Theme::reset());
    if !status.is_empty() {
        out.push_str(Theme::dim());
        out.push_str(&status);
        out.push_str(Theme::reset());
    }
    out.push('\n');
}
