//! Empty state renderer.
//!
//! Shown in place of the contact sections when there is nothing to list.

use crate::ui::helpers::padding;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Appends the centered message and its dimmed subtitle.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    out.push('\n');
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&" ".repeat(padding(empty.message.chars().count(), cols) / 2));
    out.push_str(&empty.message);
    out.push_str(Theme::reset());
    out.push('\n');

    if !empty.subtitle.is_empty() {
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&" ".repeat(padding(empty.subtitle.chars().count(), cols) / 2));
        out.push_str(&empty.subtitle);
        out.push_str(Theme::reset());
        out.push('\n');
    }
    out.push('\n');
}
