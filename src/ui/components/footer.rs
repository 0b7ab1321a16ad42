//! Footer and pager renderers.

use crate::ui::helpers::padding;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, PagerInfo};

/// Appends the command hints, centered and dimmed.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let help_text = &footer.keybindings;
    let left = padding(help_text.chars().count(), cols) / 2;

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(left));
    out.push_str(help_text);
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends the pager line: `‹ prev   Page N   next ›   (T more contacts)`.
///
/// Unavailable directions are dimmed.
pub fn render_pager(out: &mut String, pager: &PagerInfo, theme: &Theme) {
    let direction = |out: &mut String, label: &str, enabled: bool| {
        if enabled {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            out.push_str(Theme::dim());
        }
        out.push_str(label);
        out.push_str(Theme::reset());
    };

    direction(out, "‹ prev", pager.has_prev);
    out.push_str(&format!("   {}Page {}{}   ", Theme::bold(), pager.page, Theme::reset()));
    direction(out, "next ›", pager.has_next);

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    let noun = if pager.total == 1 { "contact" } else { "contacts" };
    out.push_str(&format!("   ({} {noun})", pager.total));
    out.push_str(Theme::reset());
    out.push('\n');
}
