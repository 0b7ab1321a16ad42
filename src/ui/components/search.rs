//! Search banner and message renderers.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BannerInfo, BannerKind, SearchBarInfo};

/// Appends `Showing results for "query"`.
pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme) {
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str("Showing results for \"");
    out.push_str(Theme::reset());
    out.push_str(Theme::bold());
    out.push_str(&search.query);
    out.push_str(Theme::reset());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push('"');
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends an error or success banner line.
pub fn render_banner(out: &mut String, banner: &BannerInfo, theme: &Theme) {
    let (color, mark) = match banner.kind {
        BannerKind::Error => (&theme.colors.error_fg, "!"),
        BannerKind::Notice => (&theme.colors.notice_fg, "✓"),
    };
    out.push_str(&Theme::fg(color));
    out.push_str(mark);
    out.push(' ');
    out.push_str(&banner.message);
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends one indented line per form error.
pub fn render_form_errors(out: &mut String, errors: &[String], theme: &Theme) {
    for error in errors {
        out.push_str(&Theme::fg(&theme.colors.error_fg));
        out.push_str("  ");
        out.push_str(error);
        out.push_str(Theme::reset());
        out.push('\n');
    }
}
