//! Contact table renderer.
//!
//! Each section is a title line followed by one row per contact with the
//! columns favorite marker, id, name and phone numbers. Name matches of the
//! active search are highlighted.

use crate::ui::helpers::{self, fit, padding};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, SectionInfo};

/// Width of the id column, `#` included.
const ID_WIDTH: usize = 6;

/// Width of the name column.
const NAME_WIDTH: usize = 28;

/// Appends a section title and its rows.
pub fn render_section(out: &mut String, section: &SectionInfo, theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.section_fg));
    out.push_str(&section.title);
    out.push_str(Theme::reset());
    out.push('\n');

    for item in &section.rows {
        render_row(out, item, theme, cols);
    }
}

/// Appends one contact row.
///
/// # Layout
///
/// ```text
/// ★ #12    Ann Lee                      555-0100, 555-0101
/// ```
///
/// Names longer than the column are truncated; highlighting is dropped for
/// truncated names since the ranges would no longer line up.
fn render_row(out: &mut String, item: &DisplayItem, theme: &Theme, cols: usize) {
    let base = Theme::fg(&theme.colors.text_normal);

    if item.is_favorite {
        out.push_str(&Theme::fg(&theme.colors.favorite_fg));
        out.push('★');
        out.push_str(Theme::reset());
    } else {
        out.push(' ');
    }
    out.push(' ');

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&fit(&format!("#{}", item.id), ID_WIDTH));
    out.push_str(Theme::reset());

    out.push_str(&base);
    let name_len = item.name.chars().count();
    if name_len <= NAME_WIDTH {
        helpers::push_highlighted(out, &item.name, &item.highlight_ranges, theme, &base);
        out.push_str(&" ".repeat(padding(name_len, NAME_WIDTH)));
    } else {
        out.push_str(&fit(&item.name, NAME_WIDTH));
    }

    out.push(' ');
    let used = 2 + ID_WIDTH + NAME_WIDTH + 1;
    out.push_str(fit(&item.phones, padding(used, cols).max(8)).trim_end());
    out.push_str(Theme::reset());
    out.push('\n');
}
