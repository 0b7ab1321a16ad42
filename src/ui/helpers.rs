//! Shared rendering utilities.
//!
//! Components write into a `String` buffer rather than straight to stdout, so
//! the whole screen can be assembled and printed in one go (and inspected in
//! tests). All width calculations use character counts, not bytes.

use crate::ui::theme::Theme;

/// Appends `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices with an exclusive end, sorted
/// and non-overlapping. After each highlighted run, `base` is re-applied so the
/// rest of the line keeps its color.
///
/// # Example
///
/// ```rust
/// use phonebook::ui::helpers::push_highlighted;
/// use phonebook::ui::Theme;
///
/// let theme = Theme::default();
/// let mut out = String::new();
/// push_highlighted(&mut out, "Bobby", &[(0, 3)], &theme, "");
/// assert!(out.ends_with("by"));
/// ```
pub fn push_highlighted(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, base: &str) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(base);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

/// Pads or truncates `text` to exactly `width` characters.
///
/// Truncated text ends with `…`.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{text}{}", " ".repeat(width - len));
    }
    if width == 0 {
        return String::new();
    }
    let mut fitted: String = text.chars().take(width - 1).collect();
    fitted.push('…');
    fitted
}

/// Number of spaces needed after `used` characters to fill `width`.
#[must_use]
pub const fn padding(used: usize, width: usize) -> usize {
    width.saturating_sub(used)
}

/// Removes ANSI SGR sequences, leaving the visible text.
///
/// Used for plain output when colors are disabled.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut visible = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            visible.push(c);
        }
    }
    visible
}
