use tabmerge_recon::Cell;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return s
            .chars()
            .next()
            .filter(|ch| ch.width().unwrap_or(0) <= width)
            .map(String::from)
            .unwrap_or_default();
    }

    // Leave room for ".."
    let budget = width - 2;
    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in s.char_indices() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }

    format!("{}..", &s[..end_byte])
}

/// Pad or truncate a string to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let sw = display_width(s);
    if sw > width {
        truncate_display(s, width)
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}

/// One-line rendering of a cell: missing is empty, newlines are shown as `\n`.
pub(crate) fn cell_text(cell: &Cell) -> String {
    cell.as_deref().unwrap_or("").replace('\n', "\\n")
}

/// Align rows into columns separated by two spaces, each column at most
/// `max_width` display columns wide. Trailing padding is trimmed.
pub(crate) fn render_table(rows: &[Vec<Cell>], max_width: usize) -> String {
    let texts: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let ncols = texts.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; ncols];
    for row in &texts {
        for (i, t) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(t).min(max_width));
        }
    }

    let mut out = String::new();
    for row in &texts {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, t)| pad_right(t, widths[i]))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
