//! Line operations over a flat text buffer
//!
//! Buffer content is one `String` with `\n` line separators. These helpers
//! translate between byte offsets and (line, column) positions, and handle
//! the CRLF conversion applied at the disk boundary.

use unicode_width::UnicodeWidthChar;

/// Number of display lines (an empty text still has one line)
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Convert CRLF line endings to LF
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Convert LF line endings to CRLF
///
/// Existing CRLF pairs are kept as-is, so applying this twice is the same as
/// applying it once.
pub fn to_crlf(text: &str) -> String {
    normalize_line_endings(text).replace('\n', "\r\n")
}

/// Byte offset of the start of the line containing `pos`
pub fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Byte offset of the end of the line containing `pos` (before its newline)
pub fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

/// Zero-based (line, byte column) of `pos`
pub fn position_of(text: &str, pos: usize) -> (usize, usize) {
    let pos = pos.min(text.len());
    let line = text[..pos].bytes().filter(|&b| b == b'\n').count();
    (line, pos - line_start(text, pos))
}

/// Byte offset of the start of line `line`, or None past the last line
pub fn offset_of_line(text: &str, line: usize) -> Option<usize> {
    if line == 0 {
        return Some(0);
    }
    text.match_indices('\n').nth(line - 1).map(|(i, _)| i + 1)
}

/// Byte offset of the char before `pos`
pub fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

/// Byte offset just past the char at `pos`
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..].chars().next().map_or(text.len(), |ch| pos + ch.len_utf8())
}

/// Display width of a char, with tabs expanded to `tab_width`
pub fn char_width(ch: char, tab_width: usize) -> usize {
    if ch == '\t' {
        tab_width
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Display column of byte column `col` within `line`
pub fn display_col(line: &str, col: usize, tab_width: usize) -> usize {
    line[..col.min(line.len())]
        .chars()
        .map(|ch| char_width(ch, tab_width))
        .sum()
}

/// Byte offset within `line` closest to display column `target`, never past it
pub fn byte_at_display_col(line: &str, target: usize, tab_width: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in line.char_indices() {
        let w = char_width(ch, tab_width);
        if width + w > target {
            return idx;
        }
        width += w;
    }
    line.len()
}
