//! Text shaping helpers for captured command output.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TAB_WIDTH: usize = 8;

/// Split raw captured bytes into display lines.
///
/// Invalid UTF-8 is replaced, `\r\n` and `\n` both end a line, tabs are
/// expanded to the next multiple of eight columns and remaining control
/// characters are dropped so they cannot move the terminal cursor.
pub fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(sanitize_line)
        .collect()
}

fn sanitize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for ch in line.chars() {
        match ch {
            '\t' => {
                let pad = TAB_WIDTH - column % TAB_WIDTH;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            c if c.is_control() => {}
            c => {
                out.push(c);
                column += c.width().unwrap_or(0);
            }
        }
    }
    out
}

/// Terminal column width of `text`
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Longest prefix of `text` that fits in `max_width` columns
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            return &text[..idx];
        }
        width += ch_width;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_handles_line_endings() {
        let lines = split_lines(b"one\r\ntwo\nthree");
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_split_lines_empty_output() {
        assert!(split_lines(b"").is_empty());
        assert_eq!(split_lines(b"\n"), vec![""]);
    }

    #[test]
    fn test_split_lines_invalid_utf8() {
        let lines = split_lines(&[b'o', b'k', 0xff, b'\n']);
        assert_eq!(lines, vec!["ok\u{fffd}"]);
    }

    #[test]
    fn test_tabs_expanded_and_controls_dropped() {
        let lines = split_lines(b"a\tb\x07c\n\tx");
        assert_eq!(lines, vec!["a       bc", "        x"]);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello world", 5), "hello");
        assert_eq!(truncate_to_width("short", 80), "short");
        assert_eq!(truncate_to_width("anything", 0), "");
        // wide characters take two columns
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(display_width("日本語"), 6);
    }
}
