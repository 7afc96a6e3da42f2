use unicode_width::UnicodeWidthChar;

/// Shorten a string for single-line list rendering.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let keep: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{keep}...")
    }
}

/// Byte offset of the given character index, clamped to the end of the
/// string. Editing operates on char indices; `String` mutation wants bytes.
pub fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Visual (line, column) of a cursor inside text rendered with wrapping at
/// `max_width` display columns. Explicit newlines force a break; anything
/// wider than the viewport wraps. Used to place the terminal cursor over the
/// multiline form inputs.
pub fn wrapped_cursor(text: &str, cursor: usize, max_width: usize) -> (u16, u16) {
    if max_width == 0 {
        return (0, 0);
    }

    let mut line: u16 = 0;
    let mut col_width: usize = 0;
    for (idx, ch) in text.chars().enumerate() {
        if idx == cursor {
            break;
        }
        if ch == '\n' {
            line += 1;
            col_width = 0;
            continue;
        }
        let width = ch.width().unwrap_or(1);
        if col_width + width > max_width {
            line += 1;
            col_width = width;
        } else {
            col_width += width;
        }
    }

    // Cursor sitting exactly at the wrap point starts the next line.
    if col_width >= max_width {
        line += 1;
        col_width = 0;
    }

    (line, col_width as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("short", 20), "short");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate("This is a very long string indeed", 20);
        assert_eq!(result, "This is a very lo...");
        assert_eq!(result.chars().count(), 20);
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let result = truncate("ééééééééééééééééééééééééé", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_byte_index_ascii() {
        assert_eq!(byte_index("hello", 2), 2);
        assert_eq!(byte_index("hello", 5), 5);
        assert_eq!(byte_index("hello", 99), 5);
    }

    #[test]
    fn test_byte_index_multibyte() {
        let s = "aéb";
        assert_eq!(byte_index(s, 0), 0);
        assert_eq!(byte_index(s, 1), 1);
        assert_eq!(byte_index(s, 2), 3); // é is two bytes
    }

    #[test]
    fn test_wrapped_cursor_single_line() {
        assert_eq!(wrapped_cursor("hello", 3, 10), (0, 3));
        assert_eq!(wrapped_cursor("", 0, 10), (0, 0));
    }

    #[test]
    fn test_wrapped_cursor_explicit_newline() {
        assert_eq!(wrapped_cursor("ab\ncd", 4, 10), (1, 1));
    }

    #[test]
    fn test_wrapped_cursor_auto_wrap() {
        // Width 4: "abcd" fills the first line, "ef" continues on the next.
        assert_eq!(wrapped_cursor("abcdef", 5, 4), (1, 1));
    }

    #[test]
    fn test_wrapped_cursor_at_wrap_boundary() {
        assert_eq!(wrapped_cursor("abcd", 4, 4), (1, 0));
    }

    #[test]
    fn test_wrapped_cursor_zero_width_viewport() {
        assert_eq!(wrapped_cursor("abc", 2, 0), (0, 0));
    }
}
