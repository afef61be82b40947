use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(crate) fn to_u16_saturating(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Cuts `text` to at most `width` terminal columns, ending in `…` when cut.
pub(crate) fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("notes.txt", 20), "notes.txt");
    }

    #[test]
    fn long_text_gets_ellipsis_within_width() {
        let cut = truncate_to_width("a_very_long_file_name.txt", 10);
        assert_eq!(cut, "a_very_lo…");
        assert_eq!(cut.width(), 10);
    }

    #[test]
    fn wide_chars_count_double() {
        let cut = truncate_to_width("日本語のファイル.txt", 7);
        assert!(cut.width() <= 7);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn saturates_large_values() {
        assert_eq!(to_u16_saturating(70_000), u16::MAX);
        assert_eq!(to_u16_saturating(12), 12);
    }
}
