use unicode_segmentation::UnicodeSegmentation;

/// Byte index of the `char_idx`-th character, clamped to the end of `text`.
pub fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Number of characters (Unicode scalar values) in `text`
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Char length of the grapheme cluster that ends at the end of `text`
pub fn last_grapheme_chars(text: &str) -> usize {
    text.graphemes(true)
        .next_back()
        .map(|g| g.chars().count())
        .unwrap_or(0)
}

/// Char length of the grapheme cluster that starts at the beginning of `text`
pub fn first_grapheme_chars(text: &str) -> usize {
    text.graphemes(true)
        .next()
        .map(|g| g.chars().count())
        .unwrap_or(0)
}

/// Get the display width of a single character (for monospace terminal display)
/// Returns 0 for control characters, 1 for ASCII, 2 for wide CJK characters, etc.
pub fn char_width(c: char) -> usize {
    unicode_width::UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Display width of `text`, expanding tabs to `tab_width` columns
pub fn visual_width(text: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut visual_x = 0;
    for grapheme in text.graphemes(true) {
        if grapheme == "\t" {
            visual_x = (visual_x / tab_width + 1) * tab_width;
        } else {
            visual_x += grapheme.chars().map(char_width).sum::<usize>();
        }
    }
    visual_x
}

/// Longest prefix of `text` that fits in `max_width` display columns
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, grapheme) in text.grapheme_indices(true) {
        let w: usize = grapheme.chars().map(char_width).sum();
        if width + w > max_width {
            return &text[..idx];
        }
        width += w;
    }
    text
}
