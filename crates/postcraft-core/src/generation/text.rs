//! Small text helpers used while packaging posts.

/// Marker appended to text cut by [`trim_to_word_count`].
pub const ELLIPSIS: &str = "...";

/// Keep the first `word_count` whitespace-separated words.
///
/// Text that already fits is returned unchanged, original spacing included.
pub fn trim_to_word_count(text: &str, word_count: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= word_count {
        return text.to_string();
    }
    format!("{}{}", words[..word_count].join(" "), ELLIPSIS)
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_long_text() {
        let text = "one  two\nthree four five";
        assert_eq!(trim_to_word_count(text, 3), "one two three...");
    }

    #[test]
    fn test_trim_short_text_unchanged() {
        let text = "one  two\nthree";
        assert_eq!(trim_to_word_count(text, 3), text);
        assert_eq!(trim_to_word_count("", 5), "");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}
