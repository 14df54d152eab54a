//! Plain-text helpers shared by the text-based criteria

/// Whitespace tokens that contain at least one letter or digit.
///
/// Punctuation-only tokens such as `-` or `…` are not words.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
}

pub fn count_words(text: &str) -> usize {
    words(text).count()
}

/// Split text into sentences at `.`, `!` or `?` followed by whitespace.
///
/// Terminal punctuation stays attached to its sentence. Empty pieces are
/// dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let at_boundary = match chars.peek() {
            Some((_, next)) => next.is_whitespace(),
            None => true,
        };
        if at_boundary {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// First `max_chars` characters of `text` (char-boundary safe)
pub fn prefix_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words_skips_punctuation() {
        assert_eq!(count_words("Hello , world - 42 times!"), 4);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("— … ?"), 0);
    }

    #[test]
    fn test_split_sentences() {
        let s = split_sentences("What is it? It is 3.5 kg. Great!  Trailing part");
        assert_eq!(s, vec!["What is it?", "It is 3.5 kg.", "Great!", "Trailing part"]);
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_prefix_chars_unicode() {
        assert_eq!(prefix_chars("článok", 3), "člá");
        assert_eq!(prefix_chars("ab", 10), "ab");
    }
}
