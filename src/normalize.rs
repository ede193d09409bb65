//! Text cleanup and pre-tokenization.
//!
//! Input is cleaned (invalid characters dropped, whitespace collapsed),
//! split on spaces, lowercased and split again around ASCII punctuation.
//! Every produced token remembers the code-point offset of its first
//! character in the caller's original text.

/// ASCII punctuation isolated into single-character tokens.
const PUNCTUATION: &str = r#"[~`!@#$%^&*(){}[];:"'<,.>?/\|-_+="#;

/// A word or punctuation token with its offset into the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Code-point offset of the first character in the untouched input.
    pub offset: usize,
}

impl Token {
    fn new(text: impl Into<String>, offset: usize) -> Self {
        Token {
            text: text.into(),
            offset,
        }
    }
}

#[inline]
fn is_invalid(ch: char) -> bool {
    ch == '\0' || ch == '\u{fffd}'
}

/// Whitespace as the reference vocabulary's tooling classified it, which is
/// deliberately not `char::is_whitespace`: Unicode White_Space without
/// U+0085 (NEL), plus U+FEFF (BOM). NEL is therefore kept as a word
/// character and a BOM separates words.
#[inline]
pub fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

#[inline]
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation() && PUNCTUATION.contains(ch)
}

/// Drops NUL and U+FFFD and collapses whitespace runs into one ASCII space,
/// never emitting a leading space.
///
/// Returns the cleaned text and, for every code point of it, the code-point
/// offset of the character it came from in `text`.
pub fn clean_text(text: &str) -> (String, Vec<usize>) {
    let mut out = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len());
    let mut last_was_space = false;

    for (orig, ch) in text.chars().enumerate() {
        if is_invalid(ch) {
            continue;
        }
        if is_whitespace(ch) {
            if out.is_empty() || last_was_space {
                continue;
            }
            out.push(' ');
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
        offsets.push(orig);
    }
    (out, offsets)
}

#[inline]
fn offset_at(offsets: &[usize], pos: usize) -> usize {
    match offsets.get(pos) {
        Some(&o) => o,
        None => offsets.last().map_or(0, |&o| o + 1),
    }
}

/// Splits one whitespace-free word into maximal non-punctuation runs and
/// single punctuation characters.
///
/// `start` is the position of the word's first code point in the cleaned
/// text; `offsets` is the map produced by [`clean_text`].
pub fn split_on_punc(word: &str, start: usize, offsets: &[usize]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut pos = start;
    let mut start_new_word = true;

    for ch in word.chars() {
        if is_punctuation(ch) {
            tokens.push(Token::new(ch, offset_at(offsets, pos)));
            start_new_word = true;
        } else {
            if start_new_word {
                tokens.push(Token::new(String::new(), offset_at(offsets, pos)));
                start_new_word = false;
            }
            if let Some(last) = tokens.last_mut() {
                last.text.push(ch);
            }
        }
        pos += 1;
    }
    tokens
}

/// Full pre-tokenization: clean, split on spaces, lowercase, isolate
/// punctuation.
pub fn process_input(text: &str) -> Vec<Token> {
    let (cleaned, offsets) = clean_text(text);
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for word in cleaned.split(' ') {
        let word = word.to_lowercase();
        tokens.extend(split_on_punc(&word, cursor, &offsets));
        cursor += word.chars().count() + 1;
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let (a, _) = clean_text("a   b");
        let (b, _) = clean_text("a b");
        assert_eq!(a, "a b");
        assert_eq!(a, b);

        let (mixed, offsets) = clean_text("a\t\n\u{3000} b");
        assert_eq!(mixed, "a b");
        assert_eq!(offsets, vec![0, 1, 5]);
    }

    #[test]
    fn test_clean_text_no_leading_space() {
        let (cleaned, offsets) = clean_text("  foo bar");
        assert_eq!(cleaned, "foo bar");
        assert_eq!(offsets, vec![2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_clean_text_keeps_single_trailing_space() {
        let (cleaned, _) = clean_text("foo   ");
        assert_eq!(cleaned, "foo ");
    }

    #[test]
    fn test_clean_text_drops_invalid() {
        let (cleaned, offsets) = clean_text("a\0b\u{fffd}c");
        assert_eq!(cleaned, "abc");
        assert_eq!(offsets, vec![0, 2, 4]);
    }

    #[test]
    fn test_invalid_between_spaces_does_not_split_run() {
        let (cleaned, _) = clean_text("a \0 b");
        assert_eq!(cleaned, "a b");
    }

    #[test]
    fn test_whitespace_class() {
        assert!(is_whitespace('\u{feff}'));
        assert!(is_whitespace('\u{2009}'));
        assert!(!is_whitespace('\u{85}'));
        assert!(!is_whitespace('x'));
    }

    #[test]
    fn test_punctuation_set() {
        for ch in "[]{}()~`!@#$%^&*;:\"'<,.>?/\\|-_+=".chars() {
            assert!(is_punctuation(ch), "{ch:?} should be punctuation");
        }
        assert!(!is_punctuation('a'));
        assert!(!is_punctuation('\u{ff0c}'));
        assert!(!is_punctuation('\u{a1}'));
    }

    #[test]
    fn test_punctuation_isolation() {
        let tokens = process_input("hello, world!");
        assert_eq!(texts(&tokens), vec!["hello", ",", "world", "!"]);
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 5, 7, 12]);
    }

    #[test]
    fn test_word_starting_with_punctuation() {
        let tokens = process_input("(don't)");
        assert_eq!(texts(&tokens), vec!["(", "don", "'", "t", ")"]);
    }

    #[test]
    fn test_offsets_skip_leading_whitespace() {
        let input = "  foo bar";
        let tokens = process_input(input);
        assert_eq!(texts(&tokens), vec!["foo", "bar"]);
        assert_eq!(tokens[0].offset, input.find('f').unwrap());
        assert_eq!(tokens[1].offset, input.find('b').unwrap());
    }

    #[test]
    fn test_offsets_are_code_points() {
        let tokens = process_input("日本  語 x");
        assert_eq!(texts(&tokens), vec!["日本", "語", "x"]);
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 4, 6]);
    }

    #[test]
    fn test_lowercases_words() {
        let tokens = process_input("Hello WORLD Straße");
        assert_eq!(texts(&tokens), vec!["hello", "world", "straße"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(process_input("").is_empty());
        assert!(process_input("   \t\n ").is_empty());
        assert!(process_input("\0\u{fffd}").is_empty());
    }

    #[test]
    fn test_split_on_punc_uses_start_position() {
        let (cleaned, offsets) = clean_text("x  a.b");
        assert_eq!(cleaned, "x a.b");
        let tokens = split_on_punc("a.b", 2, &offsets);
        assert_eq!(
            tokens,
            vec![Token::new("a", 3), Token::new(".", 4), Token::new("b", 5)]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_clean_text_offsets_point_at_source(text in "\\PC{0,40}") {
            let original: Vec<char> = text.chars().collect();
            let (cleaned, offsets) = clean_text(&text);
            prop_assert_eq!(cleaned.chars().count(), offsets.len());
            prop_assert!(!cleaned.starts_with(' '));
            prop_assert!(!cleaned.contains("  "));
            for (ch, &off) in cleaned.chars().zip(offsets.iter()) {
                if ch == ' ' {
                    prop_assert!(is_whitespace(original[off]));
                } else {
                    prop_assert_eq!(ch, original[off]);
                }
            }
            prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_tokens_are_non_empty_and_space_free(text in "[a-zA-Z ,.!?'\t]{0,60}") {
            let tokens = process_input(&text);
            for t in &tokens {
                prop_assert!(!t.text.is_empty());
                prop_assert!(!t.text.contains(' '));
                prop_assert!(t.offset < text.chars().count());
            }
            prop_assert!(tokens.windows(2).all(|w| w[0].offset < w[1].offset));
        }
    }
}
