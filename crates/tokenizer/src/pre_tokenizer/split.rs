//! Text splitting for pre-tokenization.
//!
//! Text is cut into word-like fragments with the GPT-2 grammar:
//!
//! ```text
//! 's|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+
//! ```
//!
//! The `regex` crate has no lookahead, so `\s+(?!\S)` is applied by hand: a
//! whitespace run that is followed by more text gives its last character to
//! the next fragment. Every character of the input lands in exactly one
//! fragment.

use regex::Regex;
use std::sync::OnceLock;

/// The GPT-2 grammar without its `\s+(?!\S)` alternative.
pub const GPT2_PATTERN: &str = r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+";

fn gpt2_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(GPT2_PATTERN).expect("GPT-2 pattern is a valid regex"))
}

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone, Copy, Default)]
pub struct Splitter;

impl Splitter {
    /// Create a new splitter.
    pub fn new() -> Self {
        Self
    }

    /// Split text into fragments, in order.
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let re = gpt2_regex();
        let mut fragments = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let Some(m) = re.find_at(text, pos) else {
                break;
            };
            let mut end = m.end();

            if end < text.len() && m.as_str().chars().all(char::is_whitespace) {
                if let Some((last, _)) = m.as_str().char_indices().last() {
                    if last > 0 {
                        end = m.start() + last;
                    }
                }
            }

            fragments.push(&text[m.start()..end]);
            pos = end;
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        Splitter::new().split(text)
    }

    #[test]
    fn test_words_keep_leading_space() {
        assert_eq!(split("hello world"), vec!["hello", " world"]);
    }

    #[test]
    fn test_contractions() {
        assert_eq!(
            split("You must've been he'll dont'che"),
            vec!["You", " must", "'ve", " been", " he", "'ll", " dont", "'", "che"]
        );
    }

    #[test]
    fn test_digits_and_symbols() {
        assert_eq!(
            split("sa9jj2r $h .,x"),
            vec!["sa", "9", "jj", "2", "r", " $", "h", " .,", "x"]
        );
    }

    #[test]
    fn test_whitespace_before_word_gives_up_last_char() {
        assert_eq!(split("wej  lkj"), vec!["wej", " ", " lkj"]);
        assert_eq!(split("__      :x"), vec!["__", "     ", " :", "x"]);
        assert_eq!(split("a\n\nb"), vec!["a", "\n", "\n", "b"]);
    }

    #[test]
    fn test_trailing_whitespace_is_one_fragment() {
        assert_eq!(split("end   "), vec!["end", "   "]);
        assert_eq!(split("   "), vec!["   "]);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(split(""), Vec::<&str>::new());
    }

    #[test]
    fn test_non_latin_letters() {
        assert_eq!(
            split("そういう事はそんなに簡単なの？"),
            vec!["そういう事はそんなに簡単なの", "？"]
        );
    }
}
