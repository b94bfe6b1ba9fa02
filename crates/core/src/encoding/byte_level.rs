//! Byte-level alphabet and decoding.
//!
//! Every raw byte is mapped to a printable Unicode character so that BPE can
//! work on ordinary strings, including for whitespace and control bytes:
//!
//! - Bytes 33-126, 161-172 and 174-255 map to the codepoint of the same value
//! - The other 68 bytes (0-32, 127-160, 173), in ascending order, map to
//!   U+0100 onwards
//!
//! Space (0x20) therefore becomes `Ġ` (U+0120) and newline becomes `Ċ`
//! (U+010A). Vocabularies are written in this alphabet, so the table must be
//! reproduced exactly.

use crate::core::token::Token;
use ahash::AHashMap;

/// UTF-8 encoding of U+FFFD, emitted for characters outside the alphabet.
const REPLACEMENT_BYTES: &[u8] = "\u{FFFD}".as_bytes();

/// Whether a byte maps to the codepoint of the same value.
#[inline]
fn is_printable(byte: u8) -> bool {
    matches!(byte, 33..=126 | 161..=172 | 174..=255)
}

/// Bijection between the 256 byte values and 256 printable characters.
#[derive(Debug, Clone)]
pub struct ByteCodepointMap {
    /// Byte to character mapping (pre-computed for speed)
    byte_encoder: [char; 256],
    /// Character to byte mapping for decoding
    byte_decoder: AHashMap<char, u8>,
}

impl ByteCodepointMap {
    /// Build both tables.
    pub fn new() -> Self {
        let byte_encoder = Self::build_byte_encoder();
        let byte_decoder = byte_encoder
            .iter()
            .enumerate()
            .map(|(byte, &ch)| (ch, byte as u8))
            .collect();

        Self {
            byte_encoder,
            byte_decoder,
        }
    }

    fn build_byte_encoder() -> [char; 256] {
        let mut byte_encoder = ['\0'; 256];
        let mut shifted = 0u32;

        for byte in 0..=u8::MAX {
            let codepoint = if is_printable(byte) {
                u32::from(byte)
            } else {
                shifted += 1;
                255 + shifted
            };
            // at most 256 + 67, always a valid scalar value
            byte_encoder[byte as usize] =
                char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER);
        }

        byte_encoder
    }

    /// Character for a byte.
    #[inline]
    pub fn byte_to_char(&self, byte: u8) -> char {
        self.byte_encoder[byte as usize]
    }

    /// Byte for a character, or `None` if the character is not in the alphabet.
    #[inline]
    pub fn char_to_byte(&self, ch: char) -> Option<u8> {
        self.byte_decoder.get(&ch).copied()
    }

    /// Whether a character belongs to the byte-level alphabet.
    #[inline]
    pub fn contains_char(&self, ch: char) -> bool {
        self.byte_decoder.contains_key(&ch)
    }

    /// Re-encode raw bytes as a visible string.
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.byte_to_char(b)).collect()
    }

    /// Map a visible string back to raw bytes.
    ///
    /// Characters outside the alphabet contribute the UTF-8 bytes of U+FFFD.
    pub fn decode_visible(&self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len());
        for ch in text.chars() {
            match self.char_to_byte(ch) {
                Some(byte) => bytes.push(byte),
                None => bytes.extend_from_slice(REPLACEMENT_BYTES),
            }
        }
        bytes
    }
}

impl Default for ByteCodepointMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns tokens back into text.
///
/// Each token is decoded on its own: its characters are mapped back to
/// bytes and the bytes are read as UTF-8, with invalid sequences replaced by
/// U+FFFD. A token holding only part of a multi-byte character therefore
/// renders as replacement characters. Special tokens render their raw text.
#[derive(Debug, Clone, Default)]
pub struct ByteLevelDecoder {
    bytes: ByteCodepointMap,
}

impl ByteLevelDecoder {
    /// Create a decoder over a byte map.
    pub fn new(bytes: ByteCodepointMap) -> Self {
        Self { bytes }
    }

    /// Decode one token's text.
    pub fn decode_token(&self, token: &Token) -> String {
        if token.is_special() {
            return token.text.to_string();
        }
        let bytes = self.bytes.decode_visible(&token.text);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Concatenate the decoded text of every token.
    pub fn render_text(&self, tokens: &[Token]) -> String {
        tokens.iter().map(|token| self.decode_token(token)).collect()
    }

    /// Same tokens, with text replaced by its decoded form.
    pub fn decode_tokens(&self, tokens: &[Token]) -> Vec<Token> {
        tokens
            .iter()
            .map(|token| Token::new(token.id, self.decode_token(token)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::token::UNK_TOKEN_ID;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_byte_encoder_layout() {
        let map = ByteCodepointMap::new();
        assert_eq!(map.byte_to_char(0) as u32, 256);
        assert_eq!(map.byte_to_char(b' '), 'Ġ');
        assert_eq!(map.byte_to_char(b'\n'), 'Ċ');
        assert_eq!(map.byte_to_char(127) as u32, 256 + 33);
        assert_eq!(map.byte_to_char(160) as u32, 256 + 66);
        assert_eq!(map.byte_to_char(173) as u32, 256 + 67);
        assert_eq!(map.byte_to_char(b'!'), '!');
        assert_eq!(map.byte_to_char(255), 'ÿ');
    }

    #[test]
    fn test_mapping_is_bijective() {
        let map = ByteCodepointMap::new();
        let chars: HashSet<char> = (0..=u8::MAX).map(|b| map.byte_to_char(b)).collect();
        assert_eq!(chars.len(), 256);

        for b in 0..=u8::MAX {
            assert_eq!(map.char_to_byte(map.byte_to_char(b)), Some(b));
        }
        assert_eq!(map.char_to_byte(' '), None);
        assert!(!map.contains_char('\u{4e00}'));
    }

    #[test]
    fn test_encode_with_space() {
        let map = ByteCodepointMap::new();
        assert_eq!(map.encode_bytes(b" hello"), "Ġhello");
        assert_eq!(map.encode_bytes("ロ".as_bytes()), "ãĥŃ");
    }

    #[test]
    fn test_decode_token_partial_character() {
        let decoder = ByteLevelDecoder::default();
        // first two bytes of a three-byte character
        let token = Token::new(163, "ç°");
        assert_eq!(decoder.decode_token(&token), "\u{FFFD}");
    }

    #[test]
    fn test_render_text() {
        let decoder = ByteLevelDecoder::default();
        let tokens = vec![
            Token::new(1, "Hello"),
            Token::new(2, "Ġworld"),
            Token::new(3, "ãĥŃ"),
        ];
        assert_eq!(decoder.render_text(&tokens), "Hello worldロ");

        let decoded = decoder.decode_tokens(&tokens);
        assert_eq!(decoded[1], Token::new(2, " world"));
    }

    #[test]
    fn test_special_tokens_render_verbatim() {
        let decoder = ByteLevelDecoder::default();
        let unk = Token::new(UNK_TOKEN_ID, "<unk token>");
        assert_eq!(decoder.render_text(&[unk]), "<unk token>");
    }

    #[test]
    fn test_unmapped_char_becomes_replacement() {
        let decoder = ByteLevelDecoder::default();
        assert_eq!(decoder.decode_token(&Token::new(0, "a b")), "a\u{FFFD}b");
    }

    proptest! {
        #[test]
        fn prop_bytes_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let map = ByteCodepointMap::new();
            let visible = map.encode_bytes(&bytes);
            prop_assert_eq!(visible.chars().count(), bytes.len());
            prop_assert_eq!(map.decode_visible(&visible), bytes);
        }

        #[test]
        fn prop_render_recovers_utf8(text in "\\PC{0,40}") {
            let map = ByteCodepointMap::new();
            let token = Token::new(0, map.encode_bytes(text.as_bytes()));
            let decoder = ByteLevelDecoder::new(map);
            prop_assert_eq!(decoder.render_text(&[token]), text);
        }
    }
}
