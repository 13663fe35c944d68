//! Reversible URL-safe encoding of taxonomy names and terms.
//!
//! Names and terms may contain spaces, slashes, or any other character, so
//! they are carried in URLs as unpadded base64url tokens. Each token is a
//! single path segment.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encode an identifier into a single URL path segment.
///
/// ```
/// use taxon_core::codec::{decode_segment, encode_segment};
///
/// let token = encode_segment("rust / async, 2024!");
/// assert!(!token.contains('/'));
/// assert_eq!(decode_segment(&token).as_deref(), Some("rust / async, 2024!"));
/// ```
pub fn encode_segment(value: &str) -> String {
    URL_SAFE_NO_PAD.encode(value.as_bytes())
}

/// Decode a path segment produced by [`encode_segment`].
///
/// Returns `None` for anything that is not valid unpadded base64url or does
/// not decode to UTF-8, so callers can fall through to other handlers.
pub fn decode_segment(segment: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(segment.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_with_spaces_and_punctuation() {
        let term = "hello, world: it's #1 (really)?";
        let encoded = encode_segment(term);
        assert_eq!(decode_segment(&encoded).as_deref(), Some(term));
    }

    #[test]
    fn test_round_trip_unicode() {
        let term = "café naïve 日本語";
        assert_eq!(decode_segment(&encode_segment(term)).as_deref(), Some(term));
    }

    #[test]
    fn test_encoded_is_path_safe() {
        let encoded = encode_segment("???>>>///+++");
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_known_value() {
        assert_eq!(encode_segment("tags"), "dGFncw");
        assert_eq!(decode_segment("dGFncw").as_deref(), Some("tags"));
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(encode_segment(""), "");
        assert_eq!(decode_segment("").as_deref(), Some(""));
    }

    #[test]
    fn test_malformed_alphabet_is_no_match() {
        assert_eq!(decode_segment("not base64!"), None);
        assert_eq!(decode_segment("ab+/"), None);
    }

    #[test]
    fn test_padded_input_is_no_match() {
        assert_eq!(decode_segment("dGFncw=="), None);
    }

    #[test]
    fn test_invalid_length_is_no_match() {
        // A single trailing symbol can never be produced by the encoder.
        assert_eq!(decode_segment("dGFnc"), None);
    }

    #[test]
    fn test_invalid_utf8_is_no_match() {
        let encoded = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]);
        assert_eq!(decode_segment(&encoded), None);
    }
}
