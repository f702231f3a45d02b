//! Small shared helpers.

use std::borrow::Cow;

/// Get a time-based seed value.
pub fn time_seed_nanos() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(12345)
}

/// Decode archive page bytes to a string.
///
/// 1. UTF-8 if the bytes are valid UTF-8 (a BOM is handled by encoding_rs)
/// 2. otherwise the `hint_encoding` label, if it names a known encoding
/// 3. otherwise Windows-1252
///
/// Borrows when the input is already valid UTF-8.
///
/// # Examples
///
/// ```
/// use chmdict::util::decode_text;
///
/// assert_eq!(decode_text("Кот".as_bytes(), None), "Кот");
/// assert_eq!(decode_text(&[0xCA, 0xEE, 0xF2], Some("cp1251")), "Кот");
/// assert_eq!(decode_text(&[0xE9], None), "é");
/// ```
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_is_borrowed() {
        assert!(matches!(decode_text(b"plain", None), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_bom_is_stripped() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFword", None), "word");
    }

    #[test]
    fn test_unknown_hint_falls_back_to_windows_1252() {
        assert_eq!(decode_text(&[0x93, b'x', 0x94], Some("no-such-encoding")), "\u{201C}x\u{201D}");
    }
}
