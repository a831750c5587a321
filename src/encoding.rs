//! Byte-order-mark detection for raw input.
//!
//! Files saved by some editors start with a BOM or are stored as UTF-16/32.
//! [`decode`] strips the mark and returns UTF-8 text for the parser.

use crate::{Error, Result};

/// Encoding detected from the leading byte-order mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding {
    /// Detects the encoding and returns it with the length of its mark.
    ///
    /// UTF-32 marks are checked first since the UTF-32LE mark begins with
    /// the UTF-16LE one. Input without a mark is assumed to be UTF-8.
    pub fn detect(bytes: &[u8]) -> (Encoding, usize) {
        match bytes {
            [0xFF, 0xFE, 0x00, 0x00, ..] => (Encoding::Utf32Le, 4),
            [0x00, 0x00, 0xFE, 0xFF, ..] => (Encoding::Utf32Be, 4),
            [0xEF, 0xBB, 0xBF, ..] => (Encoding::Utf8, 3),
            [0xFF, 0xFE, ..] => (Encoding::Utf16Le, 2),
            [0xFE, 0xFF, ..] => (Encoding::Utf16Be, 2),
            _ => (Encoding::Utf8, 0),
        }
    }
}

/// Decodes `bytes` to UTF-8 text, honoring and removing a leading BOM.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::encoding::{decode, Encoding};
///
/// let (text, encoding) = decode(&[0xFE, 0xFF, 0x00, b'a']).unwrap();
/// assert_eq!(text, "a");
/// assert_eq!(encoding, Encoding::Utf16Be);
/// ```
///
/// # Errors
///
/// Returns [`Error::Encoding`] for invalid UTF-8, unpaired surrogates,
/// invalid code points or a byte count that does not fit the unit size.
pub fn decode(bytes: &[u8]) -> Result<(String, Encoding)> {
    let (encoding, bom_len) = Encoding::detect(bytes);
    let body = &bytes[bom_len..];
    let text = match encoding {
        Encoding::Utf8 => std::str::from_utf8(body)
            .map(str::to_string)
            .map_err(|e| Error::encoding(&format!("invalid UTF-8: {}", e)))?,
        Encoding::Utf16Le => decode_utf16(body, u16::from_le_bytes)?,
        Encoding::Utf16Be => decode_utf16(body, u16::from_be_bytes)?,
        Encoding::Utf32Le => decode_utf32(body, u32::from_le_bytes)?,
        Encoding::Utf32Be => decode_utf32(body, u32::from_be_bytes)?,
    };
    Ok((text, encoding))
}

fn decode_utf16(body: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    if body.len() % 2 != 0 {
        return Err(Error::encoding("UTF-16 input has an odd number of bytes"));
    }
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| Error::encoding(&format!("invalid UTF-16: {}", e)))
}

fn decode_utf32(body: &[u8], unit: fn([u8; 4]) -> u32) -> Result<String> {
    if body.len() % 4 != 0 {
        return Err(Error::encoding(
            "UTF-32 input length is not a multiple of four bytes",
        ));
    }
    body.chunks_exact(4)
        .map(|quad| {
            let code = unit([quad[0], quad[1], quad[2], quad[3]]);
            char::from_u32(code)
                .ok_or_else(|| Error::encoding(&format!("invalid code point {:#x}", code)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_plain_utf8() {
        let (text, encoding) = decode(b"a = 1").unwrap();
        assert_eq!(text, "a = 1");
        assert_eq!(encoding, Encoding::Utf8);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let (text, encoding) = decode(b"\xEF\xBB\xBFa = 1").unwrap();
        assert_eq!(text, "a = 1");
        assert_eq!(encoding, Encoding::Utf8);
    }

    #[test]
    fn test_utf16_le() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "k = \"é\"".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (text, encoding) = decode(&bytes).unwrap();
        assert_eq!(text, "k = \"é\"");
        assert_eq!(encoding, Encoding::Utf16Le);
    }

    #[test]
    fn test_utf32_le_wins_over_utf16_le() {
        let mut bytes = vec![0xFF, 0xFE, 0x00, 0x00];
        for ch in "x".chars() {
            bytes.extend_from_slice(&(ch as u32).to_le_bytes());
        }
        let (text, encoding) = decode(&bytes).unwrap();
        assert_eq!(text, "x");
        assert_eq!(encoding, Encoding::Utf32Le);
    }

    #[test]
    fn test_utf32_be() {
        let (text, encoding) = decode(&[0x00, 0x00, 0xFE, 0xFF, 0x00, 0x01, 0xF6, 0x00]).unwrap();
        assert_eq!(text, "\u{1F600}");
        assert_eq!(encoding, Encoding::Utf32Be);
    }

    #[test]
    fn test_malformed_inputs() {
        assert_eq!(decode(b"\xC3").unwrap_err().kind(), ErrorKind::Encoding);
        assert_eq!(decode(&[0xFE, 0xFF, 0x00]).unwrap_err().kind(), ErrorKind::Encoding);
        // lone high surrogate
        assert_eq!(
            decode(&[0xFE, 0xFF, 0xD8, 0x00]).unwrap_err().kind(),
            ErrorKind::Encoding
        );
    }
}
