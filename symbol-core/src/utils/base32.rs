//! RFC 4648 base32 codec (no padding) for address encoding.

use thiserror::Error;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// An error decoding a base32 string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Base32DecodeError {
    /// A character outside `A-Z2-7`
    #[error("invalid base32 character: {0:?}")]
    InvalidCharacter(char),
}

/// Encodes bytes as unpadded RFC 4648 base32.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buffer = 0u16;
    let mut bits = 0u32;
    for &byte in data {
        buffer = (buffer << 8) | byte as u16;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

/// Decodes an unpadded RFC 4648 base32 string. Trailing bits that do not form
/// a full byte are discarded, matching the encoder.
pub fn decode(input: &str) -> Result<Vec<u8>, Base32DecodeError> {
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer = 0u16;
    let mut bits = 0u32;
    for c in input.chars() {
        let value = match c {
            'A'..='Z' => c as u16 - 'A' as u16,
            '2'..='7' => c as u16 - '2' as u16 + 26,
            _ => return Err(Base32DecodeError::InvalidCharacter(c)),
        };
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // RFC 4648 §10 test vectors, padding stripped
    fn rfc4648_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "MY");
        assert_eq!(encode(b"fo"), "MZXQ");
        assert_eq!(encode(b"foo"), "MZXW6");
        assert_eq!(encode(b"foob"), "MZXW6YQ");
        assert_eq!(encode(b"fooba"), "MZXW6YTB");
        assert_eq!(encode(b"foobar"), "MZXW6YTBOI");
    }

    #[test]
    fn round_trips() {
        for data in [&b""[..], b"f", b"foobar", &[0u8; 24], &[0xff; 24]] {
            assert_eq!(decode(&encode(data)).unwrap(), data);
        }
    }

    #[test]
    fn address_length_encoding() {
        // 24 raw bytes produce exactly 39 characters
        assert_eq!(encode(&[0u8; 24]).len(), 39);
    }

    #[test]
    fn rejects_invalid_characters() {
        assert_eq!(decode("AB0"), Err(Base32DecodeError::InvalidCharacter('0')));
        assert_eq!(decode("ab"), Err(Base32DecodeError::InvalidCharacter('a')));
    }
}
