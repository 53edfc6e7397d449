//! Base64url encodings used in JWK documents (RFC 7515 §2, RFC 7518 §6.3.1).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rsa::BigUint;

/// Encode bytes with the URL-safe alphabet and no `=` padding.
#[must_use]
pub fn encode_base64url(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Encode a big-endian unsigned integer using its minimal byte length.
///
/// Leading zero bytes are dropped, so the encoded length is
/// `ceil(bitlength / 8)`. Zero encodes as the empty string.
#[must_use]
pub fn encode_unsigned_be(bytes: &[u8]) -> String {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    encode_base64url(&bytes[start..])
}

/// Encode an RSA modulus or exponent as a JWK `n`/`e` value.
#[must_use]
pub fn encode_biguint_base64url(n: &BigUint) -> String {
    encode_unsigned_be(&n.to_bytes_be())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_padding() {
        assert_eq!(encode_base64url(b"a"), "YQ");
        assert_eq!(encode_base64url(b"ab"), "YWI");
        assert_eq!(encode_base64url(b"abc"), "YWJj");
    }

    #[test]
    fn test_url_safe_alphabet() {
        // 0xfb 0xff encodes to "+/8" in the standard alphabet.
        assert_eq!(encode_base64url(&[0xfb, 0xff]), "-_8");
    }

    #[test]
    fn test_standard_exponent() {
        assert_eq!(encode_biguint_base64url(&BigUint::from(65537u32)), "AQAB");
    }

    #[test]
    fn test_leading_zeros_dropped() {
        assert_eq!(encode_unsigned_be(&[0, 0, 1, 0, 1]), "AQAB");
    }

    #[test]
    fn test_zero_is_empty() {
        assert_eq!(encode_unsigned_be(&[]), "");
        assert_eq!(encode_unsigned_be(&[0, 0]), "");
        assert_eq!(encode_biguint_base64url(&BigUint::from(0u32)), "");
    }

    #[test]
    fn test_high_bit_not_padded() {
        // 255 needs one byte; no sign byte is prepended.
        assert_eq!(encode_biguint_base64url(&BigUint::from(255u32)), "_w");
        assert_eq!(encode_biguint_base64url(&BigUint::from(256u32)), "AQA");
    }
}
