//! Stripe webhook signature verification.
//!
//! Implements verification of the `stripe-signature` header using
//! HMAC-SHA256 over the signed payload `"{t}.{rawBody}"`, with a
//! constant-time comparison of the hex-encoded signatures.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Parsed components from the stripe-signature header.
///
/// Format: `t=<unix-seconds>,v1=<hex-hmac>`. Additional `key=value` pairs
/// are ignored and the pairs carry no ordering dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Raw `t` value. Kept as the literal header string: the signed
    /// payload is built from these exact bytes, so it is never parsed
    /// into an integer and re-formatted.
    pub timestamp: String,

    /// Hex-encoded v1 signature as provided by the sender.
    pub v1_signature: String,
}

impl SignatureHeader {
    /// Parses a stripe-signature header string.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::BadSignatureFormat` if either the `t` or
    /// the `v1` component is absent.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<&str> = None;
        let mut v1_signature: Option<&str> = None;

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };

            match key.trim() {
                "t" => timestamp = Some(value.trim()),
                "v1" => v1_signature = Some(value.trim()),
                // Unknown pairs are ignored for forward compatibility
                _ => {}
            }
        }

        match (timestamp, v1_signature) {
            (Some(t), Some(v1)) => Ok(SignatureHeader {
                timestamp: t.to_string(),
                v1_signature: v1.to_string(),
            }),
            _ => Err(WebhookError::BadSignatureFormat),
        }
    }
}

/// Verifier for Stripe webhook signatures.
pub struct WebhookVerifier {
    /// The webhook signing secret from the Stripe dashboard.
    secret: SecretString,
}

impl WebhookVerifier {
    /// Creates a new verifier with the given webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Verifies the signature header against the raw payload bytes.
    ///
    /// The payload must be the request body exactly as received; any
    /// re-encoding changes the byte sequence and invalidates the MAC.
    ///
    /// # Errors
    ///
    /// - `BadSignatureFormat` - header is missing `t` or `v1`
    /// - `InvalidSignature` - the v1 signature does not match
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        let expected = self.compute_signature(&header.timestamp, payload);

        if !constant_time_compare(expected.as_bytes(), header.v1_signature.as_bytes()) {
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }

    /// Computes the hex-encoded HMAC-SHA256 of `"{timestamp}.{payload}"`.
    fn compute_signature(&self, timestamp: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Constant-time comparison of two byte slices.
///
/// Unequal lengths short-circuit to "not equal"; the body of the
/// comparison is branch-data-independent.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a valid signature for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, timestamp: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";

    // ══════════════════════════════════════════════════════════════
    // SignatureHeader Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_t_and_v1() {
        let signature = "a".repeat(64);
        let header_str = format!("t=1234567890,v1={}", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, "1234567890");
        assert_eq!(header.v1_signature, signature);
    }

    #[test]
    fn parse_header_order_does_not_matter() {
        let signature = "b".repeat(64);
        let header_str = format!("v1={},t=1234567890", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, "1234567890");
        assert_eq!(header.v1_signature, signature);
    }

    #[test]
    fn parse_header_ignores_unknown_pairs() {
        let signature = "a".repeat(64);
        let header_str = format!("t=1234567890,v1={},v0=legacy,scheme=hmac", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, "1234567890");
        assert_eq!(header.v1_signature, signature);
    }

    #[test]
    fn parse_header_missing_timestamp_fails() {
        let header_str = format!("v1={}", "a".repeat(64));

        let result = SignatureHeader::parse(&header_str);

        assert!(matches!(result, Err(WebhookError::BadSignatureFormat)));
    }

    #[test]
    fn parse_header_missing_v1_fails() {
        let result = SignatureHeader::parse("t=123");

        assert!(matches!(result, Err(WebhookError::BadSignatureFormat)));
    }

    #[test]
    fn parse_header_empty_fails() {
        let result = SignatureHeader::parse("");

        assert!(matches!(result, Err(WebhookError::BadSignatureFormat)));
    }

    #[test]
    fn parse_header_no_equals_fails() {
        let result = SignatureHeader::parse("t1234567890");

        assert!(matches!(result, Err(WebhookError::BadSignatureFormat)));
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let verifier = WebhookVerifier::new(TEST_SECRET);
        let payload = br#"{"type":"checkout.session.completed","data":{"object":{}}}"#;
        let signature = compute_test_signature(TEST_SECRET, "1704067200", payload);
        let header = format!("t=1704067200,v1={}", signature);

        assert!(verifier.verify(payload, &header).is_ok());
    }

    #[test]
    fn verify_garbage_signature_fails() {
        let verifier = WebhookVerifier::new(TEST_SECRET);
        let payload = br#"{"id":"evt_test"}"#;
        let header = format!("t=1704067200,v1={}", "a".repeat(64));

        let result = verifier.verify(payload, &header);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let verifier = WebhookVerifier::new("whsec_wrong_secret");
        let payload = br#"{"id":"evt_test"}"#;
        let signature = compute_test_signature(TEST_SECRET, "1704067200", payload);
        let header = format!("t=1704067200,v1={}", signature);

        let result = verifier.verify(payload, &header);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_tampered_payload_fails() {
        let verifier = WebhookVerifier::new(TEST_SECRET);
        let original = br#"{"id":"evt_test"}"#;
        let tampered = br#"{"id":"evt_hack"}"#;
        let signature = compute_test_signature(TEST_SECRET, "1704067200", original);
        let header = format!("t=1704067200,v1={}", signature);

        let result = verifier.verify(tampered, &header);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_tampered_timestamp_fails() {
        let verifier = WebhookVerifier::new(TEST_SECRET);
        let payload = br#"{"id":"evt_test"}"#;
        let signature = compute_test_signature(TEST_SECRET, "1704067200", payload);
        // Signed for 1704067200, delivered claiming 1704067201
        let header = format!("t=1704067201,v1={}", signature);

        let result = verifier.verify(payload, &header);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_single_hex_char_difference_fails() {
        let verifier = WebhookVerifier::new(TEST_SECRET);
        let payload = br#"{"id":"evt_test"}"#;
        let signature = compute_test_signature(TEST_SECRET, "1704067200", payload);

        for pos in [0, signature.len() / 2, signature.len() - 1] {
            let mut flipped = signature.clone().into_bytes();
            flipped[pos] = if flipped[pos] == b'0' { b'1' } else { b'0' };
            let header = format!("t=1704067200,v1={}", String::from_utf8(flipped).unwrap());

            let result = verifier.verify(payload, &header);
            assert!(
                matches!(result, Err(WebhookError::InvalidSignature)),
                "flip at {} accepted",
                pos
            );
        }
    }

    #[test]
    fn verify_truncated_signature_fails() {
        let verifier = WebhookVerifier::new(TEST_SECRET);
        let payload = br#"{"id":"evt_test"}"#;
        let signature = compute_test_signature(TEST_SECRET, "1704067200", payload);
        let header = format!("t=1704067200,v1={}", &signature[..signature.len() - 2]);

        let result = verifier.verify(payload, &header);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_uses_raw_body_bytes() {
        // Whitespace is significant: re-serializing the JSON would strip
        // it and produce a different MAC.
        let verifier = WebhookVerifier::new(TEST_SECRET);
        let payload = br#"{ "id" : "evt_test" }"#;
        let signature = compute_test_signature(TEST_SECRET, "1704067200", payload);
        let header = format!("t=1704067200,v1={}", signature);

        assert!(verifier.verify(payload, &header).is_ok());

        let compacted = br#"{"id":"evt_test"}"#;
        let result = verifier.verify(compacted, &header);
        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal_values() {
        assert!(constant_time_compare(b"abcdef", b"abcdef"));
    }

    #[test]
    fn constant_time_compare_different_values() {
        assert!(!constant_time_compare(b"abcdef", b"abcdeg"));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(b"abc", b"abcd"));
    }

    #[test]
    fn constant_time_compare_empty_slices() {
        assert!(constant_time_compare(b"", b""));
    }
}
