//! Webhook signature verification (HMAC-SHA256 over the raw body).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Check the `X-Line-Signature` header value against the raw request body.
/// The signature is the base64 of HMAC-SHA256(channel_secret, body);
/// comparison is constant-time via `verify_slice`.
pub(crate) fn verify(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = BASE64.decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        BASE64.encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_valid_signature() {
        let body = br#"{"events":[]}"#;
        let signature = sign("secret", body);
        assert!(verify("secret", body, &signature));
    }

    #[test]
    fn rejects_wrong_secret() {
        let body = br#"{"events":[]}"#;
        let signature = sign("other", body);
        assert!(!verify("secret", body, &signature));
    }

    #[test]
    fn rejects_tampered_body() {
        let signature = sign("secret", b"original");
        assert!(!verify("secret", b"tampered", &signature));
    }

    #[test]
    fn rejects_non_base64_signature() {
        assert!(!verify("secret", b"body", "not base64!!!"));
    }
}
