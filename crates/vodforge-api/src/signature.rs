//! Webhook signature verification.
//!
//! Inbound encoding-finished webhooks carry an HMAC-SHA256 signature of
//! the raw request body, base64-encoded (URL-safe, unpadded), in the
//! [`SIGNATURE_HEADER`] header. Verification is skipped entirely when no
//! shared secret is configured.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook body signature.
pub const SIGNATURE_HEADER: &str = "x-vodforge-signature";

/// Compute the signature for a payload. Used by tests and by operators
/// wiring up the sending side.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

/// Verify a provided signature against the payload. Comparison happens
/// inside the MAC to stay constant-time.
pub fn verify_signature(secret: &str, body: &[u8], provided: &str) -> bool {
    let Ok(signature) = URL_SAFE_NO_PAD.decode(provided) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}
