use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const LINE_SIGNATURE_HEADER: &str = "x-line-signature";

// base64(HMAC-SHA256(channel secret, raw body))
pub fn verify_line_signature(signature: &str, body: &[u8], channel_secret: &str) -> bool {
    let signature = signature.trim();
    if signature.is_empty() {
        return false;
    }

    match sign_body(channel_secret, body) {
        Some(computed) => constant_time_eq(computed.as_bytes(), signature.as_bytes()),
        None => false,
    }
}

pub fn sign_body(channel_secret: &str, body: &[u8]) -> Option<String> {
    let key = channel_secret.as_bytes();
    let mut mac = Hmac::<Sha256>::new_from_slice(key).ok()?;
    mac.update(body);
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

fn constant_time_eq(lhs: &[u8], rhs: &[u8]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut diff = 0_u8;
    for (a, b) in lhs.iter().zip(rhs.iter()) {
        diff |= a ^ b;
    }
    diff == 0
}
