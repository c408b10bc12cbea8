//! Signature payload normalization.
//!
//! Wallet extensions disagree about what a "signature" is: a bare string, an
//! object wrapping one under half a dozen field names, base64, base64url
//! without padding, hex, hex with a `0x` prefix, or any of those with stray
//! whitespace. This module is the single adapter that turns all of them into
//! one canonical form, with a fixed priority order instead of ad hoc
//! sniffing at each call site.

use base64::Engine;
use serde_json::Value;

/// Object field names recognized as carrying the signature, tried in order.
/// Covers the payload shapes of the major wallet extensions.
const SIGNATURE_FIELDS: [&str; 5] = ["signature", "messageSignature", "result", "base64", "hex"];

/// Extract the signature string from a heterogeneous JSON payload.
///
/// Accepts a bare string, or an object whose first present field from
/// [`SIGNATURE_FIELDS`] holds a string. Anything else is `None`.
pub fn coalesce_signature(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => SIGNATURE_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str))
            .map(str::to_owned),
        _ => None,
    }
}

/// Normalize a signature string for verification:
/// strip a `0x` prefix, remove all whitespace, and convert base64url to
/// standard base64 with padding restored.
pub fn normalize_signature(signature: &str) -> String {
    let mut s: String = signature.trim().to_string();
    if let Some(stripped) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        s = stripped.to_string();
    }
    s.retain(|c| !c.is_whitespace());
    if s.contains('-') || s.contains('_') {
        s = s.replace('-', "+").replace('_', "/");
        let rem = s.len() % 4;
        if rem != 0 {
            s.push_str(&"=".repeat(4 - rem));
        }
    }
    s
}

/// If the string looks like even-length hex, re-encode those bytes as
/// standard base64 (the form BIP-322 verifiers expect); otherwise return it
/// unchanged.
pub fn hex_to_base64(signature: &str) -> String {
    let is_hex = !signature.is_empty()
        && signature.len() % 2 == 0
        && signature.chars().all(|c| c.is_ascii_hexdigit());
    if !is_hex {
        return signature.to_string();
    }
    match hex::decode(signature) {
        Ok(bytes) => base64::engine::general_purpose::STANDARD.encode(bytes),
        Err(_) => signature.to_string(),
    }
}
