//! Canonical profile hashing and seed derivation.
//!
//! Profiles are hashed as `hex(BLAKE3(JCS(profile_json)))` so that two
//! profiles with equal parameters hash equally regardless of key order or
//! whitespace in their source JSON.

use crate::error::ProfileError;
use crate::profile::AvatarProfile;

/// Computes the canonical BLAKE3 hash of a profile.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
///
/// # Example
/// ```
/// use omniavatar_spec::{AvatarProfile, hash::canonical_profile_hash};
///
/// let hash = canonical_profile_hash(&AvatarProfile::default()).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_profile_hash(profile: &AvatarProfile) -> Result<String, ProfileError> {
    let value = profile.to_value()?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
///
/// Object keys are sorted, no whitespace is emitted, and numbers use their
/// shortest round-trip form.
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&format_jcs_number(n)),
        serde_json::Value::String(s) => write_jcs_string(s, out),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_jcs_string(key, out);
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
    }
}

/// Formats a number according to JCS rules.
fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if !f.is_finite() => "null".to_string(),
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => {
            let s = format!("{}", f);
            if s.contains('.') && !s.contains(&['e', 'E'][..]) {
                s.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                s
            }
        }
        None => "null".to_string(),
    }
}

fn write_jcs_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Derives an independent seed for a named sub-stream.
///
/// ```text
/// variant_seed = truncate_u32(BLAKE3(base_seed || stream_name))
/// ```
///
/// # Example
/// ```
/// use omniavatar_spec::hash::derive_variant_seed;
///
/// assert_ne!(derive_variant_seed(42, "face"), derive_variant_seed(42, "hair"));
/// ```
pub fn derive_variant_seed(base_seed: u32, stream_name: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + stream_name.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(stream_name.as_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
