//! Correlation id resolution and generation (spec.md §4.6).

use rand::Rng;

pub const MAX_CORRELATION_ID_LEN: usize = 128;

const HEADER_NAMES: [&str; 3] = ["correlation-id", "x-correlation-id", "x-request-id"];

/// Resolve an inbound correlation id from the first matching header, in the
/// documented priority order, truncated to 128 chars. Falls back to a
/// freshly generated id if none of the headers are present or all are blank.
///
/// `header_lookup` is expected to perform a case-insensitive header lookup
/// (axum's `HeaderMap::get` already is).
pub fn resolve_correlation_id(mut header_lookup: impl FnMut(&str) -> Option<String>) -> String {
    for name in HEADER_NAMES {
        if let Some(value) = header_lookup(name) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return trimmed.chars().take(MAX_CORRELATION_ID_LEN).collect();
            }
        }
    }
    generate_correlation_id()
}

/// `req-<base36-timestamp>-<9-base36-random>`.
pub fn generate_correlation_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::thread_rng();
    let random: String = (0..9).map(|_| to_base36_digit(rng.gen_range(0..36))).collect();
    format!("req-{}-{}", to_base36(millis), random)
}

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36_digit(value: u32) -> char {
    BASE36_ALPHABET[value as usize] as char
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("base36 alphabet is ASCII")
}
