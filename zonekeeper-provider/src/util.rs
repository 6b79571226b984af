//! Log sanitization utilities.
//!
//! Prevents sensitive data (API keys, large record payloads) from being
//! fully exposed in debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of characters kept visible at each end of a masked secret.
const MASK_VISIBLE_CHARS: usize = 4;

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the
/// first `TRUNCATE_LIMIT` characters with a suffix indicating the total
/// length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a secret, keeping only the first and last four characters visible.
///
/// Secrets too short to mask meaningfully are replaced entirely.
pub fn mask_secret(secret: &str) -> String {
    if secret.len() <= MASK_VISIBLE_CHARS * 2 {
        "<hidden>".to_string()
    } else {
        let head_end = floor_char_boundary(secret, MASK_VISIBLE_CHARS);
        let tail_start = floor_char_boundary(secret, secret.len() - MASK_VISIBLE_CHARS);
        format!("{}...{}", &secret[..head_end], &secret[tail_start..])
    }
}
