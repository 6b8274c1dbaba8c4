//! Single-quote shell escaping.
//!
//! Everything between single quotes is literal to a POSIX shell, so the only
//! byte that needs work is the quote itself: it closes the quoting, emits an
//! escaped quote and reopens (`'` becomes `'\''`).

/// Quotes a byte string for use as one shell word.
///
/// The input is length-delimited; NUL bytes are copied through unchanged.
pub fn quote_bytes(raw: &[u8]) -> Vec<u8> {
    let quotes = raw.iter().filter(|&&b| b == b'\'').count();
    let mut escaped = Vec::with_capacity(raw.len() + quotes * 3 + 2);

    escaped.push(b'\'');
    for &b in raw {
        if b == b'\'' {
            escaped.extend_from_slice(b"'\\''");
        } else {
            escaped.push(b);
        }
    }
    escaped.push(b'\'');

    escaped
}

/// Quotes a string for use as one shell word.
pub fn quote(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + 2);
    escaped.push('\'');
    for c in raw.chars() {
        if c == '\'' {
            escaped.push_str("'\\''");
        } else {
            escaped.push(c);
        }
    }
    escaped.push('\'');
    escaped
}
