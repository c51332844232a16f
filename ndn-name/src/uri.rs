//! Byte-level URI helpers shared by [`Component`](crate::Component) and [`Name`](crate::Name).

const WHITESPACE: &[u8] = b" \n\r\t";
const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Bytes that are written as-is in the escaped form: `0-9 A-Z a-z + - . _`.
#[inline]
pub(crate) fn is_unescaped(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.' | b'_')
}

pub(crate) fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii() && WHITESPACE.contains(&(c as u8)))
}

/// Returns the index of the first `needle` in `haystack`.
pub(crate) fn find_byte(haystack: &[u8], needle: u8) -> Option<usize> {
    #[cfg(not(feature = "perf-find"))]
    return haystack.iter().position(|&b| b == needle);
    #[cfg(feature = "perf-find")]
    memchr::memchr(needle, haystack)
}

fn from_hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// Decodes every `%XX`. A `%` followed by invalid hex digits is kept together with the two
/// bytes after it.
pub(crate) fn unescape(s: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        if s[i] == b'%' && i + 2 < s.len() {
            match (from_hex(s[i + 1]), from_hex(s[i + 2])) {
                (Some(hi), Some(lo)) => out.push(hi * 16 + lo),
                _ => out.extend_from_slice(&s[i..i + 3]),
            }
            i += 3;
        } else {
            out.push(s[i]);
            i += 1;
        }
    }
    out
}

pub(crate) fn escape_into(value: &[u8], out: &mut String) {
    if value.iter().all(|&b| b == b'.') {
        out.push_str("...");
        out.extend(value.iter().map(|_| '.'));
        return;
    }
    for &b in value {
        if is_unescaped(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0xF) as usize] as char);
        }
    }
}
