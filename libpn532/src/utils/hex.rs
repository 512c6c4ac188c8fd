//! Hex formatting for UIDs, block contents and raw frames.

use std::fmt::Write;

/// Uppercase hex without separators: `&[0xca, 0x3d]` -> `"CA3D"`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    join_hex(bytes, "")
}

/// Uppercase hex with one space per byte: `"CA 3D"`. Used for trace output
/// of raw frames.
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    join_hex(bytes, " ")
}

/// Colon-separated form commonly printed for card UIDs: `"CA:3D:67:4F"`.
pub fn format_uid(bytes: &[u8]) -> String {
    join_hex(bytes, ":")
}

fn join_hex(bytes: &[u8], sep: &str) -> String {
    let mut s = String::with_capacity(bytes.len() * (2 + sep.len()));
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push_str(sep);
        }
        // writing to a String cannot fail
        let _ = write!(&mut s, "{:02X}", b);
    }
    s
}

/// Parse a hex dump into bytes. Whitespace and `:` separators are ignored,
/// case does not matter.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = s
        .bytes()
        .filter(|c| !c.is_ascii_whitespace() && *c != b':')
        .collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits: {}", digits.len()));
    }
    digits
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
            u8::from_str_radix(text, 16).map_err(|e| format!("invalid hex pair '{}': {}", text, e))
        })
        .collect()
}
