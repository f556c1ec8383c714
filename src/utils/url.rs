use std::fmt::Write;

/// Percent-encodes a forward-slash path for use in a URL.
///
/// ASCII letters, digits, `_ . - ~` and `/` pass through; every other byte of
/// the UTF-8 encoding becomes `%XX` with uppercase hex.
#[must_use]
pub fn encode_path(path: &str) -> String {
    let mut encoded = String::with_capacity(path.len());
    for byte in path.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.' | b'-' | b'~' | b'/') {
            encoded.push(char::from(byte));
        } else {
            // Writing to a String cannot fail
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}
