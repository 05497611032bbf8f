//! Header value encoding
//!
//! Makes arbitrary path strings safe to carry in an HTTP header value.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in header values that need encoding
///
/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` and `/`.
const HEADER_UNSAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'/');

/// Whether a value is made only of printable ASCII (0x20-0x7E)
pub fn is_printable_ascii(value: &str) -> bool {
    value.bytes().all(|b| (0x20..=0x7e).contains(&b))
}

/// Encode a value for use in a header
///
/// Printable ASCII values are returned unchanged. Any other value is
/// percent-encoded as a whole, with `/` left literal so paths stay readable.
///
/// # Examples
/// ```
/// use spa_edge_router::http::encoding::safe_header_value;
/// assert_eq!(safe_header_value("/blog/post"), "/blog/post");
/// assert_eq!(safe_header_value("/产品/详情"), "/%E4%BA%A7%E5%93%81/%E8%AF%A6%E6%83%85");
/// ```
pub fn safe_header_value(value: &str) -> String {
    if is_printable_ascii(value) {
        return value.to_string();
    }
    utf8_percent_encode(value, HEADER_UNSAFE).to_string()
}
