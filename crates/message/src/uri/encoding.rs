//! Percent-encoding of URI components.
//!
//! Each component has its own set of bytes that may appear literally. Everything
//! outside the set is replaced by `%XX` with upper-case hex digits. The byte classes
//! are plain lookup tables built at compile time.

use std::borrow::Cow;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Builds a byte class from the ASCII alphanumerics plus `extra`.
const fn byte_class(extra: &[u8]) -> [bool; 256] {
    let mut table = [false; 256];
    let mut b = 0u8;
    loop {
        table[b as usize] = b.is_ascii_alphanumeric();
        if b == u8::MAX {
            break;
        }
        b += 1;
    }

    let mut i = 0;
    while i < extra.len() {
        table[extra[i] as usize] = true;
        i += 1;
    }
    table
}

/// Bytes allowed unescaped in a path, a query or a fragment.
///
/// `%` is in the set, but only survives when it starts a well-formed `%XX` escape.
pub(crate) const PATH_QUERY_FRAGMENT: [bool; 256] = byte_class(b"_-.~!$&'()*+,;=%:@/");

/// Bytes allowed unescaped in the user or password part of the user info.
///
/// `%`, `:`, `@` and `/` are structural here and always get encoded.
pub(crate) const USER_INFO: [bool; 256] = byte_class(b"_-.~!$&'()*+,;=");

/// Percent-encodes every byte of `value` that is not in `allowed`.
///
/// A `%` that is not followed by two hex digits is encoded as `%25`, while existing
/// escapes are kept as they are, so encoding an already encoded value is a no-op.
pub(crate) fn encode<'a>(value: &'a str, allowed: &[bool; 256]) -> Cow<'a, str> {
    let bytes = value.as_bytes();

    let Some(first) = (0..bytes.len()).find(|&i| needs_encoding(bytes, i, allowed)) else {
        return Cow::Borrowed(value);
    };

    let mut encoded = String::with_capacity(value.len() + 8);
    // every byte before `first` is ASCII, so `first` is a char boundary
    encoded.push_str(&value[..first]);

    for (i, &b) in bytes.iter().enumerate().skip(first) {
        if needs_encoding(bytes, i, allowed) {
            encoded.push('%');
            encoded.push(char::from(HEX[usize::from(b >> 4)]));
            encoded.push(char::from(HEX[usize::from(b & 0x0F)]));
        } else {
            encoded.push(char::from(b));
        }
    }

    Cow::Owned(encoded)
}

#[inline]
fn needs_encoding(bytes: &[u8], i: usize, allowed: &[bool; 256]) -> bool {
    let b = bytes[i];
    if !allowed[usize::from(b)] {
        return true;
    }

    b == b'%' && !is_escape(bytes, i)
}

#[inline]
fn is_escape(bytes: &[u8], i: usize) -> bool {
    bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit) && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_allowed_bytes_borrowed() {
        let value = "/path/to/resource;v=1:@!$&'()*+,";
        assert!(matches!(encode(value, &PATH_QUERY_FRAGMENT), Cow::Borrowed(_)));
    }

    #[test]
    fn encodes_disallowed_bytes() {
        assert_eq!(encode("/a b", &PATH_QUERY_FRAGMENT), "/a%20b");
        assert_eq!(encode("a\"b<c>", &PATH_QUERY_FRAGMENT), "a%22b%3Cc%3E");
        assert_eq!(encode("q=[x]", &PATH_QUERY_FRAGMENT), "q=%5Bx%5D");
    }

    #[test]
    fn encodes_multibyte_chars_per_byte() {
        assert_eq!(encode("/caf\u{e9}", &PATH_QUERY_FRAGMENT), "/caf%C3%A9");
    }

    #[test]
    fn keeps_valid_escapes_and_fixes_broken_ones() {
        assert_eq!(encode("a%20b", &PATH_QUERY_FRAGMENT), "a%20b");
        assert_eq!(encode("a%2fb", &PATH_QUERY_FRAGMENT), "a%2fb");
        assert_eq!(encode("100%", &PATH_QUERY_FRAGMENT), "100%25");
        assert_eq!(encode("%zz", &PATH_QUERY_FRAGMENT), "%25zz");
        assert_eq!(encode("%2", &PATH_QUERY_FRAGMENT), "%252");
    }

    #[test]
    fn encoding_twice_is_stable() {
        let once = encode("/a b/%/c", &PATH_QUERY_FRAGMENT).into_owned();
        assert_eq!(once, "/a%20b/%25/c");
        assert_eq!(encode(&once, &PATH_QUERY_FRAGMENT), once);
    }

    #[test]
    fn user_info_encodes_structural_bytes() {
        assert_eq!(encode("user", &USER_INFO), "user");
        assert_eq!(encode("us:er", &USER_INFO), "us%3Aer");
        assert_eq!(encode("a@b/c", &USER_INFO), "a%40b%2Fc");
        assert_eq!(encode("50%", &USER_INFO), "50%25");
        assert_eq!(encode("%41", &USER_INFO), "%2541");
    }
}
