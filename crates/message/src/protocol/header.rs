//! Case-insensitive, case-preserving header registry.
//!
//! Headers are kept in a single ordered map keyed by the lower-cased name. Each entry
//! remembers the casing it was registered with and holds every value as an ordered list,
//! single-valued headers included.
//!
//! The registry itself is only mutated through [`Message`](super::Message), which
//! always works on a clone, so a registry reachable from a value never changes.

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Values;
use tracing::trace;

use crate::ensure;
use crate::protocol::ArgumentError;

/// Name of the header derived from the request URI.
pub const HOST: &str = "Host";

/// Builds a byte class from a list of inclusive ranges.
const fn byte_class(ranges: &[(u8, u8)]) -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < ranges.len() {
        let (start, end) = ranges[i];
        let mut b = start;
        loop {
            table[b as usize] = true;
            if b == end {
                break;
            }
            b += 1;
        }
        i += 1;
    }
    table
}

/// `[ \t\x21-\x7E\x80-\xFF]`
const FIELD_VALUE: [bool; 256] = byte_class(&[(b'\t', b'\t'), (b' ', b' '), (0x21, 0x7E), (0x80, 0xFF)]);

/// RFC 7230 `tchar`
const TOKEN: [bool; 256] = byte_class(&[
    (b'0', b'9'),
    (b'A', b'Z'),
    (b'a', b'z'),
    (b'!', b'!'),
    (b'#', b'\''),
    (b'*', b'+'),
    (b'-', b'.'),
    (b'^', b'`'),
    (b'|', b'|'),
    (b'~', b'~'),
]);

/// Checks that `name` is a non-empty header field name token.
pub(crate) fn validate_name(name: &str) -> Result<(), ArgumentError> {
    ensure!(!name.is_empty(), ArgumentError::EmptyHeaderName);
    ensure!(name.bytes().all(|b| TOKEN[usize::from(b)]), ArgumentError::invalid_header_name(name));
    Ok(())
}

fn validate_value(value: &str) -> Result<String, ArgumentError> {
    ensure!(value.bytes().all(|b| FIELD_VALUE[usize::from(b)]), ArgumentError::invalid_header_value(value));
    Ok(value.trim_matches([' ', '\t']).to_string())
}

/// The value side of a header assignment: a single string or a list of strings.
///
/// It exists so the `with_header` family accepts both `"gzip"` and `["gzip", "br"]`,
/// while still telling an empty list apart from an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValues {
    Single(String),
    List(Vec<String>),
}

impl HeaderValues {
    /// Validates and trims every value.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyHeaderValues`] for an empty list and
    /// [`ArgumentError::InvalidHeaderValue`] for a value with control characters.
    pub(crate) fn validate(self) -> Result<Vec<String>, ArgumentError> {
        match self {
            HeaderValues::Single(value) => Ok(vec![validate_value(&value)?]),
            HeaderValues::List(values) => {
                ensure!(!values.is_empty(), ArgumentError::EmptyHeaderValues);
                values.iter().map(|value| validate_value(value)).collect()
            }
        }
    }
}

impl From<&str> for HeaderValues {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for HeaderValues {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&String> for HeaderValues {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<Vec<String>> for HeaderValues {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for HeaderValues {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for HeaderValues {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|value| (*value).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for HeaderValues {
    fn from(values: [&str; N]) -> Self {
        Self::List(values.iter().map(|value| (*value).to_string()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderEntry {
    name: String,
    values: Vec<String>,
}

/// Ordered header storage with case-insensitive lookup.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HeaderRegistry {
    entries: IndexMap<String, HeaderEntry>,
}

impl HeaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct header names
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if a header with this name exists, in any casing.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    /// Returns the values of a header, or an empty slice if it is absent.
    pub fn get(&self, name: &str) -> &[String] {
        self.entries.get(&name.to_ascii_lowercase()).map(|entry| entry.values.as_slice()).unwrap_or_default()
    }

    /// Returns the values of a header joined with `", "`.
    pub fn get_line(&self, name: &str) -> String {
        self.get(name).join(", ")
    }

    /// Returns the casing a header was registered with.
    pub fn original_name(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_ascii_lowercase()).map(|entry| entry.name.as_str())
    }

    /// Iterates `(name, values)` pairs in registration order, names in their original casing.
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.entries.values() }
    }

    /// Replaces a header entirely, registering `name` as its new casing.
    ///
    /// A replaced header keeps its position.
    pub(crate) fn insert(&mut self, name: &str, values: Vec<String>) {
        trace!(name, count = values.len(), "set header");
        self.entries.insert(name.to_ascii_lowercase(), HeaderEntry { name: name.to_string(), values });
    }

    /// Appends values to a header, keeping the casing it was first registered with.
    pub(crate) fn append(&mut self, name: &str, values: Vec<String>) {
        match self.entries.get_mut(&name.to_ascii_lowercase()) {
            Some(entry) => {
                trace!(name = %entry.name, count = values.len(), "append header values");
                entry.values.extend(values);
            }
            None => self.insert(name, values),
        }
    }

    /// Puts a single-valued header in front of all the others.
    ///
    /// An existing entry keeps its casing but loses its old values and position.
    pub(crate) fn insert_first(&mut self, name: &str, value: String) {
        let key = name.to_ascii_lowercase();
        let name = match self.entries.shift_remove(&key) {
            Some(entry) => entry.name,
            None => name.to_string(),
        };

        trace!(name = %name, value = %value, "set leading header");
        self.entries.shift_insert(0, key, HeaderEntry { name, values: vec![value] });
    }

    /// Removes a header, returns false if it was absent.
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.entries.shift_remove(&name.to_ascii_lowercase()).is_some()
    }
}

impl fmt::Debug for HeaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a HeaderRegistry {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the headers of a [`HeaderRegistry`].
#[derive(Debug)]
pub struct Iter<'a> {
    inner: Values<'a, String, HeaderEntry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [String]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
