//! Splits a URI reference into its generic components.
//!
//! The split follows the generic syntax of RFC 3986:
//!
//! ```text
//! scheme ":" [ "//" authority ] path [ "?" query ] [ "#" fragment ]
//! authority = [ userinfo "@" ] host [ ":" port ]
//! ```
//!
//! Only the structure is checked here. Case folding, percent-encoding and standard
//! port elision happen in [`Uri`](super::Uri), so a value built through the `with_*`
//! methods and a parsed one end up normalized the same way.

use crate::ensure;
use crate::protocol::ParseError;

/// The raw, borrowed components of a URI reference.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Components<'a> {
    pub(crate) scheme: Option<&'a str>,
    pub(crate) user_info: Option<&'a str>,
    pub(crate) host: Option<&'a str>,
    pub(crate) port: Option<u16>,
    pub(crate) path: &'a str,
    pub(crate) query: Option<&'a str>,
    pub(crate) fragment: Option<&'a str>,
}

/// Parses `input` into its components.
///
/// # Errors
///
/// Returns [`ParseError::InvalidUri`] when:
/// - an authority is introduced by `//` but has no host
/// - the port is not a decimal number or exceeds 65535
/// - an IP literal host is not closed by `]`
pub(crate) fn parse(input: &str) -> Result<Components<'_>, ParseError> {
    let mut components = Components::default();

    let (rest, fragment) = split_off(input, '#');
    components.fragment = fragment;

    let (mut rest, query) = split_off(rest, '?');
    components.query = query;

    if let Some((scheme, after)) = split_scheme(rest) {
        components.scheme = Some(scheme);
        rest = after;
    }

    if let Some(after_slashes) = rest.strip_prefix("//") {
        let authority_end = after_slashes.find('/').unwrap_or(after_slashes.len());
        let (authority, path) = after_slashes.split_at(authority_end);

        parse_authority(input, authority, &mut components)?;
        components.path = path;
    } else {
        components.path = rest;
    }

    Ok(components)
}

fn split_off(value: &str, delimiter: char) -> (&str, Option<&str>) {
    match value.split_once(delimiter) {
        Some((head, tail)) => (head, Some(tail)),
        None => (value, None),
    }
}

/// Splits a leading `scheme:` off `value`, if there is a syntactically valid one.
fn split_scheme(value: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = value.split_once(':')?;

    let mut bytes = scheme.bytes();
    let first = bytes.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }

    bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')).then_some((scheme, rest))
}

fn parse_authority<'a>(input: &str, authority: &'a str, components: &mut Components<'a>) -> Result<(), ParseError> {
    let host_port = match authority.rsplit_once('@') {
        Some((user_info, host_port)) => {
            components.user_info = Some(user_info);
            host_port
        }
        None => authority,
    };

    let (host, port) = if host_port.starts_with('[') {
        // IP literal, the port separator can only follow the closing bracket
        let close = host_port.find(']').ok_or_else(|| ParseError::invalid_uri(input))?;
        let (host, after) = host_port.split_at(close + 1);
        match after.strip_prefix(':') {
            Some(port) => (host, Some(port)),
            None => {
                ensure!(after.is_empty(), ParseError::invalid_uri(input));
                (host, None)
            }
        }
    } else {
        match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };

    ensure!(!host.is_empty(), ParseError::invalid_uri(input));
    components.host = Some(host);

    components.port = match port {
        None | Some("") => None,
        Some(port) => {
            ensure!(port.bytes().all(|b| b.is_ascii_digit()), ParseError::invalid_uri(input));
            Some(port.parse::<u16>().map_err(|_e| ParseError::invalid_uri(input))?)
        }
    };

    Ok(())
}
