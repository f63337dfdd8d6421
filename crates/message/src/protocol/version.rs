//! Mapping between protocol version strings and [`http::Version`].

use http::Version;

use crate::protocol::ArgumentError;

/// Protocol version of messages that don't set one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "1.1";

/// Converts a protocol version string such as `"1.1"` into an [`http::Version`].
///
/// # Errors
///
/// Returns [`ArgumentError::InvalidProtocolVersion`] for versions `http` doesn't know.
pub fn to_http_version(version: &str) -> Result<Version, ArgumentError> {
    match version {
        "0.9" => Ok(Version::HTTP_09),
        "1.0" => Ok(Version::HTTP_10),
        "1.1" => Ok(Version::HTTP_11),
        "2" | "2.0" => Ok(Version::HTTP_2),
        "3" | "3.0" => Ok(Version::HTTP_3),
        _ => Err(ArgumentError::invalid_protocol_version(version)),
    }
}

/// Converts an [`http::Version`] into its protocol version string.
///
/// # Errors
///
/// Returns [`ArgumentError::InvalidProtocolVersion`] for a version this crate can't name.
pub fn from_http_version(version: Version) -> Result<&'static str, ArgumentError> {
    match version {
        Version::HTTP_09 => Ok("0.9"),
        Version::HTTP_10 => Ok("1.0"),
        Version::HTTP_11 => Ok("1.1"),
        Version::HTTP_2 => Ok("2"),
        Version::HTTP_3 => Ok("3"),
        v => Err(ArgumentError::invalid_protocol_version(format!("{v:?}"))),
    }
}
