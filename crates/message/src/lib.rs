//! Immutable HTTP message values
//!
//! This crate models the parts of an HTTP request as plain values: a [`Uri`] with
//! RFC 3986 style parsing and normalization, a [`Request`] carrying method, target,
//! protocol version, headers and body, and a [`Stream`] that decouples the body from
//! wherever its bytes actually live.
//!
//! # Features
//!
//! - URI parsing with lower-cased scheme and host, standard port elision and
//!   percent-encoding that never double-encodes
//! - Case-insensitive, case-preserving header registry
//! - Copy-on-write `with_*` operations that never touch the receiver
//! - `Host` header derived from the request URI
//! - Body streams over memory buffers, files or any [`stream::Resource`], with read, write
//!   and seek capabilities fixed at construction
//! - Conversions to and from the [`http`] crate's types
//! - Optional `serde` support for [`Uri`]
//!
//! # Example
//!
//! ```
//! use micro_message::{HttpMessage, Request, Stream, Uri};
//!
//! let uri = Uri::parse("http://example.com:8080/items?page=2").unwrap();
//! let request = Request::new("GET", uri).unwrap();
//! assert_eq!(request.header_line("Host"), "example.com:8080");
//! assert_eq!(request.request_target(), "/items?page=2");
//!
//! let post = request
//!     .with_method("post")
//!     .unwrap()
//!     .with_header("Content-Type", "application/json")
//!     .unwrap()
//!     .with_body(Stream::from(r#"{"name":"micro"}"#));
//!
//! assert_eq!(post.method(), "POST");
//! assert!(post.has_header("content-type"));
//! assert_eq!(post.body().to_string_lossy(), r#"{"name":"micro"}"#);
//!
//! // the original request is untouched
//! assert_eq!(request.method(), "GET");
//! assert!(!request.has_header("Content-Type"));
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`uri`]: The URI value type
//! - [`protocol`]: Messages, requests, headers and error types
//! - [`stream`]: Body streams and the resources behind them
//!
//! # Error Handling
//!
//! The crate uses custom error types that implement `std::error::Error`:
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::ParseError`]: URI parsing errors
//! - [`protocol::ArgumentError`]: Invalid method, port, header or request-target
//! - [`protocol::StreamError`]: Detached streams, missing capabilities and I/O failures
//!
//! Validation happens eagerly in the constructor or `with_*` call receiving the input.
//! A failed call returns the error and no value, the receiver stays as it was.
//!
//! # Limitations
//!
//! - No network transport and no wire format parsing or serialization
//! - No response type
//! - A [`Stream`] shared between messages or threads is not synchronized beyond keeping
//!   each single operation sound

pub mod protocol;
pub mod stream;
pub mod uri;

mod utils;
pub(crate) use utils::ensure;

pub use protocol::{ArgumentError, HttpError, HttpMessage, Message, ParseError, Request, StreamError};
pub use stream::Stream;
pub use uri::Uri;
