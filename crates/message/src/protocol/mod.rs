//! HTTP message value types.
//!
//! Everything here is an immutable value: the `with_*` operations return a new value and
//! leave the receiver as it was, so two values derived from a common ancestor never see
//! each other's later changes. The body [`Stream`](crate::Stream) is the one exception,
//! since it is a handle to a shared resource.
//!
//! # Architecture
//!
//! - **Messages** (`message`): protocol version, headers and body
//!   - [`Message`]: the plain message value
//!   - [`HttpMessage`]: read access and `with_*` operations shared by all message types
//!
//! - **Requests** (`request`): method, target URI and request-target
//!   - [`Request`]: derives its `Host` header from the URI, converts to and from [`http::Request`]
//!
//! - **Headers** (`header`): case-insensitive, case-preserving storage
//!   - [`HeaderRegistry`]: ordered header names and their value lists
//!   - [`HeaderValues`]: a single value or a list, as accepted by the `with_*` operations
//!
//! - **Versions** (`version`): protocol version strings and their [`http::Version`] mapping
//!
//! - **Error Handling** (`error`):
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: URI parsing errors
//!   - [`ArgumentError`]: rejected inputs
//!   - [`StreamError`]: stream state, capability and I/O errors

mod error;
pub use error::ArgumentError;
pub use error::HttpError;
pub use error::ParseError;
pub use error::StreamError;

mod header;
pub use header::HOST;
pub use header::HeaderRegistry;
pub use header::HeaderValues;
pub use header::Iter;

mod message;
pub use message::HttpMessage;
pub use message::Message;

mod request;
pub use request::Request;

mod version;
pub use version::DEFAULT_PROTOCOL_VERSION;
pub use version::from_http_version;
pub use version::to_http_version;
