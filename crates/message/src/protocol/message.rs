//! The message value shared by requests.
//!
//! A [`Message`] holds a protocol version, a [`HeaderRegistry`] and a body [`Stream`].
//! The read and `with_*` operations live on the [`HttpMessage`] trait, so that types
//! embedding a message, like [`Request`](super::Request), return their own type from
//! every `with_*` call.
//!
//! `with_*` never mutates the receiver: it clones, changes the clone, and returns it.
//! On a validation error nothing is returned, so the receiver is all that's left.

use once_cell::sync::OnceCell;

use crate::protocol::header::validate_name;
use crate::protocol::{ArgumentError, DEFAULT_PROTOCOL_VERSION, HeaderRegistry, HeaderValues};
use crate::stream::Stream;

/// Protocol version, headers and body of an HTTP message.
#[derive(Debug, Clone)]
pub struct Message {
    protocol_version: String,
    headers: HeaderRegistry,
    body: OnceCell<Stream>,
}

impl Default for Message {
    fn default() -> Self {
        Self { protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(), headers: HeaderRegistry::new(), body: OnceCell::new() }
    }
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_protocol_version(&mut self, version: &str) {
        version.clone_into(&mut self.protocol_version);
    }

    /// Replaces a header, registering the given casing.
    pub(crate) fn set_header(&mut self, name: &str, value: HeaderValues) -> Result<(), ArgumentError> {
        validate_name(name)?;
        let values = value.validate()?;
        self.headers.insert(name, values);
        Ok(())
    }

    /// Appends to a header, or registers it if absent.
    pub(crate) fn add_header(&mut self, name: &str, value: HeaderValues) -> Result<(), ArgumentError> {
        validate_name(name)?;
        let values = value.validate()?;
        self.headers.append(name, values);
        Ok(())
    }

    pub(crate) fn headers_mut(&mut self) -> &mut HeaderRegistry {
        &mut self.headers
    }

    pub(crate) fn set_body(&mut self, body: Stream) {
        self.body = OnceCell::with_value(body);
    }
}

/// Read access and copy-on-write updates shared by every message type.
pub trait HttpMessage: Clone {
    fn message(&self) -> &Message;

    fn message_mut(&mut self) -> &mut Message;

    /// Returns the protocol version, such as `"1.1"`.
    fn protocol_version(&self) -> &str {
        &self.message().protocol_version
    }

    /// Returns the header registry.
    fn headers(&self) -> &HeaderRegistry {
        &self.message().headers
    }

    /// Returns true if the header exists, in any casing.
    fn has_header(&self, name: &str) -> bool {
        self.headers().contains(name)
    }

    /// Returns the values of a header, empty if it doesn't exist.
    fn header(&self, name: &str) -> &[String] {
        self.headers().get(name)
    }

    /// Returns the values of a header joined with `", "`, empty if it doesn't exist.
    fn header_line(&self, name: &str) -> String {
        self.headers().get_line(name)
    }

    /// Returns the body, creating an empty memory stream on first access if none was set.
    fn body(&self) -> &Stream {
        self.message().body.get_or_init(Stream::memory)
    }

    #[must_use]
    fn with_protocol_version(&self, version: &str) -> Self {
        let mut new = self.clone();
        if version != self.protocol_version() {
            new.message_mut().set_protocol_version(version);
        }
        new
    }

    /// Returns a copy where the header is replaced by `value`, under the given casing.
    ///
    /// # Errors
    ///
    /// Fails with an [`ArgumentError`] if the name is not a token, the value list is
    /// empty, or a value holds control characters.
    fn with_header(&self, name: &str, value: impl Into<HeaderValues>) -> Result<Self, ArgumentError> {
        let mut new = self.clone();
        new.message_mut().set_header(name, value.into())?;
        Ok(new)
    }

    /// Returns a copy where `value` is appended to the header's values.
    ///
    /// An existing header keeps the casing it was first registered with.
    ///
    /// # Errors
    ///
    /// Fails with [`ArgumentError::EmptyHeaderName`] for an empty name, and otherwise
    /// like [`with_header`](HttpMessage::with_header).
    fn with_added_header(&self, name: &str, value: impl Into<HeaderValues>) -> Result<Self, ArgumentError> {
        let mut new = self.clone();
        new.message_mut().add_header(name, value.into())?;
        Ok(new)
    }

    /// Returns a copy without the header, any casing.
    #[must_use]
    fn without_header(&self, name: &str) -> Self {
        let mut new = self.clone();
        if self.has_header(name) {
            new.message_mut().headers_mut().remove(name);
        }
        new
    }

    /// Returns a copy with `body` as its body.
    #[must_use]
    fn with_body(&self, body: Stream) -> Self {
        let mut new = self.clone();
        let unchanged = self.message().body.get().is_some_and(|current| Stream::ptr_eq(current, &body));
        if !unchanged {
            new.message_mut().set_body(body);
        }
        new
    }
}

impl HttpMessage for Message {
    fn message(&self) -> &Message {
        self
    }

    fn message_mut(&mut self) -> &mut Message {
        self
    }
}
