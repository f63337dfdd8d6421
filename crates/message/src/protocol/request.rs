//! Client-side HTTP request value.
//!
//! A [`Request`] is a [`Message`] plus a method, a target [`Uri`] and an optional explicit
//! request-target. The `Host` header follows the URI: it's derived when the request is
//! built and recomputed on [`Request::with_uri`] unless the caller asks to preserve it.

use std::borrow::Cow;

use http::header::{HeaderName, HeaderValue};
use tracing::debug;

use crate::ensure;
use crate::protocol::header::HOST;
use crate::protocol::{
    ArgumentError, DEFAULT_PROTOCOL_VERSION, HeaderValues, HttpError, HttpMessage, Message, ParseError,
    from_http_version, to_http_version,
};
use crate::stream::Stream;
use crate::uri::Uri;

/// Request-target used when the URI has no path.
const DEFAULT_REQUEST_TARGET: &str = "/";

#[derive(Debug, Clone)]
pub struct Request {
    message: Message,
    method: String,
    uri: Uri,
    request_target: String,
}

impl Request {
    /// Builds a request without headers, using the default protocol version.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyMethod`] if `method` is empty.
    pub fn new(method: &str, uri: Uri) -> Result<Self, ArgumentError> {
        Self::from_parts(method, uri, Vec::<(&str, HeaderValues)>::new(), DEFAULT_PROTOCOL_VERSION)
    }

    /// Builds a request from all of its parts.
    ///
    /// Headers are added in order, so a name given twice in any casing collects the values of
    /// both entries under the first casing. Unless a `Host` header is among them, one is
    /// derived from the URI and placed first.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyMethod`] for an empty method, or the validation error
    /// of the first invalid header.
    pub fn from_parts<I, N, V>(method: &str, uri: Uri, headers: I, protocol_version: &str) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<HeaderValues>,
    {
        ensure!(!method.is_empty(), ArgumentError::EmptyMethod);

        let mut message = Message::new();
        message.set_protocol_version(protocol_version);
        for (name, value) in headers {
            message.add_header(name.as_ref(), value.into())?;
        }

        let mut request = Self { message, method: method.to_string(), uri, request_target: String::new() };
        if !request.has_header(HOST) {
            request.update_host();
        }

        Ok(request)
    }

    /// Returns the request-target.
    ///
    /// This is the explicit target if one was set, otherwise the URI's path, `/` when the
    /// path is empty, followed by `?query` when there is a query.
    pub fn request_target(&self) -> Cow<'_, str> {
        if !self.request_target.is_empty() {
            return Cow::Borrowed(&self.request_target);
        }

        let path = self.uri.path();
        let path = if path.is_empty() { Cow::Borrowed(DEFAULT_REQUEST_TARGET) } else { path };

        match self.uri.query() {
            "" => path,
            query => Cow::Owned(format!("{path}?{query}")),
        }
    }

    /// Returns a copy with an explicit request-target, such as `*` or an absolute-form URI.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::InvalidRequestTarget`] if the target contains ASCII whitespace
    /// (space, tab, line feed, vertical tab, form feed or carriage return).
    pub fn with_request_target(&self, request_target: &str) -> Result<Self, ArgumentError> {
        ensure!(
            !request_target.bytes().any(|b| matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')),
            ArgumentError::invalid_request_target(request_target)
        );

        let mut new = self.clone();
        request_target.clone_into(&mut new.request_target);
        Ok(new)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns a copy with the method upper-cased.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyMethod`] if `method` is empty.
    pub fn with_method(&self, method: &str) -> Result<Self, ArgumentError> {
        ensure!(!method.is_empty(), ArgumentError::EmptyMethod);

        let mut new = self.clone();
        new.method = method.to_ascii_uppercase();
        Ok(new)
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns a copy targeting `uri`.
    ///
    /// The `Host` header is recomputed from the new URI, unless `preserve_host` is set and
    /// the request already has one. A URI without a host leaves the header as it is.
    #[must_use]
    pub fn with_uri(&self, uri: Uri, preserve_host: bool) -> Self {
        if uri == self.uri {
            return self.clone();
        }

        let mut new = self.clone();
        new.uri = uri;
        if !preserve_host || !new.has_header(HOST) {
            new.update_host();
        }
        new
    }

    fn update_host(&mut self) {
        let Some(host) = self.uri.host_header() else {
            return;
        };

        debug!(host = %host, "derived Host header from uri");
        self.message.headers_mut().insert_first(HOST, host);
    }
}

impl HttpMessage for Request {
    fn message(&self) -> &Message {
        &self.message
    }

    fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }
}

/// Converts into an [`http::Request`] sharing the same body stream.
///
/// The URI is the absolute one when the request has a host, and the request-target otherwise.
impl TryFrom<Request> for http::Request<Stream> {
    type Error = HttpError;

    fn try_from(request: Request) -> Result<Self, Self::Error> {
        let method = http::Method::from_bytes(request.method.as_bytes())
            .map_err(|_e| ArgumentError::invalid_method(&request.method))?;

        let uri = if request.request_target.is_empty() && !request.uri.host().is_empty() {
            http::Uri::try_from(&request.uri)?
        } else {
            let target = request.request_target();
            target.parse::<http::Uri>().map_err(|_e| ParseError::invalid_uri(&target))?
        };

        let version = to_http_version(request.protocol_version())?;

        let mut http_request = http::Request::new(request.body().clone());
        *http_request.method_mut() = method;
        *http_request.uri_mut() = uri;
        *http_request.version_mut() = version;

        let headers = http_request.headers_mut();
        for (name, values) in request.headers() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|_e| ArgumentError::invalid_header_name(name))?;
            for value in values {
                let header_value =
                    HeaderValue::from_bytes(value.as_bytes()).map_err(|_e| ArgumentError::invalid_header_value(value))?;
                headers.append(header_name.clone(), header_value);
            }
        }

        Ok(http_request)
    }
}

/// Converts from an [`http::Request`], keeping its header order and taking its body as the stream.
impl<B> TryFrom<http::Request<B>> for Request
where
    B: Into<Stream>,
{
    type Error = HttpError;

    fn try_from(request: http::Request<B>) -> Result<Self, Self::Error> {
        let (parts, body) = request.into_parts();

        let uri = Uri::try_from(&parts.uri)?;
        let protocol_version = from_http_version(parts.version)?;

        let mut headers = Vec::with_capacity(parts.headers.len());
        for (name, value) in &parts.headers {
            let value = value
                .to_str()
                .map_err(|_e| ArgumentError::invalid_header_value(String::from_utf8_lossy(value.as_bytes())))?;
            headers.push((name.as_str(), value));
        }

        let request = Self::from_parts(parts.method.as_str(), uri, headers, protocol_version)?;
        Ok(request.with_body(body.into()))
    }
}
