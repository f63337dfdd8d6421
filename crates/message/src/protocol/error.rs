use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("parse error: {source}")]
    ParseError {
        #[from]
        source: ParseError,
    },

    #[error("invalid argument: {source}")]
    ArgumentError {
        #[from]
        source: ArgumentError,
    },

    #[error("stream error: {source}")]
    StreamError {
        #[from]
        source: StreamError,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unable to parse uri '{input}'")]
    InvalidUri { input: String },
}

impl ParseError {
    pub fn invalid_uri<S: ToString>(input: S) -> Self {
        Self::InvalidUri { input: input.to_string() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("invalid port '{port}'")]
    InvalidPort { port: i32 },

    #[error("method must be a non-empty string")]
    EmptyMethod,

    #[error("invalid method '{method}'")]
    InvalidMethod { method: String },

    #[error("header name cannot be empty")]
    EmptyHeaderName,

    #[error("invalid header name '{name}'")]
    InvalidHeaderName { name: String },

    #[error("invalid header value {value:?}")]
    InvalidHeaderValue { value: String },

    #[error("header value list must not be empty")]
    EmptyHeaderValues,

    #[error("invalid request target '{target}', cannot contain whitespace")]
    InvalidRequestTarget { target: String },

    #[error("unsupported protocol version '{version}'")]
    InvalidProtocolVersion { version: String },
}

impl ArgumentError {
    pub fn invalid_port(port: i32) -> Self {
        Self::InvalidPort { port }
    }

    pub fn invalid_method<S: ToString>(method: S) -> Self {
        Self::InvalidMethod { method: method.to_string() }
    }

    pub fn invalid_header_name<S: ToString>(name: S) -> Self {
        Self::InvalidHeaderName { name: name.to_string() }
    }

    pub fn invalid_header_value<S: ToString>(value: S) -> Self {
        Self::InvalidHeaderValue { value: value.to_string() }
    }

    pub fn invalid_request_target<S: ToString>(target: S) -> Self {
        Self::InvalidRequestTarget { target: target.to_string() }
    }

    pub fn invalid_protocol_version<S: ToString>(version: S) -> Self {
        Self::InvalidProtocolVersion { version: version.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("stream is detached")]
    Detached,

    #[error("stream is not seekable")]
    NotSeekable,

    #[error("stream is not readable")]
    NotReadable,

    #[error("stream is not writable")]
    NotWritable,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl StreamError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Returns true if the stream has released its underlying resource
    #[inline]
    pub fn is_detached(&self) -> bool {
        matches!(self, StreamError::Detached)
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io { source } => source,
            StreamError::Detached => io::Error::new(io::ErrorKind::NotConnected, e),
            StreamError::NotSeekable | StreamError::NotReadable | StreamError::NotWritable => {
                io::Error::new(io::ErrorKind::Unsupported, e)
            }
        }
    }
}
