//! Message body streams.
//!
//! A [`Stream`] wraps a byte [`Resource`] and decouples message bodies from where their
//! bytes live. Its capabilities are fixed when it is built:
//!
//! - `readable` and `writable` come from the [`OpenMode`] tables
//! - `seekable` comes from the resource itself
//!
//! A `Stream` is a cheap handle. Cloning it, or passing it to several messages, shares
//! the same resource and the same position, so a read through one handle is seen by all
//! of them. There is no locking beyond what keeps the handle itself sound; a stream is
//! meant to be driven by one owner at a time.
//!
//! Once [closed](Stream::close) or [detached](Stream::detach), every capability is gone
//! and data operations fail with [`StreamError::Detached`].
//!
//! # Example
//!
//! ```
//! use std::io::SeekFrom;
//! use micro_message::Stream;
//!
//! let stream = Stream::memory();
//! stream.write(b"hello world").unwrap();
//! stream.seek(SeekFrom::Start(6)).unwrap();
//! assert_eq!(&stream.read(5).unwrap()[..], b"world");
//!
//! stream.close();
//! assert!(stream.read(1).is_err());
//! ```

mod metadata;
mod mode;
mod resource;

pub use metadata::Metadata;
pub use mode::OpenMode;
pub use resource::{FileResource, MEMORY_URI, Resource};

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use tracing::{debug, trace, warn};
use triomphe::Arc;

use crate::ensure;
use crate::protocol::StreamError;

/// Mode of the streams created by [`Stream::memory`].
pub const MEMORY_MODE: &str = "w+b";

/// Mode of the streams created from existing data.
const DATA_MODE: &str = "r+b";

/// Upper bound of the buffer reserved up front by [`Stream::read`].
const READ_CAPACITY: usize = 8 * 1024;

#[derive(Debug)]
struct Inner {
    resource: Option<Box<dyn Resource>>,
    mode: OpenMode,
    seekable: bool,
    readable: bool,
    writable: bool,
    size: Option<u64>,
    eof: bool,
    uri: Option<String>,
}

impl Inner {
    fn resource(&mut self) -> Result<&mut (dyn Resource + 'static), StreamError> {
        self.resource.as_deref_mut().ok_or(StreamError::Detached)
    }

    fn check_attached(&self) -> Result<(), StreamError> {
        ensure!(self.resource.is_some(), StreamError::Detached);
        Ok(())
    }

    fn reader(&mut self) -> Result<&mut (dyn Resource + 'static), StreamError> {
        self.check_attached()?;
        ensure!(self.readable, StreamError::NotReadable);
        self.resource()
    }

    /// Any write may change the size, so the cached one is dropped.
    fn writer(&mut self) -> Result<&mut (dyn Resource + 'static), StreamError> {
        self.check_attached()?;
        ensure!(self.writable, StreamError::NotWritable);
        self.size = None;
        self.resource()
    }

    fn seeker(&mut self) -> Result<&mut (dyn Resource + 'static), StreamError> {
        self.check_attached()?;
        ensure!(self.seekable, StreamError::NotSeekable);
        self.eof = false;
        self.resource()
    }
}

/// A shared handle to a byte resource, with capabilities fixed at construction.
#[derive(Debug, Clone)]
pub struct Stream {
    inner: Arc<Mutex<Inner>>,
}

impl Stream {
    /// Wraps `resource`, deriving readability and writability from `mode`.
    pub fn from_resource<R>(resource: R, mode: impl Into<OpenMode>) -> Self
    where
        R: Resource + 'static,
    {
        let mode = mode.into();
        let inner = Inner {
            seekable: resource.is_seekable(),
            readable: mode.is_readable(),
            writable: mode.is_writable(),
            uri: resource.uri(),
            size: None,
            eof: false,
            resource: Some(Box::new(resource)),
            mode,
        };

        Self { inner: Arc::new(Mutex::new(inner)) }
    }

    /// Creates an empty in-memory stream that can be read, written and seeked.
    pub fn memory() -> Self {
        Self::from_resource(Cursor::new(Vec::new()), MEMORY_MODE)
    }

    /// Opens a file-backed stream, interpreting `mode` the way `fopen` does.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Io`] if `mode` can't open a file, or the file can't be opened.
    pub fn open(path: impl AsRef<Path>, mode: &str) -> Result<Self, StreamError> {
        let path = path.as_ref();
        let open_mode = OpenMode::new(mode);
        let options = open_mode
            .open_options()
            .ok_or_else(|| StreamError::io(io::Error::new(io::ErrorKind::InvalidInput, format!("invalid open mode '{mode}'"))))?;

        let file = options.open(path)?;
        debug!(path = %path.display(), mode, "opened file stream");

        Ok(Self::from_resource(FileResource::new(file, path), open_mode))
    }

    /// Returns true if both handles share the same resource.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Closes the stream and releases its resource.
    pub fn close(&self) {
        if let Some(resource) = self.detach() {
            drop(resource);
            debug!("stream closed");
        }
    }

    /// Separates the underlying resource from the stream.
    ///
    /// The stream is unusable afterwards. Returns `None` if it was already detached.
    pub fn detach(&self) -> Option<Box<dyn Resource>> {
        let mut inner = self.lock();
        let resource = inner.resource.take()?;

        inner.readable = false;
        inner.writable = false;
        inner.seekable = false;
        inner.size = None;
        inner.uri = None;

        debug!(mode = inner.mode.as_str(), "stream detached");
        Some(resource)
    }

    pub fn is_detached(&self) -> bool {
        self.lock().resource.is_none()
    }

    /// Returns the size in bytes if known, cached until the next write.
    pub fn size(&self) -> Option<u64> {
        let mut inner = self.lock();
        if inner.size.is_some() {
            return inner.size;
        }

        let size = match inner.resource.as_ref()?.size() {
            Ok(size) => size,
            Err(e) => {
                warn!(cause = %e, "failed to stat stream resource");
                None
            }
        };

        inner.size = size;
        size
    }

    /// Returns the current position.
    ///
    /// # Errors
    ///
    /// Fails with [`StreamError::Detached`], or [`StreamError::Io`] if the resource can't tell.
    pub fn tell(&self) -> Result<u64, StreamError> {
        let mut inner = self.lock();
        Ok(inner.resource()?.stream_position()?)
    }

    /// Returns true once a read reached the end of the resource.
    ///
    /// # Errors
    ///
    /// Fails with [`StreamError::Detached`].
    pub fn eof(&self) -> Result<bool, StreamError> {
        let inner = self.lock();
        inner.check_attached()?;
        Ok(inner.eof)
    }

    #[inline]
    pub fn is_seekable(&self) -> bool {
        self.lock().seekable
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.lock().readable
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.lock().writable
    }

    /// Moves to `pos`, returns the new position from the start.
    ///
    /// # Errors
    ///
    /// Fails with [`StreamError::Detached`], [`StreamError::NotSeekable`], or
    /// [`StreamError::Io`] if the resource refuses the position.
    pub fn seek(&self, pos: SeekFrom) -> Result<u64, StreamError> {
        let mut inner = self.lock();
        let position = inner.seeker()?.seek(pos)?;
        trace!(position, "seek stream");
        Ok(position)
    }

    /// Seeks back to the start.
    ///
    /// # Errors
    ///
    /// Same as [`Stream::seek`].
    pub fn rewind(&self) -> Result<(), StreamError> {
        self.seek(SeekFrom::Start(0)).map(|_| ())
    }

    /// Writes all of `data` at the current position, returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Fails with [`StreamError::Detached`], [`StreamError::NotWritable`], or [`StreamError::Io`].
    pub fn write(&self, data: &[u8]) -> Result<usize, StreamError> {
        let mut inner = self.lock();
        inner.writer()?.write_all(data)?;
        trace!(len = data.len(), "write stream");
        Ok(data.len())
    }

    /// Reads up to `len` bytes from the current position.
    ///
    /// Fewer bytes are returned only when the end of the resource is reached, which also
    /// sets [`eof`](Stream::eof).
    ///
    /// # Errors
    ///
    /// Fails with [`StreamError::Detached`], [`StreamError::NotReadable`], or [`StreamError::Io`].
    pub fn read(&self, len: usize) -> Result<Bytes, StreamError> {
        let mut inner = self.lock();
        let reader = inner.reader()?;

        let mut buf = Vec::with_capacity(len.min(READ_CAPACITY));
        reader.take(u64::try_from(len).unwrap_or(u64::MAX)).read_to_end(&mut buf)?;
        let filled = buf.len();

        if filled < len {
            inner.eof = true;
        }

        trace!(requested = len, len = filled, "read stream");
        Ok(Bytes::from(buf))
    }

    /// Reads everything from the current position to the end.
    ///
    /// # Errors
    ///
    /// Fails with [`StreamError::Detached`], [`StreamError::NotReadable`], or [`StreamError::Io`].
    pub fn contents(&self) -> Result<Bytes, StreamError> {
        let mut inner = self.lock();
        let mut buf = Vec::new();
        inner.reader()?.read_to_end(&mut buf)?;
        inner.eof = true;

        trace!(len = buf.len(), "read remaining stream");
        Ok(Bytes::from(buf))
    }

    /// Returns the whole content as text, from the start when the stream is seekable.
    ///
    /// This never fails: any error is logged and yields an empty string. Invalid UTF-8 is
    /// replaced.
    pub fn to_string_lossy(&self) -> String {
        if self.is_seekable() {
            if let Err(e) = self.rewind() {
                warn!(cause = %e, "failed to rewind stream");
                return String::new();
            }
        }

        match self.contents() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!(cause = %e, "failed to read stream contents");
                String::new()
            }
        }
    }

    /// Returns the resource metadata, empty once detached.
    pub fn metadata(&self) -> Metadata {
        let inner = self.lock();
        if inner.resource.is_none() {
            return Metadata::default();
        }

        Metadata { mode: Some(inner.mode.as_str().to_string()), seekable: Some(inner.seekable), uri: inner.uri.clone() }
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::memory()
    }
}

impl From<Vec<u8>> for Stream {
    fn from(data: Vec<u8>) -> Self {
        Self::from_resource(Cursor::new(data), DATA_MODE)
    }
}

impl From<Bytes> for Stream {
    fn from(data: Bytes) -> Self {
        Self::from(Vec::from(data))
    }
}

impl From<String> for Stream {
    fn from(data: String) -> Self {
        Self::from(data.into_bytes())
    }
}

impl From<&str> for Stream {
    fn from(data: &str) -> Self {
        Self::from(data.as_bytes().to_vec())
    }
}

impl Read for &Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut inner = self.lock();
        let n = inner.reader()?.read(buf)?;
        if n == 0 && !buf.is_empty() {
            inner.eof = true;
        }
        Ok(n)
    }
}

impl Write for &Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.lock();
        inner.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.lock();
        inner.resource()?.flush()
    }
}

impl Seek for &Stream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(Stream::seek(self, pos)?)
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(&mut &*self, buf)
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut &*self)
    }
}

impl Seek for Stream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(Stream::seek(self, pos)?)
    }
}
