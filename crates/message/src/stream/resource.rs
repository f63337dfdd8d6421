//! Byte sources a [`Stream`](super::Stream) can wrap.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// An underlying byte resource.
///
/// The std I/O traits carry the data operations; the extra methods describe the resource
/// so a stream can derive its capabilities once, when it is built.
pub trait Resource: Read + Write + Seek + Send + std::fmt::Debug {
    /// Whether `seek` is supported at all.
    fn is_seekable(&self) -> bool {
        true
    }

    /// The total size in bytes, if it can be known.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying stat-like call.
    fn size(&self) -> io::Result<Option<u64>>;

    /// A name identifying the resource, such as a file path.
    fn uri(&self) -> Option<String> {
        None
    }
}

/// Identifier reported for in-memory resources.
pub const MEMORY_URI: &str = "memory";

impl Resource for Cursor<Vec<u8>> {
    fn size(&self) -> io::Result<Option<u64>> {
        Ok(Some(self.get_ref().len() as u64))
    }

    fn uri(&self) -> Option<String> {
        Some(MEMORY_URI.to_string())
    }
}

/// A file on disk, along with the path it was opened from.
#[derive(Debug)]
pub struct FileResource {
    file: File,
    path: PathBuf,
}

impl FileResource {
    pub fn new(file: File, path: impl AsRef<Path>) -> Self {
        Self { file, path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_file(self) -> File {
        self.file
    }
}

impl Read for FileResource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for FileResource {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for FileResource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl Resource for FileResource {
    fn size(&self) -> io::Result<Option<u64>> {
        Ok(Some(self.file.metadata()?.len()))
    }

    fn uri(&self) -> Option<String> {
        Some(self.path.display().to_string())
    }
}
