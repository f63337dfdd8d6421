//! Open modes and the capabilities they grant.
//!
//! A mode string is the one `fopen` takes: a base letter (`r`, `w`, `a`, `x`, `c`), an
//! optional `+`, and an optional `b` or `t` flag. Whether a stream built over a resource
//! may be read or written is looked up once, from the fixed tables below.

use std::fs::OpenOptions;

/// Modes that allow reading.
const READABLE_MODES: &[&str] = &[
    "r", "w+", "r+", "x+", "c+", "rb", "w+b", "r+b", "x+b", "c+b", "rt", "w+t", "r+t", "x+t", "c+t", "a+",
];

/// Modes that allow writing.
const WRITABLE_MODES: &[&str] = &[
    "w", "w+", "rw", "r+", "x+", "c+", "wb", "w+b", "r+b", "x+b", "c+b", "w+t", "r+t", "x+t", "c+t", "a", "a+",
];

/// The mode a resource was opened with, and the capabilities derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenMode {
    mode: String,
    readable: bool,
    writable: bool,
}

impl OpenMode {
    pub fn new(mode: &str) -> Self {
        Self { mode: mode.to_string(), readable: READABLE_MODES.contains(&mode), writable: WRITABLE_MODES.contains(&mode) }
    }

    pub fn as_str(&self) -> &str {
        &self.mode
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.readable
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Translates the mode into file open options, the way `fopen` interprets it.
    ///
    /// Returns `None` if the mode can't be used to open a file.
    pub(crate) fn open_options(&self) -> Option<OpenOptions> {
        let mut chars = self.mode.chars();
        let base = chars.next()?;

        let mut plus = false;
        for flag in chars {
            match flag {
                '+' if !plus => plus = true,
                'b' | 't' => {}
                _ => return None,
            }
        }

        let mut options = OpenOptions::new();
        match base {
            'r' => options.read(true).write(plus),
            'w' => options.write(true).create(true).truncate(true).read(plus),
            'a' => options.append(true).create(true).read(plus),
            'x' => options.write(true).create_new(true).read(plus),
            'c' => options.write(true).create(true).read(plus),
            _ => return None,
        };

        Some(options)
    }
}

impl From<&str> for OpenMode {
    fn from(mode: &str) -> Self {
        Self::new(mode)
    }
}
