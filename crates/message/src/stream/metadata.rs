/// Descriptive data about a stream's underlying resource.
///
/// A detached stream reports empty metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub(crate) mode: Option<String>,
    pub(crate) seekable: Option<bool>,
    pub(crate) uri: Option<String>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.mode.is_none() && self.seekable.is_none() && self.uri.is_none()
    }

    /// The mode the resource was opened with.
    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    pub fn seekable(&self) -> Option<bool> {
        self.seekable
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Looks up a single entry by key: `"mode"`, `"seekable"` or `"uri"`.
    ///
    /// Returns `None` for unknown keys and absent entries.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "mode" => self.mode.clone(),
            "seekable" => self.seekable.map(|seekable| seekable.to_string()),
            "uri" => self.uri.clone(),
            _ => None,
        }
    }
}
