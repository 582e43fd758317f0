use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};

/// A markdown document as listed by a [`DocumentStore`](crate::io::DocumentStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    path: RelativePathBuf,
    name: String,
    created_ms: u64,
}

impl DocumentInfo {
    /// Create a new DocumentInfo from a relative path and its creation time
    /// (milliseconds since the Unix epoch)
    pub fn new(path: RelativePathBuf, created_ms: u64) -> Self {
        let name = path.file_name().unwrap_or("Untitled").to_string();
        Self {
            path,
            name,
            created_ms,
        }
    }

    /// Create from a relative path string
    pub fn from_relative_str(path: &str, created_ms: u64) -> Self {
        Self::new(RelativePathBuf::from(path), created_ms)
    }

    /// Get the relative path
    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    /// Get the file name including its extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the label shown for this document (file name without .md extension)
    pub fn label(&self) -> &str {
        self.name.strip_suffix(".md").unwrap_or(&self.name)
    }

    pub fn created_ms(&self) -> u64 {
        self.created_ms
    }

    /// Whether any `/`-separated segment of the path equals `folder`
    pub fn is_under_folder(&self, folder: &str) -> bool {
        self.path.as_str().split('/').any(|segment| segment == folder)
    }
}
