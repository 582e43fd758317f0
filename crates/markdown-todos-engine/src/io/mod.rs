use crate::index::index_document;
use crate::models::{DocumentInfo, DocumentMetadata};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("Path is not a UTF-8 relative path: {0}")]
    InvalidPath(PathBuf),
}

/// Where documents, their text and their metadata come from.
///
/// Reads may run on several threads at once during a collection run.
pub trait DocumentStore: Sync {
    fn list_documents(&self) -> Result<Vec<DocumentInfo>, IoError>;
    fn read(&self, path: &RelativePath) -> Result<String, IoError>;
    fn metadata(&self, path: &RelativePath) -> Result<DocumentMetadata, IoError>;
    fn write(&self, path: &RelativePath, content: &str) -> Result<(), IoError>;
}

/// Markdown files under a notes directory on disk
#[derive(Debug, Clone)]
pub struct FsStore {
    notes_root: PathBuf,
}

impl FsStore {
    pub fn new(notes_root: impl Into<PathBuf>) -> Result<Self, IoError> {
        let notes_root = notes_root.into();
        validate_notes_dir(&notes_root)?;
        Ok(Self { notes_root })
    }

    pub fn notes_root(&self) -> &Path {
        &self.notes_root
    }

    /// Absolute path of a document in this store
    pub fn absolute_path(&self, path: &RelativePath) -> PathBuf {
        path.to_path(&self.notes_root)
    }
}

impl DocumentStore for FsStore {
    fn list_documents(&self) -> Result<Vec<DocumentInfo>, IoError> {
        scan_markdown_files(&self.notes_root)?
            .into_iter()
            .map(|path| {
                let relative = path
                    .strip_prefix(&self.notes_root)
                    .ok()
                    .and_then(|rel| RelativePathBuf::from_path(rel).ok())
                    .ok_or_else(|| IoError::InvalidPath(path.clone()))?;
                Ok(DocumentInfo::new(relative, created_ms(&path)?))
            })
            .collect()
    }

    fn read(&self, path: &RelativePath) -> Result<String, IoError> {
        read_file(path, &self.notes_root)
    }

    fn metadata(&self, path: &RelativePath) -> Result<DocumentMetadata, IoError> {
        Ok(index_document(&read_file(path, &self.notes_root)?))
    }

    fn write(&self, path: &RelativePath, content: &str) -> Result<(), IoError> {
        write_file(path, &self.notes_root, content)
    }
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a markdown file
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Scan for markdown files in the notes directory, sorted by path
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

/// Creation time in milliseconds since the epoch. Platforms without a birth
/// time report the modification time instead.
fn created_ms(path: &Path) -> Result<u64, IoError> {
    let meta = fs::metadata(path)?;
    let created = meta.created().or_else(|_| meta.modified())?;
    Ok(created
        .duration_since(UNIX_EPOCH)
        .map_or(0, |since| since.as_millis() as u64))
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_notes_dir};

    #[test]
    fn test_lists_markdown_documents_recursively() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "b.md", "- [ ] b");
        create_test_file(&notes_dir, "a.md", "- [ ] a");
        create_test_file(&notes_dir, "image.png", "fake image data");
        std::fs::create_dir(notes_dir.path().join("archive")).unwrap();
        create_test_file(&notes_dir, "archive/old.md", "- [x] old");

        let store = FsStore::new(notes_dir.path()).unwrap();
        let documents = store.list_documents().unwrap();

        let paths: Vec<_> = documents.iter().map(|d| d.path().as_str()).collect();
        assert_eq!(paths, vec!["a.md", "archive/old.md", "b.md"]);
        assert_eq!(documents[1].name(), "old.md");
        assert!(documents.iter().all(|d| d.created_ms() > 0));
    }

    #[test]
    fn test_metadata_indexes_file_content() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "list.md", "#todo\n- [ ] call [[Alice]]");

        let store = FsStore::new(notes_dir.path()).unwrap();
        let meta = store.metadata(RelativePath::new("list.md")).unwrap();

        assert_eq!(meta.tags().len(), 1);
        assert_eq!(meta.tags()[0].tag, "#todo");
        assert_eq!(meta.links()[0].target, "Alice");
        assert_eq!(meta.links()[0].line, 1);
    }

    #[test]
    fn test_handle_invalid_notes_directory() {
        let result = FsStore::new("/this/path/does/not/exist");
        assert!(matches!(result, Err(IoError::InvalidNotesDir(_))));

        let result = scan_markdown_files(Path::new("/this/path/does/not/exist"));
        assert!(result.unwrap_err().to_string().contains("notes directory"));
    }

    #[test]
    fn test_read_file_not_found() {
        let notes_dir = create_test_notes_dir();
        let store = FsStore::new(notes_dir.path()).unwrap();
        let result = store.read(RelativePath::new("nonexistent.md"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_then_read() {
        let notes_dir = create_test_notes_dir();
        let store = FsStore::new(notes_dir.path()).unwrap();
        let path = RelativePath::new("folder/new.md");

        store.write(path, "- [x] written").unwrap();

        assert_eq!(store.read(path).unwrap(), "- [x] written");
        assert!(notes_dir.path().join("folder").is_dir());
    }
}
