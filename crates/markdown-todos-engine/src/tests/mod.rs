use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use relative_path::RelativePath;
use tempfile::TempDir;

use crate::index::index_document;
use crate::io::{DocumentStore, IoError};
use crate::models::{DocumentInfo, DocumentMetadata};

/// Create a temporary notes directory with test files
pub fn create_test_notes_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test markdown file with content
pub fn create_test_file(notes_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = notes_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// In-memory store that records which documents had their text read
#[derive(Default)]
pub struct MemoryStore {
    documents: Vec<DocumentInfo>,
    contents: Mutex<BTreeMap<String, String>>,
    reads: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, created_ms: u64, content: &str) -> Self {
        self.documents
            .push(DocumentInfo::from_relative_str(path, created_ms));
        self.contents
            .get_mut()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        self
    }

    pub fn documents(&self) -> Vec<DocumentInfo> {
        self.documents.clone()
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.contents.lock().unwrap().get(path).cloned()
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }

    fn lookup(&self, path: &RelativePath) -> Result<String, IoError> {
        self.content(path.as_str())
            .ok_or_else(|| IoError::NotFound(PathBuf::from(path.as_str())))
    }
}

impl DocumentStore for MemoryStore {
    fn list_documents(&self) -> Result<Vec<DocumentInfo>, IoError> {
        Ok(self.documents())
    }

    fn read(&self, path: &RelativePath) -> Result<String, IoError> {
        let content = self.lookup(path)?;
        self.reads.lock().unwrap().push(path.to_string());
        Ok(content)
    }

    fn metadata(&self, path: &RelativePath) -> Result<DocumentMetadata, IoError> {
        Ok(index_document(&self.lookup(path)?))
    }

    fn write(&self, path: &RelativePath, content: &str) -> Result<(), IoError> {
        self.contents
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        Ok(())
    }
}
