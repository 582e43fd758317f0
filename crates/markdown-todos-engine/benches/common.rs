// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use std::collections::HashMap;

use markdown_todos_engine::index::index_document;
use markdown_todos_engine::{DocumentInfo, DocumentMetadata, DocumentStore, IoError};
use relative_path::RelativePath;

#[allow(dead_code)]
pub fn generate_todo_line(i: usize) -> String {
    format!("- [ ] task {i} with **bold**, *italic* and a [[Page {i}|link]]")
}

/// A note with `sections` tagged sections, each holding a small todo tree
#[allow(dead_code)]
pub fn generate_todo_document(sections: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("## Section {section}\n\n#todo/area{}\n", section % 4));
        for i in 0..5 {
            content.push_str(&generate_todo_line(section * 5 + i));
            content.push('\n');
            content.push_str(&format!("  - [x] subtask {i} for *section* {section}\n"));
        }
        content.push_str("\nSome prose that ends the run of todos.\n\n");
    }

    content
}

/// Documents kept in memory so the benchmark measures parsing, not disk
#[allow(dead_code)]
pub struct BenchStore {
    documents: Vec<DocumentInfo>,
    contents: HashMap<String, String>,
}

#[allow(dead_code)]
impl BenchStore {
    pub fn new(count: usize, sections: usize) -> Self {
        let mut documents = Vec::new();
        let mut contents = HashMap::new();
        for i in 0..count {
            let path = format!("notes/note-{i}.md");
            documents.push(DocumentInfo::from_relative_str(&path, i as u64));
            let content = if i % 3 == 0 {
                "Just prose, no tags.".to_string()
            } else {
                generate_todo_document(sections)
            };
            contents.insert(path, content);
        }
        Self {
            documents,
            contents,
        }
    }

    fn lookup(&self, path: &RelativePath) -> Result<&String, IoError> {
        self.contents
            .get(path.as_str())
            .ok_or_else(|| IoError::NotFound(path.to_path("")))
    }
}

impl DocumentStore for BenchStore {
    fn list_documents(&self) -> Result<Vec<DocumentInfo>, IoError> {
        Ok(self.documents.clone())
    }

    fn read(&self, path: &RelativePath) -> Result<String, IoError> {
        self.lookup(path).cloned()
    }

    fn metadata(&self, path: &RelativePath) -> Result<DocumentMetadata, IoError> {
        Ok(index_document(self.lookup(path)?))
    }

    fn write(&self, _path: &RelativePath, _content: &str) -> Result<(), IoError> {
        Ok(())
    }
}
