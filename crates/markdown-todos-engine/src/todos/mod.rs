//! # Todo Extraction
//!
//! The pipeline that turns documents into todo items, leaf modules first:
//!
//! - **`tag`**: splits `#main/sub` into a [`TagMeta`](crate::models::TagMeta)
//! - **`line`**: recognises checkbox lines and pulls out state, indent and text
//! - **`tokenizer`**: layered bold / italic / link tokenizing of todo text
//! - **`decorate`**: resolves link tokens against the line's cross-references
//! - **`builder`**: assembles one item, and nests items by indentation
//! - **`scanner`**: walks the tagged regions of one document
//! - **`pipeline`**: filters, reads, scans, dedups, sorts and groups documents
//! - **`toggle`**: rewrites the checkbox of one line

pub mod builder;
pub mod decorate;
pub mod line;
pub mod pipeline;
pub mod scanner;
pub mod tag;
pub mod tokenizer;
pub mod toggle;

use crate::io::IoError;

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("Malformed tag {0:?}: expected #name or #name/sub")]
    MalformedTag(String),
    #[error("Capture group {index} requested from a pattern with {groups} capture groups")]
    MissingCaptureGroup { index: usize, groups: usize },
    #[error("Invalid tag pattern: {0}")]
    TagPattern(#[from] regex::Error),
    #[error(transparent)]
    Io(#[from] IoError),
}

pub use builder::{TodoForest, build_todo};
pub use decorate::{decorate, link_map};
pub use line::{LineClassifier, is_valid_todo_line};
pub use pipeline::{group_todos, parse_todos};
pub use scanner::scan_document;
pub use tag::tag_meta;
pub use tokenizer::{all_matches, tokenize};
pub use toggle::{set_todo_status_at_line, toggle_todo_item};
