use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;

/// A `#tag` or `#tag/sub` found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOccurrence {
    /// Tag text including the leading `#`
    pub tag: String,
    /// Zero-based line the tag starts on
    pub line: usize,
}

/// A `[[target]]` or `[[target|label]]` reference to another document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub target: String,
    pub display: Option<String>,
    pub line: usize,
}

/// Per-document index of tags and cross-references.
///
/// Both lists are optional to mirror stores that have no index for a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub tags: Option<Vec<TagOccurrence>>,
    pub links: Option<Vec<CrossReference>>,
}

impl DocumentMetadata {
    pub fn tags(&self) -> &[TagOccurrence] {
        self.tags.as_deref().unwrap_or_default()
    }

    pub fn links(&self) -> &[CrossReference] {
        self.links.as_deref().unwrap_or_default()
    }
}

/// Raw link target text exactly as written between `[[` and `]]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkTarget(String);

impl LinkTarget {
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LinkTarget {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Resolution of a link on one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMeta {
    pub file_path: String,
    pub link_name: Option<String>,
}

/// Links on a single line, keyed by raw target text
pub type LinkMap = HashMap<LinkTarget, LinkMeta>;
