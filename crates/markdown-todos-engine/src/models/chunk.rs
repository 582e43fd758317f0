use serde::{Deserialize, Serialize};

/// Markup kinds recognised inside todo text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    Bold,
    Italic,
    Link,
}

/// Tokenizer output before link resolution.
///
/// A token's `raw` is the inner text of its delimiters (`a` for `**a**`).
/// Its children start as a single text leaf holding that inner text and are
/// split further by the markup layers that run after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenChunk {
    Text(String),
    Token {
        kind: ChunkKind,
        raw: String,
        children: Vec<TokenChunk>,
    },
}

impl TokenChunk {
    pub fn text(raw: impl Into<String>) -> Self {
        Self::Text(raw.into())
    }

    /// A freshly matched token, seeded with its inner text as the only child
    pub fn token(kind: ChunkKind, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self::Token {
            kind,
            children: vec![Self::Text(raw.clone())],
            raw,
        }
    }
}

/// Resolved display tree for one todo line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplayChunk {
    Text {
        value: String,
    },
    Bold {
        children: Vec<DisplayChunk>,
    },
    Italic {
        children: Vec<DisplayChunk>,
    },
    Link {
        children: Vec<DisplayChunk>,
        /// Target document of the cross-reference, `None` when unresolved
        file_path: Option<String>,
        /// Human label of the cross-reference, if it has one
        label: Option<String>,
    },
}

impl DisplayChunk {
    pub fn kind(&self) -> Option<ChunkKind> {
        match self {
            DisplayChunk::Text { .. } => None,
            DisplayChunk::Bold { .. } => Some(ChunkKind::Bold),
            DisplayChunk::Italic { .. } => Some(ChunkKind::Italic),
            DisplayChunk::Link { .. } => Some(ChunkKind::Link),
        }
    }

    pub fn children(&self) -> &[DisplayChunk] {
        match self {
            DisplayChunk::Text { .. } => &[],
            DisplayChunk::Bold { children }
            | DisplayChunk::Italic { children }
            | DisplayChunk::Link { children, .. } => children,
        }
    }

    /// Concatenated text of this chunk and all its descendants
    pub fn plain_text(&self) -> String {
        match self {
            DisplayChunk::Text { value } => value.clone(),
            _ => self.children().iter().map(DisplayChunk::plain_text).collect(),
        }
    }
}
