//! Layered inline tokenizer for todo text.
//!
//! Three layers run in fixed order: bold `**x**`, italic `*x*`, link `[[x]]`.
//! A layer only splits text leaves. Tokens made by an earlier layer are not
//! re-split themselves, but their children are, so `**[[x]]**` still yields a
//! link inside the bold token.

use regex::Regex;
use std::sync::OnceLock;

use super::TodoError;
use crate::models::{ChunkKind, TokenChunk};

struct Layer {
    kind: ChunkKind,
    pattern: &'static Regex,
}

fn layers() -> [Layer; 3] {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static ITALIC: OnceLock<Regex> = OnceLock::new();
    static LINK: OnceLock<Regex> = OnceLock::new();

    [
        Layer {
            kind: ChunkKind::Bold,
            pattern: BOLD
                .get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Invalid bold regex")),
        },
        Layer {
            kind: ChunkKind::Italic,
            pattern: ITALIC
                .get_or_init(|| Regex::new(r"\*([^*]+)\*").expect("Invalid italic regex")),
        },
        Layer {
            kind: ChunkKind::Link,
            pattern: LINK
                .get_or_init(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("Invalid link regex")),
        },
    ]
}

/// Tokenize todo text (tag already removed) into a chunk tree
pub fn tokenize(text: &str) -> Result<Vec<TokenChunk>, TodoError> {
    let mut chunks = vec![TokenChunk::text(text)];
    for layer in layers() {
        chunks = split_layer(chunks, &layer)?;
    }
    Ok(chunks)
}

fn split_layer(chunks: Vec<TokenChunk>, layer: &Layer) -> Result<Vec<TokenChunk>, TodoError> {
    let mut out = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        match chunk {
            TokenChunk::Text(raw) => {
                let mut tokens = all_matches(layer.pattern, &raw, 1)?.into_iter();
                for piece in layer.pattern.split(&raw) {
                    if !piece.is_empty() {
                        out.push(TokenChunk::text(piece));
                    }
                    if let Some(token) = tokens.next() {
                        out.push(TokenChunk::token(layer.kind, token));
                    }
                }
            }
            TokenChunk::Token {
                kind,
                raw,
                children,
            } => out.push(TokenChunk::Token {
                kind,
                raw,
                children: split_layer(children, layer)?,
            }),
        }
    }

    Ok(out)
}

/// Capture group `capture_index` of every non-overlapping match, in order.
///
/// Asking for a group the pattern does not define is a caller bug and fails
/// with [`TodoError::MissingCaptureGroup`] rather than returning nothing.
pub fn all_matches(
    pattern: &Regex,
    text: &str,
    capture_index: usize,
) -> Result<Vec<String>, TodoError> {
    let groups = pattern.captures_len() - 1;
    if capture_index > groups {
        return Err(TodoError::MissingCaptureGroup {
            index: capture_index,
            groups,
        });
    }

    Ok(pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(capture_index))
        .map(|m| m.as_str().to_string())
        .collect())
}
