//! # Metadata Index
//!
//! Line-based scan of a document for the two things the todo pipeline needs
//! from a metadata index: tag occurrences and `[[wikilink]]` cross-references,
//! each with the zero-based line it starts on.
//!
//! Each line is walked with a [`LineCursor`]. Constructs are tried in
//! precedence order:
//! - code spans are raw zones and suppress everything inside them
//! - wikilinks
//! - tags, only at line start or after whitespace
//!
//! Constructs never span lines; an unclosed delimiter is plain text.

pub mod cursor;
pub mod kinds;

use crate::models::{CrossReference, DocumentMetadata, TagOccurrence};
use crate::todos::scanner::split_lines;

use cursor::LineCursor;
use kinds::{CodeSpan, Tag, WikiLink};

/// An indexed construct found on one line. Offsets are byte columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRef<'a> {
    CodeSpan {
        start: usize,
        inner: &'a str,
    },
    WikiLink {
        start: usize,
        target: &'a str,
        alias: Option<&'a str>,
    },
    Tag {
        start: usize,
        /// Tag text including the leading `#`
        text: &'a str,
    },
}

/// Build the tag and link index for a whole document
pub fn index_document(text: &str) -> DocumentMetadata {
    let mut tags = Vec::new();
    let mut links = Vec::new();

    for (line, content) in split_lines(text).into_iter().enumerate() {
        for found in scan_line(content) {
            match found {
                LineRef::Tag { text, .. } => tags.push(TagOccurrence {
                    tag: text.to_string(),
                    line,
                }),
                LineRef::WikiLink { target, alias, .. } => links.push(CrossReference {
                    target: target.to_string(),
                    display: alias.map(str::to_string),
                    line,
                }),
                LineRef::CodeSpan { .. } => {}
            }
        }
    }

    DocumentMetadata {
        tags: Some(tags),
        links: Some(links),
    }
}

/// Find every code span, wikilink and tag on a single line, left to right
pub fn scan_line(line: &str) -> Vec<LineRef<'_>> {
    let mut cur = LineCursor::new(line);
    let mut out = vec![];

    while !cur.eof() {
        if let Some(found) = try_code_span(&mut cur) {
            out.push(found);
            continue;
        }
        if let Some(found) = try_wikilink(&mut cur) {
            out.push(found);
            continue;
        }
        if let Some(found) = try_tag(&mut cur) {
            out.push(found);
            continue;
        }
        cur.bump();
    }

    out
}

fn try_code_span<'a>(cur: &mut LineCursor<'a>) -> Option<LineRef<'a>> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump();
    let inner_start = cur.pos();
    cur.bump_while(|b| b != CodeSpan::TICK);
    let inner_end = cur.pos();

    if cur.peek() != Some(CodeSpan::TICK) {
        *cur = saved;
        return None;
    }
    cur.bump();

    Some(LineRef::CodeSpan {
        start,
        inner: cur.slice(inner_start, inner_end),
    })
}

fn try_wikilink<'a>(cur: &mut LineCursor<'a>) -> Option<LineRef<'a>> {
    if !cur.starts_with(WikiLink::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(WikiLink::OPEN.len());
    let target_start = cur.pos();

    while !cur.eof() && cur.peek() != Some(WikiLink::ALIAS) && !cur.starts_with(WikiLink::CLOSE)
    {
        cur.bump();
    }
    let target_end = cur.pos();

    let mut alias = None;
    if cur.peek() == Some(WikiLink::ALIAS) {
        cur.bump();
        let alias_start = cur.pos();
        while !cur.eof() && !cur.starts_with(WikiLink::CLOSE) {
            cur.bump();
        }
        alias = Some(cur.slice(alias_start, cur.pos()));
    }

    if !cur.starts_with(WikiLink::CLOSE) || target_end == target_start {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiLink::CLOSE.len());

    Some(LineRef::WikiLink {
        start,
        target: cur.slice(target_start, target_end),
        alias,
    })
}

fn try_tag<'a>(cur: &mut LineCursor<'a>) -> Option<LineRef<'a>> {
    if cur.peek() != Some(Tag::HASH) || cur.prev().is_some_and(|b| !b.is_ascii_whitespace()) {
        return None;
    }

    let start = cur.pos();
    let saved = cur.clone();
    cur.bump();
    if !cur.peek().is_some_and(Tag::is_name_start) {
        *cur = saved;
        return None;
    }
    cur.bump_while(Tag::is_name_byte);

    Some(LineRef::Tag {
        start,
        text: cur.slice(start, cur.pos()),
    })
}
