use log::debug;

use super::TodoError;
use super::builder::{TodoContext, TodoForest, build_todo};
use super::line::LineClassifier;
use super::tag::tag_meta;
use crate::models::{DocumentInfo, DocumentMetadata, TagMeta, TodoItem};

/// Split document text into lines on `\n`, dropping a `\r` before it
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Collect the todos of one document.
///
/// With a tag filter each matching tag occurrence opens a region that runs
/// from its line to the end of the document, so regions can overlap; the
/// duplicates are removed by the pipeline. Without a filter the whole
/// document is scanned once, untagged.
pub fn scan_document(
    document: &DocumentInfo,
    content: &str,
    metadata: &DocumentMetadata,
    tag_filter: Option<&str>,
) -> Result<Vec<TodoItem>, TodoError> {
    let lines = split_lines(content);
    let references = metadata.links();

    let Some(filter) = tag_filter else {
        let classifier = LineClassifier::untagged();
        let ctx = TodoContext {
            document,
            tag: None,
            classifier: &classifier,
            references,
        };
        return scan_region(&ctx, &lines, 0);
    };

    let classifier = LineClassifier::new(Some(filter))?;
    let mut todos = Vec::new();
    for occurrence in metadata.tags() {
        let tag = tag_meta(&occurrence.tag)?;
        if tag.main != filter {
            continue;
        }
        debug!(
            "Scanning {} from line {} for {}",
            document.path(),
            occurrence.line,
            occurrence.tag
        );
        let ctx = TodoContext {
            document,
            tag: Some(&tag),
            classifier: &classifier,
            references,
        };
        todos.extend(scan_region(&ctx, &lines, occurrence.line)?);
    }

    Ok(todos)
}

/// Whether any tag occurrence of the document has `filter` as its main tag
pub fn has_matching_tag(metadata: &DocumentMetadata, filter: &str) -> Result<bool, TodoError> {
    for occurrence in metadata.tags() {
        let TagMeta { main, .. } = tag_meta(&occurrence.tag)?;
        if main == filter {
            return Ok(true);
        }
    }
    Ok(false)
}

fn scan_region(
    ctx: &TodoContext<'_>,
    lines: &[&str],
    start: usize,
) -> Result<Vec<TodoItem>, TodoError> {
    let mut forest = TodoForest::new();
    for (index, line) in lines.iter().enumerate().skip(start) {
        match build_todo(ctx, line, index)? {
            Some(item) => forest.push(item),
            None => forest.break_run(),
        }
    }
    Ok(forest.finish())
}
