use crate::models::{
    ChunkKind, CrossReference, DisplayChunk, LinkMap, LinkMeta, LinkTarget, TokenChunk,
};

/// Map of the cross-references that start on `line`, keyed by raw target.
/// A later reference with the same target replaces an earlier one.
pub fn link_map(references: &[CrossReference], line: usize) -> LinkMap {
    references
        .iter()
        .filter(|reference| reference.line == line)
        .map(|reference| {
            (
                LinkTarget::new(reference.target.as_str()),
                LinkMeta {
                    file_path: reference.target.clone(),
                    link_name: reference.display.clone(),
                },
            )
        })
        .collect()
}

/// Turn a token tree into a display tree of the same shape, resolving links
pub fn decorate(chunks: &[TokenChunk], links: &LinkMap) -> Vec<DisplayChunk> {
    chunks
        .iter()
        .map(|chunk| match chunk {
            TokenChunk::Text(raw) => DisplayChunk::Text { value: raw.clone() },
            TokenChunk::Token {
                kind,
                raw,
                children,
            } => {
                let children = decorate(children, links);
                match kind {
                    ChunkKind::Bold => DisplayChunk::Bold { children },
                    ChunkKind::Italic => DisplayChunk::Italic { children },
                    ChunkKind::Link => {
                        let meta = resolve_link(raw, links);
                        DisplayChunk::Link {
                            children,
                            file_path: meta.map(|m| m.file_path.clone()),
                            label: meta.and_then(|m| m.link_name.clone()),
                        }
                    }
                }
            }
        })
        .collect()
}

/// `target|alias` tokens fall back to the target part
fn resolve_link<'a>(raw: &str, links: &'a LinkMap) -> Option<&'a LinkMeta> {
    links.get(raw).or_else(|| {
        raw.split_once('|')
            .and_then(|(target, _)| links.get(target))
    })
}
