pub mod chunk;
pub mod document;
pub mod metadata;
pub mod todo;

pub use chunk::{ChunkKind, DisplayChunk, TokenChunk};
pub use document::DocumentInfo;
pub use metadata::{CrossReference, DocumentMetadata, LinkMap, LinkMeta, LinkTarget, TagOccurrence};
pub use todo::{GroupBy, Settings, SortDirection, TagMeta, TodoGroup, TodoItem};
