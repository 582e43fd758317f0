use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DisplayChunk;

/// A tag split into its main category and optional sub-category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagMeta {
    pub main: String,
    pub sub: Option<String>,
}

impl TagMeta {
    /// Group key for this tag: `#main` or `#main/sub`
    pub fn key(&self) -> String {
        match &self.sub {
            Some(sub) => format!("#{}/{}", self.main, sub),
            None => format!("#{}", self.main),
        }
    }
}

/// One recognised checkbox line with its parsed text and nested todos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Tag of the region the todo was found in, `None` when scanning untagged
    pub tag: Option<TagMeta>,
    pub checked: bool,
    pub display: Vec<DisplayChunk>,
    pub file_path: RelativePathBuf,
    pub file_name: String,
    pub file_label: String,
    pub file_created_ms: u64,
    /// Zero-based line number in the source document
    pub line: usize,
    /// Count of whitespace characters before the `- [` marker
    pub indent: usize,
    pub children: Vec<TodoItem>,
}

impl TodoItem {
    /// Identity of a todo across a result set
    pub fn key(&self) -> (&RelativePath, usize) {
        (&self.file_path, self.line)
    }

    pub fn main_tag(&self) -> Option<&str> {
        self.tag.as_ref().map(|tag| tag.main.as_str())
    }

    pub fn sub_tag(&self) -> Option<&str> {
        self.tag.as_ref().and_then(|tag| tag.sub.as_deref())
    }

    /// Plain text of the todo with markup removed
    pub fn plain_text(&self) -> String {
        self.display.iter().map(DisplayChunk::plain_text).collect()
    }
}

/// How todos are bucketed for presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// One group per source document
    #[default]
    Page,
    /// One group per `#main/sub` tag
    Tag,
}

/// Ordering of todos by document creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "new->old")]
    NewToOld,
    #[serde(rename = "old->new")]
    OldToNew,
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Page => write!(f, "page"),
            GroupBy::Tag => write!(f, "tag"),
        }
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(GroupBy::Page),
            "tag" => Ok(GroupBy::Tag),
            other => Err(format!("unknown group-by mode {other:?}, expected page or tag")),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::NewToOld => write!(f, "new->old"),
            SortDirection::OldToNew => write!(f, "old->new"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new->old" | "new-old" => Ok(SortDirection::NewToOld),
            "old->new" | "old-new" => Ok(SortDirection::OldToNew),
            other => Err(format!(
                "unknown sort direction {other:?}, expected new->old or old->new"
            )),
        }
    }
}

/// A named bucket of todos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoGroup {
    /// Document path for page groups, `#main[/sub]` for tag groups
    pub group_id: String,
    pub group_name: String,
    #[serde(rename = "type")]
    pub kind: GroupBy,
    pub todos: Vec<TodoItem>,
}

/// User-facing knobs for a collection run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Main tag that marks todo regions; empty scans every document whole
    pub tag: String,
    pub sort: SortDirection,
    pub group_by: GroupBy,
    /// Folder name whose documents are skipped; empty disables the filter
    pub ignore_folder: String,
}

impl Settings {
    /// Main tag to filter on. Regions are opened by main tag only, so a
    /// `todo/work` filter is narrowed to `todo`.
    pub fn tag_filter(&self) -> Option<&str> {
        let tag = self.tag.trim_start_matches('#');
        let main = tag.split_once('/').map_or(tag, |(main, _)| main);
        Some(main).filter(|main| !main.is_empty())
    }

    /// Whether the configured tag names a sub tag that [`Self::tag_filter`] drops
    pub fn has_sub_tag_filter(&self) -> bool {
        self.tag.trim_start_matches('#').contains('/')
    }

    pub fn ignored_folder(&self) -> Option<&str> {
        Some(self.ignore_folder.as_str()).filter(|folder| !folder.is_empty())
    }
}
