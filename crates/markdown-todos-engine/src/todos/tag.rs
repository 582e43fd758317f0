use regex::Regex;
use std::sync::OnceLock;

use super::TodoError;
use crate::models::TagMeta;

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"^#([^/]+)/?(.*)$").expect("Invalid tag regex"))
}

/// Split `#main` or `#main/sub` on its first `/`.
///
/// A tag without the leading `#` means the metadata index is inconsistent
/// and is reported as [`TodoError::MalformedTag`].
pub fn tag_meta(tag: &str) -> Result<TagMeta, TodoError> {
    let caps = tag_regex()
        .captures(tag)
        .ok_or_else(|| TodoError::MalformedTag(tag.to_string()))?;

    let main = caps[1].to_string();
    let sub = caps
        .get(2)
        .map(|m| m.as_str())
        .filter(|sub| !sub.is_empty())
        .map(str::to_string);

    Ok(TagMeta { main, sub })
}
