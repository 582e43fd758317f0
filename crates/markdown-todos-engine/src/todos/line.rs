use regex::Regex;
use std::sync::OnceLock;

use super::TodoError;

fn valid_todo_regex() -> &'static Regex {
    static VALID: OnceLock<Regex> = OnceLock::new();
    VALID.get_or_init(|| Regex::new(r"^\s*-\s\[(\s|x)\]\s*\S").expect("Invalid todo regex"))
}

fn checked_regex() -> &'static Regex {
    static CHECKED: OnceLock<Regex> = OnceLock::new();
    CHECKED.get_or_init(|| Regex::new(r"^\s*-\s\[x\]").expect("Invalid checked regex"))
}

fn checkbox_regex() -> &'static Regex {
    static CHECKBOX: OnceLock<Regex> = OnceLock::new();
    CHECKBOX.get_or_init(|| {
        Regex::new(r"^(\s*)-\s\[(?:\s|x)\]\s?(.*)$").expect("Invalid checkbox regex")
    })
}

/// Decides which lines are todos, optionally ignoring one tag's tokens.
///
/// With a tag, every `#tag...` token (and one whitespace character before
/// it) is removed before the line is matched, so a line holding nothing but
/// the tag is not a todo.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    tag_pattern: Option<Regex>,
}

impl LineClassifier {
    pub fn new(main_tag: Option<&str>) -> Result<Self, TodoError> {
        let tag_pattern = main_tag
            .map(|tag| Regex::new(&format!(r"\s?#{}\S*", regex::escape(tag))))
            .transpose()?;
        Ok(Self { tag_pattern })
    }

    /// Classifier that strips no tag
    pub fn untagged() -> Self {
        Self { tag_pattern: None }
    }

    /// The checkbox has to open the line itself; text after it must remain
    /// once the tag is removed.
    pub fn is_valid_todo(&self, line: &str) -> bool {
        if line.is_empty() || !checkbox_regex().is_match(line) {
            return false;
        }
        valid_todo_regex().is_match(&self.remove_tag(line))
    }

    /// Remove the tag tokens and trim
    pub fn remove_tag(&self, text: &str) -> String {
        match &self.tag_pattern {
            Some(pattern) => pattern.replace_all(text, "").trim().to_string(),
            None => text.trim().to_string(),
        }
    }
}

/// One-off check. Build a [`LineClassifier`] once when classifying many lines.
pub fn is_valid_todo_line(line: &str, main_tag: Option<&str>) -> Result<bool, TodoError> {
    Ok(LineClassifier::new(main_tag)?.is_valid_todo(line))
}

pub fn is_checked(line: &str) -> bool {
    checked_regex().is_match(line)
}

/// Whitespace characters before the `- [` marker, 0 for non-checkbox lines
pub fn indent_width(line: &str) -> usize {
    checkbox_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map_or(0, |indent| indent.as_str().chars().count())
}

/// Text after `- [ ] ` / `- [x] `, tag tokens still present
pub fn payload_text(line: &str) -> Option<&str> {
    checkbox_regex()
        .captures(line)
        .and_then(|caps| caps.get(2))
        .map(|payload| payload.as_str())
}
