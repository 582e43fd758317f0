use log::{debug, info};
use regex::Regex;
use std::sync::OnceLock;

use super::TodoError;
use super::scanner::split_lines;
use crate::io::DocumentStore;
use crate::models::TodoItem;

fn checkbox_regex() -> &'static Regex {
    static CHECKBOX: OnceLock<Regex> = OnceLock::new();
    CHECKBOX
        .get_or_init(|| Regex::new(r"^(\s*-\s\[)[^\]]+(\].*)$").expect("Invalid checkbox regex"))
}

/// Set the checkbox of a single line. Lines without a checkbox are returned as is.
pub fn set_line_status(line: &str, checked: bool) -> String {
    let mark = if checked { "x" } else { " " };
    checkbox_regex()
        .replace(line, |caps: &regex::Captures<'_>| {
            format!("{}{}{}", &caps[1], mark, &caps[2])
        })
        .into_owned()
}

/// Return `text` with the checkbox on `line_index` set to `checked`.
///
/// Lines are rejoined with `\n`. An out of range index leaves the text as is.
pub fn set_todo_status_at_line(text: &str, line_index: usize, checked: bool) -> String {
    let mut lines: Vec<String> = split_lines(text).into_iter().map(str::to_string).collect();
    match lines.get_mut(line_index) {
        Some(line) => *line = set_line_status(line, checked),
        None => return text.to_string(),
    }
    lines.join("\n")
}

/// Flip the checkbox of `todo` in its document and write the document back.
///
/// Returns `Ok(false)` without touching anything when the document is no
/// longer listed by the store.
pub fn toggle_todo_item<S: DocumentStore + ?Sized>(
    store: &S,
    todo: &TodoItem,
) -> Result<bool, TodoError> {
    let documents = store.list_documents()?;
    let Some(document) = documents
        .iter()
        .find(|document| document.path() == todo.file_path.as_relative_path())
    else {
        debug!("{} is not in the store, nothing to toggle", todo.file_path);
        return Ok(false);
    };

    let text = store.read(document.path())?;
    let updated = set_todo_status_at_line(&text, todo.line, !todo.checked);
    store.write(document.path(), &updated)?;

    info!(
        "Marked {}:{} as {}",
        todo.file_path,
        todo.line + 1,
        if todo.checked { "open" } else { "done" }
    );
    Ok(true)
}
