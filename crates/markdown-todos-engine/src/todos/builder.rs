use super::TodoError;
use super::decorate::{decorate, link_map};
use super::line::{LineClassifier, indent_width, is_checked, payload_text};
use super::tokenizer::tokenize;
use crate::models::{CrossReference, DocumentInfo, TagMeta, TodoItem};

/// Everything about a document region that stays fixed while its lines are built
pub struct TodoContext<'a> {
    pub document: &'a DocumentInfo,
    pub tag: Option<&'a TagMeta>,
    pub classifier: &'a LineClassifier,
    pub references: &'a [CrossReference],
}

/// Build the todo for one line, or `None` when the line is not a todo
pub fn build_todo(
    ctx: &TodoContext<'_>,
    line: &str,
    line_index: usize,
) -> Result<Option<TodoItem>, TodoError> {
    if !ctx.classifier.is_valid_todo(line) {
        return Ok(None);
    }
    let Some(payload) = payload_text(line) else {
        return Ok(None);
    };

    let text = ctx.classifier.remove_tag(payload);
    let chunks = tokenize(&text)?;
    let links = link_map(ctx.references, line_index);

    Ok(Some(TodoItem {
        tag: ctx.tag.cloned(),
        checked: is_checked(line),
        display: decorate(&chunks, &links),
        file_path: ctx.document.path().to_relative_path_buf(),
        file_name: ctx.document.name().to_string(),
        file_label: ctx.document.label().to_string(),
        file_created_ms: ctx.document.created_ms(),
        line: line_index,
        indent: indent_width(line),
        children: vec![],
    }))
}

/// Assembles todos into a tree by indentation.
///
/// Keeps a stack of open items. A new item closes every open item indented
/// at least as far as itself, then opens under whatever remains on top, so
/// deeper items nest and equally indented items are siblings. Closed items
/// are attached to their parent, or to the top level when the stack is empty.
#[derive(Debug, Default)]
pub struct TodoForest {
    roots: Vec<TodoItem>,
    open: Vec<TodoItem>,
}

impl TodoForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: TodoItem) {
        self.close_to(item.indent);
        self.open.push(item);
    }

    /// End the current run of consecutive todo lines
    pub fn break_run(&mut self) {
        while let Some(item) = self.open.pop() {
            self.attach(item);
        }
    }

    pub fn finish(mut self) -> Vec<TodoItem> {
        self.break_run();
        self.roots
    }

    fn close_to(&mut self, indent: usize) {
        while let Some(top) = self.open.pop() {
            if top.indent < indent {
                self.open.push(top);
                break;
            }
            self.attach(top);
        }
    }

    fn attach(&mut self, item: TodoItem) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(item),
            None => self.roots.push(item),
        }
    }
}
