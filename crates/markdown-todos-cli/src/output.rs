//! Output formatting for collected todos.
//!
//! Human-readable text for the terminal and JSON for scripting.

use markdown_todos_engine::{DisplayChunk, TodoGroup, TodoItem};

/// Formats groups as pretty-printed JSON.
pub fn format_json(groups: &[TodoGroup]) -> String {
    serde_json::to_string_pretty(groups).unwrap_or_else(|_| "[]".to_string())
}

/// Formats groups for the terminal, children indented under their parent.
pub fn format_human(groups: &[TodoGroup]) -> String {
    if groups.is_empty() {
        return "No todos found".to_string();
    }

    let mut output = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let heading = if group.group_name.is_empty() {
            group.group_id.as_str()
        } else {
            group.group_name.as_str()
        };
        output.push_str(&format!("{heading}\n"));
        for todo in &group.todos {
            push_todo(&mut output, todo, 1);
        }
    }
    output.trim_end().to_string()
}

fn push_todo(output: &mut String, todo: &TodoItem, depth: usize) {
    output.push_str(&format!(
        "{}[{}] {}  ({}:{})\n",
        "  ".repeat(depth),
        if todo.checked { "x" } else { " " },
        render_chunks(&todo.display),
        todo.file_path,
        todo.line + 1
    ));
    for child in &todo.children {
        push_todo(output, child, depth + 1);
    }
}

/// Inline markup back to plain terminal text. Resolved links show their target.
pub fn render_chunks(chunks: &[DisplayChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| match chunk {
            DisplayChunk::Text { value } => value.clone(),
            DisplayChunk::Bold { children } => format!("**{}**", render_chunks(children)),
            DisplayChunk::Italic { children } => format!("*{}*", render_chunks(children)),
            DisplayChunk::Link {
                children,
                file_path: Some(path),
                label,
            } => {
                let label = label.clone().unwrap_or_else(|| render_chunks(children));
                format!("{label} -> {path}")
            }
            DisplayChunk::Link { children, .. } => format!("[[{}]]", render_chunks(children)),
        })
        .collect()
}
