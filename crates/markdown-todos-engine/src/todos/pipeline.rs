use log::{debug, info, warn};
use rayon::prelude::*;
use relative_path::RelativePathBuf;
use std::collections::{HashMap, HashSet};

use super::TodoError;
use super::scanner::{has_matching_tag, scan_document};
use crate::io::DocumentStore;
use crate::models::{
    DocumentInfo, DocumentMetadata, GroupBy, Settings, SortDirection, TodoGroup, TodoItem,
};

/// Group id for untagged todos when grouping by tag
const UNTAGGED_GROUP: &str = "#";

struct FetchedDocument<'a> {
    document: &'a DocumentInfo,
    content: String,
    metadata: DocumentMetadata,
}

/// Collect the todos of `documents` according to `settings`.
///
/// Documents under the ignored folder are skipped. With a tag filter only
/// documents carrying that tag are read. Reads run in parallel and are
/// collected in input order; the first read error aborts the run. The result
/// is deduplicated by `(file_path, line)`, keeping the first occurrence, and
/// stably sorted by document creation time.
pub fn parse_todos<S: DocumentStore + ?Sized>(
    store: &S,
    documents: &[DocumentInfo],
    settings: &Settings,
) -> Result<Vec<TodoItem>, TodoError> {
    let tag_filter = settings.tag_filter();
    if settings.has_sub_tag_filter() {
        warn!(
            "Tag filter {:?} names a sub tag; filtering on main tag {:?} instead",
            settings.tag, tag_filter
        );
    }

    let candidates: Vec<&DocumentInfo> = documents
        .iter()
        .filter(|document| {
            settings
                .ignored_folder()
                .is_none_or(|folder| !document.is_under_folder(folder))
        })
        .collect();

    let fetched = candidates
        .par_iter()
        .map(|document| fetch(store, *document, tag_filter))
        .collect::<Result<Vec<_>, TodoError>>()?;

    let mut todos = Vec::new();
    for fetched in fetched.into_iter().flatten() {
        if fetched.content.is_empty() {
            continue;
        }
        let found = scan_document(
            fetched.document,
            &fetched.content,
            &fetched.metadata,
            tag_filter,
        )?;
        debug!("{}: {} todos", fetched.document.path(), found.len());
        todos.extend(found);
    }

    let mut todos = dedup(todos);
    sort_by_created(&mut todos, settings.sort);

    info!(
        "Collected {} todos from {} of {} documents",
        todos.len(),
        candidates.len(),
        documents.len()
    );
    Ok(todos)
}

fn fetch<'a, S: DocumentStore + ?Sized>(
    store: &S,
    document: &'a DocumentInfo,
    tag_filter: Option<&str>,
) -> Result<Option<FetchedDocument<'a>>, TodoError> {
    let metadata = store.metadata(document.path())?;
    if let Some(filter) = tag_filter
        && !has_matching_tag(&metadata, filter)?
    {
        return Ok(None);
    }

    let content = store.read(document.path())?;
    Ok(Some(FetchedDocument {
        document,
        content,
        metadata,
    }))
}

/// Drop every todo whose `(file_path, line)` was already seen, in pre-order.
/// Children are checked too, so an item shows up once in the whole tree.
fn dedup(todos: Vec<TodoItem>) -> Vec<TodoItem> {
    fn retain_unseen(
        todos: Vec<TodoItem>,
        seen: &mut HashSet<(RelativePathBuf, usize)>,
    ) -> Vec<TodoItem> {
        todos
            .into_iter()
            .filter_map(|mut todo| {
                if !seen.insert((todo.file_path.clone(), todo.line)) {
                    return None;
                }
                todo.children = retain_unseen(std::mem::take(&mut todo.children), seen);
                Some(todo)
            })
            .collect()
    }

    retain_unseen(todos, &mut HashSet::new())
}

fn sort_by_created(todos: &mut [TodoItem], direction: SortDirection) {
    match direction {
        SortDirection::NewToOld => {
            todos.sort_by(|a, b| b.file_created_ms.cmp(&a.file_created_ms))
        }
        SortDirection::OldToNew => {
            todos.sort_by(|a, b| a.file_created_ms.cmp(&b.file_created_ms))
        }
    }
}

/// Bucket todos by document or by tag.
///
/// Groups appear in the order their first todo appears, and todos keep
/// their order inside a group.
pub fn group_todos(todos: Vec<TodoItem>, group_by: GroupBy) -> Vec<TodoGroup> {
    let mut groups: Vec<TodoGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for todo in todos {
        let group_id = match group_by {
            GroupBy::Page => todo.file_path.to_string(),
            GroupBy::Tag => todo
                .tag
                .as_ref()
                .map_or_else(|| UNTAGGED_GROUP.to_string(), |tag| tag.key()),
        };

        let slot = *index.entry(group_id.clone()).or_insert_with(|| {
            let group_name = match group_by {
                GroupBy::Page => todo.file_label.clone(),
                GroupBy::Tag => todo
                    .tag
                    .as_ref()
                    .map(|tag| tag.sub.clone().unwrap_or_else(|| tag.main.clone()))
                    .unwrap_or_default(),
            };
            groups.push(TodoGroup {
                group_id,
                group_name,
                kind: group_by,
                todos: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].todos.push(todo);
    }

    groups.retain(|group| !group.todos.is_empty());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagMeta;
    use crate::tests::MemoryStore;
    use pretty_assertions::assert_eq;

    fn todo(path: &str, line: usize, created_ms: u64) -> TodoItem {
        TodoItem {
            tag: None,
            checked: false,
            display: vec![],
            file_path: RelativePathBuf::from(path),
            file_name: path.to_string(),
            file_label: path.trim_end_matches(".md").to_string(),
            file_created_ms: created_ms,
            line,
            indent: 0,
            children: vec![],
        }
    }

    fn tagged(mut item: TodoItem, main: &str, sub: Option<&str>) -> TodoItem {
        item.tag = Some(TagMeta {
            main: main.to_string(),
            sub: sub.map(str::to_string),
        });
        item
    }

    fn keys(todos: &[TodoItem]) -> Vec<(String, usize)> {
        todos
            .iter()
            .map(|todo| (todo.file_path.to_string(), todo.line))
            .collect()
    }

    fn settings(tag: &str) -> Settings {
        Settings {
            tag: tag.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let first = tagged(todo("a.md", 3, 0), "todo", Some("home"));
        let second = tagged(todo("a.md", 3, 0), "todo", Some("work"));
        let result = dedup(vec![first.clone(), todo("a.md", 4, 0), second]);
        assert_eq!(keys(&result), vec![("a.md".to_string(), 3), ("a.md".to_string(), 4)]);
        assert_eq!(result[0], first);
    }

    #[test]
    fn dedup_prunes_children_seen_earlier() {
        let mut parent = todo("a.md", 1, 0);
        parent.children.push(todo("a.md", 2, 0));
        let result = dedup(vec![todo("a.md", 2, 0), parent]);
        assert_eq!(keys(&result), vec![("a.md".to_string(), 2), ("a.md".to_string(), 1)]);
        assert!(result[1].children.is_empty());
    }

    #[test]
    fn sort_new_to_old_is_stable() {
        let mut todos = vec![todo("a.md", 0, 10), todo("b.md", 0, 30), todo("c.md", 0, 10)];
        sort_by_created(&mut todos, SortDirection::NewToOld);
        assert_eq!(
            keys(&todos),
            vec![
                ("b.md".to_string(), 0),
                ("a.md".to_string(), 0),
                ("c.md".to_string(), 0)
            ]
        );

        sort_by_created(&mut todos, SortDirection::OldToNew);
        assert_eq!(
            keys(&todos),
            vec![
                ("a.md".to_string(), 0),
                ("c.md".to_string(), 0),
                ("b.md".to_string(), 0)
            ]
        );
    }

    #[test]
    fn group_by_tag_uses_main_and_sub() {
        let todos = vec![
            tagged(todo("a.md", 0, 0), "todo", None),
            tagged(todo("a.md", 1, 0), "todo", Some("work")),
            tagged(todo("b.md", 0, 0), "todo", None),
        ];
        let groups = group_todos(todos, GroupBy::Tag);

        let ids: Vec<_> = groups.iter().map(|g| g.group_id.as_str()).collect();
        assert_eq!(ids, vec!["#todo", "#todo/work"]);
        assert_eq!(groups[0].group_name, "todo");
        assert_eq!(groups[1].group_name, "work");
        assert_eq!(keys(&groups[0].todos), vec![("a.md".to_string(), 0), ("b.md".to_string(), 0)]);
        assert!(groups.iter().all(|g| g.kind == GroupBy::Tag));
    }

    #[test]
    fn group_by_page_keeps_first_seen_order() {
        let todos = vec![todo("b.md", 0, 0), todo("a.md", 0, 0), todo("b.md", 1, 0)];
        let groups = group_todos(todos, GroupBy::Page);

        let ids: Vec<_> = groups.iter().map(|g| g.group_id.as_str()).collect();
        assert_eq!(ids, vec!["b.md", "a.md"]);
        assert_eq!(groups[0].group_name, "b");
        assert_eq!(groups[0].todos.len(), 2);
    }

    #[test]
    fn untagged_todos_share_a_tag_group() {
        let groups = group_todos(vec![todo("a.md", 0, 0)], GroupBy::Tag);
        assert_eq!(groups[0].group_id, UNTAGGED_GROUP);
        assert_eq!(groups[0].group_name, "");
    }

    #[test]
    fn no_todos_no_groups() {
        assert!(group_todos(vec![], GroupBy::Page).is_empty());
    }

    #[test]
    fn ignored_folder_is_never_read() {
        let store = MemoryStore::new()
            .with("archive/x.md", 1, "#todo\n- [ ] old")
            .with("now.md", 2, "#todo\n- [ ] new");
        let settings = Settings {
            ignore_folder: "archive".to_string(),
            ..settings("todo")
        };

        let todos = parse_todos(&store, &store.documents(), &settings).unwrap();

        assert_eq!(keys(&todos), vec![("now.md".to_string(), 1)]);
        assert_eq!(store.reads(), vec!["now.md".to_string()]);
    }

    #[test]
    fn untagged_documents_are_not_read_when_filtering() {
        let store = MemoryStore::new()
            .with("plain.md", 1, "- [ ] no tag here")
            .with("tagged.md", 2, "- [ ] tagged #todo");

        let todos = parse_todos(&store, &store.documents(), &settings("todo")).unwrap();

        assert_eq!(keys(&todos), vec![("tagged.md".to_string(), 0)]);
        assert_eq!(store.reads(), vec!["tagged.md".to_string()]);
    }

    #[test]
    fn overlapping_regions_are_deduplicated() {
        let store = MemoryStore::new().with(
            "a.md",
            1,
            "#todo/home\n- [ ] sweep\n#todo/work\n- [ ] email",
        );

        let todos = parse_todos(&store, &store.documents(), &settings("todo")).unwrap();

        assert_eq!(keys(&todos), vec![("a.md".to_string(), 1), ("a.md".to_string(), 3)]);
        assert_eq!(todos[1].sub_tag(), Some("home"));
    }

    #[test]
    fn slash_paths_in_prose_do_not_abort_the_run() {
        let store = MemoryStore::new()
            .with("a.md", 1, "#todo\n- [ ] real")
            .with("b.md", 2, "path is #/usr/bin and #//x");

        let todos = parse_todos(&store, &store.documents(), &settings("todo")).unwrap();

        assert_eq!(keys(&todos), vec![("a.md".to_string(), 1)]);
        assert_eq!(store.reads(), vec!["a.md".to_string()]);
    }

    #[test]
    fn sub_tag_filter_is_narrowed_to_its_main_tag() {
        let store = MemoryStore::new().with(
            "a.md",
            1,
            "#todo/home\n- [ ] sweep\n#todo/work\n- [ ] email",
        );

        let todos = parse_todos(&store, &store.documents(), &settings("#todo/work")).unwrap();

        assert_eq!(keys(&todos), vec![("a.md".to_string(), 1), ("a.md".to_string(), 3)]);
    }

    #[test]
    fn empty_documents_are_skipped() {
        let store = MemoryStore::new()
            .with("empty.md", 1, "")
            .with("full.md", 2, "- [ ] x");

        let todos = parse_todos(&store, &store.documents(), &Settings::default()).unwrap();

        assert_eq!(keys(&todos), vec![("full.md".to_string(), 0)]);
    }

    #[test]
    fn newest_documents_come_first_by_default() {
        let store = MemoryStore::new()
            .with("old.md", 100, "- [ ] old")
            .with("new.md", 300, "- [ ] new")
            .with("mid.md", 200, "- [ ] mid");

        let todos = parse_todos(&store, &store.documents(), &Settings::default()).unwrap();

        let order: Vec<_> = todos.iter().map(|t| t.file_label.as_str()).collect();
        assert_eq!(order, vec!["new", "mid", "old"]);
    }

    #[test]
    fn read_errors_abort_the_run() {
        let store = MemoryStore::new().with("a.md", 1, "- [ ] x");
        let mut documents = store.documents();
        documents.push(DocumentInfo::from_relative_str("missing.md", 2));

        let result = parse_todos(&store, &documents, &Settings::default());

        assert!(matches!(result, Err(TodoError::Io(_))));
    }
}
