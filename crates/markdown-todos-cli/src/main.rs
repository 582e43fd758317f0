//! markdown-todos - list and tick off the todos in a folder of markdown notes.
//!
//! # Usage
//!
//! ```bash
//! # Todos under #todo, grouped by tag
//! markdown-todos --notes ~/notes list --tag todo --group-by tag
//! markdown-todos list --json
//!
//! # Flip the checkbox on line 12 of a note (line as printed by `list`)
//! markdown-todos toggle projects/site.md 12
//!
//! # Open the note a [[link]] points at
//! markdown-todos open "Site plan"
//! ```

mod editor;
mod output;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use markdown_todos_config::Config;
use markdown_todos_engine::navigation::{Modifiers, Platform, nav_to_file};
use markdown_todos_engine::{
    DocumentStore, FsStore, GroupBy, Settings, SortDirection, TodoItem, group_todos, parse_todos,
    toggle_todo_item,
};
use std::path::{Path, PathBuf};

use editor::EditorWorkspace;

#[derive(Parser)]
#[command(name = "markdown-todos", version, about)]
struct Cli {
    /// Notes folder (default: notes_path from the config file)
    #[arg(long, global = true)]
    notes: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the collected todos
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output groups as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip the checkbox of the todo on LINE of the note at PATH
    Toggle {
        /// Note path relative to the notes folder
        path: String,
        /// 1-based line number
        line: usize,
    },
    /// Open the note a link points at
    Open {
        link: String,

        /// Open beside the current view instead of replacing it
        #[arg(long)]
        split: bool,
    },
}

/// Overrides for the `[todos]` table of the config file
#[derive(Args, Default)]
struct FilterArgs {
    /// Main tag that marks todo regions, with or without '#'
    #[arg(long)]
    tag: Option<String>,

    /// new->old or old->new
    #[arg(long)]
    sort: Option<SortDirection>,

    /// page or tag
    #[arg(long)]
    group_by: Option<GroupBy>,

    /// Skip notes inside this folder
    #[arg(long)]
    ignore: Option<String>,
}

impl FilterArgs {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(tag) = self.tag {
            settings.tag = tag;
        }
        if let Some(sort) = self.sort {
            settings.sort = sort;
        }
        if let Some(group_by) = self.group_by {
            settings.group_by = group_by;
        }
        if let Some(ignore) = self.ignore {
            settings.ignore_folder = ignore;
        }
        settings
    }
}

/// Notes folder and settings after merging flags over the config file
fn resolve(notes: Option<PathBuf>) -> Result<(PathBuf, Settings)> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) if notes.is_some() => {
            warn!("Ignoring config file: {e}");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let settings = config
        .as_ref()
        .map(|config| config.todos.clone())
        .unwrap_or_default();
    let notes_path = notes
        .or_else(|| config.map(|config| config.notes_path))
        .ok_or_else(|| {
            anyhow!(
                "No notes folder given. Pass --notes or create a config file at {}",
                Config::config_path().display()
            )
        })?;

    Ok((notes_path, settings))
}

fn open_store(notes_path: &Path) -> Result<FsStore> {
    FsStore::new(notes_path)
        .with_context(|| format!("Cannot use notes folder '{}'", notes_path.display()))
}

fn run_list(store: &FsStore, settings: &Settings, json: bool) -> Result<()> {
    let documents = store.list_documents()?;
    let todos = parse_todos(store, &documents, settings)?;
    let groups = group_todos(todos, settings.group_by);

    let output = if json {
        output::format_json(&groups)
    } else {
        output::format_human(&groups)
    };
    println!("{output}");
    Ok(())
}

fn find_todo(todos: Vec<TodoItem>, line: usize) -> Option<TodoItem> {
    todos.into_iter().find_map(|todo| {
        if todo.line == line {
            Some(todo)
        } else {
            find_todo(todo.children, line)
        }
    })
}

fn run_toggle(store: &FsStore, path: &str, line: usize) -> Result<()> {
    let line_index = line
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Line numbers start at 1"))?;
    let document = store
        .list_documents()?
        .into_iter()
        .find(|document| document.path().as_str() == path)
        .ok_or_else(|| anyhow!("No note at '{path}'"))?;

    // Every todo of the note, whatever its tag
    let todos = parse_todos(store, std::slice::from_ref(&document), &Settings::default())?;
    let todo =
        find_todo(todos, line_index).ok_or_else(|| anyhow!("No todo on {path}:{line}"))?;

    if !toggle_todo_item(store, &todo)? {
        anyhow::bail!("'{path}' disappeared before it could be updated");
    }
    println!("[{}] {path}:{line}", if todo.checked { " " } else { "x" });
    Ok(())
}

fn run_open(store: FsStore, link: &str, split: bool) -> Result<()> {
    let documents = store.list_documents()?;
    let workspace = EditorWorkspace::from_env(store, documents);
    let modifiers = Modifiers {
        meta: split,
        ctrl: split,
    };

    if !nav_to_file(&workspace, link, modifiers, Platform::current())? {
        anyhow::bail!("No note matches '{link}'");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let (notes_path, settings) = resolve(cli.notes)?;
    let store = open_store(&notes_path)?;
    info!("Using notes in {}", store.notes_root().display());

    match cli.command {
        Command::List { filters, json } => run_list(&store, &filters.apply(settings), json),
        Command::Toggle { path, line } => run_toggle(&store, &path, line),
        Command::Open { link, split } => run_open(store, &link, split),
    }
}
