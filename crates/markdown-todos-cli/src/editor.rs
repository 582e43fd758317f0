use anyhow::{Context, Result};
use log::{debug, info};
use markdown_todos_engine::navigation::{OpenTarget, Workspace};
use markdown_todos_engine::{DocumentInfo, FsStore};
use std::path::PathBuf;
use std::process::Command;

/// Opens documents in `$EDITOR`, or prints their path when no editor is set
pub struct EditorWorkspace {
    store: FsStore,
    documents: Vec<DocumentInfo>,
    editor: Option<String>,
}

impl EditorWorkspace {
    pub fn new(store: FsStore, documents: Vec<DocumentInfo>, editor: Option<String>) -> Self {
        Self {
            store,
            documents,
            editor: editor.filter(|editor| !editor.trim().is_empty()),
        }
    }

    pub fn from_env(store: FsStore, documents: Vec<DocumentInfo>) -> Self {
        Self::new(store, documents, std::env::var("EDITOR").ok())
    }

    fn absolute(&self, document: &DocumentInfo) -> PathBuf {
        self.store.absolute_path(document.path())
    }
}

impl Workspace for EditorWorkspace {
    type Error = anyhow::Error;

    fn documents(&self) -> &[DocumentInfo] {
        &self.documents
    }

    fn open(&self, document: &DocumentInfo, target: OpenTarget) -> Result<()> {
        let path = self.absolute(document);

        // A terminal editor has no view to split, the path is handed over instead
        let editor = match (target, &self.editor) {
            (OpenTarget::Current, Some(editor)) => editor,
            _ => {
                println!("{}", path.display());
                return Ok(());
            }
        };

        info!("Opening {} with {editor}", path.display());
        let status = Command::new(editor)
            .arg(&path)
            .status()
            .with_context(|| format!("Failed to launch editor '{editor}'"))?;
        if !status.success() {
            anyhow::bail!("Editor '{editor}' exited with {status}");
        }
        Ok(())
    }

    fn show_hover_preview(&self, path: &str) {
        debug!("Hover preview requested for {path}");
    }
}
