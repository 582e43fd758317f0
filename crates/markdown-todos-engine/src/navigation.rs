//! Following links out of todo text.
//!
//! The host application is reached only through the [`Workspace`] trait and
//! the [`Platform`] / [`Modifiers`] values passed in by the caller.

use std::time::{Duration, Instant};

use crate::models::DocumentInfo;

/// How long the pointer has to rest on a link before its preview opens
pub const HOVER_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

/// Modifier keys held while a link was activated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub meta: bool,
    pub ctrl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTarget {
    /// Reuse the current view
    Current,
    /// Open beside the current view
    Split,
}

/// Host capabilities needed to navigate
pub trait Workspace {
    type Error;

    fn documents(&self) -> &[DocumentInfo];
    fn open(&self, document: &DocumentInfo, target: OpenTarget) -> Result<(), Self::Error>;
    fn show_hover_preview(&self, path: &str);
}

pub fn ensure_md_extension(path: &str) -> String {
    if path.ends_with(".md") {
        path.to_string()
    } else {
        format!("{path}.md")
    }
}

/// First document whose path ends with `path` (with `.md` added if missing)
pub fn resolve_document<'a>(path: &str, documents: &'a [DocumentInfo]) -> Option<&'a DocumentInfo> {
    let wanted = ensure_md_extension(path);
    documents
        .iter()
        .find(|document| document.path().as_str().ends_with(&wanted))
}

/// Cmd on macOS, Ctrl elsewhere
pub fn open_in_split(modifiers: Modifiers, platform: Platform) -> bool {
    match platform {
        Platform::MacOs => modifiers.meta,
        Platform::Other => modifiers.ctrl,
    }
}

/// Open the document a link points at. `Ok(false)` when no document matches.
pub fn nav_to_file<W: Workspace>(
    workspace: &W,
    path: &str,
    modifiers: Modifiers,
    platform: Platform,
) -> Result<bool, W::Error> {
    let Some(document) = resolve_document(path, workspace.documents()) else {
        return Ok(false);
    };

    let target = if open_in_split(modifiers, platform) {
        OpenTarget::Split
    } else {
        OpenTarget::Current
    };
    workspace.open(document, target)?;
    Ok(true)
}

/// A pending hover preview: fires once after [`HOVER_DELAY`] unless the
/// pointer leaves first.
#[derive(Debug, Clone)]
pub struct HoverPreview {
    path: String,
    started: Instant,
    state: HoverState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoverState {
    Pending,
    Shown,
    Cancelled,
}

impl HoverPreview {
    pub fn start(path: impl Into<String>, now: Instant) -> Self {
        Self {
            path: path.into(),
            started: now,
            state: HoverState::Pending,
        }
    }

    /// The pointer left the link
    pub fn cancel(&mut self) {
        if self.state == HoverState::Pending {
            self.state = HoverState::Cancelled;
        }
    }

    /// Show the preview if it is due. Returns true on the call that shows it.
    pub fn poll<W: Workspace>(&mut self, now: Instant, workspace: &W) -> bool {
        if self.state != HoverState::Pending || now.duration_since(self.started) < HOVER_DELAY {
            return false;
        }
        self.state = HoverState::Shown;
        workspace.show_hover_preview(&self.path);
        true
    }
}
