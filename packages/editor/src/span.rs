//! # Editable Spans
//!
//! One span wraps one fragment of page copy. It registers itself with the
//! store on mount, deregisters on drop, and runs a small editing state
//! machine:
//!
//! ```text
//!             activate (edit mode on)
//!   Display ─────────────────────────→ Editing
//!      ↑                                  │
//!      ├──── blur / Enter (single-line) ──┤  commit: write override if changed
//!      ├──── Escape ──────────────────────┤  cancel: drop draft
//!      └──── edit mode switched off ──────┘  forced: drop draft
//! ```
//!
//! Forced close is silent. Leaving edit mode with a field open discards the
//! draft; there is no autosave and no prompt.

use crate::config::EDITABLE_ATTRIBUTE;
use crate::errors::EditorError;
use crate::key::{ContentKey, MountId, TagKind};
use crate::store::CopyEditStore;
use crate::vdom::{render_content, render_lines, VNode};
use copyedit_content::{extract, ContentNode};
use std::ops::Range;
use tracing::debug;

/// Observable state of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanState {
    Display,
    Editing,
}

/// Which editing field a span opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// `input`; Enter commits
    SingleLine,
    /// `textarea`; Enter inserts a newline
    MultiLine,
}

impl SurfaceKind {
    /// Multi-line when longer than `threshold` chars or already multi-line
    pub fn for_text(text: &str, threshold: usize) -> Self {
        if text.contains('\n') || text.chars().count() > threshold {
            SurfaceKind::MultiLine
        } else {
            SurfaceKind::SingleLine
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            SurfaceKind::SingleLine => "input",
            SurfaceKind::MultiLine => "textarea",
        }
    }
}

/// Keys the editing field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter { shift: bool },
    Escape,
    Other,
}

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Committed(CommitOutcome),
    Cancelled,
    /// Not handled; the field processes it normally
    PassThrough,
}

/// Result of leaving the editing state through a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Draft differed from the resolved text and was stored
    Written,
    /// Draft matched; nothing was stored
    Unchanged,
}

#[derive(Debug, Clone)]
struct EditingSession {
    draft: String,
    surface: SurfaceKind,
    /// Byte range of the draft that is selected
    selection: Range<usize>,
    /// Store mode generation when editing began
    generation: u64,
}

#[derive(Debug, Clone)]
enum Session {
    Display,
    Editing(EditingSession),
}

/// A mounted piece of editable copy
#[derive(Debug)]
pub struct EditableSpan {
    store: CopyEditStore,
    key: ContentKey,
    content: ContentNode,
    original: String,
    tag: TagKind,
    mount: MountId,
    session: Session,
}

impl EditableSpan {
    /// Mount a `span` for `key` showing `content`
    pub fn mount(
        store: &CopyEditStore,
        key: impl Into<ContentKey>,
        content: impl Into<ContentNode>,
    ) -> Result<Self, EditorError> {
        Self::mount_as(store, key, content, TagKind::default())
    }

    /// Mount with an explicit element kind
    pub fn mount_as(
        store: &CopyEditStore,
        key: impl Into<ContentKey>,
        content: impl Into<ContentNode>,
        tag: TagKind,
    ) -> Result<Self, EditorError> {
        let key = key.into();
        let content = content.into();
        let original = extract(&content);
        let mount = store.register(key.clone(), original.clone(), tag)?;

        Ok(Self {
            store: store.clone(),
            key,
            content,
            original,
            tag,
            mount,
            session: Session::Display,
        })
    }

    pub fn key(&self) -> &ContentKey {
        &self.key
    }

    pub fn tag(&self) -> TagKind {
        self.tag
    }

    pub fn content(&self) -> &ContentNode {
        &self.content
    }

    pub fn mount_id(&self) -> MountId {
        self.mount
    }

    /// Extracted text of the original content
    pub fn original_text(&self) -> &str {
        &self.original
    }

    /// Override if one is stored for this key, else the original text
    pub fn resolved_text(&self) -> String {
        self.store
            .get_override(&self.key)
            .unwrap_or_else(|| self.original.clone())
    }

    /// Replace the original content (new props on re-render)
    pub fn set_content(&mut self, content: impl Into<ContentNode>) -> Result<(), EditorError> {
        let content = content.into();
        let original = extract(&content);
        self.store.update_registration(self.mount, original.clone())?;
        self.content = content;
        self.original = original;
        Ok(())
    }

    pub fn state(&mut self) -> SpanState {
        self.sync();
        match self.session {
            Session::Display => SpanState::Display,
            Session::Editing(_) => SpanState::Editing,
        }
    }

    pub fn is_editing(&mut self) -> bool {
        self.state() == SpanState::Editing
    }

    pub fn draft(&mut self) -> Option<&str> {
        self.sync();
        match &self.session {
            Session::Editing(session) => Some(&session.draft),
            Session::Display => None,
        }
    }

    pub fn surface(&mut self) -> Option<SurfaceKind> {
        self.sync();
        match &self.session {
            Session::Editing(session) => Some(session.surface),
            Session::Display => None,
        }
    }

    pub fn selection(&mut self) -> Option<Range<usize>> {
        self.sync();
        match &self.session {
            Session::Editing(session) => Some(session.selection.clone()),
            Session::Display => None,
        }
    }

    /// Drop an open draft if edit mode was switched off since it opened
    ///
    /// Returns true when a draft was discarded.
    pub fn sync(&mut self) -> bool {
        let Session::Editing(session) = &self.session else {
            return false;
        };

        if self.store.is_edit_mode() && self.store.mode_generation() == session.generation {
            return false;
        }

        debug!(key = %self.key, "Edit mode left, discarding draft");
        self.session = Session::Display;
        true
    }

    /// Click: open the editing field if edit mode is on
    pub fn activate(&mut self) -> bool {
        self.sync();

        if !self.store.is_edit_mode() || matches!(self.session, Session::Editing(_)) {
            return false;
        }

        let draft = self.resolved_text();
        let surface = SurfaceKind::for_text(&draft, self.store.config().multiline_threshold);
        debug!(key = %self.key, ?surface, "Editing started");

        self.session = Session::Editing(EditingSession {
            selection: 0..draft.len(),
            draft,
            surface,
            generation: self.store.mode_generation(),
        });
        true
    }

    /// Replace the draft with the field's current value
    pub fn input(&mut self, value: impl Into<String>) -> bool {
        self.sync();

        match &mut self.session {
            Session::Editing(session) => {
                session.draft = value.into();
                let end = session.draft.len();
                session.selection = end..end;
                true
            }
            Session::Display => false,
        }
    }

    pub fn key_down(&mut self, key: EditKey) -> KeyOutcome {
        self.sync();

        let surface = match &self.session {
            Session::Editing(session) => session.surface,
            Session::Display => return KeyOutcome::PassThrough,
        };

        match key {
            EditKey::Escape => {
                self.cancel();
                KeyOutcome::Cancelled
            }
            EditKey::Enter { shift: false } if surface == SurfaceKind::SingleLine => self
                .commit()
                .map_or(KeyOutcome::PassThrough, KeyOutcome::Committed),
            _ => KeyOutcome::PassThrough,
        }
    }

    /// Focus left the field: commit
    pub fn blur(&mut self) -> Option<CommitOutcome> {
        self.sync();
        self.commit()
    }

    /// Discard the draft without touching the store
    pub fn cancel(&mut self) -> bool {
        self.sync();

        match self.session {
            Session::Editing(_) => {
                debug!(key = %self.key, "Edit cancelled");
                self.session = Session::Display;
                true
            }
            Session::Display => false,
        }
    }

    fn commit(&mut self) -> Option<CommitOutcome> {
        let Session::Editing(session) = std::mem::replace(&mut self.session, Session::Display) else {
            return None;
        };

        if session.draft == self.resolved_text() {
            debug!(key = %self.key, "Edit committed unchanged");
            return Some(CommitOutcome::Unchanged);
        }

        self.store.set_override(self.key.clone(), session.draft);
        debug!(key = %self.key, "Edit committed");
        Some(CommitOutcome::Written)
    }

    /// Render the span; the root always carries the key attribute
    pub fn render(&mut self) -> VNode {
        self.sync();

        let root = VNode::element(self.tag.as_str())
            .with_attr(self.store.config().key_attribute.as_str(), self.key.as_str());

        if let Session::Editing(session) = &self.session {
            let mut field = VNode::element(session.surface.tag())
                .with_attr("value", session.draft.as_str())
                .with_attr("data-selection-start", session.selection.start.to_string())
                .with_attr("data-selection-end", session.selection.end.to_string())
                .with_attr("autofocus", "");
            if session.surface == SurfaceKind::SingleLine {
                field = field.with_attr("type", "text");
            }
            return root.with_child(field);
        }

        if !self.store.is_edit_mode() {
            return match self.store.get_override(&self.key) {
                Some(text) => root.with_children(render_lines(&text)),
                None => root.with_children(render_content(&self.content)),
            };
        }

        root.with_attr(EDITABLE_ATTRIBUTE, "true")
            .with_children(render_lines(&self.resolved_text()))
    }
}

impl Drop for EditableSpan {
    fn drop(&mut self) {
        self.store.deregister(self.mount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing_store() -> CopyEditStore {
        let store = CopyEditStore::default();
        store.set_edit_mode(true);
        store
    }

    #[test]
    fn test_mount_registers_and_drop_deregisters() {
        let store = CopyEditStore::default();

        let span = EditableSpan::mount(&store, "hero.title", "Sell More").unwrap();
        assert_eq!(store.mounted_count(), 1);
        assert_eq!(span.original_text(), "Sell More");

        drop(span);
        assert_eq!(store.mounted_count(), 0);
    }

    #[test]
    fn test_activate_requires_edit_mode() {
        let store = CopyEditStore::default();
        let mut span = EditableSpan::mount(&store, "hero.title", "Sell More").unwrap();

        assert!(!span.activate());
        assert_eq!(span.state(), SpanState::Display);
    }

    #[test]
    fn test_activate_seeds_draft_and_selects_all() {
        let store = editing_store();
        store.set_override("hero.title", "Sell Way More");
        let mut span = EditableSpan::mount(&store, "hero.title", "Sell More").unwrap();

        assert!(span.activate());
        assert_eq!(span.draft(), Some("Sell Way More"));
        assert_eq!(span.selection(), Some(0..13));
        assert!(!span.activate(), "already editing");
    }

    #[test]
    fn test_surface_choice() {
        assert_eq!(SurfaceKind::for_text("Sell More", 50), SurfaceKind::SingleLine);
        assert_eq!(SurfaceKind::for_text("a\nb", 50), SurfaceKind::MultiLine);
        assert_eq!(SurfaceKind::for_text(&"x".repeat(50), 50), SurfaceKind::SingleLine);
        assert_eq!(SurfaceKind::for_text(&"x".repeat(51), 50), SurfaceKind::MultiLine);
    }

    #[test]
    fn test_enter_commits_single_line() {
        let store = editing_store();
        let mut span = EditableSpan::mount(&store, "cta.label", "Get started").unwrap();

        span.activate();
        span.input("Start now");

        assert_eq!(
            span.key_down(EditKey::Enter { shift: false }),
            KeyOutcome::Committed(CommitOutcome::Written)
        );
        assert_eq!(span.state(), SpanState::Display);
        assert_eq!(store.get_override(span.key()).as_deref(), Some("Start now"));
    }

    #[test]
    fn test_enter_passes_through_multi_line() {
        let store = editing_store();
        let content = ContentNode::sequence([
            ContentNode::text("Line one"),
            ContentNode::line_break(),
            ContentNode::text("Line two"),
        ]);
        let mut span = EditableSpan::mount(&store, "hero.subtitle", content).unwrap();

        span.activate();
        assert_eq!(span.surface(), Some(SurfaceKind::MultiLine));
        assert_eq!(span.key_down(EditKey::Enter { shift: false }), KeyOutcome::PassThrough);
        assert_eq!(span.state(), SpanState::Editing);
    }

    #[test]
    fn test_shift_enter_passes_through() {
        let store = editing_store();
        let mut span = EditableSpan::mount(&store, "cta.label", "Get started").unwrap();

        span.activate();
        assert_eq!(span.key_down(EditKey::Enter { shift: true }), KeyOutcome::PassThrough);
        assert!(span.is_editing());
    }

    #[test]
    fn test_keys_ignored_in_display() {
        let store = editing_store();
        let mut span = EditableSpan::mount(&store, "cta.label", "Get started").unwrap();

        assert_eq!(span.key_down(EditKey::Escape), KeyOutcome::PassThrough);
        assert_eq!(span.blur(), None);
        assert!(!span.input("ignored"));
        assert!(!span.cancel());
    }

    #[test]
    fn test_unchanged_commit_skips_write() {
        let store = editing_store();
        let mut span = EditableSpan::mount(&store, "cta.label", "Get started").unwrap();

        span.activate();
        assert_eq!(span.blur(), Some(CommitOutcome::Unchanged));
        assert_eq!(store.override_count(), 0);
    }

    #[test]
    fn test_forced_close_after_quick_toggle() {
        let store = editing_store();
        let mut span = EditableSpan::mount(&store, "cta.label", "Get started").unwrap();

        span.activate();
        span.input("Half typed");

        store.toggle_edit_mode();
        store.toggle_edit_mode();

        assert!(store.is_edit_mode());
        assert_eq!(span.state(), SpanState::Display);
        assert_eq!(span.blur(), None);
        assert_eq!(store.override_count(), 0);
    }

    #[test]
    fn test_set_content_updates_registration() {
        let store = CopyEditStore::default();
        let mut span = EditableSpan::mount(&store, "hero.title", "Sell More").unwrap();

        span.set_content("Sell Even More").unwrap();

        assert_eq!(span.original_text(), "Sell Even More");
        assert_eq!(store.resolved_text(span.key()).as_deref(), Some("Sell Even More"));
    }

    #[test]
    fn test_render_editing_field() {
        let store = editing_store();
        let mut span = EditableSpan::mount_as(&store, "hero.title", "Sell More", TagKind::H1).unwrap();

        span.activate();
        let node = span.render();

        assert_eq!(node.tag(), Some("h1"));
        assert_eq!(node.attr("data-copy-key"), Some("hero.title"));
        let field = &node.children()[0];
        assert_eq!(field.tag(), Some("input"));
        assert_eq!(field.attr("value"), Some("Sell More"));
        assert_eq!(field.attr("data-selection-end"), Some("9"));
    }

    #[test]
    fn test_render_display_in_edit_mode_is_marked_editable() {
        let store = editing_store();
        let mut span = EditableSpan::mount(&store, "hero.title", "Sell More").unwrap();

        let node = span.render();

        assert_eq!(node.attr(EDITABLE_ATTRIBUTE), Some("true"));
        assert_eq!(node.text_content(), "Sell More");
    }

    #[test]
    fn test_render_passthrough_outside_edit_mode() {
        let store = CopyEditStore::default();
        let content = ContentNode::sequence([
            ContentNode::text("Sell "),
            ContentNode::element("strong", [ContentNode::text("More")]),
        ]);
        let mut span = EditableSpan::mount(&store, "hero.title", content).unwrap();

        let node = span.render();

        assert_eq!(node.attr("data-copy-key"), Some("hero.title"));
        assert_eq!(node.attr(EDITABLE_ATTRIBUTE), None);
        assert_eq!(node.children()[1].tag(), Some("strong"));
    }
}
