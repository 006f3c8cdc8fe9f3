//! # Copy-Edit Store
//!
//! Page-session state shared by every editable span and the toolbar:
//!
//! - the edit-mode flag (plus a generation counter bumped on every flip)
//! - operator overrides, keyed by content key
//! - the registration table of mounted spans, in mount order
//! - page header data for export reports
//!
//! The store is a cheap, cloneable handle. It is passed explicitly to the
//! spans that use it and is confined to one thread; every mutation runs
//! synchronously inside an event handler, so no locking is needed.
//!
//! ```rust
//! use copyedit_editor::{CopyEditStore, EditableSpan, MemoryClipboard, PageInfo};
//!
//! let clipboard = MemoryClipboard::new();
//! let store = CopyEditStore::builder()
//!     .page(PageInfo::new("Home", "/"))
//!     .clipboard(Box::new(clipboard.clone()))
//!     .build();
//!
//! let _title = EditableSpan::mount(&store, "hero.title", "Sell More").unwrap();
//! store.export_content().unwrap();
//!
//! assert_eq!(
//!     clipboard.contents().unwrap(),
//!     "Page: Home\nURL: /\n\nhero.title: Sell More"
//! );
//! ```

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::{DuplicateKeyPolicy, EditorConfig};
use crate::errors::{ClipboardError, EditorError, ExportError};
use crate::export::{build_report, ExportReport, PageInfo, ScannedSpan};
use crate::key::{ContentKey, MountId, TagKind};
use crate::notify::{LogNotifier, Notice, Notifier};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// A mounted span as recorded in the store
#[derive(Debug, Clone)]
struct Registration {
    key: ContentKey,
    original: String,
    tag: TagKind,
}

#[derive(Debug, Default)]
struct StoreState {
    edit_mode: bool,
    mode_generation: u64,
    overrides: BTreeMap<ContentKey, String>,
    mounted: BTreeMap<MountId, Registration>,
    next_mount: u64,
    page: PageInfo,
}

struct StoreInner {
    config: EditorConfig,
    state: RefCell<StoreState>,
    clipboard: RefCell<Box<dyn Clipboard>>,
    notifier: Box<dyn Notifier>,
}

/// Shared handle to the page's copy-edit state
#[derive(Clone)]
pub struct CopyEditStore {
    inner: Rc<StoreInner>,
}

/// Builder for [`CopyEditStore`]
pub struct StoreBuilder {
    config: EditorConfig,
    page: PageInfo,
    clipboard: Box<dyn Clipboard>,
    notifier: Box<dyn Notifier>,
}

impl StoreBuilder {
    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn page(mut self, page: PageInfo) -> Self {
        self.page = page;
        self
    }

    pub fn clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn build(self) -> CopyEditStore {
        CopyEditStore {
            inner: Rc::new(StoreInner {
                config: self.config,
                state: RefCell::new(StoreState {
                    page: self.page,
                    ..StoreState::default()
                }),
                clipboard: RefCell::new(self.clipboard),
                notifier: self.notifier,
            }),
        }
    }
}

impl CopyEditStore {
    pub fn builder() -> StoreBuilder {
        StoreBuilder {
            config: EditorConfig::default(),
            page: PageInfo::default(),
            clipboard: Box::new(MemoryClipboard::new()),
            notifier: Box::new(LogNotifier),
        }
    }

    /// Store with default clipboard and notifier
    pub fn new(config: EditorConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.inner.config
    }

    // Edit mode

    pub fn is_edit_mode(&self) -> bool {
        self.inner.state.borrow().edit_mode
    }

    /// Flip edit mode and return the new value
    ///
    /// Spans that are mid-edit discard their drafts the next time they are
    /// touched or rendered.
    pub fn toggle_edit_mode(&self) -> bool {
        let mut state = self.inner.state.borrow_mut();
        state.edit_mode = !state.edit_mode;
        state.mode_generation += 1;
        debug!(edit_mode = state.edit_mode, "Edit mode toggled");
        state.edit_mode
    }

    pub fn set_edit_mode(&self, enabled: bool) {
        if self.is_edit_mode() != enabled {
            self.toggle_edit_mode();
        }
    }

    pub(crate) fn mode_generation(&self) -> u64 {
        self.inner.state.borrow().mode_generation
    }

    // Overrides

    pub fn get_override(&self, key: &ContentKey) -> Option<String> {
        self.inner.state.borrow().overrides.get(key).cloned()
    }

    /// Store `value` as the text for `key`, replacing any previous override
    ///
    /// Any string is accepted; an empty one blanks the span.
    pub fn set_override(&self, key: impl Into<ContentKey>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, bytes = value.len(), "Override set");
        self.inner.state.borrow_mut().overrides.insert(key, value);
    }

    /// Snapshot of every override, including ones for unmounted keys
    pub fn overrides(&self) -> BTreeMap<ContentKey, String> {
        self.inner.state.borrow().overrides.clone()
    }

    pub fn override_count(&self) -> usize {
        self.inner.state.borrow().overrides.len()
    }

    /// Override if present, else the text of the first mounted span with `key`
    pub fn resolved_text(&self, key: &ContentKey) -> Option<String> {
        let state = self.inner.state.borrow();
        if let Some(value) = state.overrides.get(key) {
            return Some(value.clone());
        }

        state
            .mounted
            .values()
            .find(|r| &r.key == key)
            .map(|r| r.original.clone())
    }

    // Registration

    /// Record a mounted span under `key`
    pub fn register(
        &self,
        key: ContentKey,
        original: String,
        tag: TagKind,
    ) -> Result<MountId, EditorError> {
        let mut state = self.inner.state.borrow_mut();

        if state.mounted.values().any(|r| r.key == key) {
            match self.inner.config.duplicate_keys {
                DuplicateKeyPolicy::Reject => return Err(EditorError::DuplicateKey(key)),
                DuplicateKeyPolicy::LastWins => {
                    debug!(key = %key, "Content key mounted more than once");
                }
            }
        }

        state.next_mount += 1;
        let id = MountId(state.next_mount);
        debug!(key = %key, mount = %id, "Span registered");
        state.mounted.insert(id, Registration { key, original, tag });

        Ok(id)
    }

    /// Replace the original text of a mounted span
    pub fn update_registration(&self, id: MountId, original: String) -> Result<(), EditorError> {
        let mut state = self.inner.state.borrow_mut();
        let registration = state
            .mounted
            .get_mut(&id)
            .ok_or(EditorError::UnknownMount(id))?;
        registration.original = original;
        Ok(())
    }

    /// Forget a mounted span. Its key's override, if any, is kept.
    pub fn deregister(&self, id: MountId) {
        if let Some(registration) = self.inner.state.borrow_mut().mounted.remove(&id) {
            debug!(key = %registration.key, mount = %id, "Span deregistered");
        }
    }

    pub fn mounted_count(&self) -> usize {
        self.inner.state.borrow().mounted.len()
    }

    pub fn is_mounted(&self, key: &ContentKey) -> bool {
        self.inner.state.borrow().mounted.values().any(|r| &r.key == key)
    }

    // Export

    pub fn page(&self) -> PageInfo {
        self.inner.state.borrow().page.clone()
    }

    pub fn set_page(&self, page: PageInfo) {
        self.inner.state.borrow_mut().page = page;
    }

    /// Build the export report from a single snapshot of the store
    pub fn build_report(&self) -> ExportReport {
        let state = self.inner.state.borrow();

        let title = if state.page.title.trim().is_empty() {
            self.inner.config.default_page_title.clone()
        } else {
            state.page.title.clone()
        };
        let page = PageInfo {
            title,
            path: state.page.path.clone(),
        };

        let scanned = state.mounted.values().map(|r| ScannedSpan {
            key: &r.key,
            tag: r.tag,
            text: &r.original,
        });

        build_report(page, scanned, &state.overrides)
    }

    /// Copy the export report to the clipboard and notify the operator
    ///
    /// Failure is returned as a value after the operator has been told.
    pub fn export_content(&self) -> Result<ExportReport, ExportError> {
        let report = self.build_report();
        let written = self.inner.clipboard.borrow_mut().write_text(&report.to_string());
        self.finish_export(report, written)
    }

    /// Log and notify the outcome of writing `report` to a clipboard
    ///
    /// For hosts whose clipboard settles asynchronously: build the report,
    /// write it, then hand the settled result here.
    pub fn finish_export(
        &self,
        report: ExportReport,
        written: Result<(), ClipboardError>,
    ) -> Result<ExportReport, ExportError> {
        match written {
            Ok(()) => {
                info!(entries = report.entries.len(), "Page copy exported");
                self.inner.notifier.notify(&Notice::Copied {
                    entries: report.entries.len(),
                });
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "Page copy export failed");
                self.inner.notifier.notify(&Notice::Failed {
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }
}

impl Default for CopyEditStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl fmt::Debug for CopyEditStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("CopyEditStore")
            .field("edit_mode", &state.edit_mode)
            .field("overrides", &state.overrides.len())
            .field("mounted", &state.mounted.len())
            .field("page", &state.page)
            .finish()
    }
}
