//! # Copy-Edit Editor
//!
//! In-page copy editing for otherwise static pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ content: content tree → plain text          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor                                      │
//! │  - CopyEditStore: edit mode, overrides,     │
//! │    mounted-span registrations               │
//! │  - EditableSpan: display/editing machine    │
//! │  - export: sorted report → clipboard chain  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: VNode → markup, real clipboard        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Store is passed, not ambient**: spans receive a handle on mount
//! 2. **Overrides are shared**: every span with a key sees its override
//! 3. **Overrides outlive spans**: unmounting hides an override, never deletes it
//! 4. **Export reads registrations**: no live document is needed
//!
//! ## Usage
//!
//! ```rust
//! use copyedit_editor::{CopyEditStore, EditableSpan, EditKey};
//!
//! let store = CopyEditStore::default();
//! let mut title = EditableSpan::mount(&store, "hero.title", "Sell More").unwrap();
//!
//! store.toggle_edit_mode();
//! title.activate();
//! title.input("Sell Way More");
//! title.key_down(EditKey::Enter { shift: false });
//!
//! assert_eq!(title.resolved_text(), "Sell Way More");
//! ```

mod clipboard;
mod config;
mod errors;
mod export;
mod key;
mod notify;
mod span;
mod store;
mod vdom;

pub use clipboard::{Clipboard, FallbackClipboard, MemoryClipboard};
pub use config::{DuplicateKeyPolicy, EditorConfig, EDITABLE_ATTRIBUTE};
pub use errors::{ClipboardError, EditorError, ExportError};
pub use export::{build_report, normalize_text, ExportEntry, ExportReport, PageInfo, ScannedSpan};
pub use key::{ContentKey, MountId, TagKind};
pub use notify::{LogNotifier, Notice, Notifier};
pub use span::{CommitOutcome, EditKey, EditableSpan, KeyOutcome, SpanState, SurfaceKind};
pub use store::{CopyEditStore, StoreBuilder};
pub use vdom::{render_content, render_lines, VNode};

// Re-export content types for convenience
pub use copyedit_content::{extract, ContentNode};
