//! Browser bindings for the copy-edit overlay.
//!
//! The page owns one [`CopyEditSession`]. Page components mount spans
//! through it and forward DOM events; the floating toolbar calls
//! `toggleEditMode`, `exportContent` and `isEditMode`.

use copyedit_content::ContentNode;
use copyedit_editor::{
    Clipboard, ClipboardError, CommitOutcome, CopyEditStore, EditKey, EditableSpan, EditorConfig,
    ExportError, ExportReport, FallbackClipboard, KeyOutcome, Notice, PageInfo, TagKind,
};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(inline_js = r#"
export function clipboard_write_then(text, settle) {
  if (!navigator.clipboard || !window.isSecureContext) {
    return Promise.resolve(settle("unavailable"));
  }
  return navigator.clipboard.writeText(text).then(
    () => settle("copied"),
    (err) => settle(String(err) || "rejected"),
  );
}

export function legacy_copy(text) {
  const field = document.createElement("textarea");
  field.value = text;
  field.setAttribute("readonly", "");
  field.style.position = "fixed";
  field.style.left = "-9999px";
  document.body.appendChild(field);
  field.select();
  let copied = false;
  try {
    copied = document.execCommand("copy");
  } catch (_) {
    copied = false;
  }
  document.body.removeChild(field);
  return copied;
}

export function show_notice(message) {
  window.alert(message);
}
"#)]
extern "C" {
    fn clipboard_write_then(text: &str, settle: JsValue) -> JsValue;
    fn legacy_copy(text: &str) -> bool;
    fn show_notice(message: &str);
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Settled result of `navigator.clipboard.writeText`, replayed as the
/// primary of a fallback chain
struct SettledWrite(Result<(), ClipboardError>);

impl Clipboard for SettledWrite {
    fn name(&self) -> &str {
        "navigator"
    }

    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        self.0.clone()
    }
}

/// Map the status string handed back by `clipboard_write_then`
fn navigator_outcome(status: &str) -> Result<(), ClipboardError> {
    match status {
        "copied" => Ok(()),
        "unavailable" => Err(ClipboardError::Unavailable("navigator".to_string())),
        reason => Err(ClipboardError::Rejected {
            backend: "navigator".to_string(),
            reason: reason.to_string(),
        }),
    }
}

/// Finish an export once the navigator write has settled: fall back when it
/// failed, then notify through the store
fn settle_export(
    store: &CopyEditStore,
    report: ExportReport,
    primary: Result<(), ClipboardError>,
    fallback: Box<dyn Clipboard>,
) -> Result<ExportReport, ExportError> {
    let mut chain = FallbackClipboard::new(Box::new(SettledWrite(primary)), fallback);
    let written = chain.write_text(&report.to_string());
    store.finish_export(report, written)
}

/// Off-screen textarea plus `document.execCommand("copy")`
struct LegacyClipboard;

impl Clipboard for LegacyClipboard {
    fn name(&self) -> &str {
        "execCommand"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if legacy_copy(text) {
            Ok(())
        } else {
            Err(ClipboardError::Rejected {
                backend: self.name().to_string(),
                reason: "copy command refused".to_string(),
            })
        }
    }
}

fn alert_notice(notice: &Notice) {
    show_notice(&notice.message());
}

/// Map a DOM `KeyboardEvent.key`
pub fn edit_key(key: &str, shift: bool) -> EditKey {
    match key {
        "Enter" => EditKey::Enter { shift },
        "Escape" | "Esc" => EditKey::Escape,
        _ => EditKey::Other,
    }
}

/// Parse an element name such as `h1` or `p`
pub fn parse_tag(tag: Option<String>) -> Result<TagKind, String> {
    match tag {
        None => Ok(TagKind::default()),
        Some(tag) => serde_json::from_value(serde_json::Value::String(tag.to_ascii_lowercase()))
            .map_err(|_| format!("Unsupported element: {}", tag)),
    }
}

fn key_outcome_name(outcome: KeyOutcome) -> &'static str {
    match outcome {
        KeyOutcome::Committed(CommitOutcome::Written) => "committed",
        KeyOutcome::Committed(CommitOutcome::Unchanged) => "unchanged",
        KeyOutcome::Cancelled => "cancelled",
        KeyOutcome::PassThrough => "passthrough",
    }
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// Page-level copy-edit state plus the spans mounted through it
#[wasm_bindgen]
pub struct CopyEditSession {
    store: CopyEditStore,
    spans: HashMap<u32, EditableSpan>,
    next_handle: u32,
}

impl CopyEditSession {
    fn with_store(store: CopyEditStore) -> Self {
        Self {
            store,
            spans: HashMap::new(),
            next_handle: 0,
        }
    }

    fn browser(config: EditorConfig) -> Self {
        let store = CopyEditStore::builder()
            .config(config)
            .clipboard(Box::new(LegacyClipboard))
            .notifier(Box::new(alert_notice))
            .build();
        Self::with_store(store)
    }

    fn mount(&mut self, key: &str, content: ContentNode, tag: TagKind) -> Result<u32, String> {
        let span = EditableSpan::mount_as(&self.store, key, content, tag).map_err(|e| e.to_string())?;
        self.next_handle += 1;
        self.spans.insert(self.next_handle, span);
        Ok(self.next_handle)
    }

    fn span_mut(&mut self, handle: u32) -> Result<&mut EditableSpan, String> {
        self.spans
            .get_mut(&handle)
            .ok_or_else(|| format!("Unknown span handle: {}", handle))
    }
}

#[wasm_bindgen]
impl CopyEditSession {
    /// Create a session; `config_json` is an optional EditorConfig object
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<CopyEditSession, JsValue> {
        let config = match config_json {
            Some(json) => serde_json::from_str(&json).map_err(|e| js_error(format!("Invalid config: {}", e)))?,
            None => EditorConfig::default(),
        };
        Ok(Self::browser(config))
    }

    #[wasm_bindgen(js_name = setPage)]
    pub fn set_page(&self, title: &str, path: &str) {
        self.store.set_page(PageInfo::new(title, path));
    }

    #[wasm_bindgen(js_name = isEditMode)]
    pub fn is_edit_mode(&self) -> bool {
        self.store.is_edit_mode()
    }

    #[wasm_bindgen(js_name = toggleEditMode)]
    pub fn toggle_edit_mode(&mut self) -> bool {
        let enabled = self.store.toggle_edit_mode();
        for span in self.spans.values_mut() {
            span.sync();
        }
        enabled
    }

    /// Copy the report and alert the operator once the copy has settled
    ///
    /// Returns a `Promise<boolean>`: false if both copy paths failed.
    #[wasm_bindgen(js_name = exportContent)]
    pub fn export_content(&self) -> JsValue {
        let store = self.store.clone();
        let report = store.build_report();
        let text = report.to_string();

        let settle = Closure::once_into_js(move |status: String| -> bool {
            settle_export(&store, report, navigator_outcome(&status), Box::new(LegacyClipboard)).is_ok()
        });

        clipboard_write_then(&text, settle)
    }

    /// The report text without touching the clipboard
    #[wasm_bindgen(js_name = exportReport)]
    pub fn export_report(&self) -> String {
        self.store.build_report().to_string()
    }

    #[wasm_bindgen(js_name = getOverride)]
    pub fn get_override(&self, key: &str) -> Option<String> {
        self.store.get_override(&key.into())
    }

    /// Mount a span; `content_json` is a JSON content tree
    #[wasm_bindgen(js_name = mountSpan)]
    pub fn mount_span(&mut self, key: &str, content_json: &str, tag: Option<String>) -> Result<u32, JsValue> {
        let content: ContentNode = serde_json::from_str(content_json).map_err(js_error)?;
        let tag = parse_tag(tag).map_err(js_error)?;
        self.mount(key, content, tag).map_err(js_error)
    }

    #[wasm_bindgen(js_name = unmountSpan)]
    pub fn unmount_span(&mut self, handle: u32) {
        self.spans.remove(&handle);
    }

    pub fn activate(&mut self, handle: u32) -> Result<bool, JsValue> {
        Ok(self.span_mut(handle).map_err(js_error)?.activate())
    }

    pub fn input(&mut self, handle: u32, value: &str) -> Result<bool, JsValue> {
        Ok(self.span_mut(handle).map_err(js_error)?.input(value))
    }

    pub fn blur(&mut self, handle: u32) -> Result<bool, JsValue> {
        let outcome = self.span_mut(handle).map_err(js_error)?.blur();
        Ok(outcome == Some(CommitOutcome::Written))
    }

    /// Forward a keydown; returns what the span did with it
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, handle: u32, key: &str, shift: bool) -> Result<String, JsValue> {
        let outcome = self.span_mut(handle).map_err(js_error)?.key_down(edit_key(key, shift));
        Ok(key_outcome_name(outcome).to_string())
    }

    /// Render a span to its virtual DOM as JSON
    #[wasm_bindgen(js_name = renderSpan)]
    pub fn render_span(&mut self, handle: u32) -> Result<String, JsValue> {
        let node = self.span_mut(handle).map_err(js_error)?.render();
        serde_json::to_string(&node).map_err(js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copyedit_editor::MemoryClipboard;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_store(notices: &Rc<RefCell<Vec<Notice>>>) -> CopyEditStore {
        let seen = Rc::clone(notices);
        CopyEditStore::builder()
            .page(PageInfo::new("Home", "/"))
            .notifier(Box::new(move |notice: &Notice| seen.borrow_mut().push(notice.clone())))
            .build()
    }

    fn session() -> CopyEditSession {
        let store = CopyEditStore::builder()
            .clipboard(Box::new(MemoryClipboard::new()))
            .build();
        CopyEditSession::with_store(store)
    }

    #[test]
    fn test_edit_key_mapping() {
        assert_eq!(edit_key("Enter", false), EditKey::Enter { shift: false });
        assert_eq!(edit_key("Enter", true), EditKey::Enter { shift: true });
        assert_eq!(edit_key("Escape", false), EditKey::Escape);
        assert_eq!(edit_key("a", false), EditKey::Other);
    }

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag(None), Ok(TagKind::Span));
        assert_eq!(parse_tag(Some("H2".to_string())), Ok(TagKind::H2));
        assert!(parse_tag(Some("marquee".to_string())).is_err());
    }

    #[test]
    fn test_session_edit_flow() {
        let mut session = session();
        let handle = session.mount("hero.title", ContentNode::text("Sell More"), TagKind::H1).unwrap();

        session.toggle_edit_mode();
        assert!(session.span_mut(handle).unwrap().activate());
        session.span_mut(handle).unwrap().input("Sell Way More");
        let outcome = session.span_mut(handle).unwrap().key_down(edit_key("Enter", false));

        assert_eq!(key_outcome_name(outcome), "committed");
        assert_eq!(session.get_override("hero.title").as_deref(), Some("Sell Way More"));
        assert!(session.export_report().ends_with("hero.title: Sell Way More"));
    }

    #[test]
    fn test_toggle_off_closes_open_fields() {
        let mut session = session();
        let handle = session.mount("cta.label", ContentNode::text("Go"), TagKind::Span).unwrap();

        session.toggle_edit_mode();
        session.span_mut(handle).unwrap().activate();
        session.toggle_edit_mode();

        assert!(!session.span_mut(handle).unwrap().is_editing());
    }

    #[test]
    fn test_unmount_removes_from_report() {
        let mut session = session();
        let handle = session.mount("promo", ContentNode::text("Sale"), TagKind::Span).unwrap();

        session.unmount_span(handle);

        assert!(!session.export_report().contains("promo"));
    }

    #[test]
    fn test_navigator_outcome() {
        assert_eq!(navigator_outcome("copied"), Ok(()));
        assert_eq!(
            navigator_outcome("unavailable"),
            Err(ClipboardError::Unavailable("navigator".to_string()))
        );
        assert!(matches!(
            navigator_outcome("NotAllowedError: Document is not focused."),
            Err(ClipboardError::Rejected { .. })
        ));
    }

    #[test]
    fn test_rejected_navigator_write_uses_fallback() {
        let notices = Rc::new(RefCell::new(Vec::new()));
        let store = recording_store(&notices);
        let _span = EditableSpan::mount(&store, "hero.title", "Sell More").unwrap();
        let fallback = MemoryClipboard::new();

        let result = settle_export(
            &store,
            store.build_report(),
            navigator_outcome("NotAllowedError"),
            Box::new(fallback.clone()),
        );

        assert!(result.is_ok());
        assert!(fallback.contents().unwrap().ends_with("hero.title: Sell More"));
        assert_eq!(notices.borrow().as_slice(), &[Notice::Copied { entries: 1 }]);
    }

    #[test]
    fn test_both_copy_paths_failing_notifies_failure() {
        let notices = Rc::new(RefCell::new(Vec::new()));
        let store = recording_store(&notices);
        let _span = EditableSpan::mount(&store, "hero.title", "Sell More").unwrap();

        let result = settle_export(
            &store,
            store.build_report(),
            navigator_outcome("NotAllowedError"),
            Box::new(MemoryClipboard::unavailable()),
        );

        assert!(matches!(
            result,
            Err(ExportError::Clipboard(ClipboardError::AllFailed { .. }))
        ));
        assert_eq!(notices.borrow().len(), 1);
        assert!(!notices.borrow()[0].is_success());
    }
}
