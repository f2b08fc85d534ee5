//! Pilot: drive a [`Document`] the way a user would.
//!
//! Elements are addressed by id. Every interaction dispatches real DOM
//! events, so widget listeners run exactly as they would in a page.

use crate::document::Document;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::dom::DomEvent;
use crate::event::input::{Key, KeyEvent, Modifiers};
use crate::host::{Host, MemoryHost};

/// A headless document driver for tests.
///
/// # Examples
///
/// ```ignore
/// use page_widgets::testing::{fixtures, Pilot};
///
/// let mut pilot = Pilot::from_dom(fixtures::modal_page());
/// pilot.click("open");
/// ```
pub struct Pilot {
    document: Document,
}

impl Pilot {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Wrap a tree with a default [`MemoryHost`].
    pub fn from_dom(dom: Dom) -> Self {
        Self::new(Document::from_dom(dom))
    }

    /// Wrap a tree with the given host.
    pub fn with_host(dom: Dom, host: MemoryHost) -> Self {
        Self::new(Document::new(dom, host))
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// The element with id `id`.
    ///
    /// # Panics
    ///
    /// Panics if no such element exists.
    pub fn node(&self, id: &str) -> NodeId {
        match self.document.dom().get_element_by_id(id) {
            Some(node) => node,
            None => panic!("no element with id {id:?}"),
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Click the element with id `id`.
    pub fn click(&mut self, id: &str) -> DomEvent {
        let node = self.node(id);
        self.document.click(node)
    }

    /// Focus the element with id `id`.
    pub fn focus(&mut self, id: &str) -> bool {
        let node = self.node(id);
        self.document.focus(node)
    }

    /// Press a key with no modifiers at the focused element.
    pub fn press_key(&mut self, key: Key) -> Option<DomEvent> {
        self.press_key_with(key, Modifiers::NONE)
    }

    /// Press a key with the given modifiers at the focused element.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> Option<DomEvent> {
        self.document.key_down(KeyEvent::new(key, modifiers))
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Id of the focused element.
    pub fn focused_id(&self) -> Option<String> {
        let node = self.document.active_element()?;
        self.document.dom().get(node)?.id.clone()
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        let node = self.node(id);
        self.document
            .dom()
            .get(node)
            .is_some_and(|n| n.has_class(class))
    }

    pub fn attr(&self, id: &str, name: &str) -> Option<String> {
        let node = self.node(id);
        self.document.dom().get(node)?.attr(name).map(str::to_owned)
    }

    /// Current URL fragment.
    pub fn fragment(&self) -> String {
        self.document.host().fragment()
    }

    /// The memory host, when the document runs on one.
    pub fn memory_host(&self) -> Option<&MemoryHost> {
        self.document.host().as_any().downcast_ref::<MemoryHost>()
    }

    /// Markup snapshot of the subtree at `id`.
    pub fn markup(&self, id: &str) -> String {
        super::snapshot::render_markup(self.document.dom(), self.node(id))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn click_and_focus_by_id() {
        let mut pilot = Pilot::from_dom(fixtures::modal_page());
        let ev = pilot.click("open");
        assert!(!ev.default_prevented());
        assert!(pilot.focus("name"));
        assert_eq!(pilot.focused_id().as_deref(), Some("name"));
    }

    #[test]
    fn tab_key_walks_document() {
        let mut pilot = Pilot::from_dom(fixtures::modal_page());
        pilot.press_key(Key::Tab);
        assert_eq!(pilot.focused_id().as_deref(), Some("open"));
        pilot.press_key_with(Key::Tab, Modifiers::SHIFT);
        assert_eq!(pilot.focused_id().as_deref(), Some("close"));
    }

    #[test]
    fn memory_host_is_reachable() {
        let pilot = Pilot::with_host(
            fixtures::modal_page(),
            MemoryHost::new().with_fragment("x"),
        );
        assert_eq!(pilot.fragment(), "#x");
        assert_eq!(pilot.memory_host().map(MemoryHost::history_len), Some(1));
    }

    #[test]
    #[should_panic(expected = "no element with id")]
    fn node_panics_on_missing_id() {
        let pilot = Pilot::from_dom(fixtures::modal_page());
        pilot.node("missing");
    }

    #[test]
    fn attr_and_class_queries() {
        let pilot = Pilot::from_dom(fixtures::modal_page());
        assert_eq!(pilot.attr("modal", "role").as_deref(), Some("dialog"));
        assert!(pilot.has_class("open", "js_modal_open"));
        assert!(pilot.markup("modal").starts_with("<div id=\"modal\" role=\"dialog\">"));
    }
}
