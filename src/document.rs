//! The document: element tree, host, focus and DOM listeners.
//!
//! [`Document`] is what widgets are initialized against. It dispatches
//! clicks and keydowns along the bubble path (target, ancestors, then the
//! document) and runs the default Tab action, moving focus through the
//! document's focus chain unless a listener called `prevent_default`.

use std::rc::Rc;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::dom::{DomEvent, EventType, ListenerTarget};
use crate::event::handler::{bubble_path, DomListener, ListenerId, ListenerRegistry};
use crate::event::input::{Key, KeyEvent};
use crate::focus::FocusChain;
use crate::host::{Host, MemoryHost};

pub struct Document {
    dom: Dom,
    host: Box<dyn Host>,
    listeners: ListenerRegistry,
    focused: Option<NodeId>,
}

impl Document {
    /// Wrap a built tree and a host.
    pub fn new(dom: Dom, host: impl Host + 'static) -> Self {
        Self {
            dom,
            host: Box::new(host),
            listeners: ListenerRegistry::new(),
            focused: None,
        }
    }

    /// Wrap a built tree with a default [`MemoryHost`].
    pub fn from_dom(dom: Dom) -> Self {
        Self::new(dom, MemoryHost::new())
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> &mut dyn Host {
        self.host.as_mut()
    }

    // -- listeners ----------------------------------------------------------

    /// Attach a listener to a node or to the document.
    pub fn add_event_listener(
        &mut self,
        target: ListenerTarget,
        event_type: EventType,
        listener: impl Fn(&mut Document, &mut DomEvent) + 'static,
    ) -> ListenerId {
        let listener: DomListener = Rc::new(listener);
        self.listeners.add(target, event_type, listener)
    }

    /// Detach a listener. Returns `false` if it was already gone.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of attached DOM listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // -- focus --------------------------------------------------------------

    /// Focus `node`. Returns `false` (and leaves focus unchanged) for a
    /// node that is not in the tree.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.dom.contains(node) {
            return false;
        }
        tracing::trace!(?node, "focus");
        self.focused = Some(node);
        true
    }

    /// The focused node (`document.activeElement`), if any.
    pub fn active_element(&self) -> Option<NodeId> {
        self.focused.filter(|&node| self.dom.contains(node))
    }

    /// Drop focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    // -- dispatch -----------------------------------------------------------

    /// Dispatch a click at `node` (`element.click()`).
    pub fn click(&mut self, node: NodeId) -> DomEvent {
        self.dispatch(DomEvent::click(node))
    }

    /// Dispatch a keydown at the focused node, or the root without focus.
    ///
    /// Returns `None` when the document is empty.
    pub fn key_down(&mut self, key: KeyEvent) -> Option<DomEvent> {
        let target = self.active_element().or_else(|| self.dom.root())?;
        Some(self.dispatch(DomEvent::key_down(target, key)))
    }

    /// Deliver `event` along its bubble path, then run the default action.
    ///
    /// Returns the event after delivery so callers can inspect its flags.
    pub fn dispatch(&mut self, mut event: DomEvent) -> DomEvent {
        let path = bubble_path(&self.dom, event.target);
        tracing::trace!(event = ?event.event_type, depth = path.len(), "dispatch");
        for target in path {
            event.current_target = target;
            let listeners = self.listeners.listeners_for(target, event.event_type);
            for listener in listeners {
                listener(self, &mut event);
            }
            if event.propagation_stopped() {
                break;
            }
        }
        if !event.default_prevented() {
            self.default_action(&event);
        }
        event
    }

    fn default_action(&mut self, event: &DomEvent) {
        let Some(key) = event.key.filter(|k| k.code == Key::Tab) else {
            return;
        };
        let Some(root) = self.dom.root() else {
            return;
        };
        let mut chain = FocusChain::collect(&self.dom, root).with_focus(self.active_element());
        let next = if key.shift() {
            chain.focus_previous()
        } else {
            chain.focus_next()
        };
        if let Some(node) = next {
            self.focus(node);
        }
    }
}

impl Default for Document {
    /// An empty tree on a [`MemoryHost`].
    fn default() -> Self {
        Self::from_dom(Dom::new())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.dom.len())
            .field("listeners", &self.listeners)
            .field("focused", &self.focused)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;
    use crate::event::input::Modifiers;
    use std::cell::RefCell;

    /// body > div#outer > button#inner, plus two more buttons for Tab order.
    fn fixture() -> (Document, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let outer = dom.insert_child(body, NodeData::new("div").with_id("outer"));
        let inner = dom.insert_child(outer, NodeData::new("button").with_id("inner"));
        let last = dom.insert_child(body, NodeData::new("button").with_id("last"));
        (Document::from_dom(dom), body, outer, inner, last)
    }

    #[test]
    fn click_bubbles_to_document_in_order() {
        let (mut doc, body, outer, inner, _) = fixture();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for (target, tag) in [
            (ListenerTarget::Document, "document"),
            (ListenerTarget::Node(body), "body"),
            (ListenerTarget::Node(outer), "outer"),
            (ListenerTarget::Node(inner), "inner"),
        ] {
            let seen = Rc::clone(&seen);
            doc.add_event_listener(target, EventType::Click, move |_, _| {
                seen.borrow_mut().push(tag)
            });
        }
        doc.click(inner);
        assert_eq!(*seen.borrow(), vec!["inner", "outer", "body", "document"]);
    }

    #[test]
    fn stop_propagation_halts_bubbling() {
        let (mut doc, _, outer, inner, _) = fixture();
        let reached = Rc::new(RefCell::new(false));
        doc.add_event_listener(ListenerTarget::Node(inner), EventType::Click, |_, ev| {
            ev.stop_propagation()
        });
        let flag = Rc::clone(&reached);
        doc.add_event_listener(ListenerTarget::Node(outer), EventType::Click, move |_, _| {
            *flag.borrow_mut() = true
        });
        doc.click(inner);
        assert!(!*reached.borrow());
    }

    #[test]
    fn listener_can_mutate_document() {
        let (mut doc, _, outer, inner, _) = fixture();
        doc.add_event_listener(ListenerTarget::Node(outer), EventType::Click, move |doc, ev| {
            if let Some(node) = doc.dom_mut().get_mut(ev.target) {
                node.add_class("clicked");
            }
        });
        doc.click(inner);
        assert!(doc.dom().get(inner).unwrap().has_class("clicked"));
    }

    #[test]
    fn key_down_targets_focused_node() {
        let (mut doc, _, outer, inner, _) = fixture();
        let hit = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&hit);
        doc.add_event_listener(ListenerTarget::Node(outer), EventType::KeyDown, move |_, ev| {
            *slot.borrow_mut() = Some(ev.target)
        });
        doc.focus(inner);
        doc.key_down(KeyEvent::plain(Key::Escape));
        assert_eq!(*hit.borrow(), Some(inner));
    }

    #[test]
    fn tab_moves_focus_with_wrap() {
        let (mut doc, _, _, inner, last) = fixture();
        doc.key_down(KeyEvent::plain(Key::Tab));
        assert_eq!(doc.active_element(), Some(inner));
        doc.key_down(KeyEvent::plain(Key::Tab));
        assert_eq!(doc.active_element(), Some(last));
        doc.key_down(KeyEvent::plain(Key::Tab));
        assert_eq!(doc.active_element(), Some(inner));
        doc.key_down(KeyEvent::new(Key::Tab, Modifiers::SHIFT));
        assert_eq!(doc.active_element(), Some(last));
    }

    #[test]
    fn prevent_default_suppresses_tab() {
        let (mut doc, _, _, inner, _) = fixture();
        doc.add_event_listener(ListenerTarget::Document, EventType::KeyDown, |_, ev| {
            ev.prevent_default()
        });
        doc.focus(inner);
        let ev = doc.key_down(KeyEvent::plain(Key::Tab)).unwrap();
        assert!(ev.default_prevented());
        assert_eq!(doc.active_element(), Some(inner));
    }

    #[test]
    fn focus_rejects_removed_node() {
        let (mut doc, _, outer, inner, _) = fixture();
        doc.focus(inner);
        doc.dom_mut().remove(outer);
        assert_eq!(doc.active_element(), None);
        assert!(!doc.focus(inner));
    }

    #[test]
    fn removed_listener_is_not_called() {
        let (mut doc, _, _, inner, _) = fixture();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        let id = doc.add_event_listener(ListenerTarget::Node(inner), EventType::Click, move |_, _| {
            *counter.borrow_mut() += 1
        });
        assert!(doc.remove_event_listener(id));
        doc.click(inner);
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn empty_document_key_down_is_none() {
        let mut doc = Document::default();
        assert!(doc.key_down(KeyEvent::plain(Key::Tab)).is_none());
    }
}
