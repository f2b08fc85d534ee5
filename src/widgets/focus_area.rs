//! Focus trap area: keeps Tab/Shift+Tab cycling inside a container while active.
//!
//! The focusable descendants are collected each time the area is entered.
//! While active, Tab on the last one wraps to the first and Shift+Tab on the
//! first wraps to the last; anywhere else the document's default Tab
//! movement applies. Escape inside the container exits the area.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::FocusAreaConfig;
use crate::document::Document;
use crate::dom::node::NodeId;
use crate::event::dom::{DomEvent, EventType, ListenerTarget};
use crate::event::emitter::{EventEmitter, ObserverId, WidgetEvent};
use crate::event::handler::ListenerId;
use crate::event::input::Key;
use crate::focus::FocusChain;

/// Lifecycle events emitted by [`FocusArea`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAreaEvent {
    EnterBefore,
    ExitBefore,
}

impl WidgetEvent for FocusAreaEvent {
    fn name(&self) -> &'static str {
        match self {
            FocusAreaEvent::EnterBefore => "enter:before",
            FocusAreaEvent::ExitBefore => "exit:before",
        }
    }
}

#[derive(Debug)]
struct FocusAreaState {
    config: FocusAreaConfig,
    container: Option<NodeId>,
    focus_on_enter: Option<NodeId>,
    focus_on_exit: Option<NodeId>,
    chain: FocusChain,
    active: bool,
    listeners: Vec<ListenerId>,
}

/// Focus trap widget handle. Clones share state.
#[derive(Debug, Clone)]
pub struct FocusArea {
    state: Rc<RefCell<FocusAreaState>>,
    events: EventEmitter<FocusAreaEvent>,
}

impl FocusArea {
    pub fn new(config: FocusAreaConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(FocusAreaState {
                config,
                container: None,
                focus_on_enter: None,
                focus_on_exit: None,
                chain: FocusChain::new(),
                active: false,
                listeners: Vec::new(),
            })),
            events: EventEmitter::new(),
        }
    }

    /// Resolve the configured elements and wire the buttons and the
    /// container's keydown listener. A missing container leaves the area inert.
    pub fn init(&self, document: &mut Document) {
        let config = {
            let state = self.state.borrow();
            if state.container.is_some() {
                tracing::warn!("focus area already initialized");
                return;
            }
            state.config.clone()
        };
        let dom = document.dom();
        let Some(container) = dom.get_element_by_id(&config.container_id) else {
            tracing::debug!(container = %config.container_id, "focus area container not found; inert");
            return;
        };
        let lookup = |id: &Option<String>| id.as_deref().and_then(|id| dom.get_element_by_id(id));
        let enter_button = lookup(&config.enter_button_id);
        let exit_button = lookup(&config.exit_button_id);
        {
            let mut state = self.state.borrow_mut();
            state.container = Some(container);
            state.focus_on_enter = lookup(&config.focus_on_enter_id);
            state.focus_on_exit = lookup(&config.focus_on_exit_id);
        }

        let mut ids = Vec::new();
        if let Some(button) = enter_button {
            let area = self.clone();
            ids.push(document.add_event_listener(
                ListenerTarget::Node(button),
                EventType::Click,
                move |doc, _| area.enter(doc),
            ));
        }
        if let Some(button) = exit_button {
            let area = self.clone();
            ids.push(document.add_event_listener(
                ListenerTarget::Node(button),
                EventType::Click,
                move |doc, _| area.exit(doc),
            ));
        }
        let area = self.clone();
        ids.push(document.add_event_listener(
            ListenerTarget::Node(container),
            EventType::KeyDown,
            move |doc, ev| area.handle_key(doc, ev),
        ));
        self.state.borrow_mut().listeners = ids;
        tracing::debug!(container = %config.container_id, "focus area initialized");
    }

    /// Activate the trap and move focus inside.
    pub fn enter(&self, document: &mut Document) {
        let Some((container, class)) = self.container_and_class() else {
            return;
        };
        self.events.emit(document, &FocusAreaEvent::EnterBefore);
        document.dom_mut().update(container, |n| n.add_class(&class));

        let chain = FocusChain::collect(document.dom(), container);
        let target = {
            let mut state = self.state.borrow_mut();
            state.active = true;
            let target = state.focus_on_enter.or(chain.first());
            state.chain = chain;
            target
        };
        tracing::debug!(focusable = self.state.borrow().chain.len(), "focus area entered");
        if let Some(target) = target {
            document.focus(target);
        }
    }

    /// Release the trap and focus the exit target, if one is configured.
    pub fn exit(&self, document: &mut Document) {
        let Some((container, class)) = self.container_and_class() else {
            return;
        };
        self.events.emit(document, &FocusAreaEvent::ExitBefore);
        document.dom_mut().update(container, |n| n.remove_class(&class));
        let target = {
            let mut state = self.state.borrow_mut();
            state.active = false;
            state.focus_on_exit
        };
        tracing::debug!("focus area exited");
        if let Some(target) = target {
            document.focus(target);
        }
    }

    fn handle_key(&self, document: &mut Document, event: &mut DomEvent) {
        let Some(key) = event.key else {
            return;
        };
        let (active, first, last) = {
            let state = self.state.borrow();
            (state.active, state.chain.first(), state.chain.last())
        };
        if !active {
            return;
        }
        match key.code {
            Key::Tab => {
                let (Some(first), Some(last)) = (first, last) else {
                    return;
                };
                if key.shift() && event.target == first {
                    event.prevent_default();
                    document.focus(last);
                } else if !key.shift() && event.target == last {
                    event.prevent_default();
                    document.focus(first);
                }
            }
            Key::Escape => self.exit(document),
            _ => {}
        }
    }

    fn container_and_class(&self) -> Option<(NodeId, String)> {
        let state = self.state.borrow();
        state
            .container
            .map(|container| (container, state.config.active_class.clone()))
    }

    /// Remove every DOM listener installed by `init`.
    pub fn destroy(&self, document: &mut Document) {
        let ids = std::mem::take(&mut self.state.borrow_mut().listeners);
        for id in ids {
            document.remove_event_listener(id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    /// Whether init found no container.
    pub fn is_inert(&self) -> bool {
        self.state.borrow().container.is_none()
    }

    /// Focusable elements collected on the last `enter`.
    pub fn focusable(&self) -> Vec<NodeId> {
        self.state.borrow().chain.nodes().to_vec()
    }

    /// Observe `enter:before` or `exit:before`.
    pub fn add_event_listener(
        &self,
        name: impl Into<String>,
        observer: impl Fn(&mut Document, &FocusAreaEvent) + 'static,
    ) -> ObserverId {
        self.events.add_event_listener(name, observer)
    }

    pub fn remove_event_listener(&self, id: ObserverId) -> bool {
        self.events.remove_event_listener(id)
    }

    pub fn events(&self) -> &EventEmitter<FocusAreaEvent> {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;
    use crate::dom::tree::Dom;
    use crate::event::input::{KeyEvent, Modifiers};

    /// `button#enter`, then the container with `a`, `b`, `c` and `button#leave`.
    fn page() -> Document {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        dom.insert_child(body, NodeData::new("button").with_id("enter"));
        let container = dom.insert_child(body, NodeData::new("div").with_id("focusTrap_container"));
        for id in ["a", "b", "c"] {
            dom.insert_child(container, NodeData::new("input").with_id(id));
        }
        dom.insert_child(container, NodeData::new("button").with_id("leave"));
        Document::from_dom(dom)
    }

    fn id(doc: &Document, id: &str) -> NodeId {
        doc.dom().get_element_by_id(id).unwrap()
    }

    fn config() -> FocusAreaConfig {
        FocusAreaConfig::new()
            .with_enter_button_id("enter")
            .with_exit_button_id("leave")
            .with_focus_on_exit_id("enter")
    }

    #[test]
    fn enter_focuses_first_and_marks_container() {
        let mut doc = page();
        let area = FocusArea::new(config());
        area.init(&mut doc);
        let enter = id(&doc, "enter");
        doc.click(enter);

        assert!(area.is_active());
        assert_eq!(doc.active_element(), Some(id(&doc, "a")));
        let container = id(&doc, "focusTrap_container");
        assert!(doc.dom().get(container).unwrap().has_class("is_stuck"));
        assert_eq!(area.focusable().len(), 4);
    }

    #[test]
    fn enter_target_overrides_first() {
        let mut doc = page();
        let area = FocusArea::new(config().with_focus_on_enter_id("b"));
        area.init(&mut doc);
        area.enter(&mut doc);
        assert_eq!(doc.active_element(), Some(id(&doc, "b")));
    }

    #[test]
    fn tab_wraps_at_both_ends() {
        let mut doc = page();
        let area = FocusArea::new(config());
        area.init(&mut doc);
        area.enter(&mut doc);

        let leave = id(&doc, "leave");
        doc.focus(leave);
        let ev = doc.key_down(KeyEvent::plain(Key::Tab)).unwrap();
        assert!(ev.default_prevented());
        assert_eq!(doc.active_element(), Some(id(&doc, "a")));

        doc.key_down(KeyEvent::new(Key::Tab, Modifiers::SHIFT));
        assert_eq!(doc.active_element(), Some(leave));
    }

    #[test]
    fn tab_in_the_middle_uses_default_movement() {
        let mut doc = page();
        let area = FocusArea::new(config());
        area.init(&mut doc);
        area.enter(&mut doc);
        let ev = doc.key_down(KeyEvent::plain(Key::Tab)).unwrap();
        assert!(!ev.default_prevented());
        assert_eq!(doc.active_element(), Some(id(&doc, "b")));
    }

    #[test]
    fn exit_button_releases_and_refocuses() {
        let mut doc = page();
        let area = FocusArea::new(config());
        area.init(&mut doc);
        area.enter(&mut doc);
        let leave = id(&doc, "leave");
        doc.click(leave);
        assert!(!area.is_active());
        assert_eq!(doc.active_element(), Some(id(&doc, "enter")));

        // inactive: Tab from the last element leaves the container
        doc.focus(leave);
        doc.key_down(KeyEvent::plain(Key::Tab));
        assert_eq!(doc.active_element(), Some(id(&doc, "enter")));
    }

    #[test]
    fn missing_container_is_inert() {
        let mut doc = page();
        let area = FocusArea::new(FocusAreaConfig::new().with_container_id("nope"));
        area.init(&mut doc);
        assert!(area.is_inert());
        assert_eq!(doc.listener_count(), 0);
        area.enter(&mut doc);
        assert!(!area.is_active());
    }

    #[test]
    fn empty_container_does_not_intercept_tab() {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        dom.insert_child(body, NodeData::new("div").with_id("focusTrap_container"));
        let mut doc = Document::from_dom(dom);
        let area = FocusArea::new(FocusAreaConfig::default());
        area.init(&mut doc);
        area.enter(&mut doc);
        assert!(area.is_active());
        assert_eq!(doc.active_element(), None);
        let ev = doc.key_down(KeyEvent::plain(Key::Tab)).unwrap();
        assert!(!ev.default_prevented());
    }
}
