//! Modal dialog: toggles one element open and closed.
//!
//! The modal root must exist; everything else (trigger elements) is
//! optional. While open, page scroll is locked through the [`Host`].
//!
//! [`Host`]: crate::host::Host

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ModalConfig;
use crate::document::Document;
use crate::dom::node::NodeId;
use crate::error::{Error, Result};
use crate::event::dom::{EventType, ListenerTarget};
use crate::event::emitter::{EventEmitter, ObserverId, WidgetEvent};
use crate::event::handler::ListenerId;
use crate::event::input::Key;
use crate::selector::parse_selector_list;

/// Lifecycle events emitted by [`Modal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    OpenBefore,
    OpenAfter,
    CloseBefore,
    CloseAfter,
}

impl WidgetEvent for ModalEvent {
    fn name(&self) -> &'static str {
        match self {
            ModalEvent::OpenBefore => "open:before",
            ModalEvent::OpenAfter => "open:after",
            ModalEvent::CloseBefore => "close:before",
            ModalEvent::CloseAfter => "close:after",
        }
    }
}

#[derive(Debug)]
struct ModalState {
    config: ModalConfig,
    root: Option<NodeId>,
    open: bool,
    listeners: Vec<ListenerId>,
}

/// Modal widget handle. Clones share state.
#[derive(Debug, Clone)]
pub struct Modal {
    state: Rc<RefCell<ModalState>>,
    events: EventEmitter<ModalEvent>,
}

impl Modal {
    pub fn new(config: ModalConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(ModalState {
                config,
                root: None,
                open: false,
                listeners: Vec::new(),
            })),
            events: EventEmitter::new(),
        }
    }

    /// Find the modal root and wire the triggers and the Escape key.
    ///
    /// Fails with [`Error::ModalNotFound`] when no element has the configured
    /// id. Opens right away when `start_open` is set.
    pub fn init(&self, document: &mut Document) -> Result<()> {
        let (modal_id, open_sel, close_sel, start_open) = {
            let state = self.state.borrow();
            if state.root.is_some() {
                tracing::warn!("modal already initialized");
                return Ok(());
            }
            (
                state.config.modal_id.clone(),
                parse_selector_list(&state.config.open_selector)?,
                parse_selector_list(&state.config.close_selector)?,
                state.config.start_open,
            )
        };

        let dom = document.dom();
        let root = dom
            .get_element_by_id(&modal_id)
            .ok_or_else(|| Error::ModalNotFound(modal_id.clone()))?;
        let (openers, closers) = match dom.root() {
            Some(doc_root) => (
                dom.query_selector_all(doc_root, &open_sel),
                dom.query_selector_all(doc_root, &close_sel),
            ),
            None => (Vec::new(), Vec::new()),
        };
        self.state.borrow_mut().root = Some(root);
        tracing::debug!(
            modal = %modal_id,
            openers = openers.len(),
            closers = closers.len(),
            "modal initialized"
        );

        let mut ids = Vec::new();
        for trigger in openers {
            let modal = self.clone();
            ids.push(document.add_event_listener(
                ListenerTarget::Node(trigger),
                EventType::Click,
                move |doc, _| {
                    modal.events.emit(doc, &ModalEvent::OpenBefore);
                    modal.open(doc);
                },
            ));
        }
        for trigger in closers {
            let modal = self.clone();
            ids.push(document.add_event_listener(
                ListenerTarget::Node(trigger),
                EventType::Click,
                move |doc, _| modal.request_close(doc),
            ));
        }
        let modal = self.clone();
        ids.push(document.add_event_listener(
            ListenerTarget::Document,
            EventType::KeyDown,
            move |doc, ev| {
                if ev.key.is_some_and(|k| k.code == Key::Escape) {
                    modal.request_close(doc);
                }
            },
        ));
        self.state.borrow_mut().listeners = ids;

        if start_open {
            self.open(document);
        }
        Ok(())
    }

    /// Show the modal and lock page scroll.
    pub fn open(&self, document: &mut Document) {
        let Some((root, class)) = self.root_and_class() else {
            tracing::warn!("modal opened before init");
            return;
        };
        document.dom_mut().update(root, |n| n.add_class(&class));
        document.host_mut().set_scroll_locked(true);
        self.state.borrow_mut().open = true;
        tracing::debug!("modal open");
        self.events.emit(document, &ModalEvent::OpenAfter);
    }

    /// Hide the modal and restore page scroll.
    pub fn close(&self, document: &mut Document) {
        let Some((root, class)) = self.root_and_class() else {
            tracing::warn!("modal closed before init");
            return;
        };
        document.dom_mut().update(root, |n| n.remove_class(&class));
        document.host_mut().set_scroll_locked(false);
        self.state.borrow_mut().open = false;
        tracing::debug!("modal closed");
        self.events.emit(document, &ModalEvent::CloseAfter);
    }

    /// `close:before`, then close.
    fn request_close(&self, document: &mut Document) {
        self.events.emit(document, &ModalEvent::CloseBefore);
        self.close(document);
    }

    fn root_and_class(&self) -> Option<(NodeId, String)> {
        let state = self.state.borrow();
        state.root.map(|root| (root, state.config.active_class.clone()))
    }

    /// Remove every DOM listener installed by `init`.
    pub fn destroy(&self, document: &mut Document) {
        let ids = std::mem::take(&mut self.state.borrow_mut().listeners);
        for id in ids {
            document.remove_event_listener(id);
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    /// The modal root element, once initialized.
    pub fn root(&self) -> Option<NodeId> {
        self.state.borrow().root
    }

    /// Observe `open:before`, `open:after`, `close:before` or `close:after`.
    pub fn add_event_listener(
        &self,
        name: impl Into<String>,
        observer: impl Fn(&mut Document, &ModalEvent) + 'static,
    ) -> ObserverId {
        self.events.add_event_listener(name, observer)
    }

    pub fn remove_event_listener(&self, id: ObserverId) -> bool {
        self.events.remove_event_listener(id)
    }

    pub fn events(&self) -> &EventEmitter<ModalEvent> {
        &self.events
    }
}
