//! Tab navigation: one-of-N tab activation with URL fragment sync, arrow-key
//! roving focus and caller-driven lazy loading.
//!
//! Markup contract: tab buttons carry `role="tab"` and `aria-controls`
//! naming their panel's id; an optional `data-load` attribute (any value but
//! `"false"`) marks a tab whose panel content is loaded by the page after
//! activation. The tab list carries `role="tablist"`.
//!
//! A lazily loaded tab defers its `change:end` event until the page calls
//! [`TabNav::finish_loading`]. Once finished, the tab is permanently marked
//! loaded and never shows the loading state again.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;

use slotmap::SecondaryMap;

use crate::config::TabNavConfig;
use crate::document::Document;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::{Error, Result};
use crate::event::dom::{DomEvent, EventType, ListenerTarget};
use crate::event::emitter::{EventEmitter, ObserverId, WidgetEvent};
use crate::event::handler::ListenerId;
use crate::event::input::Key;
use crate::scroll::ScrollBehavior;
use crate::selector::{parse_selector_list, SelectorList};

fn tab_selector() -> &'static SelectorList {
    static LIST: OnceLock<SelectorList> = OnceLock::new();
    LIST.get_or_init(|| parse_selector_list(r#"[role="tab"]"#).unwrap_or_default())
}

fn tab_list_selector() -> &'static SelectorList {
    static LIST: OnceLock<SelectorList> = OnceLock::new();
    LIST.get_or_init(|| parse_selector_list(r#"[role="tablist"]"#).unwrap_or_default())
}

// ---------------------------------------------------------------------------
// TabNavEvent
// ---------------------------------------------------------------------------

/// Lifecycle events emitted by [`TabNav`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabNavEvent {
    /// An activation begins. `previous` is `None` for the first activation.
    ChangeStart {
        previous: Option<NodeId>,
        next: NodeId,
    },
    /// The activated tab is fully shown.
    ChangeEnd { tab: NodeId },
    /// A lazily loaded tab started loading.
    LoadStart { tab: NodeId },
    /// The page finished loading a tab's content.
    LoadEnd { tab: NodeId },
}

impl WidgetEvent for TabNavEvent {
    fn name(&self) -> &'static str {
        match self {
            TabNavEvent::ChangeStart { .. } => "change:start",
            TabNavEvent::ChangeEnd { .. } => "change:end",
            TabNavEvent::LoadStart { .. } => "load:start",
            TabNavEvent::LoadEnd { .. } => "load:end",
        }
    }
}

// ---------------------------------------------------------------------------
// TabNav
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct TabNavState {
    config: TabNavConfig,
    initialized: bool,
    tabs: Vec<NodeId>,
    tab_list: Option<NodeId>,
    scroll_area: Option<NodeId>,
    loading_template: Option<NodeId>,
    active: Option<NodeId>,
    /// Tabs currently loading, with their indicator clone if one was shown.
    loading: SecondaryMap<NodeId, Option<NodeId>>,
    loaded: SecondaryMap<NodeId, ()>,
    /// Set between `change:start` and the end of the activation.
    changing: bool,
    listeners: Vec<ListenerId>,
}

/// Tab navigation widget handle.
///
/// Clones share state, so a clone captured by a DOM listener and the handle
/// held by the page see the same tabs.
#[derive(Debug, Clone)]
pub struct TabNav {
    state: Rc<RefCell<TabNavState>>,
    events: EventEmitter<TabNavEvent>,
}

impl TabNav {
    /// Create an uninitialized widget. Register observers, then call [`init`](Self::init).
    pub fn new(config: TabNavConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(TabNavState {
                config,
                initialized: false,
                tabs: Vec::new(),
                tab_list: None,
                scroll_area: None,
                loading_template: None,
                active: None,
                loading: SecondaryMap::new(),
                loaded: SecondaryMap::new(),
                changing: false,
                listeners: Vec::new(),
            })),
            events: EventEmitter::new(),
        }
    }

    /// Discover the tabs, wire listeners and activate the start tab.
    ///
    /// A missing container or zero tabs leaves the widget inert. Invalid
    /// selector syntax in the options is an error.
    pub fn init(&self, document: &mut Document) -> Result<()> {
        let (container_sel, scroll_sel, loading_sel) = {
            let state = self.state.borrow();
            if state.initialized {
                tracing::warn!("tab navigation already initialized");
                return Ok(());
            }
            (
                parse_selector_list(&state.config.container_selector)?,
                parse_selector_list(&state.config.scroll_selector)?,
                parse_selector_list(&state.config.loading_selector)?,
            )
        };

        let dom = document.dom();
        let container = dom.root().and_then(|root| dom.query_selector(root, &container_sel));
        let Some(container) = container else {
            tracing::debug!("tab navigation container not found; inert");
            self.state.borrow_mut().initialized = true;
            return Ok(());
        };
        let tabs = dom.query_selector_all(container, tab_selector());
        if tabs.is_empty() {
            tracing::debug!("no tabs found; inert");
            self.state.borrow_mut().initialized = true;
            return Ok(());
        }

        {
            let mut state = self.state.borrow_mut();
            state.initialized = true;
            state.tab_list = dom.query_selector(container, tab_list_selector());
            state.scroll_area = dom.query_selector(container, &scroll_sel);
            state.loading_template = dom.query_selector(container, &loading_sel);
            for &tab in &tabs {
                if dom.get(tab).and_then(|n| n.attr("data-loaded")) == Some("true") {
                    state.loaded.insert(tab, ());
                }
            }
            state.tabs = tabs;
        }
        tracing::debug!(tabs = self.tabs().len(), "tab navigation initialized");

        self.install_listeners(document);
        if let Some(start) = self.start_tab(document) {
            self.activate(document, start)?;
        }
        Ok(())
    }

    fn install_listeners(&self, document: &mut Document) {
        let (tabs, tab_list) = {
            let state = self.state.borrow();
            (state.tabs.clone(), state.tab_list)
        };
        let mut ids = Vec::with_capacity(tabs.len() + 1);
        for tab in tabs {
            let nav = self.clone();
            ids.push(document.add_event_listener(
                ListenerTarget::Node(tab),
                EventType::Click,
                move |doc, _| {
                    if nav.active_tab() == Some(tab) {
                        return;
                    }
                    if let Err(err) = nav.activate(doc, tab) {
                        tracing::warn!(%err, "tab click ignored");
                    }
                },
            ));
        }
        if let Some(list) = tab_list {
            let nav = self.clone();
            ids.push(document.add_event_listener(
                ListenerTarget::Node(list),
                EventType::KeyDown,
                move |doc, ev| nav.handle_arrow_key(doc, ev),
            ));
        }
        self.state.borrow_mut().listeners.extend(ids);
    }

    /// Fragment match, then the configured start tab, then the first tab.
    fn start_tab(&self, document: &Document) -> Option<NodeId> {
        let state = self.state.borrow();
        let dom = document.dom();
        let by_id = |id: &str| {
            state
                .tabs
                .iter()
                .copied()
                .find(|&tab| dom.get(tab).and_then(|n| n.id.as_deref()) == Some(id))
        };

        let fragment = document.host().fragment();
        let name = fragment.strip_prefix('#').unwrap_or(&fragment);
        if !name.is_empty() {
            if let Some(tab) = by_id(name) {
                return Some(tab);
            }
        }
        if let Some(id) = state.config.start_tab_id.as_deref() {
            match by_id(id) {
                Some(tab) => return Some(tab),
                None => tracing::warn!(id, "start tab not found among tabs"),
            }
        }
        state.tabs.first().copied()
    }

    // -- operations ---------------------------------------------------------

    /// Make `tab` the active tab.
    ///
    /// Returns `Ok(false)` when called from inside a `change:start` observer
    /// while another activation is in progress; that call is dropped. The
    /// active tab is not guarded here, only user clicks on it are ignored.
    pub fn activate(&self, document: &mut Document, tab: NodeId) -> Result<bool> {
        let previous = {
            let mut state = self.state.borrow_mut();
            if !state.tabs.contains(&tab) {
                return Err(Error::UnknownTab);
            }
            if state.changing {
                tracing::warn!(?tab, "activation requested during change:start; ignored");
                return Ok(false);
            }
            state.changing = true;
            state.active
        };
        tracing::debug!(?previous, next = ?tab, "activate tab");
        self.events
            .emit(document, &TabNavEvent::ChangeStart { previous, next: tab });

        let classes = self.state.borrow().config.status_classes.clone();
        if let Some(prev) = previous {
            let dom = document.dom_mut();
            dom.update(prev, |n| {
                n.remove_class(&classes.active);
                n.set_attr("aria-selected", "false");
            });
            if let Some(panel) = panel_of(dom, prev) {
                dom.update(panel, |n| n.remove_class(&classes.active));
            }
        }

        self.scroll_into_view(document, tab);

        let dom = document.dom_mut();
        if let Some(panel) = panel_of(dom, tab) {
            dom.update(panel, |n| n.add_class(&classes.active));
        }
        dom.update(tab, |n| {
            n.add_class(&classes.active);
            n.set_attr("aria-selected", "true");
        });
        self.write_fragment(document, tab);

        let lazy = wants_lazy_load(document.dom(), tab);
        let (loading, loaded) = {
            let mut state = self.state.borrow_mut();
            state.active = Some(tab);
            state.changing = false;
            (state.loading.contains_key(tab), state.loaded.contains_key(tab))
        };

        if loading {
            tracing::debug!(?tab, "tab still loading; change:end deferred");
        } else if lazy && !loaded {
            self.begin_loading(document, tab);
            self.events.emit(document, &TabNavEvent::LoadStart { tab });
        } else {
            self.events.emit(document, &TabNavEvent::ChangeEnd { tab });
        }
        Ok(true)
    }

    /// Signal that the page finished loading `tab`'s content.
    ///
    /// Clears the loading state, marks the tab loaded for good, removes the
    /// indicator and emits `load:end` followed by the deferred `change:end`
    /// (only if the tab is still the active one). A tab that is not loading
    /// is left alone and `false` is returned.
    pub fn finish_loading(&self, document: &mut Document, tab: NodeId) -> bool {
        let (indicator, still_active, classes) = {
            let mut state = self.state.borrow_mut();
            let Some(indicator) = state.loading.remove(tab) else {
                tracing::debug!(?tab, "finish_loading on a tab that is not loading");
                return false;
            };
            state.loaded.insert(tab, ());
            (
                indicator,
                state.active == Some(tab),
                state.config.status_classes.clone(),
            )
        };

        let dom = document.dom_mut();
        dom.update(tab, |n| {
            n.remove_class(&classes.loading);
            n.add_class(&classes.loaded);
            n.set_attr("data-loaded", "true");
        });
        if let Some(panel) = panel_of(dom, tab) {
            dom.update(panel, |n| n.remove_attr("aria-busy"));
        }
        if let Some(indicator) = indicator {
            dom.remove(indicator);
        }
        tracing::debug!(?tab, "tab loaded");

        self.events.emit(document, &TabNavEvent::LoadEnd { tab });
        if still_active {
            self.events.emit(document, &TabNavEvent::ChangeEnd { tab });
        }
        true
    }

    /// Remove every DOM listener installed by `init`.
    pub fn destroy(&self, document: &mut Document) {
        let ids = std::mem::take(&mut self.state.borrow_mut().listeners);
        for id in ids {
            document.remove_event_listener(id);
        }
    }

    fn begin_loading(&self, document: &mut Document, tab: NodeId) {
        let (template, classes) = {
            let state = self.state.borrow();
            (state.loading_template, state.config.status_classes.clone())
        };
        let dom = document.dom_mut();
        dom.update(tab, |n| n.add_class(&classes.loading));
        let panel = panel_of(dom, tab);
        let indicator = match (template, panel) {
            (Some(template), Some(panel)) => {
                dom.update(panel, |n| n.set_attr("aria-busy", "true"));
                dom.clone_subtree(template, panel).inspect(|&clone| {
                    dom.update(clone, |n| n.add_class(&classes.active));
                })
            }
            (None, Some(panel)) => {
                dom.update(panel, |n| n.set_attr("aria-busy", "true"));
                None
            }
            _ => None,
        };
        tracing::debug!(?tab, indicator = indicator.is_some(), "tab loading");
        self.state.borrow_mut().loading.insert(tab, indicator);
    }

    /// Center the tab in the scroll area, biased by its width.
    fn scroll_into_view(&self, document: &mut Document, tab: NodeId) {
        let Some(area) = self.state.borrow().scroll_area else {
            return;
        };
        let viewport = document.host().viewport_width();
        let dom = document.dom();
        let (Some(rect), Some(left)) = (
            dom.get(tab).map(|n| n.rect),
            dom.get(area).map(|n| n.scroll.left),
        ) else {
            return;
        };
        // `rect` is laid out in the unscrolled strip; shift it to the visible x.
        let x = rect.x - left;
        let delta = rect.width - (viewport - x) + (viewport - rect.width) / 2.0;
        document
            .dom_mut()
            .update(area, |n| n.scroll.scroll_by(delta, ScrollBehavior::Smooth));
    }

    fn write_fragment(&self, document: &mut Document, tab: NodeId) {
        let Some(id) = document.dom().get(tab).and_then(|n| n.id.clone()) else {
            tracing::debug!(?tab, "tab has no id; fragment left unchanged");
            return;
        };
        let fragment = format!("#{id}");
        if self.state.borrow().config.scroll_y {
            document.host_mut().assign_fragment(&fragment);
        } else {
            document.host_mut().replace_fragment(&fragment);
        }
    }

    fn handle_arrow_key(&self, document: &mut Document, event: &mut DomEvent) {
        let forward = match event.key.map(|k| k.code) {
            Some(Key::ArrowRight) => true,
            Some(Key::ArrowLeft) => false,
            _ => return,
        };
        event.prevent_default();

        let (tabs, current) = {
            let state = self.state.borrow();
            (state.tabs.clone(), state.active)
        };
        let Some(current) = current else {
            return;
        };
        if event.target != current {
            document.focus(current);
            return;
        }
        let Some(pos) = tabs.iter().position(|&t| t == current) else {
            return;
        };
        let len = tabs.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        if let Some(&next) = tabs.get(next) {
            document.focus(next);
            document.click(next);
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn active_tab(&self) -> Option<NodeId> {
        self.state.borrow().active
    }

    /// Discovered tabs in document order.
    pub fn tabs(&self) -> Vec<NodeId> {
        self.state.borrow().tabs.clone()
    }

    pub fn is_loading(&self, tab: NodeId) -> bool {
        self.state.borrow().loading.contains_key(tab)
    }

    pub fn is_loaded(&self, tab: NodeId) -> bool {
        self.state.borrow().loaded.contains_key(tab)
    }

    /// Whether init found nothing to drive (or has not run).
    pub fn is_inert(&self) -> bool {
        self.state.borrow().tabs.is_empty()
    }

    /// Observe `change:start`, `change:end`, `load:start` or `load:end`.
    pub fn add_event_listener(
        &self,
        name: impl Into<String>,
        observer: impl Fn(&mut Document, &TabNavEvent) + 'static,
    ) -> ObserverId {
        self.events.add_event_listener(name, observer)
    }

    pub fn remove_event_listener(&self, id: ObserverId) -> bool {
        self.events.remove_event_listener(id)
    }

    pub fn events(&self) -> &EventEmitter<TabNavEvent> {
        &self.events
    }
}

/// The panel named by the tab's `aria-controls`.
fn panel_of(dom: &Dom, tab: NodeId) -> Option<NodeId> {
    let panel_id = dom.get(tab)?.attr("aria-controls")?;
    dom.get_element_by_id(panel_id)
}

fn wants_lazy_load(dom: &Dom, tab: NodeId) -> bool {
    dom.get(tab)
        .and_then(|n| n.attr("data-load"))
        .is_some_and(|value| value != "false")
}
