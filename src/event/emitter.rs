//! Widget lifecycle events: a named observer registry.
//!
//! Each widget owns an [`EventEmitter`] for its own event enum. Observers
//! register by event name (`"change:start"`, `"open:after"`, ...) and are
//! invoked in registration order. An observer only sees events emitted after
//! it was registered.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::document::Document;

new_key_type! {
    /// Handle returned by `EventEmitter::add_event_listener`.
    pub struct ObserverId;
}

/// A widget event with a stable name.
pub trait WidgetEvent: 'static {
    /// The name observers register under.
    fn name(&self) -> &'static str;
}

/// Observer callback. Receives the document so it can drive widgets
/// (e.g. finish a lazy load) from inside the callback.
pub type Observer<E> = Rc<dyn Fn(&mut Document, &E)>;

struct Observers<E> {
    slots: SlotMap<ObserverId, (String, Observer<E>)>,
    order: Vec<ObserverId>,
}

/// Named observer registry shared by all clones of a widget handle.
pub struct EventEmitter<E> {
    inner: Rc<RefCell<Observers<E>>>,
}

impl<E: WidgetEvent> EventEmitter<E> {
    /// Create an emitter with no observers.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Observers {
                slots: SlotMap::with_key(),
                order: Vec::new(),
            })),
        }
    }

    /// Register `observer` for events named `name`.
    pub fn add_event_listener(
        &self,
        name: impl Into<String>,
        observer: impl Fn(&mut Document, &E) + 'static,
    ) -> ObserverId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.slots.insert((name.into(), Rc::new(observer)));
        inner.order.push(id);
        id
    }

    /// Unregister an observer. Returns `false` if it was already gone.
    pub fn remove_event_listener(&self, id: ObserverId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.slots.remove(id).is_some() {
            inner.order.retain(|&other| other != id);
            true
        } else {
            false
        }
    }

    /// Number of observers registered for `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.inner
            .borrow()
            .slots
            .values()
            .filter(|(n, _)| n == name)
            .count()
    }

    /// Deliver `event` to every observer registered under its name.
    ///
    /// The observer list is snapshotted first. Observers registered during
    /// delivery wait for the next emit; observers removed during delivery are
    /// skipped if they have not run yet.
    pub fn emit(&self, document: &mut Document, event: &E) {
        let name = event.name();
        let observers: Vec<(ObserverId, Observer<E>)> = {
            let inner = self.inner.borrow();
            inner
                .order
                .iter()
                .filter_map(|&id| inner.slots.get(id).map(|slot| (id, slot)))
                .filter(|(_, (n, _))| n == name)
                .map(|(id, (_, observer))| (id, Rc::clone(observer)))
                .collect()
        };
        tracing::trace!(event = name, observers = observers.len(), "emit");
        for (id, observer) in observers {
            if !self.inner.borrow().slots.contains_key(id) {
                continue;
            }
            observer(document, event);
        }
    }
}

impl<E: WidgetEvent> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventEmitter<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("observers", &self.inner.borrow().slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug)]
    enum Ping {
        A,
        B,
    }

    impl WidgetEvent for Ping {
        fn name(&self) -> &'static str {
            match self {
                Ping::A => "ping:a",
                Ping::B => "ping:b",
            }
        }
    }

    #[test]
    fn emits_in_registration_order_by_name() {
        let mut doc = Document::default();
        let emitter = EventEmitter::<Ping>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            emitter.add_event_listener("ping:a", move |_, _| log.borrow_mut().push(tag));
        }
        let other = Rc::clone(&log);
        emitter.add_event_listener("ping:b", move |_, _| other.borrow_mut().push("b"));

        emitter.emit(&mut doc, &Ping::A);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        emitter.emit(&mut doc, &Ping::B);
        assert_eq!(*log.borrow(), vec!["first", "second", "b"]);
    }

    #[test]
    fn late_observer_misses_earlier_events() {
        let mut doc = Document::default();
        let emitter = EventEmitter::<Ping>::new();
        emitter.emit(&mut doc, &Ping::A);

        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        emitter.add_event_listener("ping:a", move |_, _| counter.set(counter.get() + 1));
        assert_eq!(hits.get(), 0);
        emitter.emit(&mut doc, &Ping::A);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn remove_stops_delivery() {
        let mut doc = Document::default();
        let emitter = EventEmitter::<Ping>::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = emitter.add_event_listener("ping:a", move |_, _| counter.set(counter.get() + 1));

        assert_eq!(emitter.listener_count("ping:a"), 1);
        assert!(emitter.remove_event_listener(id));
        assert!(!emitter.remove_event_listener(id));
        emitter.emit(&mut doc, &Ping::A);
        assert_eq!(hits.get(), 0);
        assert_eq!(emitter.listener_count("ping:a"), 0);
    }

    #[test]
    fn observer_removed_mid_emit_is_skipped() {
        let mut doc = Document::default();
        let emitter = EventEmitter::<Ping>::new();
        let hits = Rc::new(Cell::new(0));
        let victim = Rc::new(Cell::new(None));

        let handle = emitter.clone();
        let target = Rc::clone(&victim);
        emitter.add_event_listener("ping:a", move |_, _| {
            if let Some(id) = target.get() {
                handle.remove_event_listener(id);
            }
        });
        let counter = Rc::clone(&hits);
        let id = emitter.add_event_listener("ping:a", move |_, _| counter.set(counter.get() + 1));
        victim.set(Some(id));

        emitter.emit(&mut doc, &Ping::A);
        assert_eq!(hits.get(), 0);
        assert_eq!(emitter.listener_count("ping:a"), 1);
    }

    #[test]
    fn observer_may_register_during_emit() {
        let mut doc = Document::default();
        let emitter = EventEmitter::<Ping>::new();
        let inner = emitter.clone();
        emitter.add_event_listener("ping:a", move |_, _| {
            inner.add_event_listener("ping:a", |_, _| {});
        });
        emitter.emit(&mut doc, &Ping::A);
        assert_eq!(emitter.listener_count("ping:a"), 2);
    }
}
