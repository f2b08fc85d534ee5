//! Ordered record of widget lifecycle events.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::emitter::{EventEmitter, WidgetEvent};

/// Records event names from one or more emitters in emission order.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Rc<RefCell<Vec<&'static str>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every event in `names` emitted by `emitter` from now on.
    pub fn watch<E: WidgetEvent>(&self, emitter: &EventEmitter<E>, names: &[&str]) {
        for &name in names {
            let entries = Rc::clone(&self.entries);
            emitter.add_event_listener(name, move |_, event: &E| {
                entries.borrow_mut().push(event.name());
            });
        }
    }

    /// Recorded names, oldest first.
    pub fn entries(&self) -> Vec<&'static str> {
        self.entries.borrow().clone()
    }

    /// How many times `name` was recorded.
    pub fn count(&self, name: &str) -> usize {
        self.entries.borrow().iter().filter(|&&n| n == name).count()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[derive(Debug)]
    struct Tick;

    impl WidgetEvent for Tick {
        fn name(&self) -> &'static str {
            "tick"
        }
    }

    #[test]
    fn records_only_watched_names() {
        let mut doc = Document::default();
        let emitter = EventEmitter::<Tick>::new();
        let log = EventLog::new();
        log.watch(&emitter, &["tock"]);
        emitter.emit(&mut doc, &Tick);
        assert!(log.entries().is_empty());

        log.watch(&emitter, &["tick"]);
        emitter.emit(&mut doc, &Tick);
        emitter.emit(&mut doc, &Tick);
        assert_eq!(log.count("tick"), 2);
        log.clear();
        assert!(log.entries().is_empty());
    }
}
