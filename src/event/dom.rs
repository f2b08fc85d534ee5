//! DOM events delivered to node and document listeners.

use super::input::KeyEvent;
use crate::dom::node::NodeId;

/// The event types widgets listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// An element; receives events targeted at it or bubbling from inside it.
    Node(NodeId),
    /// The document itself; receives every bubbling event last.
    Document,
}

/// A dispatched event: type, payload, target and propagation flags.
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    pub event_type: EventType,
    /// Key payload for `KeyDown`.
    pub key: Option<KeyEvent>,
    /// The node the event was dispatched at.
    pub target: NodeId,
    /// The listener target currently being invoked.
    pub current_target: ListenerTarget,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    /// A click targeted at `target`.
    pub fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, None, target)
    }

    /// A keydown targeted at `target`.
    pub fn key_down(target: NodeId, key: KeyEvent) -> Self {
        Self::new(EventType::KeyDown, Some(key), target)
    }

    fn new(event_type: EventType, key: Option<KeyEvent>, target: NodeId) -> Self {
        Self {
            event_type,
            key,
            target,
            current_target: ListenerTarget::Node(target),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Suppress the default action (focus movement for Tab, page scroll for arrows).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop delivery to listeners further up the bubble path.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::Key;
    use slotmap::SlotMap;

    fn make_id() -> NodeId {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        sm.insert(())
    }

    #[test]
    fn click_has_no_key() {
        let id = make_id();
        let ev = DomEvent::click(id);
        assert_eq!(ev.event_type, EventType::Click);
        assert!(ev.key.is_none());
        assert_eq!(ev.current_target, ListenerTarget::Node(id));
    }

    #[test]
    fn flags_start_clear_and_latch() {
        let mut ev = DomEvent::key_down(make_id(), KeyEvent::plain(Key::Tab));
        assert!(!ev.default_prevented());
        assert!(!ev.propagation_stopped());
        ev.prevent_default();
        ev.stop_propagation();
        assert!(ev.default_prevented());
        assert!(ev.propagation_stopped());
    }
}
