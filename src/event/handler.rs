//! Listener registry and bubble path computation.
//!
//! [`ListenerRegistry`] stores DOM listeners per (target, event type) in
//! registration order. The `bubble_path` function computes the delivery
//! order from a node up to the root; the document receives the event last.

use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use super::dom::{DomEvent, EventType, ListenerTarget};
use crate::document::Document;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

new_key_type! {
    /// Handle returned by `add_event_listener`, used for removal.
    pub struct ListenerId;
}

/// A DOM event listener. Receives the document so it can mutate the tree,
/// move focus or trigger further events.
pub type DomListener = Rc<dyn Fn(&mut Document, &mut DomEvent)>;

struct Registration {
    target: ListenerTarget,
    event_type: EventType,
    listener: DomListener,
}

// ---------------------------------------------------------------------------
// ListenerRegistry
// ---------------------------------------------------------------------------

/// DOM listeners keyed by target and event type.
#[derive(Default)]
pub struct ListenerRegistry {
    slots: SlotMap<ListenerId, Registration>,
    /// Registration order; slotmap iteration order is not insertion order.
    order: Vec<ListenerId>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it runs after every earlier listener on the same target.
    pub fn add(
        &mut self,
        target: ListenerTarget,
        event_type: EventType,
        listener: DomListener,
    ) -> ListenerId {
        let id = self.slots.insert(Registration {
            target,
            event_type,
            listener,
        });
        self.order.push(id);
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        if self.slots.remove(id).is_some() {
            self.order.retain(|&other| other != id);
            true
        } else {
            false
        }
    }

    /// Snapshot of the listeners for a target, in registration order.
    ///
    /// Returned as owned handles so the caller can invoke them while the
    /// registry itself is mutated.
    pub fn listeners_for(&self, target: ListenerTarget, event_type: EventType) -> Vec<DomListener> {
        self.order
            .iter()
            .filter_map(|&id| self.slots.get(id))
            .filter(|reg| reg.target == target && reg.event_type == event_type)
            .map(|reg| Rc::clone(&reg.listener))
            .collect()
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.slots.len())
            .finish()
    }
}

/// Compute the bubble path from `start` up to the root (inclusive), followed
/// by the document.
///
/// Returns `[start, parent, ..., root, Document]`; a stale `start` yields an
/// empty path.
pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<ListenerTarget> {
    if !dom.contains(start) {
        return Vec::new();
    }
    std::iter::once(start)
        .chain(dom.ancestors(start))
        .map(ListenerTarget::Node)
        .chain(std::iter::once(ListenerTarget::Document))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;

    fn noop() -> DomListener {
        Rc::new(|_: &mut Document, _: &mut DomEvent| {})
    }

    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   /
    ///  c
    /// ```
    fn build_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("body"));
        let a = dom.insert_child(root, NodeData::new("div"));
        let b = dom.insert_child(root, NodeData::new("div"));
        let c = dom.insert_child(a, NodeData::new("button"));
        (dom, root, a, b, c)
    }

    #[test]
    fn registry_add_remove() {
        let (_, root, ..) = build_tree();
        let mut reg = ListenerRegistry::new();
        assert!(reg.is_empty());
        let id = reg.add(ListenerTarget::Node(root), EventType::Click, noop());
        assert_eq!(reg.len(), 1);
        assert!(reg.remove(id));
        assert!(!reg.remove(id));
        assert!(reg.is_empty());
    }

    #[test]
    fn listeners_filtered_by_target_and_type() {
        let (_, root, a, ..) = build_tree();
        let mut reg = ListenerRegistry::new();
        reg.add(ListenerTarget::Node(root), EventType::Click, noop());
        reg.add(ListenerTarget::Node(a), EventType::Click, noop());
        reg.add(ListenerTarget::Node(a), EventType::KeyDown, noop());
        reg.add(ListenerTarget::Document, EventType::KeyDown, noop());

        assert_eq!(reg.listeners_for(ListenerTarget::Node(a), EventType::Click).len(), 1);
        assert_eq!(reg.listeners_for(ListenerTarget::Node(a), EventType::KeyDown).len(), 1);
        assert_eq!(reg.listeners_for(ListenerTarget::Document, EventType::Click).len(), 0);
    }

    #[test]
    fn listeners_keep_registration_order_after_slot_reuse() {
        let (_, root, ..) = build_tree();
        let target = ListenerTarget::Node(root);
        let mut reg = ListenerRegistry::new();
        let first = reg.add(target, EventType::Click, noop());
        let second: DomListener = noop();
        reg.add(target, EventType::Click, Rc::clone(&second));
        reg.remove(first);
        let third: DomListener = noop();
        reg.add(target, EventType::Click, Rc::clone(&third));

        let got = reg.listeners_for(target, EventType::Click);
        assert!(Rc::ptr_eq(&got[0], &second));
        assert!(Rc::ptr_eq(&got[1], &third));
    }

    #[test]
    fn bubble_path_from_leaf() {
        let (dom, root, a, _, c) = build_tree();
        assert_eq!(
            bubble_path(&dom, c),
            vec![
                ListenerTarget::Node(c),
                ListenerTarget::Node(a),
                ListenerTarget::Node(root),
                ListenerTarget::Document,
            ]
        );
    }

    #[test]
    fn bubble_path_from_root() {
        let (dom, root, ..) = build_tree();
        assert_eq!(
            bubble_path(&dom, root),
            vec![ListenerTarget::Node(root), ListenerTarget::Document]
        );
    }

    #[test]
    fn bubble_path_stale_node() {
        let (mut dom, ..) = build_tree();
        let stale = dom.insert(NodeData::new("div"));
        dom.remove(stale);
        assert!(bubble_path(&dom, stale).is_empty());
    }
}
