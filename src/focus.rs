//! Focus order for a subtree.
//!
//! [`FocusChain`] holds the focusable descendants of a scope in document
//! order. Tab walks it forward and Shift+Tab backward, both wrapping. The
//! document uses a chain over the whole tree for the default Tab action; the
//! focus trap builds one over its container each time it is entered.

use std::sync::OnceLock;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::selector::{parse_selector_list, SelectorList};

/// Selector patterns for elements that take keyboard focus.
pub const FOCUSABLE_SELECTORS: &[&str] = &[
    "[href]",
    r#"input:not([disabled]):not([type="hidden"]):not([aria-hidden])"#,
    "select:not([disabled]):not([aria-hidden])",
    "textarea:not([disabled]):not([aria-hidden])",
    "button:not([disabled]):not([aria-hidden])",
    "iframe",
    "object",
    "embed",
    "[contenteditable]",
    r#"[tabindex]:not([tabindex^="-"])"#,
];

/// The parsed focusable selector group, built once.
pub fn focusable_selector_list() -> &'static SelectorList {
    static LIST: OnceLock<SelectorList> = OnceLock::new();
    LIST.get_or_init(|| parse_selector_list(&FOCUSABLE_SELECTORS.join(", ")).unwrap_or_default())
}

// ---------------------------------------------------------------------------
// FocusChain
// ---------------------------------------------------------------------------

/// Ordered focusable nodes of a subtree with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusChain {
    nodes: Vec<NodeId>,
    current: Option<usize>,
}

impl FocusChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the focusable descendants of `scope` (excluding `scope`).
    pub fn collect(dom: &Dom, scope: NodeId) -> Self {
        Self {
            nodes: dom.query_selector_all(scope, focusable_selector_list()),
            current: None,
        }
    }

    /// Place the cursor on `node` if it is in the chain, else clear it (builder).
    pub fn with_focus(mut self, node: Option<NodeId>) -> Self {
        self.current = node.and_then(|n| self.position(n));
        self
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Index of `node` in the chain.
    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    /// The node under the cursor.
    pub fn current_node(&self) -> Option<NodeId> {
        self.current.and_then(|idx| self.nodes.get(idx).copied())
    }

    /// Advance the cursor, wrapping from last to first.
    ///
    /// Without a cursor the first node is chosen. `None` if the chain is empty.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(idx) => (idx + 1) % self.nodes.len(),
            None => 0,
        };
        self.current = Some(next);
        self.nodes.get(next).copied()
    }

    /// Move the cursor back, wrapping from first to last.
    ///
    /// Without a cursor the last node is chosen. `None` if the chain is empty.
    pub fn focus_previous(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let prev = match self.current {
            Some(0) | None => self.nodes.len() - 1,
            Some(idx) => idx - 1,
        };
        self.current = Some(prev);
        self.nodes.get(prev).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
