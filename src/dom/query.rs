//! DOM queries: by id, by selector, by predicate. Results are in document order.

use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::selector::{self, parse_selector_list, ParseError, SelectorList};

impl Dom {
    /// Find the first node in document order whose id matches (`getElementById`).
    ///
    /// Only nodes reachable from the root are considered.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|&node| self.get(node).and_then(|d| d.id.as_deref()) == Some(id))
    }

    /// All descendants of `scope` (excluding `scope`) matching the selector group.
    ///
    /// Like `Element.querySelectorAll`, ancestors outside `scope` still take part
    /// in combinator matching.
    pub fn query_selector_all(&self, scope: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
        self.walk_depth_first(scope)
            .into_iter()
            .skip(1)
            .filter(|&node| selector::matches(selectors, node, self))
            .collect()
    }

    /// First descendant of `scope` matching the selector group.
    pub fn query_selector(&self, scope: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        self.walk_depth_first(scope)
            .into_iter()
            .skip(1)
            .find(|&node| selector::matches(selectors, node, self))
    }

    /// Parse `selectors` and query every match under the root.
    pub fn select_all(&self, selectors: &str) -> Result<Vec<NodeId>, ParseError> {
        let list = parse_selector_list(selectors)?;
        Ok(match self.root() {
            Some(root) => self.query_selector_all(root, &list),
            None => Vec::new(),
        })
    }

    /// Parse `selectors` and return the first match under the root.
    pub fn select(&self, selectors: &str) -> Result<Option<NodeId>, ParseError> {
        let list = parse_selector_list(selectors)?;
        Ok(self.root().and_then(|root| self.query_selector(root, &list)))
    }

    /// Find all nodes reachable from the root matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|&node| self.get(node).is_some_and(&predicate))
            .collect()
    }

    /// Every node reachable from the root, in document order.
    fn document_order(&self) -> Vec<NodeId> {
        self.root()
            .map(|root| self.walk_depth_first(root))
            .unwrap_or_default()
    }
}
