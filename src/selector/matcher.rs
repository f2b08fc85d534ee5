//! Selector matching against DOM nodes.
//!
//! Complex selectors are matched right to left: the rightmost compound must
//! match the candidate node, then each combinator walks up the tree looking
//! for the next compound.

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::selector::model::{
    AttributeOp, AttributeSelector, Combinator, CompoundSelector, PseudoClass, Selector,
    SelectorComponent, SelectorList, SelectorPart,
};

/// Whether any selector in the group matches `node_id`.
pub fn matches(list: &SelectorList, node_id: NodeId, dom: &Dom) -> bool {
    list.selectors
        .iter()
        .any(|selector| matches_selector(selector, node_id, dom))
}

/// Check whether a complex selector matches a given node.
pub fn matches_selector(selector: &Selector, node_id: NodeId, dom: &Dom) -> bool {
    let parts = &selector.parts;
    let Some(SelectorPart::Compound(last)) = parts.last() else {
        return false;
    };
    matches_compound(last, node_id, dom) && matches_leftward(parts, parts.len() - 1, node_id, dom)
}

/// Match `parts[..idx]` given that `parts[idx]` matched `node_id`.
fn matches_leftward(parts: &[SelectorPart], idx: usize, node_id: NodeId, dom: &Dom) -> bool {
    if idx == 0 {
        return true;
    }
    if idx < 2 {
        return false;
    }
    let (SelectorPart::Combinator(combinator), SelectorPart::Compound(compound)) =
        (&parts[idx - 1], &parts[idx - 2])
    else {
        return false;
    };

    match combinator {
        Combinator::Child => dom.parent(node_id).is_some_and(|parent| {
            matches_compound(compound, parent, dom) && matches_leftward(parts, idx - 2, parent, dom)
        }),
        Combinator::Descendant => dom.ancestors(node_id).into_iter().any(|ancestor| {
            matches_compound(compound, ancestor, dom)
                && matches_leftward(parts, idx - 2, ancestor, dom)
        }),
    }
}

/// Check whether every simple selector in a compound matches the node.
pub fn matches_compound(compound: &CompoundSelector, node_id: NodeId, dom: &Dom) -> bool {
    let Some(node) = dom.get(node_id) else {
        return false;
    };
    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => node.tag == *name,
        SelectorComponent::Universal => true,
        SelectorComponent::Class(name) => node.has_class(name),
        SelectorComponent::Id(name) => node.id.as_deref() == Some(name.as_str()),
        SelectorComponent::Attribute(attr) => matches_attribute(attr, node),
        SelectorComponent::PseudoClass(pseudo) => match pseudo {
            PseudoClass::Not(inner) => !inner.iter().any(|c| matches_compound(c, node_id, dom)),
            PseudoClass::FirstChild => {
                dom.parent(node_id).is_some() && dom.previous_sibling(node_id).is_none()
            }
            PseudoClass::LastChild => {
                dom.parent(node_id).is_some() && dom.next_sibling(node_id).is_none()
            }
            PseudoClass::Empty => dom.children(node_id).is_empty(),
        },
    })
}

fn matches_attribute(attr: &AttributeSelector, node: &NodeData) -> bool {
    let joined;
    let value = if attr.name == "class" {
        if node.classes.is_empty() {
            return false;
        }
        joined = node.classes.join(" ");
        joined.as_str()
    } else {
        match node.attr(&attr.name) {
            Some(v) => v,
            None => return false,
        }
    };

    match &attr.op {
        AttributeOp::Exists => true,
        AttributeOp::Equals(expected) => value == expected,
        // Empty operands never match for the substring family.
        AttributeOp::Prefix(p) => !p.is_empty() && value.starts_with(p.as_str()),
        AttributeOp::Suffix(s) => !s.is_empty() && value.ends_with(s.as_str()),
        AttributeOp::Substring(s) => !s.is_empty() && value.contains(s.as_str()),
        AttributeOp::Includes(word) => value.split_whitespace().any(|w| w == word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;
    use crate::selector::parser::parse_selector_list;

    /// ```text
    /// body
    /// └── div#tabNav
    ///     ├── ul[role=tablist]
    ///     │   ├── button#t1[role=tab][aria-selected=true].is_active
    ///     │   └── button#t2[role=tab][data-load][disabled]
    ///     └── input[type=hidden][tabindex=-1]
    /// ```
    struct Fixture {
        dom: Dom,
        nav: NodeId,
        list: NodeId,
        t1: NodeId,
        t2: NodeId,
        input: NodeId,
    }

    fn fixture() -> Fixture {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let nav = dom.insert_child(body, NodeData::new("div").with_id("tabNav"));
        let list = dom.insert_child(nav, NodeData::new("ul").with_attr("role", "tablist"));
        let t1 = dom.insert_child(
            list,
            NodeData::new("button")
                .with_id("t1")
                .with_class("is_active")
                .with_attr("role", "tab")
                .with_attr("aria-selected", "true"),
        );
        let t2 = dom.insert_child(
            list,
            NodeData::new("button")
                .with_id("t2")
                .with_attr("role", "tab")
                .with_attr("data-load", "")
                .with_attr("disabled", ""),
        );
        let input = dom.insert_child(
            nav,
            NodeData::new("input")
                .with_attr("type", "hidden")
                .with_attr("tabindex", "-1"),
        );
        Fixture {
            dom,
            nav,
            list,
            t1,
            t2,
            input,
        }
    }

    fn is_match(sel: &str, node: NodeId, dom: &Dom) -> bool {
        let list = parse_selector_list(sel).unwrap();
        matches(&list, node, dom)
    }

    #[test]
    fn simple_components() {
        let f = fixture();
        assert!(is_match("button", f.t1, &f.dom));
        assert!(is_match("#t1", f.t1, &f.dom));
        assert!(is_match(".is_active", f.t1, &f.dom));
        assert!(!is_match(".is_active", f.t2, &f.dom));
        assert!(is_match("*", f.nav, &f.dom));
    }

    #[test]
    fn attribute_operators() {
        let f = fixture();
        assert!(is_match(r#"[role="tab"]"#, f.t2, &f.dom));
        assert!(is_match("[data-load]", f.t2, &f.dom));
        assert!(!is_match("[data-load]", f.t1, &f.dom));
        assert!(is_match(r#"[tabindex^="-"]"#, f.input, &f.dom));
        assert!(is_match("[role$=list]", f.list, &f.dom));
        assert!(is_match("[role*=bli]", f.list, &f.dom));
        assert!(!is_match(r#"[role^=""]"#, f.list, &f.dom));
        assert!(is_match("[class~=is_active]", f.t1, &f.dom));
        assert!(!is_match("[class]", f.t2, &f.dom));
        assert!(is_match("[id=t2]", f.t2, &f.dom));
    }

    #[test]
    fn negation() {
        let f = fixture();
        assert!(is_match("button:not([disabled])", f.t1, &f.dom));
        assert!(!is_match("button:not([disabled])", f.t2, &f.dom));
        assert!(!is_match(
            r#"input:not([disabled]):not([type="hidden"])"#,
            f.input,
            &f.dom
        ));
        assert!(!is_match(r#"[tabindex]:not([tabindex^="-"])"#, f.input, &f.dom));
    }

    #[test]
    fn combinators() {
        let f = fixture();
        assert!(is_match(r#"#tabNav [role="tab"]"#, f.t2, &f.dom));
        assert!(is_match(r#"#tabNav > [role="tablist"] > button"#, f.t1, &f.dom));
        assert!(!is_match("#tabNav > button", f.t1, &f.dom));
        assert!(is_match("body #tabNav ul button", f.t1, &f.dom));
        assert!(!is_match("#t1 button", f.t2, &f.dom));
    }

    #[test]
    fn descendant_backtracks_past_nearest_ancestor() {
        // div.a > div.b > div.b > span: the nearest .b has no .a parent.
        let mut dom = Dom::new();
        let a = dom.insert(NodeData::new("div").with_class("a"));
        let b1 = dom.insert_child(a, NodeData::new("div").with_class("b"));
        let b2 = dom.insert_child(b1, NodeData::new("div").with_class("b"));
        let span = dom.insert_child(b2, NodeData::new("span"));
        assert!(is_match(".a > .b span", span, &dom));
    }

    #[test]
    fn structural() {
        let f = fixture();
        assert!(is_match("button:first-child", f.t1, &f.dom));
        assert!(!is_match("button:first-child", f.t2, &f.dom));
        assert!(is_match("button:last-child", f.t2, &f.dom));
        assert!(is_match("input:empty", f.input, &f.dom));
        assert!(!is_match("ul:empty", f.list, &f.dom));
    }

    #[test]
    fn selector_group_is_any() {
        let f = fixture();
        assert!(is_match("iframe, input", f.input, &f.dom));
        assert!(!is_match("iframe, embed", f.input, &f.dom));
    }

    #[test]
    fn stale_node_never_matches() {
        let mut f = fixture();
        f.dom.remove(f.t2);
        assert!(!is_match("*", f.t2, &f.dom));
    }
}
