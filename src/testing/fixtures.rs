//! Stock page markup for each widget, built with the default selectors.

use crate::dom::node::NodeData;
use crate::dom::tree::Dom;
use crate::geometry::Rect;
use crate::scroll::ScrollState;

/// Width of each tab button in [`tab_nav_page`].
pub const TAB_WIDTH: f64 = 120.0;

/// Visible width of the tab strip in [`tab_nav_page`].
pub const STRIP_WIDTH: f64 = 300.0;

/// A tab navigation page.
///
/// ```text
/// body
///   div#tabNav
///     div.js_tabNav_scrollArea
///       div[role=tablist]
///         button#<id>[role=tab][aria-controls=panel_<id>][data-load]  (per tab)
///     div.js_tabNav_loading
///     section#panel_<id>[role=tabpanel]                             (per tab)
/// ```
///
/// `tabs` pairs each id with its lazy-load flag. Tabs are laid out left to
/// right, [`TAB_WIDTH`] apart, in a strip [`STRIP_WIDTH`] wide.
pub fn tab_nav_page(tabs: &[(&str, bool)]) -> Dom {
    let mut dom = Dom::new();
    let body = dom.insert(NodeData::new("body"));
    let nav = dom.insert_child(body, NodeData::new("div").with_id("tabNav"));
    let strip = ScrollState::new(TAB_WIDTH * tabs.len() as f64, STRIP_WIDTH);
    let area = dom.insert_child(
        nav,
        NodeData::new("div")
            .with_class("js_tabNav_scrollArea")
            .with_scroll(strip),
    );
    let list = dom.insert_child(area, NodeData::new("div").with_attr("role", "tablist"));
    for (i, &(id, lazy)) in tabs.iter().enumerate() {
        let mut tab = NodeData::new("button")
            .with_id(id)
            .with_attr("role", "tab")
            .with_attr("aria-selected", "false")
            .with_attr("aria-controls", format!("panel_{id}"))
            .with_rect(Rect::new(i as f64 * TAB_WIDTH, 0.0, TAB_WIDTH, 40.0));
        if lazy {
            tab = tab.with_attr("data-load", "true");
        }
        dom.insert_child(list, tab);
    }
    let template = dom.insert_child(
        nav,
        NodeData::new("div").with_classes(["js_tabNav_loading", "loading"]),
    );
    dom.insert_child(template, NodeData::new("span").with_class("spinner"));
    for &(id, _) in tabs {
        dom.insert_child(
            nav,
            NodeData::new("section")
                .with_id(format!("panel_{id}"))
                .with_attr("role", "tabpanel"),
        );
    }
    dom
}

/// A modal page: `button.js_modal_open#open`, `div#modal` holding
/// `button.js_modal_close#close`, and a text input `#name` inside the modal.
pub fn modal_page() -> Dom {
    let mut dom = Dom::new();
    let body = dom.insert(NodeData::new("body"));
    dom.insert_child(
        body,
        NodeData::new("button").with_id("open").with_class("js_modal_open"),
    );
    let modal = dom.insert_child(
        body,
        NodeData::new("div").with_id("modal").with_attr("role", "dialog"),
    );
    dom.insert_child(modal, NodeData::new("input").with_id("name").with_attr("type", "text"));
    dom.insert_child(
        modal,
        NodeData::new("button").with_id("close").with_class("js_modal_close"),
    );
    dom
}

/// A focus trap page.
///
/// ```text
/// body
///   button#enterArea
///   div#focusTrap_container
///     a#first[href]
///     input#hidden[type=hidden]
///     input#middle
///     button#disabled[disabled]
///     button#exitArea
///   button#after
/// ```
pub fn focus_area_page() -> Dom {
    let mut dom = Dom::new();
    let body = dom.insert(NodeData::new("body"));
    dom.insert_child(body, NodeData::new("button").with_id("enterArea"));
    let container = dom.insert_child(body, NodeData::new("div").with_id("focusTrap_container"));
    dom.insert_child(container, NodeData::new("a").with_id("first").with_attr("href", "#"));
    dom.insert_child(
        container,
        NodeData::new("input").with_id("hidden").with_attr("type", "hidden"),
    );
    dom.insert_child(container, NodeData::new("input").with_id("middle"));
    dom.insert_child(
        container,
        NodeData::new("button").with_id("disabled").with_attr("disabled", ""),
    );
    dom.insert_child(container, NodeData::new("button").with_id("exitArea"));
    dom.insert_child(body, NodeData::new("button").with_id("after"));
    dom
}
