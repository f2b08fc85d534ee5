//! Markup snapshot helpers.
//!
//! Render an element subtree as indented HTML-like text: tag, id, classes
//! and attributes in insertion order, one element per line.

use std::fmt::Write;

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// Render the subtree at `node`, two spaces of indent per level.
///
/// A missing node renders as an empty string. The final line has no
/// trailing newline.
pub fn render_markup(dom: &Dom, node: NodeId) -> String {
    let mut out = String::new();
    render_into(dom, node, 0, &mut out);
    out.truncate(out.trim_end().len());
    out
}

/// Render a single element's start tag, e.g. `<button id="t1" class="a b">`.
pub fn start_tag(data: &NodeData) -> String {
    let mut tag = format!("<{}", data.tag);
    if let Some(id) = &data.id {
        let _ = write!(tag, " id=\"{id}\"");
    }
    if !data.classes.is_empty() {
        let _ = write!(tag, " class=\"{}\"", data.classes.join(" "));
    }
    for (name, value) in &data.attributes {
        let _ = write!(tag, " {name}=\"{value}\"");
    }
    tag.push('>');
    tag
}

fn render_into(dom: &Dom, node: NodeId, depth: usize, out: &mut String) {
    let Some(data) = dom.get(node) else {
        return;
    };
    out.push_str(&"  ".repeat(depth));
    out.push_str(&start_tag(data));
    out.push('\n');
    for &child in dom.children(node) {
        render_into(dom, child, depth + 1, out);
    }
}
