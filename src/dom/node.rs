//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

use crate::geometry::Rect;
use crate::scroll::ScrollState;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single element.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    /// Lower-case tag name (e.g. "button", "div").
    pub tag: String,
    /// Optional unique id (`#id` selector, `getElementById`).
    pub id: Option<String>,
    /// CSS classes in insertion order.
    pub classes: Vec<String>,
    /// Attributes other than `id` and `class`, in insertion order.
    pub attributes: Vec<(String, String)>,
    /// Viewport-relative bounding box.
    pub rect: Rect,
    /// Horizontal scroll state, meaningful for overflow containers.
    pub scroll: ScrollState,
}

impl NodeData {
    /// Create a new element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Set the element id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple CSS classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            let class = class.into();
            if !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        self
    }

    /// Set an attribute (builder). `id` and `class` are routed to their fields.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(&name.into(), value);
        self
    }

    /// Set the bounding box (builder).
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Set the scroll state (builder).
    pub fn with_scroll(mut self, scroll: ScrollState) -> Self {
        self.scroll = scroll;
        self
    }

    /// Check whether this node has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a CSS class: add if absent, remove if present.
    pub fn toggle_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }

    /// Read an attribute value. `id` reads the id field.
    pub fn attr(&self, name: &str) -> Option<&str> {
        if name == "id" {
            return self.id.as_deref();
        }
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the attribute is present (with any value).
    pub fn has_attr(&self, name: &str) -> bool {
        match name {
            "class" => !self.classes.is_empty(),
            _ => self.attr(name).is_some(),
        }
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// `class` replaces the whole class list with the whitespace-separated
    /// names in `value`.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match name {
            "id" => self.id = Some(value),
            "class" => {
                self.classes.clear();
                for class in value.split_whitespace() {
                    self.add_class(class);
                }
            }
            _ => match self.attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value,
                None => self.attributes.push((name.to_owned(), value)),
            },
        }
    }

    /// Remove an attribute. No-op if not present.
    pub fn remove_attr(&mut self, name: &str) {
        match name {
            "id" => self.id = None,
            "class" => self.classes.clear(),
            _ => self.attributes.retain(|(n, _)| n != name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = NodeData::new("BUTTON");
        assert_eq!(data.tag, "button");
        assert!(data.id.is_none());
        assert!(data.classes.is_empty());
        assert!(data.attributes.is_empty());
        assert_eq!(data.rect, Rect::ZERO);
    }

    #[test]
    fn builder_with_class_dedup() {
        let data = NodeData::new("div").with_class("primary").with_class("primary");
        assert_eq!(data.classes, vec!["primary"]);
    }

    #[test]
    fn builder_with_classes_dedup() {
        let data = NodeData::new("div").with_class("a").with_classes(["a", "b"]);
        assert_eq!(data.classes, vec!["a", "b"]);
    }

    #[test]
    fn toggle_class() {
        let mut data = NodeData::new("div");
        data.toggle_class("is_active");
        assert!(data.has_class("is_active"));
        data.toggle_class("is_active");
        assert!(!data.has_class("is_active"));
    }

    #[test]
    fn attributes_set_replace_remove() {
        let mut data = NodeData::new("button").with_attr("role", "tab");
        assert_eq!(data.attr("role"), Some("tab"));
        data.set_attr("aria-selected", "false");
        data.set_attr("aria-selected", "true");
        assert_eq!(data.attr("aria-selected"), Some("true"));
        assert_eq!(data.attributes.len(), 2);
        data.remove_attr("role");
        assert!(!data.has_attr("role"));
    }

    #[test]
    fn id_and_class_attributes_route_to_fields() {
        let data = NodeData::new("div")
            .with_attr("id", "panel1")
            .with_attr("class", "a  b a");
        assert_eq!(data.id.as_deref(), Some("panel1"));
        assert_eq!(data.attr("id"), Some("panel1"));
        assert_eq!(data.classes, vec!["a", "b"]);
        assert!(data.has_attr("class"));
        assert!(data.attributes.is_empty());
    }

    #[test]
    fn empty_attribute_value_is_present() {
        let data = NodeData::new("input").with_attr("disabled", "");
        assert!(data.has_attr("disabled"));
        assert_eq!(data.attr("disabled"), Some(""));
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
