//! Widget options.
//!
//! Every options struct has a `Default` matching the stock markup, `with_*`
//! builders, and a serde `Deserialize` impl that fills missing fields from
//! the defaults and ignores unknown keys, so options can come from a JSON
//! blob embedded in the page.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// StatusClasses
// ---------------------------------------------------------------------------

/// CSS classes the tab navigation toggles to express tab state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusClasses {
    /// On the selected tab and its panel.
    pub active: String,
    /// On a tab while its panel content is loading.
    pub loading: String,
    /// On a tab whose content finished loading. Never removed.
    pub loaded: String,
}

impl Default for StatusClasses {
    fn default() -> Self {
        Self {
            active: "is_active".into(),
            loading: "is_loading".into(),
            loaded: "is_loaded".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// TabNavConfig
// ---------------------------------------------------------------------------

/// Options for [`TabNav`](crate::widgets::tab_nav::TabNav).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TabNavConfig {
    /// Selector for the widget container.
    pub container_selector: String,
    /// Tab activated when the URL fragment names no tab.
    pub start_tab_id: Option<String>,
    /// Assign the fragment (page jumps, history grows) instead of replacing it.
    pub scroll_y: bool,
    /// Selector for the horizontally scrolling tab strip.
    pub scroll_selector: String,
    /// Selector for the loading indicator template.
    pub loading_selector: String,
    pub status_classes: StatusClasses,
}

impl Default for TabNavConfig {
    fn default() -> Self {
        Self {
            container_selector: "#tabNav".into(),
            start_tab_id: None,
            scroll_y: false,
            scroll_selector: ".js_tabNav_scrollArea".into(),
            loading_selector: ".js_tabNav_loading".into(),
            status_classes: StatusClasses::default(),
        }
    }
}

impl TabNavConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container selector (builder).
    pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    /// Set the fallback start tab (builder).
    pub fn with_start_tab_id(mut self, id: impl Into<String>) -> Self {
        self.start_tab_id = Some(id.into());
        self
    }

    /// Let fragment updates scroll the page (builder).
    pub fn with_scroll_y(mut self, scroll_y: bool) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// Set the scroll area selector (builder).
    pub fn with_scroll_selector(mut self, selector: impl Into<String>) -> Self {
        self.scroll_selector = selector.into();
        self
    }

    /// Set the loading indicator selector (builder).
    pub fn with_loading_selector(mut self, selector: impl Into<String>) -> Self {
        self.loading_selector = selector.into();
        self
    }

    /// Replace the status classes (builder).
    pub fn with_status_classes(mut self, classes: StatusClasses) -> Self {
        self.status_classes = classes;
        self
    }
}

// ---------------------------------------------------------------------------
// ModalConfig
// ---------------------------------------------------------------------------

/// Options for [`Modal`](crate::widgets::modal::Modal).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Id of the modal root element. Required to exist.
    pub modal_id: String,
    pub open_selector: String,
    pub close_selector: String,
    /// Open right after initialization.
    pub start_open: bool,
    pub active_class: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            modal_id: "modal".into(),
            open_selector: ".js_modal_open".into(),
            close_selector: ".js_modal_close".into(),
            start_open: false,
            active_class: "is_active".into(),
        }
    }
}

impl ModalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the modal root id (builder).
    pub fn with_modal_id(mut self, id: impl Into<String>) -> Self {
        self.modal_id = id.into();
        self
    }

    /// Set the open trigger selector (builder).
    pub fn with_open_selector(mut self, selector: impl Into<String>) -> Self {
        self.open_selector = selector.into();
        self
    }

    /// Set the close trigger selector (builder).
    pub fn with_close_selector(mut self, selector: impl Into<String>) -> Self {
        self.close_selector = selector.into();
        self
    }

    /// Open immediately after initialization (builder).
    pub fn with_start_open(mut self, start_open: bool) -> Self {
        self.start_open = start_open;
        self
    }

    /// Set the class marking the modal open (builder).
    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }
}

// ---------------------------------------------------------------------------
// FocusAreaConfig
// ---------------------------------------------------------------------------

/// Options for [`FocusArea`](crate::widgets::focus_area::FocusArea).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FocusAreaConfig {
    pub container_id: String,
    /// Button that enters the area on click.
    pub enter_button_id: Option<String>,
    /// Button that exits the area on click.
    pub exit_button_id: Option<String>,
    /// Focused on enter; defaults to the first focusable element.
    pub focus_on_enter_id: Option<String>,
    /// Focused on exit.
    pub focus_on_exit_id: Option<String>,
    pub active_class: String,
}

impl Default for FocusAreaConfig {
    fn default() -> Self {
        Self {
            container_id: "focusTrap_container".into(),
            enter_button_id: None,
            exit_button_id: None,
            focus_on_enter_id: None,
            focus_on_exit_id: None,
            active_class: "is_stuck".into(),
        }
    }
}

impl FocusAreaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container id (builder).
    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// Set the enter button id (builder).
    pub fn with_enter_button_id(mut self, id: impl Into<String>) -> Self {
        self.enter_button_id = Some(id.into());
        self
    }

    /// Set the exit button id (builder).
    pub fn with_exit_button_id(mut self, id: impl Into<String>) -> Self {
        self.exit_button_id = Some(id.into());
        self
    }

    /// Set the element focused on enter (builder).
    pub fn with_focus_on_enter_id(mut self, id: impl Into<String>) -> Self {
        self.focus_on_enter_id = Some(id.into());
        self
    }

    /// Set the element focused on exit (builder).
    pub fn with_focus_on_exit_id(mut self, id: impl Into<String>) -> Self {
        self.focus_on_exit_id = Some(id.into());
        self
    }

    /// Set the class marking the area active (builder).
    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tab_nav_defaults() {
        let config = TabNavConfig::default();
        assert_eq!(config.container_selector, "#tabNav");
        assert_eq!(config.scroll_selector, ".js_tabNav_scrollArea");
        assert!(!config.scroll_y);
        assert_eq!(config.status_classes.active, "is_active");
    }

    #[test]
    fn tab_nav_builder() {
        let config = TabNavConfig::new()
            .with_container_selector("#other")
            .with_start_tab_id("tab2")
            .with_scroll_y(true);
        assert_eq!(config.container_selector, "#other");
        assert_eq!(config.start_tab_id.as_deref(), Some("tab2"));
        assert!(config.scroll_y);
    }

    #[test]
    fn modal_builder() {
        let config = ModalConfig::new().with_modal_id("dialog").with_start_open(true);
        assert_eq!(config.modal_id, "dialog");
        assert!(config.start_open);
        assert_eq!(config.close_selector, ".js_modal_close");
    }

    #[test]
    fn focus_area_defaults() {
        let config = FocusAreaConfig::default();
        assert_eq!(config.container_id, "focusTrap_container");
        assert_eq!(config.active_class, "is_stuck");
        assert!(config.enter_button_id.is_none());
    }

    #[test]
    fn deserialize_partial_with_unknown_keys() {
        let config: TabNavConfig = serde_json::from_str(
            r#"{ "start_tab_id": "tab3", "status_classes": { "loaded": "done" }, "colour": "red" }"#,
        )
        .unwrap();
        assert_eq!(config.start_tab_id.as_deref(), Some("tab3"));
        assert_eq!(config.status_classes.loaded, "done");
        assert_eq!(config.status_classes.active, "is_active");
        assert_eq!(config.container_selector, "#tabNav");
    }

    #[test]
    fn deserialize_modal_empty_object() {
        let config: ModalConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ModalConfig::default());
    }
}
