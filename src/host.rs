//! Process-wide browser state behind a narrow accessor.
//!
//! Widgets never touch the address bar or the body style directly; they go
//! through [`Host`]. [`MemoryHost`] keeps that state in memory for headless
//! use and tests. With the `web` feature, `WebHost` forwards to the real
//! browser window.

use std::any::Any;

/// Access to the URL fragment, page scroll lock and viewport size.
pub trait Host {
    /// Current fragment including the leading `#`, or `""` when none.
    fn fragment(&self) -> String;

    /// Replace the fragment without scrolling or adding a history entry
    /// (`history.replaceState`).
    fn replace_fragment(&mut self, fragment: &str);

    /// Assign the fragment (`location.hash = ...`): the page jumps to the
    /// target and a history entry is added.
    fn assign_fragment(&mut self, fragment: &str);

    /// Lock or unlock vertical page scroll (`body.style.overflowY`).
    fn set_scroll_locked(&mut self, locked: bool);

    fn is_scroll_locked(&self) -> bool;

    /// Viewport width in CSS pixels (`window.innerWidth`).
    fn viewport_width(&self) -> f64;

    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Normalize a fragment to `#name`, or `""` for an empty one.
pub fn normalize_fragment(fragment: &str) -> String {
    let name = fragment.strip_prefix('#').unwrap_or(fragment);
    if name.is_empty() {
        String::new()
    } else {
        format!("#{name}")
    }
}

// ---------------------------------------------------------------------------
// MemoryHost
// ---------------------------------------------------------------------------

/// In-memory [`Host`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryHost {
    fragment: String,
    /// One entry per history push; starts with the initial page.
    history: Vec<String>,
    /// Fragments that were assigned with a page jump.
    jumps: Vec<String>,
    scroll_locked: bool,
    viewport_width: f64,
}

impl MemoryHost {
    /// A host with no fragment and a 1024px viewport.
    pub fn new() -> Self {
        Self {
            fragment: String::new(),
            history: vec![String::new()],
            jumps: Vec::new(),
            scroll_locked: false,
            viewport_width: 1024.0,
        }
    }

    /// Start with a fragment already in the address bar (builder).
    pub fn with_fragment(mut self, fragment: &str) -> Self {
        self.fragment = normalize_fragment(fragment);
        self.history = vec![self.fragment.clone()];
        self
    }

    /// Set the viewport width (builder).
    pub fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Fragments assigned with a page jump, oldest first.
    pub fn jumps(&self) -> &[String] {
        &self.jumps
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = normalize_fragment(fragment);
        if let Some(current) = self.history.last_mut() {
            current.clone_from(&self.fragment);
        }
    }

    fn assign_fragment(&mut self, fragment: &str) {
        self.fragment = normalize_fragment(fragment);
        self.history.push(self.fragment.clone());
        self.jumps.push(self.fragment.clone());
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// WebHost
// ---------------------------------------------------------------------------

#[cfg(feature = "web")]
pub use web::WebHost;

#[cfg(feature = "web")]
mod web {
    use std::any::Any;

    use wasm_bindgen::JsValue;

    use super::{normalize_fragment, Host};

    /// [`Host`] backed by the browser window.
    #[derive(Debug, Clone)]
    pub struct WebHost {
        window: web_sys::Window,
    }

    impl WebHost {
        /// Attach to the global window. `None` outside a browser.
        pub fn new() -> Option<Self> {
            web_sys::window().map(|window| Self { window })
        }

        fn body(&self) -> Option<web_sys::HtmlElement> {
            self.window.document().and_then(|d| d.body())
        }
    }

    impl Host for WebHost {
        fn fragment(&self) -> String {
            self.window.location().hash().unwrap_or_default()
        }

        fn replace_fragment(&mut self, fragment: &str) {
            let location = self.window.location();
            let (Ok(origin), Ok(path)) = (location.origin(), location.pathname()) else {
                return;
            };
            let url = format!("{origin}{path}{}", normalize_fragment(fragment));
            let title = self.window.document().map(|d| d.title()).unwrap_or_default();
            if let Ok(history) = self.window.history() {
                if let Err(err) = history.replace_state_with_url(&JsValue::from_str(""), &title, Some(&url)) {
                    tracing::warn!(?err, "history.replaceState failed");
                }
            }
        }

        fn assign_fragment(&mut self, fragment: &str) {
            if let Err(err) = self.window.location().set_hash(&normalize_fragment(fragment)) {
                tracing::warn!(?err, "location.hash assignment failed");
            }
        }

        fn set_scroll_locked(&mut self, locked: bool) {
            if let Some(body) = self.body() {
                let value = if locked { "hidden" } else { "auto" };
                if let Err(err) = body.style().set_property("overflow-y", value) {
                    tracing::warn!(?err, "body overflow-y update failed");
                }
            }
        }

        fn is_scroll_locked(&self) -> bool {
            self.body()
                .and_then(|body| body.style().get_property_value("overflow-y").ok())
                .is_some_and(|value| value == "hidden")
        }

        fn viewport_width(&self) -> f64 {
            self.window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize() {
        assert_eq!(normalize_fragment("tab1"), "#tab1");
        assert_eq!(normalize_fragment("#tab1"), "#tab1");
        assert_eq!(normalize_fragment("#"), "");
        assert_eq!(normalize_fragment(""), "");
    }

    #[test]
    fn replace_does_not_grow_history() {
        let mut host = MemoryHost::new();
        host.replace_fragment("a");
        host.replace_fragment("#b");
        assert_eq!(host.fragment(), "#b");
        assert_eq!(host.history_len(), 1);
        assert!(host.jumps().is_empty());
    }

    #[test]
    fn assign_pushes_and_jumps() {
        let mut host = MemoryHost::new().with_fragment("#start");
        host.assign_fragment("next");
        assert_eq!(host.fragment(), "#next");
        assert_eq!(host.history_len(), 2);
        assert_eq!(host.jumps(), &["#next".to_string()]);
    }

    #[test]
    fn scroll_lock_and_viewport() {
        let mut host = MemoryHost::new().with_viewport_width(375.0);
        assert!(!host.is_scroll_locked());
        host.set_scroll_locked(true);
        assert!(host.is_scroll_locked());
        assert_eq!(host.viewport_width(), 375.0);
    }

    #[test]
    fn downcast_through_trait_object() {
        let host: Box<dyn Host> = Box::new(MemoryHost::new().with_fragment("x"));
        let memory = host.as_any().downcast_ref::<MemoryHost>().unwrap();
        assert_eq!(memory.fragment(), "#x");
    }
}
