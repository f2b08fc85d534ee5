//! # page-widgets
//!
//! Three small page widgets (a modal dialog, a focus trap area and a tab
//! navigation with lazy loading) running on a headless document model.
//!
//! The widgets query elements with CSS selectors, listen for clicks and key
//! presses, express state through classes and ARIA attributes, and emit
//! named lifecycle events to observers. The document model underneath is a
//! slotmap-backed element tree with a selector engine, bubbling event
//! dispatch and a focus model, so everything runs and tests without a
//! browser. The `web` feature adds a [`host::Host`] backed by the real window.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: slotmap-backed element arena with tree operations and queries
//! - **[`selector`]**: logos tokenizer, selector parser and right-to-left matcher
//! - **[`event`]**: keys, DOM events, listener registry, widget event emitters
//! - **[`document`]**: dispatch, focus and the default Tab action
//! - **[`focus`]**: focusable selector list and the focus chain
//! - **[`host`]**: URL fragment, scroll lock and viewport width
//! - **[`widgets`]**: Modal, FocusArea, TabNav
//! - **[`config`]**: widget options with serde support
//! - **[`testing`]**: Pilot, event log, fixtures, markup snapshots
//!
//! ## Example
//!
//! ```
//! use page_widgets::config::TabNavConfig;
//! use page_widgets::document::Document;
//! use page_widgets::testing::fixtures;
//! use page_widgets::widgets::TabNav;
//!
//! let mut document = Document::from_dom(fixtures::tab_nav_page(&[("tab1", false), ("tab2", true)]));
//! let nav = TabNav::new(TabNavConfig::default());
//! nav.add_event_listener("change:end", |_, event| println!("{event:?}"));
//! nav.init(&mut document)?;
//!
//! let tab2 = document.dom().get_element_by_id("tab2").unwrap();
//! document.click(tab2);
//! assert!(nav.is_loading(tab2));
//! nav.finish_loading(&mut document, tab2);
//! assert!(nav.is_loaded(tab2));
//! # Ok::<(), page_widgets::Error>(())
//! ```

// Foundation
pub mod error;
pub mod geometry;
pub mod scroll;

// Document model
pub mod dom;
pub mod selector;
pub mod event;
pub mod document;
pub mod focus;
pub mod host;

// Widgets
pub mod config;
pub mod widgets;

// Test support
pub mod testing;

pub use document::Document;
pub use error::{Error, Result};
