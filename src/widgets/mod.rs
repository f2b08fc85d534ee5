//! Page widgets: Modal, FocusArea, TabNav.
//!
//! Each widget is created from its options, observed through
//! `add_event_listener`, then wired to a document with `init`. None of them
//! depends on another.

pub mod focus_area;
pub mod modal;
pub mod tab_nav;

pub use focus_area::{FocusArea, FocusAreaEvent};
pub use modal::{Modal, ModalEvent};
pub use tab_nav::{TabNav, TabNavEvent};
