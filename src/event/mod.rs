//! Event system: keyboard input, DOM events and listeners, widget observers.

pub mod dom;
pub mod emitter;
pub mod handler;
pub mod input;

pub use dom::{DomEvent, EventType, ListenerTarget};
pub use emitter::{EventEmitter, ObserverId, WidgetEvent};
pub use handler::{bubble_path, DomListener, ListenerId, ListenerRegistry};
pub use input::{Key, KeyEvent, Modifiers};
