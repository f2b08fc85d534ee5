//! Crate error type.

use crate::selector::ParseError;

/// Errors raised while initializing or driving a widget.
///
/// Only misconfiguration surfaces as an error. Missing optional markup
/// leaves a widget inert instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The modal root element does not exist.
    #[error("modal element not found: #{0}")]
    ModalNotFound(String),

    /// A configured selector failed to parse.
    #[error("invalid selector: {0}")]
    Selector(#[from] ParseError),

    /// The node passed to `activate` is not one of the widget's tabs.
    #[error("node is not a tab of this navigation")]
    UnknownTab,
}

pub type Result<T> = std::result::Result<T, Error>;
